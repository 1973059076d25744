//! Pipeline orchestrator: sample → colour → emit.
//!
//! Each call owns its cells and output stream; nothing is shared between
//! renders, so callers may run any number of them concurrently.
use std::io::Write;

use log::debug;

use crate::config::RenderConfig;
use crate::error::RenderError;
use crate::sampler::{sample_surface, ElevationRange};
use crate::svg::SvgWriter;

/// Summary of one finished render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderStats {
    pub polygons: usize,
    pub dropped: usize,
    pub range: ElevationRange,
}

/// Render the configured surface function as SVG into `out`.
pub fn render<W: Write>(config: &RenderConfig, out: W) -> Result<RenderStats, RenderError> {
    let surface = config.surface;
    render_with(config, |x, y| surface.elevation(x, y), out)
}

/// Render an arbitrary elevation function `f(x, y)` with the geometry and
/// colours of `config`. `config.surface` is ignored.
pub fn render_with<W, F>(config: &RenderConfig, f: F, out: W) -> Result<RenderStats, RenderError>
where
    W: Write,
    F: Fn(f64, f64) -> f64,
{
    config.validate()?;

    let sampled = sample_surface(&config.grid(), &config.projector(), f);
    let ramp = config.ramp();

    let mut svg = SvgWriter::begin(out, config.width, config.height)?;
    for cell in &sampled.cells {
        let fill = ramp.at(sampled.range.fraction(cell.mean_elevation));
        svg.polygon(&cell.screen, fill)?;
    }
    let polygons = svg.polygon_count();
    svg.finish()?;

    debug!(
        "rendered {}x{} grid: {} polygons, {} dropped, z in [{}, {}]",
        config.cells,
        config.cells,
        polygons,
        sampled.dropped,
        sampled.range.min,
        sampled.range.max
    );

    Ok(RenderStats { polygons, dropped: sampled.dropped, range: sampled.range })
}

/// Render into a `String`.
pub fn render_to_string(config: &RenderConfig) -> Result<String, RenderError> {
    let mut buf = Vec::new();
    render(config, &mut buf)?;
    // The emitter only writes ASCII.
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
