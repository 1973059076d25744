//! Command-line renderer: writes one surface SVG to a file or stdout.

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use surface_core::{render, RenderConfig, Rgba, SurfaceFn};

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "render", about = "Render a 3-D surface function as an isometric SVG")]
struct Args {
    /// Surface function: ripple (alias sin), eggbox, moguls or saddle.
    #[arg(short, long)]
    function: Option<SurfaceFn>,

    /// Canvas width in pixels.
    #[arg(long)]
    width: Option<u32>,

    /// Canvas height in pixels.
    #[arg(long)]
    height: Option<u32>,

    /// Grid resolution (cells per axis).
    #[arg(long)]
    cells: Option<usize>,

    /// Axis range; x and y span [-xyrange/2, +xyrange/2].
    #[arg(long)]
    xyrange: Option<f64>,

    /// Peak colour as hex RGB, e.g. ff8000.
    #[arg(long)]
    peak: Option<Rgba>,

    /// Valley colour as hex RGB.
    #[arg(long)]
    valley: Option<Rgba>,

    /// JSON RenderConfig to start from; flags override its fields.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output file (stdout when omitted).
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl Args {
    /// Resolve the effective config: defaults, then the JSON file, then flags.
    fn resolve(&self, base: RenderConfig) -> Result<RenderConfig> {
        let mut cfg = base;
        if let Some(f) = self.function {
            cfg.surface = f;
        }
        if let Some(w) = self.width {
            cfg.width = w;
        }
        if let Some(h) = self.height {
            cfg.height = h;
        }
        if let Some(n) = self.cells {
            cfg.cells = n;
        }
        if let Some(r) = self.xyrange {
            cfg.xyrange = r;
        }
        if let Some(c) = self.peak {
            cfg.peak = c;
        }
        if let Some(c) = self.valley {
            cfg.valley = c;
        }
        cfg.validate().context("invalid render parameters")?;
        Ok(cfg)
    }
}

fn load_base(path: Option<&PathBuf>) -> Result<RenderConfig> {
    let Some(path) = path else {
        return Ok(RenderConfig::default());
    };
    let json = fs::read_to_string(path)
        .with_context(|| format!("cannot read config {}", path.display()))?;
    RenderConfig::from_json(&json).with_context(|| format!("cannot load config {}", path.display()))
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let cfg = args.resolve(load_base(args.config.as_ref())?)?;

    let out: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(
            fs::File::create(path).with_context(|| format!("cannot create {}", path.display()))?,
        ),
        None => Box::new(io::stdout().lock()),
    };
    let stats = render(&cfg, BufWriter::new(out)).context("render failed")?;

    info!(
        "{} {}x{}: {} polygons ({} dropped)",
        cfg.surface, cfg.width, cfg.height, stats.polygons, stats.dropped
    );
    if let Some(path) = &args.output {
        info!("Wrote {}", path.display());
    }
    Ok(())
}
