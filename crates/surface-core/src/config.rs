//! Per-render configuration.
//!
//! A `RenderConfig` is built fresh for every render (from a query string, a
//! JSON file or CLI flags), validated once, and then read-only for the whole
//! pipeline. All derived geometry (grid, projector scales) comes from it.
use serde::{Deserialize, Serialize};

use crate::color::{ColorRamp, Rgba};
use crate::error::ConfigError;
use crate::grid::{Grid, DEFAULT_CELLS, DEFAULT_XYRANGE};
use crate::projection::IsoProjector;
use crate::surface::SurfaceFn;

pub const DEFAULT_WIDTH: u32 = 600;
pub const DEFAULT_HEIGHT: u32 = 320;
/// Upper bound on grid resolution; a render emits up to `cells²` polygons.
pub const MAX_CELLS: usize = 400;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    #[serde(alias = "function")]
    pub surface: SurfaceFn,
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Grid resolution (cells per axis).
    pub cells: usize,
    /// Axis range; x and y span `[-xyrange/2, +xyrange/2]`.
    pub xyrange: f64,
    /// Colour of the highest elevation.
    pub peak: Rgba,
    /// Colour of the lowest elevation.
    pub valley: Rgba,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            surface: SurfaceFn::default(),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            cells: DEFAULT_CELLS,
            xyrange: DEFAULT_XYRANGE,
            peak: Rgba::WHITE,
            valley: Rgba::WHITE,
        }
    }
}

impl RenderConfig {
    /// Build a config from a URL query string such as
    /// `function=eggbox&width=800&peak=ff0000`.
    ///
    /// Keys and values are form-decoded (`%XX` escapes, `+` as space).
    /// Missing or empty values keep their defaults; unknown keys are ignored.
    /// When a key repeats, the first occurrence wins.
    pub fn from_query(query: &str) -> Result<Self, ConfigError> {
        let pairs = query
            .split('&')
            .filter(|s| !s.is_empty())
            .map(|s| {
                let (k, v) = s.split_once('=').unwrap_or((s, ""));
                Ok((form_decode(k)?, form_decode(v)?))
            })
            .collect::<Result<Vec<(String, String)>, ConfigError>>()?;
        let get = |key: &str| {
            pairs
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str())
                .filter(|v| !v.is_empty())
        };

        let mut cfg = Self::default();
        if let Some(v) = get("function") {
            cfg.surface = v.parse()?;
        }
        if let Some(v) = get("width") {
            cfg.width = parse_int("width", v)?;
        }
        if let Some(v) = get("height") {
            cfg.height = parse_int("height", v)?;
        }
        if let Some(v) = get("cells") {
            cfg.cells = parse_int("cells", v)?;
        }
        if let Some(v) = get("xyrange") {
            cfg.xyrange = v
                .parse()
                .map_err(|_| ConfigError::BadFloat { key: "xyrange", value: v.to_string() })?;
        }
        if let Some(v) = get("valley") {
            cfg.valley = parse_color("valley", v)?;
        }
        if let Some(v) = get("peak") {
            cfg.peak = parse_color("peak", v)?;
        }
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse and validate a JSON config. Absent fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 {
            return Err(ConfigError::ZeroDimension("width"));
        }
        if self.height == 0 {
            return Err(ConfigError::ZeroDimension("height"));
        }
        if self.cells > MAX_CELLS {
            return Err(ConfigError::TooManyCells(self.cells));
        }
        if !(self.xyrange.is_finite() && self.xyrange > 0.0) {
            return Err(ConfigError::BadRange(self.xyrange));
        }
        // Tiny ranges overflow the pixels-per-unit scale to infinity.
        if !(self.width as f64 / 2.0 / self.xyrange).is_finite() {
            return Err(ConfigError::BadRange(self.xyrange));
        }
        Ok(())
    }

    pub fn grid(&self) -> Grid {
        Grid::new(self.cells, self.xyrange)
    }

    /// Projector whose scales are derived from this config's canvas size.
    pub fn projector(&self) -> IsoProjector {
        IsoProjector::new(self.width, self.height, self.xyrange)
    }

    pub fn ramp(&self) -> ColorRamp {
        ColorRamp::new(self.peak, self.valley)
    }
}

/// Decode one `application/x-www-form-urlencoded` component.
fn form_decode(s: &str) -> Result<String, ConfigError> {
    let bad = || ConfigError::BadEncoding(s.to_string());
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut k = 0;
    while k < bytes.len() {
        match bytes[k] {
            b'+' => out.push(b' '),
            b'%' => {
                let hex = bytes.get(k + 1..k + 3).ok_or_else(bad)?;
                let hex = std::str::from_utf8(hex).map_err(|_| bad())?;
                if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
                    return Err(bad());
                }
                out.push(u8::from_str_radix(hex, 16).map_err(|_| bad())?);
                k += 2;
            }
            b => out.push(b),
        }
        k += 1;
    }
    String::from_utf8(out).map_err(|_| bad())
}

fn parse_int<T: std::str::FromStr>(key: &'static str, v: &str) -> Result<T, ConfigError> {
    v.parse()
        .map_err(|_| ConfigError::BadInteger { key, value: v.to_string() })
}

fn parse_color(key: &'static str, v: &str) -> Result<Rgba, ConfigError> {
    Rgba::from_hex(v).map_err(|source| ConfigError::BadColor { key, source })
}
