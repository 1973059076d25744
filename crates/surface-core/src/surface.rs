//! The closed set of surface functions z = f(x, y).
//!
//! Every variant is pure and deterministic. The only "failure" a surface can
//! produce is a non-finite z, which the sampler treats as a hole in the mesh.
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::grid::{Grid, GridCoord, WorldPoint};

/// Elevation formula selected by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SurfaceFn {
    /// sin(r) / r with r = hypot(x, y). Undefined (NaN) at the origin.
    #[default]
    #[serde(alias = "sin")]
    Ripple,
    /// (sin x + sin y) / 10.
    Eggbox,
    /// A tilted plane with a cosine bump field.
    Moguls,
    /// (0.1·x)² − (0.05·y)².
    Saddle,
}

// ── Moguls constants ─────────────────────────────────────────────────────────

const MOGUL_TILT: f64 = 0.01;
const MOGUL_AMPLITUDE: f64 = 0.01;
/// Wavelength 10 along x.
const MOGUL_FREQ_X: f64 = 2.0 * PI / 10.0;
/// Wavelength 4 along y.
const MOGUL_FREQ_Y: f64 = 2.0 * PI / 4.0;

impl SurfaceFn {
    pub const ALL: [SurfaceFn; 4] = [
        SurfaceFn::Ripple,
        SurfaceFn::Eggbox,
        SurfaceFn::Moguls,
        SurfaceFn::Saddle,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SurfaceFn::Ripple => "ripple",
            SurfaceFn::Eggbox => "eggbox",
            SurfaceFn::Moguls => "moguls",
            SurfaceFn::Saddle => "saddle",
        }
    }

    /// Elevation at world (x, y). May return NaN (ripple at the origin).
    pub fn elevation(self, x: f64, y: f64) -> f64 {
        match self {
            SurfaceFn::Ripple => {
                let r = x.hypot(y);
                r.sin() / r
            }
            SurfaceFn::Eggbox => (x.sin() + y.sin()) / 10.0,
            SurfaceFn::Moguls => {
                -MOGUL_TILT * x
                    - MOGUL_AMPLITUDE * (MOGUL_FREQ_X * x).cos() * (MOGUL_FREQ_Y * y).cos()
            }
            SurfaceFn::Saddle => (0.1 * x).powi(2) - (0.05 * y).powi(2),
        }
    }

    /// Sample the surface at a lattice corner.
    pub fn corner(self, grid: &Grid, c: GridCoord) -> WorldPoint {
        let (x, y) = grid.corner(c);
        WorldPoint { x, y, z: self.elevation(x, y) }
    }
}

impl fmt::Display for SurfaceFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SurfaceFn {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ripple" | "sin" => Ok(SurfaceFn::Ripple),
            "eggbox" => Ok(SurfaceFn::Eggbox),
            "moguls" => Ok(SurfaceFn::Moguls),
            "saddle" => Ok(SurfaceFn::Saddle),
            other => Err(ConfigError::UnknownFunction(other.to_string())),
        }
    }
}
