//! Fixed-angle isometric projection of world points onto the SVG canvas.
//!
//! The x and y axes are drawn 30° from the horizontal; z points straight up.
//! All scale factors are derived from the canvas size of the current render,
//! never from process-wide constants:
//!
//!   xyscale = width / 2 / xyrange      (pixels per x or y unit)
//!   zscale  = 0.4 · height             (pixels per z unit)
//!
//!   sx = width/2  + (x − y)·cos30·xyscale
//!   sy = height/2 + (x + y)·sin30·xyscale − z·zscale
use std::f64::consts::FRAC_PI_6;

use crate::grid::WorldPoint;

/// Fraction of the canvas height covered by one unit of z.
const Z_SCALE_FACTOR: f64 = 0.4;

/// A point in SVG pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub sx: f64,
    pub sy: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IsoProjector {
    width: f64,
    height: f64,
    xyscale: f64,
    zscale: f64,
    sin30: f64,
    cos30: f64,
}

impl IsoProjector {
    pub fn new(width: u32, height: u32, xyrange: f64) -> Self {
        let width = width as f64;
        let height = height as f64;
        Self {
            width,
            height,
            xyscale: width / 2.0 / xyrange,
            zscale: height * Z_SCALE_FACTOR,
            sin30: FRAC_PI_6.sin(),
            cos30: FRAC_PI_6.cos(),
        }
    }

    pub fn xyscale(&self) -> f64 {
        self.xyscale
    }

    pub fn zscale(&self) -> f64 {
        self.zscale
    }

    /// Project a world point. Non-finite input propagates to the output;
    /// callers filter invalid cells first.
    #[inline]
    pub fn project(&self, p: WorldPoint) -> ScreenPoint {
        ScreenPoint {
            sx: self.width / 2.0 + (p.x - p.y) * self.cos30 * self.xyscale,
            sy: self.height / 2.0 + (p.x + p.y) * self.sin30 * self.xyscale - p.z * self.zscale,
        }
    }

    /// Recover world (x, y) from a screen point, given the elevation it was
    /// projected with.
    pub fn unproject(&self, s: ScreenPoint, z: f64) -> (f64, f64) {
        let diff = (s.sx - self.width / 2.0) / (self.cos30 * self.xyscale);
        let sum = (s.sy - self.height / 2.0 + z * self.zscale) / (self.sin30 * self.xyscale);
        ((sum + diff) / 2.0, (sum - diff) / 2.0)
    }
}
