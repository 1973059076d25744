//! Sampling lattice and the corner-to-world mapping.
//! World coordinates use f64 throughout.

/// Default number of cells along each axis.
pub const DEFAULT_CELLS: usize = 100;
/// Default axis range; the lattice spans `[-xyrange/2, +xyrange/2]` on x and y.
pub const DEFAULT_XYRANGE: f64 = 30.0;

/// A corner on the sampling lattice, `0 <= i, j <= cells`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridCoord {
    pub i: usize,
    pub j: usize,
}

impl GridCoord {
    pub fn new(i: usize, j: usize) -> Self {
        Self { i, j }
    }
}

/// A sampled point of the surface. `z` may be NaN or infinite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldPoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Lattice geometry: resolution and axis range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grid {
    pub cells: usize,
    pub xyrange: f64,
}

impl Grid {
    pub fn new(cells: usize, xyrange: f64) -> Self {
        Self { cells, xyrange }
    }

    /// World (x, y) of the lattice corner `c`.
    ///
    ///   x = xyrange · (i / cells − 0.5)
    ///   y = xyrange · (j / cells − 0.5)
    #[inline]
    pub fn corner(&self, c: GridCoord) -> (f64, f64) {
        let n = self.cells as f64;
        let x = self.xyrange * (c.i as f64 / n - 0.5);
        let y = self.xyrange * (c.j as f64 / n - 0.5);
        (x, y)
    }

    /// The four corners of cell `(i, j)` in polygon order:
    /// (i+1, j), (i, j), (i, j+1), (i+1, j+1).
    /// This order traces a simple (non self-intersecting) quadrilateral.
    #[inline]
    pub fn cell_corners(i: usize, j: usize) -> [GridCoord; 4] {
        [
            GridCoord::new(i + 1, j),
            GridCoord::new(i, j),
            GridCoord::new(i, j + 1),
            GridCoord::new(i + 1, j + 1),
        ]
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(DEFAULT_CELLS, DEFAULT_XYRANGE)
    }
}
