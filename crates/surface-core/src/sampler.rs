//! Grid sampling: evaluates the surface at every cell's corners, drops cells
//! with non-finite elevation, projects the rest and tracks the elevation range.
use crate::grid::{Grid, GridCoord, WorldPoint};
use crate::projection::{IsoProjector, ScreenPoint};

/// Running min/max of corner elevations over all valid cells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElevationRange {
    pub min: f64,
    pub max: f64,
}

impl ElevationRange {
    /// The empty range: min = +∞, max = −∞.
    pub fn empty() -> Self {
        Self { min: f64::INFINITY, max: f64::NEG_INFINITY }
    }

    #[inline]
    pub fn include(&mut self, z: f64) {
        self.min = self.min.min(z);
        self.max = self.max.max(z);
    }

    /// True when the range cannot normalise: nothing sampled, or a flat surface.
    pub fn is_degenerate(&self) -> bool {
        !(self.min.is_finite() && self.max.is_finite() && self.max > self.min)
    }

    /// Position of `z` within the range, 0 at `min` and 1 at `max`.
    ///
    /// A degenerate range yields 0.0, so every cell takes the peak colour.
    pub fn fraction(&self, z: f64) -> f64 {
        if self.is_degenerate() {
            return 0.0;
        }
        (z - self.min) / (self.max - self.min)
    }
}

impl Default for ElevationRange {
    fn default() -> Self {
        Self::empty()
    }
}

/// One valid lattice cell, ready to colour and emit.
///
/// World corners are not retained; only what emission needs is kept, since a
/// full-resolution render holds `cells²` of these at once.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub coord: GridCoord,
    /// Projected corners in polygon order (see [`Grid::cell_corners`]).
    pub screen: [ScreenPoint; 4],
    /// Arithmetic mean of the four corner elevations.
    pub mean_elevation: f64,
}

/// Output of one sampling pass.
#[derive(Debug, Clone, PartialEq)]
pub struct SampledSurface {
    /// Valid cells in row-major order (i outer, j inner).
    pub cells: Vec<Cell>,
    pub range: ElevationRange,
    /// Number of cells dropped for non-finite elevation.
    pub dropped: usize,
}

/// Sample every cell of `grid` with elevation function `f`.
///
/// A cell is dropped when the sum of its four corner elevations is NaN or
/// infinite; a dropped cell is neither projected nor counted in the range.
/// With `grid.cells == 0` the result is empty and the range stays at ±∞.
pub fn sample_surface<F>(grid: &Grid, projector: &IsoProjector, f: F) -> SampledSurface
where
    F: Fn(f64, f64) -> f64,
{
    let n = grid.cells;
    let mut cells = Vec::with_capacity(n * n);
    let mut range = ElevationRange::empty();
    let mut dropped = 0;

    let corner = |c: GridCoord| {
        let (x, y) = grid.corner(c);
        WorldPoint { x, y, z: f(x, y) }
    };

    for i in 0..n {
        for j in 0..n {
            let world = Grid::cell_corners(i, j).map(&corner);
            let sum: f64 = world.iter().map(|p| p.z).sum();
            if !sum.is_finite() {
                dropped += 1;
                continue;
            }

            for p in &world {
                range.include(p.z);
            }
            cells.push(Cell {
                coord: GridCoord::new(i, j),
                screen: world.map(|p| projector.project(p)),
                mean_elevation: sum / 4.0,
            });
        }
    }

    SampledSurface { cells, range, dropped }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::SurfaceFn;
    use approx::assert_relative_eq;

    fn sample(cells: usize, xyrange: f64, f: SurfaceFn) -> SampledSurface {
        let grid = Grid::new(cells, xyrange);
        let proj = IsoProjector::new(600, 320, xyrange);
        sample_surface(&grid, &proj, |x, y| f.elevation(x, y))
    }

    #[test]
    fn cells_are_row_major() {
        let s = sample(3, 3.0, SurfaceFn::Eggbox);
        let coords: Vec<(usize, usize)> = s.cells.iter().map(|c| (c.coord.i, c.coord.j)).collect();
        let expected: Vec<(usize, usize)> =
            (0..3).flat_map(|i| (0..3).map(move |j| (i, j))).collect();
        assert_eq!(coords, expected);
        assert_eq!(s.dropped, 0);
    }

    #[test]
    fn ripple_drops_four_cells_around_origin() {
        let s = sample(4, 4.0, SurfaceFn::Ripple);
        assert_eq!(s.cells.len(), 12);
        assert_eq!(s.dropped, 4);
        for (i, j) in [(1, 1), (1, 2), (2, 1), (2, 2)] {
            assert!(
                !s.cells.iter().any(|c| c.coord == GridCoord::new(i, j)),
                "cell ({i}, {j}) touches the origin and must be dropped"
            );
        }
    }

    #[test]
    fn range_uses_corner_values_not_means() {
        // Saddle over [-1, 1]²: corner z ranges over [-0.0025, 0.01].
        let s = sample(2, 2.0, SurfaceFn::Saddle);
        assert_relative_eq!(s.range.max, 0.01, epsilon = 1e-12);
        assert_relative_eq!(s.range.min, -0.0025, epsilon = 1e-12);
        let max_mean = s.cells.iter().map(|c| c.mean_elevation).fold(f64::MIN, f64::max);
        assert!(max_mean < s.range.max);
    }

    #[test]
    fn mean_is_average_of_corners() {
        let grid = Grid::new(5, 10.0);
        let s = sample(5, 10.0, SurfaceFn::Moguls);
        for c in &s.cells {
            let avg = Grid::cell_corners(c.coord.i, c.coord.j)
                .iter()
                .map(|&k| SurfaceFn::Moguls.corner(&grid, k).z)
                .sum::<f64>()
                / 4.0;
            assert_relative_eq!(c.mean_elevation, avg);
        }
    }

    #[test]
    fn cell_stays_compact() {
        // Screen corners, mean and coordinate only.
        assert!(
            std::mem::size_of::<Cell>() <= 96,
            "Cell grew to {} bytes",
            std::mem::size_of::<Cell>()
        );
    }

    #[test]
    fn one_infinite_corner_drops_whole_cell() {
        let grid = Grid::new(2, 2.0);
        let proj = IsoProjector::new(100, 100, 2.0);
        let s = sample_surface(&grid, &proj, |x, y| {
            if x == 1.0 && y == 1.0 { f64::INFINITY } else { 0.5 }
        });
        // Only cell (1, 1) has corner (2, 2) = world (1, 1).
        assert_eq!(s.cells.len(), 3);
        assert_eq!(s.dropped, 1);
        assert!(s.cells.iter().all(|c| c.coord != GridCoord::new(1, 1)));
        assert_eq!(s.range, ElevationRange { min: 0.5, max: 0.5 });
    }

    #[test]
    fn zero_resolution_leaves_sentinel_range() {
        let s = sample(0, 30.0, SurfaceFn::Ripple);
        assert!(s.cells.is_empty());
        assert_eq!(s.range.min, f64::INFINITY);
        assert_eq!(s.range.max, f64::NEG_INFINITY);
        assert!(s.range.is_degenerate());
    }

    #[test]
    fn fraction_normalises_and_falls_back() {
        let r = ElevationRange { min: -2.0, max: 2.0 };
        assert_relative_eq!(r.fraction(-2.0), 0.0);
        assert_relative_eq!(r.fraction(0.0), 0.5);
        assert_relative_eq!(r.fraction(2.0), 1.0);

        let flat = ElevationRange { min: 0.0, max: 0.0 };
        assert_eq!(flat.fraction(0.0), 0.0);
        assert_eq!(ElevationRange::empty().fraction(1.0), 0.0);
    }
}
