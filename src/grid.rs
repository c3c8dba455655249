//! Cartesian A-grid geometry.

/// Uniform Cartesian grid with halo cells on every side.
///
/// Interior cells are indexed `(j, i)` in `[0, ny) x [0, nx)`; raw array
/// indices are offset by the halo width `hs` in both directions.
#[derive(Clone, Copy, Debug)]
pub struct Grid {
    pub nx: usize,
    pub ny: usize,
    pub hs: usize,
    pub xlen: f64,
    pub ylen: f64,
    pub dx: f64,
    pub dy: f64,
}

impl Grid {
    pub fn new(nx: usize, ny: usize, hs: usize, xlen: f64, ylen: f64) -> Self {
        Self {
            nx,
            ny,
            hs,
            xlen,
            ylen,
            dx: xlen / nx as f64,
            dy: ylen / ny as f64,
        }
    }

    /// A single row of cells collapses the y sweep to a no-op.
    #[inline]
    pub fn sim1d(&self) -> bool {
        self.ny == 1
    }

    /// Center x-coordinate of interior column i.
    #[inline]
    pub fn x_center(&self, i: usize) -> f64 {
        (i as f64 + 0.5) * self.dx
    }

    /// Center y-coordinate of interior row j.
    #[inline]
    pub fn y_center(&self, j: usize) -> f64 {
        (j as f64 + 0.5) * self.dy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spacing_and_centers() {
        let grid = Grid::new(200, 1, 2, 1000.0, 5.0);
        assert!((grid.dx - 5.0).abs() < 1e-14);
        assert!((grid.dy - 5.0).abs() < 1e-14);
        assert!(grid.sim1d());
        assert!((grid.x_center(0) - 2.5).abs() < 1e-14);
        assert!((grid.x_center(199) - 997.5).abs() < 1e-14);
    }
}
