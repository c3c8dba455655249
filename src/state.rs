//! Model state, tendency, and interface storage.
//!
//! All containers are flat row-major `Vec<f64>` tensors with inline
//! indexing helpers. The state holds cell averages of the three fields
//! {H, U, V} = thickness, x-velocity, y-velocity, padded with `hs` halo
//! cells on every side.

use thiserror::Error;

use crate::grid::Grid;

/// Field index of the fluid thickness H.
pub const ID_H: usize = 0;
/// Field index of the x-velocity U.
pub const ID_U: usize = 1;
/// Field index of the y-velocity V.
pub const ID_V: usize = 2;
/// Number of prognostic fields.
pub const NUM_STATE: usize = 3;

/// A single interior location, as handed to tendency-application closures.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Location {
    /// Field index (ID_H / ID_U / ID_V).
    pub l: usize,
    /// Interior row.
    pub j: usize,
    /// Interior column.
    pub i: usize,
}

/// Invariant breach reported by the optional check mode.
#[derive(Debug, Error)]
pub enum StateError {
    #[error("non-positive thickness H = {h} at interior cell (j={j}, i={i})")]
    NonPositiveThickness { j: usize, i: usize, h: f64 },

    #[error("non-finite value in field {l} at interior cell (j={j}, i={i})")]
    NotFinite { l: usize, j: usize, i: usize },
}

/// Cell-averaged state over `(field, j, i)` including halos.
#[derive(Clone)]
pub struct StateArr {
    nx: usize,
    ny: usize,
    hs: usize,
    data: Vec<f64>,
}

impl StateArr {
    pub fn new(nx: usize, ny: usize, hs: usize) -> Self {
        let n = NUM_STATE * (ny + 2 * hs) * (nx + 2 * hs);
        Self {
            nx,
            ny,
            hs,
            data: vec![0.0; n],
        }
    }

    #[inline(always)]
    fn idx(&self, l: usize, j: usize, i: usize) -> usize {
        let nxh = self.nx + 2 * self.hs;
        let nyh = self.ny + 2 * self.hs;
        debug_assert!(l < NUM_STATE && j < nyh && i < nxh);
        (l * nyh + j) * nxh + i
    }

    /// Read with raw (halo-inclusive) indices.
    #[inline(always)]
    pub fn get(&self, l: usize, j: usize, i: usize) -> f64 {
        self.data[self.idx(l, j, i)]
    }

    /// Write with raw (halo-inclusive) indices.
    #[inline(always)]
    pub fn set(&mut self, l: usize, j: usize, i: usize, v: f64) {
        let q = self.idx(l, j, i);
        self.data[q] = v;
    }

    /// Read an interior cell.
    #[inline(always)]
    pub fn get_int(&self, l: usize, j: usize, i: usize) -> f64 {
        self.get(l, j + self.hs, i + self.hs)
    }

    /// Write an interior cell.
    #[inline(always)]
    pub fn set_int(&mut self, l: usize, j: usize, i: usize, v: f64) {
        self.set(l, j + self.hs, i + self.hs, v);
    }

    /// Accumulate into an interior cell.
    #[inline(always)]
    pub fn add_int(&mut self, l: usize, j: usize, i: usize, v: f64) {
        let q = self.idx(l, j + self.hs, i + self.hs);
        self.data[q] += v;
    }

    /// Sum of thickness over interior cells (plain cell sum; grid spacing
    /// cancels out of relative conservation reports).
    pub fn total_thickness(&self, grid: &Grid) -> f64 {
        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            (0..grid.ny * grid.nx)
                .into_par_iter()
                .map(|q| self.get_int(ID_H, q / grid.nx, q % grid.nx))
                .sum()
        }
        #[cfg(not(feature = "parallel"))]
        {
            let mut sum = 0.0;
            for j in 0..grid.ny {
                for i in 0..grid.nx {
                    sum += self.get_int(ID_H, j, i);
                }
            }
            sum
        }
    }

    /// Optional check mode: positivity of H and finiteness of all fields
    /// over the interior. The solver assumes both hold, so this is a
    /// debugging aid rather than part of the hot path.
    pub fn validate(&self, grid: &Grid) -> Result<(), StateError> {
        for j in 0..grid.ny {
            for i in 0..grid.nx {
                let h = self.get_int(ID_H, j, i);
                if !(h > 0.0) {
                    return Err(StateError::NonPositiveThickness { j, i, h });
                }
                for l in 0..NUM_STATE {
                    if !self.get_int(l, j, i).is_finite() {
                        return Err(StateError::NotFinite { l, j, i });
                    }
                }
            }
        }
        Ok(())
    }
}

/// Cell-averaged bathymetry with the same halo layout as the state.
#[derive(Clone)]
pub struct BathArr {
    nx: usize,
    ny: usize,
    hs: usize,
    data: Vec<f64>,
}

impl BathArr {
    pub fn new(nx: usize, ny: usize, hs: usize) -> Self {
        Self {
            nx,
            ny,
            hs,
            data: vec![0.0; (ny + 2 * hs) * (nx + 2 * hs)],
        }
    }

    #[inline(always)]
    fn idx(&self, j: usize, i: usize) -> usize {
        debug_assert!(j < self.ny + 2 * self.hs && i < self.nx + 2 * self.hs);
        j * (self.nx + 2 * self.hs) + i
    }

    #[inline(always)]
    pub fn get(&self, j: usize, i: usize) -> f64 {
        self.data[self.idx(j, i)]
    }

    #[inline(always)]
    pub fn set(&mut self, j: usize, i: usize, v: f64) {
        let q = self.idx(j, i);
        self.data[q] = v;
    }

    #[inline(always)]
    pub fn get_int(&self, j: usize, i: usize) -> f64 {
        self.get(j + self.hs, i + self.hs)
    }

    #[inline(always)]
    pub fn set_int(&mut self, j: usize, i: usize, v: f64) {
        self.set(j + self.hs, i + self.hs, v);
    }
}

/// Cell-centered tendencies over the interior, `(field, j, i)`.
#[derive(Clone)]
pub struct TendArr {
    nx: usize,
    ny: usize,
    data: Vec<f64>,
}

impl TendArr {
    pub fn new(nx: usize, ny: usize) -> Self {
        Self {
            nx,
            ny,
            data: vec![0.0; NUM_STATE * ny * nx],
        }
    }

    #[inline(always)]
    fn idx(&self, l: usize, j: usize, i: usize) -> usize {
        (l * self.ny + j) * self.nx + i
    }

    #[inline(always)]
    pub fn get(&self, l: usize, j: usize, i: usize) -> f64 {
        self.data[self.idx(l, j, i)]
    }

    #[inline(always)]
    pub fn set(&mut self, l: usize, j: usize, i: usize, v: f64) {
        let q = self.idx(l, j, i);
        self.data[q] = v;
    }

    #[inline(always)]
    pub fn add(&mut self, l: usize, j: usize, i: usize, v: f64) {
        let q = self.idx(l, j, i);
        self.data[q] += v;
    }

    /// Zero one field's tendency everywhere.
    pub fn zero_field(&mut self, l: usize) {
        let lo = self.idx(l, 0, 0);
        let hi = lo + self.ny * self.nx;
        for v in &mut self.data[lo..hi] {
            *v = 0.0;
        }
    }

    /// Zero everything (the 1-D no-op sweep).
    pub fn zero(&mut self) {
        for v in &mut self.data {
            *v = 0.0;
        }
    }

    /// Maximum absolute tendency of one field (diagnostics and tests).
    pub fn max_abs_field(&self, l: usize) -> f64 {
        let lo = self.idx(l, 0, 0);
        let hi = lo + self.ny * self.nx;
        self.data[lo..hi].iter().fold(0.0f64, |m, &v| m.max(v.abs()))
    }
}

/// Interface storage for the f-wave decomposition: `(field, side, j, i)`
/// with one extra index in each direction so either sweep fits.
///
/// `side = 0` is the limit/contribution on the left (or lower) side of
/// the interface, `side = 1` the right (or upper) side.
#[derive(Clone)]
pub struct EdgeLimits {
    nx1: usize,
    ny1: usize,
    data: Vec<f64>,
}

impl EdgeLimits {
    pub fn new(nx: usize, ny: usize) -> Self {
        Self {
            nx1: nx + 1,
            ny1: ny + 1,
            data: vec![0.0; NUM_STATE * 2 * (ny + 1) * (nx + 1)],
        }
    }

    #[inline(always)]
    fn idx(&self, l: usize, side: usize, j: usize, i: usize) -> usize {
        debug_assert!(l < NUM_STATE && side < 2 && j < self.ny1 && i < self.nx1);
        ((l * 2 + side) * self.ny1 + j) * self.nx1 + i
    }

    #[inline(always)]
    pub fn get(&self, l: usize, side: usize, j: usize, i: usize) -> f64 {
        self.data[self.idx(l, side, j, i)]
    }

    #[inline(always)]
    pub fn set(&mut self, l: usize, side: usize, j: usize, i: usize, v: f64) {
        let q = self.idx(l, side, j, i);
        self.data[q] = v;
    }
}

/// Free-surface (H + b) limits at interfaces: `(side, j, i)`.
#[derive(Clone)]
pub struct SurfLimits {
    nx1: usize,
    ny1: usize,
    data: Vec<f64>,
}

impl SurfLimits {
    pub fn new(nx: usize, ny: usize) -> Self {
        Self {
            nx1: nx + 1,
            ny1: ny + 1,
            data: vec![0.0; 2 * (ny + 1) * (nx + 1)],
        }
    }

    #[inline(always)]
    fn idx(&self, side: usize, j: usize, i: usize) -> usize {
        debug_assert!(side < 2 && j < self.ny1 && i < self.nx1);
        (side * self.ny1 + j) * self.nx1 + i
    }

    #[inline(always)]
    pub fn get(&self, side: usize, j: usize, i: usize) -> f64 {
        self.data[self.idx(side, j, i)]
    }

    #[inline(always)]
    pub fn set(&mut self, side: usize, j: usize, i: usize, v: f64) {
        let q = self.idx(side, j, i);
        self.data[q] = v;
    }
}
