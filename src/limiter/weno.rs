//! WENO reconstruction of polynomial coefficients from a cell-average
//! stencil.
//!
//! An odd stencil of width `ord` yields hs+1 overlapping sub-stencils of
//! width hs+1 (left-biased through right-biased) plus the full stencil.
//! Each candidate polynomial gets a nonlinear weight
//! w_k = idl_k / (β_k + ε)^σ from its smoothness indicator β_k (the sum
//! of squared derivatives integrated over the reference cell); the
//! full-stencil candidate is pre-adjusted so that the ideal-weight
//! combination reproduces the full-order polynomial exactly in smooth
//! data, while near a discontinuity the weights collapse onto the
//! smoothest one-sided candidate.

use faer::Mat;

use crate::basis::{cell_average_matrix, invert};

/// Nonlinear weight floor.
const EPS: f64 = 1e-20;

/// Precomputed WENO reconstruction operator for one stencil width.
pub struct WenoLimiter {
    ord: usize,
    hs: usize,
    /// Sub-stencil maps: hs+1 matrices of shape (hs+1) x (hs+1).
    lo: Vec<Mat<f64>>,
    /// Full-stencil map, ord x ord.
    hi: Mat<f64>,
    /// Smoothness quadratic form for degree-hs candidates.
    beta_lo: Mat<f64>,
    /// Smoothness quadratic form for the full-order candidate.
    beta_hi: Mat<f64>,
    /// Ideal weights, normalised; the last entry is the full stencil's.
    idl: Vec<f64>,
    /// Smoothness power σ.
    sigma: f64,
}

impl WenoLimiter {
    pub fn new(ord: usize) -> Self {
        assert!(ord % 2 == 1, "stencil width must be odd");
        let hs = (ord - 1) / 2;

        let mut lo = Vec::with_capacity(hs + 1);
        for k in 0..=hs {
            // Sub-stencil k covers cell offsets k-hs .. k.
            let offsets: Vec<f64> = (0..=hs).map(|r| (k + r) as f64 - hs as f64).collect();
            lo.push(invert(&cell_average_matrix(&offsets, hs + 1)));
        }
        let offsets: Vec<f64> = (0..ord).map(|r| r as f64 - hs as f64).collect();
        let hi = invert(&cell_average_matrix(&offsets, ord));

        // Sub-stencils share one ideal weight; the full stencil dominates
        // in smooth data.
        let mut idl = vec![1.0; hs + 2];
        idl[hs + 1] = 1000.0;
        let total: f64 = idl.iter().sum();
        for w in idl.iter_mut() {
            *w /= total;
        }

        Self {
            ord,
            hs,
            lo,
            hi,
            beta_lo: smoothness_matrix(hs + 1),
            beta_hi: smoothness_matrix(ord),
            idl,
            sigma: 2.0,
        }
    }

    /// Number of candidate polynomials (sub-stencils plus full stencil).
    pub fn num_candidates(&self) -> usize {
        self.hs + 2
    }

    /// Reconstruct `ord` polynomial coefficients from `ord` cell averages.
    ///
    /// `coefs` is fully overwritten.
    pub fn compute_coefs(&self, stencil: &[f64], coefs: &mut [f64]) {
        let ord = self.ord;
        let hs = self.hs;
        debug_assert_eq!(stencil.len(), ord);
        debug_assert_eq!(coefs.len(), ord);

        // Candidate coefficients.
        let mut lo_coefs = vec![vec![0.0; hs + 1]; hs + 1];
        for k in 0..=hs {
            let map = &self.lo[k];
            for (m, c) in lo_coefs[k].iter_mut().enumerate() {
                let mut sum = 0.0;
                for s in 0..=hs {
                    sum += map[(m, s)] * stencil[k + s];
                }
                *c = sum;
            }
        }
        let mut hi_coefs = vec![0.0; ord];
        for (m, c) in hi_coefs.iter_mut().enumerate() {
            let mut sum = 0.0;
            for s in 0..ord {
                sum += self.hi[(m, s)] * stencil[s];
            }
            *c = sum;
        }

        // Adjust the full-order candidate so the ideal-weight combination
        // returns hi_coefs exactly.
        let gamma_hi = self.idl[hs + 1];
        let mut adj = hi_coefs.clone();
        for k in 0..=hs {
            let gamma = self.idl[k];
            for m in 0..=hs {
                adj[m] -= gamma * lo_coefs[k][m];
            }
        }
        for a in adj.iter_mut() {
            *a /= gamma_hi;
        }

        // Nonlinear weights.
        let mut wts = vec![0.0; hs + 2];
        for k in 0..=hs {
            let beta = quad_form(&self.beta_lo, &lo_coefs[k]);
            wts[k] = self.idl[k] / (beta + EPS).powf(self.sigma);
        }
        let beta_hi = quad_form(&self.beta_hi, &hi_coefs);
        wts[hs + 1] = self.idl[hs + 1] / (beta_hi + EPS).powf(self.sigma);
        let total: f64 = wts.iter().sum();
        for w in wts.iter_mut() {
            *w /= total;
        }

        // Weighted combination.
        for c in coefs.iter_mut() {
            *c = 0.0;
        }
        for k in 0..=hs {
            for m in 0..=hs {
                coefs[m] += wts[k] * lo_coefs[k][m];
            }
        }
        for (m, c) in coefs.iter_mut().enumerate() {
            *c += wts[hs + 1] * adj[m];
        }
    }
}

/// β = cᵀ B c where β sums the squared derivatives of the candidate
/// polynomial integrated over the reference cell.
#[inline]
fn quad_form(b: &Mat<f64>, c: &[f64]) -> f64 {
    let n = c.len();
    let mut sum = 0.0;
    for a in 0..n {
        for bb in 0..n {
            sum += c[a] * b[(a, bb)] * c[bb];
        }
    }
    sum
}

/// B[(a, b)] = Σ_{l>=1} (a)_l (b)_l ∫ x^{a-l} x^{b-l} dx over [-1/2, 1/2],
/// with (a)_l the falling factorial.
fn smoothness_matrix(n: usize) -> Mat<f64> {
    let mut b = Mat::zeros(n, n);
    for a in 0..n {
        for c in 0..n {
            let mut sum = 0.0;
            for l in 1..=a.min(c) {
                sum += falling(a, l) * falling(c, l) * monomial_integral(a + c - 2 * l);
            }
            b[(a, c)] = sum;
        }
    }
    b
}

#[inline]
fn falling(a: usize, l: usize) -> f64 {
    let mut f = 1.0;
    for q in 0..l {
        f *= (a - q) as f64;
    }
    f
}

/// ∫_{-1/2}^{1/2} x^m dx.
#[inline]
fn monomial_integral(m: usize) -> f64 {
    if m % 2 == 1 {
        0.0
    } else {
        0.5f64.powi(m as i32) / (m + 1) as f64
    }
}
