//! Transform matrices connecting the three representations the solver
//! moves between: stencils of cell averages, monomial polynomial
//! coefficients on the reference cell [-1/2, 1/2], and GLL point values.
//!
//! All maps are deterministic functions of `ord` and `ngll` and are
//! built once at construction. The matrix convention follows
//! out[i] = Σ_j M[(i, j)] · in[j].

use faer::{linalg::solvers::Solve, Mat};

use crate::polynomial::{reference_cell_nodes, reference_cell_weights};

/// Precomputed transform matrices for one (ord, ngll) pair.
pub struct Transforms {
    /// Reconstruction stencil width (odd).
    pub ord: usize,
    /// Halo width, (ord-1)/2.
    pub hs: usize,
    /// Number of GLL points per cell.
    pub ngll: usize,

    /// ord cell averages -> ord polynomial coefficients.
    pub sten_to_coefs: Mat<f64>,
    /// ord coefficients -> ngll GLL point values.
    pub coefs_to_gll: Mat<f64>,
    /// ord coefficients -> ngll GLL derivative values (reference cell).
    pub coefs_to_deriv_gll: Mat<f64>,
    /// ord cell averages -> ngll GLL point values (direct, non-WENO path).
    pub sten_to_gll: Mat<f64>,
    /// ord cell averages -> ngll GLL derivative values (direct path).
    pub sten_to_deriv_gll: Mat<f64>,
    /// Differentiation in coefficient space, ord x ord.
    pub coefs_to_deriv: Mat<f64>,
    /// ngll coefficients -> ngll GLL point values (the Vandermonde map).
    pub coefs_to_gll_ngll: Mat<f64>,
    /// ngll GLL point values -> ngll coefficients (interpolation).
    pub gll_to_coefs: Mat<f64>,
    /// ngll GLL values -> ngll GLL derivative values:
    /// coefs_to_gll · coefs_to_deriv · gll_to_coefs.
    pub deriv_matrix: Mat<f64>,

    /// ord-point GLL nodes on [-1/2, 1/2].
    pub gll_pts_ord: Vec<f64>,
    /// ord-point GLL weights summing to 1.
    pub gll_wts_ord: Vec<f64>,
    /// ngll-point GLL nodes on [-1/2, 1/2].
    pub gll_pts_ngll: Vec<f64>,
    /// ngll-point GLL weights summing to 1.
    pub gll_wts_ngll: Vec<f64>,
}

impl Transforms {
    /// Build every map for the given stencil width and GLL point count.
    pub fn new(ord: usize, ngll: usize) -> Self {
        assert!(ord % 2 == 1, "stencil width must be odd");
        assert!(ngll >= 1 && ngll <= ord, "need 1 <= ngll <= ord");

        let hs = (ord - 1) / 2;
        let gll_pts_ord = reference_cell_nodes(ord);
        let gll_wts_ord = reference_cell_weights(ord);
        let gll_pts_ngll = reference_cell_nodes(ngll);
        let gll_wts_ngll = reference_cell_weights(ngll);

        let offsets: Vec<f64> = (0..ord).map(|r| r as f64 - hs as f64).collect();
        let sten_to_coefs = invert(&cell_average_matrix(&offsets, ord));

        let coefs_to_deriv = deriv_coef_matrix(ord);
        let coefs_to_gll = point_eval_matrix(&gll_pts_ngll, ord);
        let coefs_to_deriv_gll = mat_mul(&coefs_to_gll, &coefs_to_deriv);
        let sten_to_gll = mat_mul(&coefs_to_gll, &sten_to_coefs);
        let sten_to_deriv_gll = mat_mul(&coefs_to_deriv_gll, &sten_to_coefs);

        // The ADER derivative operator acts on ngll point values.
        let coefs_to_gll_ngll = point_eval_matrix(&gll_pts_ngll, ngll);
        let gll_to_coefs = invert(&coefs_to_gll_ngll);
        let deriv_matrix = mat_mul(
            &mat_mul(&coefs_to_gll_ngll, &deriv_coef_matrix(ngll)),
            &gll_to_coefs,
        );

        Self {
            ord,
            hs,
            ngll,
            sten_to_coefs,
            coefs_to_gll,
            coefs_to_deriv_gll,
            sten_to_gll,
            sten_to_deriv_gll,
            coefs_to_deriv,
            coefs_to_gll_ngll,
            gll_to_coefs,
            deriv_matrix,
            gll_pts_ord,
            gll_wts_ord,
            gll_pts_ngll,
            gll_wts_ngll,
        }
    }
}

/// Matrix of cell averages of monomials: row r holds the averages of
/// x^k over the unit-width cell centered at `offsets[r]`.
pub(crate) fn cell_average_matrix(offsets: &[f64], ncoef: usize) -> Mat<f64> {
    let mut a = Mat::zeros(offsets.len(), ncoef);
    for (r, &m) in offsets.iter().enumerate() {
        let lo = m - 0.5;
        let hi = m + 0.5;
        for k in 0..ncoef {
            let p = (k + 1) as i32;
            a[(r, k)] = (hi.powi(p) - lo.powi(p)) / p as f64;
        }
    }
    a
}

/// Point-evaluation (Vandermonde) matrix: row i holds pts[i]^k.
pub(crate) fn point_eval_matrix(pts: &[f64], ncoef: usize) -> Mat<f64> {
    let mut a = Mat::zeros(pts.len(), ncoef);
    for (i, &x) in pts.iter().enumerate() {
        let mut xp = 1.0;
        for k in 0..ncoef {
            a[(i, k)] = xp;
            xp *= x;
        }
    }
    a
}

/// Differentiation in coefficient space: out_k = (k+1) c_{k+1}.
fn deriv_coef_matrix(n: usize) -> Mat<f64> {
    let mut d = Mat::zeros(n, n);
    for k in 0..n - 1 {
        d[(k, k + 1)] = (k + 1) as f64;
    }
    d
}

/// Dense inverse through full-pivot LU, solving for one column at a time.
pub(crate) fn invert(m: &Mat<f64>) -> Mat<f64> {
    let n = m.nrows();
    assert_eq!(n, m.ncols());
    let lu = m.as_ref().full_piv_lu();
    let mut inv = Mat::zeros(n, n);
    for j in 0..n {
        let mut rhs = Mat::zeros(n, 1);
        rhs[(j, 0)] = 1.0;
        let col = lu.solve(&rhs);
        for i in 0..n {
            inv[(i, j)] = col[(i, 0)];
        }
    }
    inv
}

/// Plain triple-loop matrix product.
pub(crate) fn mat_mul(a: &Mat<f64>, b: &Mat<f64>) -> Mat<f64> {
    assert_eq!(a.ncols(), b.nrows());
    let mut c = Mat::zeros(a.nrows(), b.ncols());
    for i in 0..a.nrows() {
        for j in 0..b.ncols() {
            let mut sum = 0.0;
            for k in 0..a.ncols() {
                sum += a[(i, k)] * b[(k, j)];
            }
            c[(i, j)] = sum;
        }
    }
    c
}
