//! Stencil-to-GLL reconstruction.
//!
//! Composes the WENO (or direct full-stencil) polynomial coefficients
//! with the precomputed transform matrices to fill row 0 of a cell's
//! differential-transform tables with GLL point values and, when asked,
//! spatial derivatives scaled by the cell width.

use super::ader::DtTable;
use super::AderOps;

/// Reconstruct GLL point values into row 0 of `dts`.
pub fn reconstruct_gll_values(stencil: &[f64], dts: &mut DtTable, ops: &AderOps, do_weno: bool) {
    let trans = &ops.trans;
    let ngll = trans.ngll;

    if do_weno {
        let mut coefs = vec![0.0; trans.ord];
        ops.weno.compute_coefs(stencil, &mut coefs);
        for ii in 0..ngll {
            let mut val = 0.0;
            for (s, &c) in coefs.iter().enumerate() {
                val += trans.coefs_to_gll[(ii, s)] * c;
            }
            dts.set(0, ii, val);
        }
    } else {
        for ii in 0..ngll {
            let mut val = 0.0;
            for (s, &avg) in stencil.iter().enumerate() {
                val += trans.sten_to_gll[(ii, s)] * avg;
            }
            dts.set(0, ii, val);
        }
    }
}

/// Reconstruct GLL point values and spatial derivatives into row 0 of
/// `dts` and `deriv_dts`; derivatives are divided by the cell width.
pub fn reconstruct_gll_values_and_derivs(
    stencil: &[f64],
    dts: &mut DtTable,
    deriv_dts: &mut DtTable,
    dcell: f64,
    ops: &AderOps,
    do_weno: bool,
) {
    let trans = &ops.trans;
    let ngll = trans.ngll;

    if do_weno {
        let mut coefs = vec![0.0; trans.ord];
        ops.weno.compute_coefs(stencil, &mut coefs);
        for ii in 0..ngll {
            let mut val = 0.0;
            let mut deriv = 0.0;
            for (s, &c) in coefs.iter().enumerate() {
                val += trans.coefs_to_gll[(ii, s)] * c;
                deriv += trans.coefs_to_deriv_gll[(ii, s)] * c;
            }
            dts.set(0, ii, val);
            deriv_dts.set(0, ii, deriv / dcell);
        }
    } else {
        for ii in 0..ngll {
            let mut val = 0.0;
            let mut deriv = 0.0;
            for (s, &avg) in stencil.iter().enumerate() {
                val += trans.sten_to_gll[(ii, s)] * avg;
                deriv += trans.sten_to_deriv_gll[(ii, s)] * avg;
            }
            dts.set(0, ii, val);
            deriv_dts.set(0, ii, deriv / dcell);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ops() -> AderOps {
        AderOps::new(5, 3, 3, true)
    }

    #[test]
    fn constant_stencil_gives_constant_values_and_zero_derivs() {
        let ops = ops();
        let stencil = [4.0; 5];
        for do_weno in [true, false] {
            let mut dts = DtTable::new(3, 3);
            let mut deriv = DtTable::new(3, 3);
            reconstruct_gll_values_and_derivs(&stencil, &mut dts, &mut deriv, 0.2, &ops, do_weno);
            for ii in 0..3 {
                assert!((dts.get(0, ii) - 4.0).abs() < 1e-12);
                assert!(deriv.get(0, ii).abs() < 1e-11);
            }
        }
    }

    #[test]
    fn linear_stencil_gives_exact_edges_and_slope() {
        let ops = ops();
        // Cell averages of p(x) = x on unit cells: just the offsets.
        let stencil = [-2.0, -1.0, 0.0, 1.0, 2.0];
        let dx = 0.5;
        for do_weno in [true, false] {
            let mut dts = DtTable::new(3, 3);
            let mut deriv = DtTable::new(3, 3);
            reconstruct_gll_values_and_derivs(&stencil, &mut dts, &mut deriv, dx, &ops, do_weno);
            assert!((dts.get(0, 0) + 0.5).abs() < 1e-10, "left edge");
            assert!((dts.get(0, 2) - 0.5).abs() < 1e-10, "right edge");
            for ii in 0..3 {
                // Reference slope 1 becomes 1/dx in physical units.
                assert!((deriv.get(0, ii) - 1.0 / dx).abs() < 1e-9);
            }
        }
    }
}
