//! Analytic initial profiles, cell-averaged by GLL quadrature.
//!
//! Each profile defines a free surface and a bathymetry; the stored
//! state is the thickness H = surf - b together with b, both averaged
//! over the cell with the ord-point rule. Velocities start at rest.

use std::f64::consts::PI;

use crate::config::InitProfile;
use crate::grid::Grid;
use crate::state::{BathArr, StateArr, ID_H};

/// Evaluate the profile into the interior state and bathymetry.
pub fn apply_profile(
    profile: InitProfile,
    grid: &Grid,
    gll_pts: &[f64],
    gll_wts: &[f64],
    state: &mut StateArr,
    bath: &mut BathArr,
) {
    let (nx, ny) = (grid.nx, grid.ny);

    for j in 0..ny {
        for i in 0..nx {
            match profile {
                InitProfile::Dam => {
                    // Piecewise-constant square dam; no quadrature needed.
                    let high =
                        i > nx / 4 && i < 3 * nx / 4 && j > ny / 4 && j < 3 * ny / 4;
                    state.set_int(ID_H, j, i, if high { 3.0 } else { 1.0 });
                    bath.set_int(j, i, 0.0);
                }
                InitProfile::LakeAtRestPert1d => {
                    let mut h_avg = 0.0;
                    let mut b_avg = 0.0;
                    for (ii, &pt) in gll_pts.iter().enumerate() {
                        let x = grid.x_center(i) + pt * grid.dx;
                        let b = if (1.4..=1.6).contains(&x) {
                            (1.0 + (10.0 * PI * (x - 0.5)).cos()) / 4.0
                        } else {
                            0.0
                        };
                        let surf = if (1.1..=1.2).contains(&x) { 1.001 } else { 1.0 };
                        h_avg += (surf - b) * gll_wts[ii];
                        b_avg += b * gll_wts[ii];
                    }
                    state.set_int(ID_H, j, i, h_avg);
                    bath.set_int(j, i, b_avg);
                }
                InitProfile::DamRect1d => {
                    let mut h_avg = 0.0;
                    let mut b_avg = 0.0;
                    for (ii, &pt) in gll_pts.iter().enumerate() {
                        let x = grid.x_center(i) + pt * grid.dx;
                        let b = if (x - grid.xlen / 2.0).abs() <= grid.xlen / 8.0 {
                            8.0
                        } else {
                            0.0
                        };
                        let surf = if x <= 750.0 { 20.0 } else { 15.0 };
                        h_avg += (surf - b) * gll_wts[ii];
                        b_avg += b * gll_wts[ii];
                    }
                    state.set_int(ID_H, j, i, h_avg);
                    bath.set_int(j, i, b_avg);
                }
                InitProfile::LakeAtRestPert2d => {
                    let mut h_avg = 0.0;
                    let mut b_avg = 0.0;
                    for (jj, &pty) in gll_pts.iter().enumerate() {
                        for (ii, &ptx) in gll_pts.iter().enumerate() {
                            let x = grid.x_center(i) + ptx * grid.dx;
                            let y = grid.y_center(j) + pty * grid.dy;
                            let b = 0.8
                                * (-5.0 * (x - 0.9) * (x - 0.9)
                                    - 50.0 * (y - 0.5) * (y - 0.5))
                                    .exp();
                            let surf = if (0.05..=0.15).contains(&x) { 1.01 } else { 1.0 };
                            let w = gll_wts[ii] * gll_wts[jj];
                            h_avg += (surf - b) * w;
                            b_avg += b * w;
                        }
                    }
                    state.set_int(ID_H, j, i, h_avg);
                    bath.set_int(j, i, b_avg);
                }
            }
        }
    }
}
