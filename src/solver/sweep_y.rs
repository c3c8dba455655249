//! Y-direction sweep; the transpose of the x sweep with the velocity
//! roles swapped: V is the normal component, U is advected.

use crate::config::BoundaryKind;
use crate::grid::Grid;
use crate::state::{BathArr, EdgeLimits, StateArr, SurfLimits, TendArr, ID_H, ID_U, ID_V};

use super::ader::{differential_transforms, time_average, DtTable};
use super::boundary::{fill_state_halos_y, fix_edge_limits_y};
use super::recon::{reconstruct_gll_values, reconstruct_gll_values_and_derivs};
use super::riemann::solve_interfaces_y;
use super::AderOps;

/// Compute the y-sweep tendencies for every interior cell.
#[allow(clippy::too_many_arguments)]
pub fn compute_tendencies_y(
    state: &mut StateArr,
    tend: &mut TendArr,
    fwaves: &mut EdgeLimits,
    surf_limits: &mut SurfLimits,
    bath: &BathArr,
    ops: &AderOps,
    grid: &Grid,
    bc_y: BoundaryKind,
    g: f64,
    dt: f64,
    do_weno: bool,
) {
    let (nx, ny, hs) = (grid.nx, grid.ny, grid.hs);
    let (ord, ngll, n_ader) = (ops.trans.ord, ops.trans.ngll, ops.n_ader);
    let wall = bc_y == BoundaryKind::Wall;

    fill_state_halos_y(state, bc_y, ID_V, nx, ny, hs);

    tend.zero_field(ID_U);

    let mut stencil = vec![0.0; ord];
    let mut h_dts = DtTable::new(n_ader, ngll);
    let mut u_dts = DtTable::new(n_ader, ngll);
    let mut du_dts = DtTable::new(n_ader, ngll);
    let mut v_dts = DtTable::new(n_ader, ngll);
    let mut surf_dts = DtTable::new(n_ader, ngll);
    let mut h_v_dts = DtTable::new(n_ader, ngll);
    let mut v_v_dts = DtTable::new(n_ader, ngll);
    let mut v_du_dts = DtTable::new(n_ader, ngll);

    for j in 0..ny {
        for i in 0..nx {
            for (s, v) in stencil.iter_mut().enumerate() {
                *v = state.get(ID_H, j + s, hs + i);
            }
            reconstruct_gll_values(&stencil, &mut h_dts, ops, do_weno);

            for (s, v) in stencil.iter_mut().enumerate() {
                *v = state.get(ID_V, j + s, hs + i);
            }
            reconstruct_gll_values(&stencil, &mut v_dts, ops, do_weno);
            if wall {
                if j == 0 {
                    v_dts.set(0, 0, 0.0);
                }
                if j == ny - 1 {
                    v_dts.set(0, ngll - 1, 0.0);
                }
            }

            for (s, v) in stencil.iter_mut().enumerate() {
                *v = state.get(ID_U, j + s, hs + i);
            }
            reconstruct_gll_values_and_derivs(
                &stencil,
                &mut u_dts,
                &mut du_dts,
                grid.dy,
                ops,
                do_weno,
            );

            for (s, v) in stencil.iter_mut().enumerate() {
                *v = state.get(ID_H, j + s, hs + i) + bath.get(j + s, hs + i);
            }
            reconstruct_gll_values(&stencil, &mut surf_dts, ops, do_weno);

            differential_transforms(
                &mut h_dts,
                &mut v_dts,
                &mut u_dts,
                &mut du_dts,
                &mut surf_dts,
                &mut h_v_dts,
                &mut v_v_dts,
                &mut v_du_dts,
                &ops.trans.deriv_matrix,
                grid.dy,
                g,
                n_ader,
                wall && j == 0,
                wall && j == ny - 1,
            );

            if ops.time_avg {
                time_average(&mut h_dts, dt, n_ader);
                time_average(&mut u_dts, dt, n_ader);
                time_average(&mut v_dts, dt, n_ader);
                time_average(&mut surf_dts, dt, n_ader);
                time_average(&mut h_v_dts, dt, n_ader);
                time_average(&mut v_v_dts, dt, n_ader);
                time_average(&mut v_du_dts, dt, n_ader);
            }

            fwaves.set(ID_H, 1, j, i, h_dts.get(0, 0));
            fwaves.set(ID_H, 0, j + 1, i, h_dts.get(0, ngll - 1));
            fwaves.set(ID_U, 1, j, i, u_dts.get(0, 0));
            fwaves.set(ID_U, 0, j + 1, i, u_dts.get(0, ngll - 1));
            fwaves.set(ID_V, 1, j, i, v_dts.get(0, 0));
            fwaves.set(ID_V, 0, j + 1, i, v_dts.get(0, ngll - 1));
            surf_limits.set(1, j, i, surf_dts.get(0, 0));
            surf_limits.set(0, j + 1, i, surf_dts.get(0, ngll - 1));

            // dₜU + V ∂ᵧU = 0, integrated with GLL weights.
            for ii in 0..ngll {
                tend.add(
                    ID_U,
                    j,
                    i,
                    -v_du_dts.get(0, ii) * ops.trans.gll_wts_ngll[ii],
                );
            }
        }
    }

    fix_edge_limits_y(fwaves, surf_limits, bc_y, ID_V, nx, ny);

    solve_interfaces_y(fwaves, surf_limits, nx, ny, g);

    for j in 0..ny {
        for i in 0..nx {
            let flux_h_lo = fwaves.get(ID_H, 0, j, i);
            let flux_h_hi = fwaves.get(ID_H, 0, j + 1, i);
            tend.set(ID_H, j, i, -(flux_h_hi - flux_h_lo) / grid.dy);

            let flux_v_lo = fwaves.get(ID_V, 0, j, i);
            let flux_v_hi = fwaves.get(ID_V, 0, j + 1, i);
            tend.set(ID_V, j, i, -(flux_v_hi - flux_v_lo) / grid.dy);

            let fw_u = fwaves.get(ID_U, 1, j, i) + fwaves.get(ID_U, 0, j + 1, i);
            tend.add(ID_U, j, i, -fw_u / grid.dy);
        }
    }
}
