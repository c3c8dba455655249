//! X-direction sweep: reconstruct, evolve in time, decompose, assemble.

use crate::config::BoundaryKind;
use crate::grid::Grid;
use crate::state::{BathArr, EdgeLimits, StateArr, SurfLimits, TendArr, ID_H, ID_U, ID_V};

use super::ader::{differential_transforms, time_average, DtTable};
use super::boundary::{fill_state_halos_x, fix_edge_limits_x};
use super::recon::{reconstruct_gll_values, reconstruct_gll_values_and_derivs};
use super::riemann::solve_interfaces_x;
use super::AderOps;

/// Compute the x-sweep tendencies for every interior cell.
#[allow(clippy::too_many_arguments)]
pub fn compute_tendencies_x(
    state: &mut StateArr,
    tend: &mut TendArr,
    fwaves: &mut EdgeLimits,
    surf_limits: &mut SurfLimits,
    bath: &BathArr,
    ops: &AderOps,
    grid: &Grid,
    bc_x: BoundaryKind,
    g: f64,
    dt: f64,
    do_weno: bool,
) {
    let (nx, ny, hs) = (grid.nx, grid.ny, grid.hs);
    let (ord, ngll, n_ader) = (ops.trans.ord, ops.trans.ngll, ops.n_ader);
    let sim1d = grid.sim1d();
    let wall = bc_x == BoundaryKind::Wall;

    fill_state_halos_x(state, bc_x, ID_U, nx, ny, hs);

    // The transverse tendency accumulates via quadrature, so it starts
    // from zero each sweep.
    tend.zero_field(ID_V);

    let mut stencil = vec![0.0; ord];
    let mut h_dts = DtTable::new(n_ader, ngll);
    let mut u_dts = DtTable::new(n_ader, ngll);
    let mut v_dts = DtTable::new(n_ader, ngll);
    let mut dv_dts = DtTable::new(n_ader, ngll);
    let mut surf_dts = DtTable::new(n_ader, ngll);
    let mut h_u_dts = DtTable::new(n_ader, ngll);
    let mut u_u_dts = DtTable::new(n_ader, ngll);
    let mut u_dv_dts = DtTable::new(n_ader, ngll);

    for j in 0..ny {
        for i in 0..nx {
            for (s, v) in stencil.iter_mut().enumerate() {
                *v = state.get(ID_H, hs + j, i + s);
            }
            reconstruct_gll_values(&stencil, &mut h_dts, ops, do_weno);

            for (s, v) in stencil.iter_mut().enumerate() {
                *v = state.get(ID_U, hs + j, i + s);
            }
            reconstruct_gll_values(&stencil, &mut u_dts, ops, do_weno);
            if wall {
                if i == 0 {
                    u_dts.set(0, 0, 0.0);
                }
                if i == nx - 1 {
                    u_dts.set(0, ngll - 1, 0.0);
                }
            }

            for (s, v) in stencil.iter_mut().enumerate() {
                *v = state.get(ID_V, hs + j, i + s);
            }
            reconstruct_gll_values_and_derivs(
                &stencil,
                &mut v_dts,
                &mut dv_dts,
                grid.dx,
                ops,
                do_weno,
            );

            for (s, v) in stencil.iter_mut().enumerate() {
                *v = state.get(ID_H, hs + j, i + s) + bath.get(hs + j, i + s);
            }
            reconstruct_gll_values(&stencil, &mut surf_dts, ops, do_weno);

            differential_transforms(
                &mut h_dts,
                &mut u_dts,
                &mut v_dts,
                &mut dv_dts,
                &mut surf_dts,
                &mut h_u_dts,
                &mut u_u_dts,
                &mut u_dv_dts,
                &ops.trans.deriv_matrix,
                grid.dx,
                g,
                n_ader,
                wall && i == 0,
                wall && i == nx - 1,
            );

            if ops.time_avg {
                time_average(&mut h_dts, dt, n_ader);
                time_average(&mut u_dts, dt, n_ader);
                time_average(&mut v_dts, dt, n_ader);
                time_average(&mut surf_dts, dt, n_ader);
                time_average(&mut h_u_dts, dt, n_ader);
                time_average(&mut u_u_dts, dt, n_ader);
                time_average(&mut u_dv_dts, dt, n_ader);
            }

            // Edge limits: the cell's left-most GLL value is the
            // right-of-interface limit at interface i, and its right-most
            // the left-of-interface limit at interface i+1.
            fwaves.set(ID_H, 1, j, i, h_dts.get(0, 0));
            fwaves.set(ID_H, 0, j, i + 1, h_dts.get(0, ngll - 1));
            fwaves.set(ID_U, 1, j, i, u_dts.get(0, 0));
            fwaves.set(ID_U, 0, j, i + 1, u_dts.get(0, ngll - 1));
            fwaves.set(ID_V, 1, j, i, v_dts.get(0, 0));
            fwaves.set(ID_V, 0, j, i + 1, v_dts.get(0, ngll - 1));
            surf_limits.set(1, j, i, surf_dts.get(0, 0));
            surf_limits.set(0, j, i + 1, surf_dts.get(0, ngll - 1));

            // dₜV + U ∂ₓV = 0, integrated over the cell with GLL weights.
            if !sim1d {
                for ii in 0..ngll {
                    tend.add(
                        ID_V,
                        j,
                        i,
                        -u_dv_dts.get(0, ii) * ops.trans.gll_wts_ngll[ii],
                    );
                }
            }
        }
    }

    fix_edge_limits_x(fwaves, surf_limits, bc_x, ID_U, nx, ny);

    solve_interfaces_x(fwaves, surf_limits, nx, ny, g, sim1d);

    for j in 0..ny {
        for i in 0..nx {
            let flux_h_lo = fwaves.get(ID_H, 0, j, i);
            let flux_h_hi = fwaves.get(ID_H, 0, j, i + 1);
            tend.set(ID_H, j, i, -(flux_h_hi - flux_h_lo) / grid.dx);

            let flux_u_lo = fwaves.get(ID_U, 0, j, i);
            let flux_u_hi = fwaves.get(ID_U, 0, j, i + 1);
            tend.set(ID_U, j, i, -(flux_u_hi - flux_u_lo) / grid.dx);

            let fw_v = fwaves.get(ID_V, 1, j, i) + fwaves.get(ID_V, 0, j, i + 1);
            tend.add(ID_V, j, i, -fw_v / grid.dx);
        }
    }
}
