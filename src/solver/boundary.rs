//! Boundary-condition application.
//!
//! Halo cells are refilled at the start of every directional sweep so
//! the reconstruction stencils see data consistent with the boundary
//! kind; after the sweep, the outermost interface entries of the edge
//! arrays get the matching treatment before the Riemann pass.

use crate::config::BoundaryKind;
use crate::state::{BathArr, EdgeLimits, StateArr, SurfLimits, NUM_STATE};

/// Fill the x-direction state halos. Walls mirror and pin the normal
/// velocity (field `normal_id`) to zero; open copies the edge cell
/// outward; periodic wraps.
pub fn fill_state_halos_x(
    state: &mut StateArr,
    bc: BoundaryKind,
    normal_id: usize,
    nx: usize,
    ny: usize,
    hs: usize,
) {
    for l in 0..NUM_STATE {
        for j in 0..ny {
            for ii in 0..hs {
                match bc {
                    BoundaryKind::Wall | BoundaryKind::Open => {
                        let lo = state.get(l, hs + j, hs);
                        let hi = state.get(l, hs + j, hs + nx - 1);
                        state.set(l, hs + j, ii, lo);
                        state.set(l, hs + j, nx + hs + ii, hi);
                        if bc == BoundaryKind::Wall && l == normal_id {
                            state.set(l, hs + j, ii, 0.0);
                            state.set(l, hs + j, nx + hs + ii, 0.0);
                        }
                    }
                    BoundaryKind::Periodic => {
                        let lo = state.get(l, hs + j, nx + ii);
                        let hi = state.get(l, hs + j, hs + ii);
                        state.set(l, hs + j, ii, lo);
                        state.set(l, hs + j, nx + hs + ii, hi);
                    }
                }
            }
        }
    }
}

/// Fill the y-direction state halos; the transpose of the x fill.
pub fn fill_state_halos_y(
    state: &mut StateArr,
    bc: BoundaryKind,
    normal_id: usize,
    nx: usize,
    ny: usize,
    hs: usize,
) {
    for l in 0..NUM_STATE {
        for jj in 0..hs {
            for i in 0..nx {
                match bc {
                    BoundaryKind::Wall | BoundaryKind::Open => {
                        let lo = state.get(l, hs, hs + i);
                        let hi = state.get(l, hs + ny - 1, hs + i);
                        state.set(l, jj, hs + i, lo);
                        state.set(l, ny + hs + jj, hs + i, hi);
                        if bc == BoundaryKind::Wall && l == normal_id {
                            state.set(l, jj, hs + i, 0.0);
                            state.set(l, ny + hs + jj, hs + i, 0.0);
                        }
                    }
                    BoundaryKind::Periodic => {
                        let lo = state.get(l, ny + jj, hs + i);
                        let hi = state.get(l, hs + jj, hs + i);
                        state.set(l, jj, hs + i, lo);
                        state.set(l, ny + hs + jj, hs + i, hi);
                    }
                }
            }
        }
    }
}

/// Bathymetry halos, filled once at initialisation. Same policy as the
/// state but with no wall-normal zeroing; bathymetry is passive.
pub fn fill_bath_halos(
    bath: &mut BathArr,
    bc_x: BoundaryKind,
    bc_y: BoundaryKind,
    nx: usize,
    ny: usize,
    hs: usize,
) {
    for j in 0..ny + 2 * hs {
        for ii in 0..hs {
            match bc_x {
                BoundaryKind::Wall | BoundaryKind::Open => {
                    let lo = bath.get(j, hs);
                    let hi = bath.get(j, hs + nx - 1);
                    bath.set(j, ii, lo);
                    bath.set(j, nx + hs + ii, hi);
                }
                BoundaryKind::Periodic => {
                    let lo = bath.get(j, nx + ii);
                    let hi = bath.get(j, hs + ii);
                    bath.set(j, ii, lo);
                    bath.set(j, nx + hs + ii, hi);
                }
            }
        }
    }
    for jj in 0..hs {
        for i in 0..nx + 2 * hs {
            match bc_y {
                BoundaryKind::Wall | BoundaryKind::Open => {
                    let lo = bath.get(hs, i);
                    let hi = bath.get(hs + ny - 1, i);
                    bath.set(jj, i, lo);
                    bath.set(ny + hs + jj, i, hi);
                }
                BoundaryKind::Periodic => {
                    let lo = bath.get(ny + jj, i);
                    let hi = bath.get(hs + jj, i);
                    bath.set(jj, i, lo);
                    bath.set(ny + hs + jj, i, hi);
                }
            }
        }
    }
}

/// Complete the boundary interfaces of the x-sweep edge arrays: the
/// missing half of interface 0 and interface nx, plus the wall zeroing
/// of the normal velocity on both halves.
pub fn fix_edge_limits_x(
    fwaves: &mut EdgeLimits,
    surf_limits: &mut SurfLimits,
    bc: BoundaryKind,
    normal_id: usize,
    nx: usize,
    ny: usize,
) {
    for j in 0..ny {
        match bc {
            BoundaryKind::Wall | BoundaryKind::Open => {
                for l in 0..NUM_STATE {
                    let near = fwaves.get(l, 1, j, 0);
                    fwaves.set(l, 0, j, 0, near);
                    let far = fwaves.get(l, 0, j, nx);
                    fwaves.set(l, 1, j, nx, far);
                    if bc == BoundaryKind::Wall && l == normal_id {
                        fwaves.set(l, 0, j, 0, 0.0);
                        fwaves.set(l, 1, j, 0, 0.0);
                        fwaves.set(l, 0, j, nx, 0.0);
                        fwaves.set(l, 1, j, nx, 0.0);
                    }
                }
                let near = surf_limits.get(1, j, 0);
                surf_limits.set(0, j, 0, near);
                let far = surf_limits.get(0, j, nx);
                surf_limits.set(1, j, nx, far);
            }
            BoundaryKind::Periodic => {
                for l in 0..NUM_STATE {
                    let far = fwaves.get(l, 0, j, nx);
                    fwaves.set(l, 0, j, 0, far);
                    let near = fwaves.get(l, 1, j, 0);
                    fwaves.set(l, 1, j, nx, near);
                }
                let far = surf_limits.get(0, j, nx);
                surf_limits.set(0, j, 0, far);
                let near = surf_limits.get(1, j, 0);
                surf_limits.set(1, j, nx, near);
            }
        }
    }
}

/// Complete the boundary interfaces of the y-sweep edge arrays.
pub fn fix_edge_limits_y(
    fwaves: &mut EdgeLimits,
    surf_limits: &mut SurfLimits,
    bc: BoundaryKind,
    normal_id: usize,
    nx: usize,
    ny: usize,
) {
    for i in 0..nx {
        match bc {
            BoundaryKind::Wall | BoundaryKind::Open => {
                for l in 0..NUM_STATE {
                    let near = fwaves.get(l, 1, 0, i);
                    fwaves.set(l, 0, 0, i, near);
                    let far = fwaves.get(l, 0, ny, i);
                    fwaves.set(l, 1, ny, i, far);
                    if bc == BoundaryKind::Wall && l == normal_id {
                        fwaves.set(l, 0, 0, i, 0.0);
                        fwaves.set(l, 1, 0, i, 0.0);
                        fwaves.set(l, 0, ny, i, 0.0);
                        fwaves.set(l, 1, ny, i, 0.0);
                    }
                }
                let near = surf_limits.get(1, 0, i);
                surf_limits.set(0, 0, i, near);
                let far = surf_limits.get(0, ny, i);
                surf_limits.set(1, ny, i, far);
            }
            BoundaryKind::Periodic => {
                for l in 0..NUM_STATE {
                    let far = fwaves.get(l, 0, ny, i);
                    fwaves.set(l, 0, 0, i, far);
                    let near = fwaves.get(l, 1, 0, i);
                    fwaves.set(l, 1, ny, i, near);
                }
                let far = surf_limits.get(0, ny, i);
                surf_limits.set(0, 0, i, far);
                let near = surf_limits.get(1, 0, i);
                surf_limits.set(1, ny, i, near);
            }
        }
    }
}
