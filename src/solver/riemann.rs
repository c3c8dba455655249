//! f-wave Riemann decomposition at cell interfaces.
//!
//! The jump in the surface-gravity flux is split across two acoustic
//! characteristics (speeds ūₙ ∓ c) and one passive-advection
//! characteristic (speed ūₙ), each upwinded independently into the
//! adjacent cell its speed points at. Thickness and normal momentum are
//! then rebuilt into a single conservative interface flux; the
//! transverse velocity keeps its two-sided advective update.

use crate::state::{EdgeLimits, SurfLimits, ID_H, ID_U, ID_V, NUM_STATE};

/// One-sided interface limits in sweep-aligned variables.
#[derive(Clone, Copy, Debug)]
pub struct InterfaceState {
    /// Thickness.
    pub h: f64,
    /// Normal velocity.
    pub un: f64,
    /// Transverse velocity.
    pub ut: f64,
    /// Free surface H + b.
    pub surf: f64,
}

/// Per-side f-wave contributions; index 0 feeds the left cell, 1 the right.
#[derive(Clone, Copy, Debug, Default)]
pub struct FwaveSides {
    pub h: [f64; 2],
    pub un: [f64; 2],
    pub ut: [f64; 2],
}

/// Decompose the flux jump across the three characteristics.
///
/// `with_transverse` gates the passive wave; a single-row domain has no
/// transverse velocity to advect.
#[inline]
pub fn fwave_decompose(
    left: InterfaceState,
    right: InterfaceState,
    g: f64,
    with_transverse: bool,
) -> FwaveSides {
    let h_bar = 0.5 * (left.h + right.h);
    let un_bar = 0.5 * (left.un + right.un);
    let c = (g * h_bar).sqrt();

    // Jump in the flux, df = (df/dq) dq.
    let df1 = right.h * right.un - left.h * left.un;
    let df2 = un_bar * (right.un - left.un) + g * (right.surf - left.surf);
    let df3 = un_bar * (right.ut - left.ut);

    // Left eigenvectors dotted with df.
    let w1 = 0.5 * df1 - h_bar * df2 / (2.0 * c);
    let w2 = 0.5 * df1 + h_bar * df2 / (2.0 * c);
    let w3 = df3;

    let mut fw = FwaveSides::default();

    // Acoustic wave at speed ūₙ - c.
    let side1 = if un_bar - c < 0.0 { 0 } else { 1 };
    fw.h[side1] += w1;
    fw.un[side1] += -c * w1 / h_bar;

    // Acoustic wave at speed ūₙ + c.
    let side2 = if un_bar + c < 0.0 { 0 } else { 1 };
    fw.h[side2] += w2;
    fw.un[side2] += c * w2 / h_bar;

    if with_transverse {
        let side3 = if un_bar < 0.0 { 0 } else { 1 };
        fw.ut[side3] += w3;
    }

    fw
}

/// Conservative interface fluxes for thickness and normal momentum,
/// rebuilt from the one-sided physical fluxes and the f-wave halves.
#[inline]
pub fn conservative_fluxes(
    left: InterfaceState,
    right: InterfaceState,
    g: f64,
    fw: &FwaveSides,
) -> (f64, f64) {
    let flux_h = 0.5 * ((left.h * left.un + fw.h[0]) + (right.h * right.un - fw.h[1]));
    let flux_un = 0.5
        * ((0.5 * left.un * left.un + g * left.surf + fw.un[0])
            + (0.5 * right.un * right.un + g * right.surf - fw.un[1]));
    (flux_h, flux_un)
}

/// Solve every x-interface: read the stored limits, decompose, and write
/// back the conservative H/U fluxes (side 0) and the V f-wave halves.
pub fn solve_interfaces_x(
    fwaves: &mut EdgeLimits,
    surf_limits: &SurfLimits,
    nx: usize,
    ny: usize,
    g: f64,
    sim1d: bool,
) {
    for j in 0..ny {
        for i in 0..=nx {
            let left = InterfaceState {
                h: fwaves.get(ID_H, 0, j, i),
                un: fwaves.get(ID_U, 0, j, i),
                ut: fwaves.get(ID_V, 0, j, i),
                surf: surf_limits.get(0, j, i),
            };
            let right = InterfaceState {
                h: fwaves.get(ID_H, 1, j, i),
                un: fwaves.get(ID_U, 1, j, i),
                ut: fwaves.get(ID_V, 1, j, i),
                surf: surf_limits.get(1, j, i),
            };

            let fw = fwave_decompose(left, right, g, !sim1d);
            let (flux_h, flux_un) = conservative_fluxes(left, right, g, &fw);

            for l in 0..NUM_STATE {
                fwaves.set(l, 0, j, i, 0.0);
                fwaves.set(l, 1, j, i, 0.0);
            }
            fwaves.set(ID_H, 0, j, i, flux_h);
            fwaves.set(ID_U, 0, j, i, flux_un);
            fwaves.set(ID_V, 0, j, i, fw.ut[0]);
            fwaves.set(ID_V, 1, j, i, fw.ut[1]);
        }
    }
}

/// Solve every y-interface; V is the normal velocity and U rides along.
pub fn solve_interfaces_y(
    fwaves: &mut EdgeLimits,
    surf_limits: &SurfLimits,
    nx: usize,
    ny: usize,
    g: f64,
) {
    for j in 0..=ny {
        for i in 0..nx {
            let left = InterfaceState {
                h: fwaves.get(ID_H, 0, j, i),
                un: fwaves.get(ID_V, 0, j, i),
                ut: fwaves.get(ID_U, 0, j, i),
                surf: surf_limits.get(0, j, i),
            };
            let right = InterfaceState {
                h: fwaves.get(ID_H, 1, j, i),
                un: fwaves.get(ID_V, 1, j, i),
                ut: fwaves.get(ID_U, 1, j, i),
                surf: surf_limits.get(1, j, i),
            };

            let fw = fwave_decompose(left, right, g, true);
            let (flux_h, flux_vn) = conservative_fluxes(left, right, g, &fw);

            for l in 0..NUM_STATE {
                fwaves.set(l, 0, j, i, 0.0);
                fwaves.set(l, 1, j, i, 0.0);
            }
            fwaves.set(ID_H, 0, j, i, flux_h);
            fwaves.set(ID_V, 0, j, i, flux_vn);
            fwaves.set(ID_U, 0, j, i, fw.ut[0]);
            fwaves.set(ID_U, 1, j, i, fw.ut[1]);
        }
    }
}
