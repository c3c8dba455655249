//! Cauchy-Kowalewski differential transforms.
//!
//! Each reconstructed quantity carries an `nAder x ngll` table of
//! temporal Taylor coefficients at the cell's GLL points. Row 0 comes
//! from spatial reconstruction; higher rows trade the spatial
//! derivatives of the governing equations for time derivatives:
//!
//!   ∂ₜH  = -∂ξ(H·uₙ)
//!   ∂ₜuₙ = -∂ξ(uₙ²/2 + g·(H + b))
//!   ∂ₜuₜ = -uₙ·∂ξuₜ
//!
//! with ξ the sweep direction and (uₙ, uₜ) the normal and transverse
//! velocities, which is the same recurrence for the X and the Y sweep.

use faer::Mat;

/// Temporal Taylor table of one quantity at the cell's GLL points.
#[derive(Clone)]
pub struct DtTable {
    n_ader: usize,
    ngll: usize,
    a: Vec<f64>,
}

impl DtTable {
    pub fn new(n_ader: usize, ngll: usize) -> Self {
        Self {
            n_ader,
            ngll,
            a: vec![0.0; n_ader * ngll],
        }
    }

    #[inline(always)]
    pub fn get(&self, kt: usize, ii: usize) -> f64 {
        debug_assert!(kt < self.n_ader && ii < self.ngll);
        self.a[kt * self.ngll + ii]
    }

    #[inline(always)]
    pub fn set(&mut self, kt: usize, ii: usize, v: f64) {
        debug_assert!(kt < self.n_ader && ii < self.ngll);
        self.a[kt * self.ngll + ii] = v;
    }

    #[inline(always)]
    pub fn ngll(&self) -> usize {
        self.ngll
    }
}

/// Fill rows 1..nAder of every table from the row-0 reconstructions.
///
/// On entry the state tables (`h`, `un`, `ut`, `dut`, `surf`) must have
/// row 0 populated; the product tables are initialised here. When the
/// cell touches a solid wall in the sweep direction, the wall-adjacent
/// GLL endpoint of the normal velocity is pinned to zero at every
/// temporal order.
#[allow(clippy::too_many_arguments)]
pub fn differential_transforms(
    h: &mut DtTable,
    un: &mut DtTable,
    ut: &mut DtTable,
    dut: &mut DtTable,
    surf: &mut DtTable,
    h_un: &mut DtTable,
    un_un: &mut DtTable,
    un_dut: &mut DtTable,
    deriv_matrix: &Mat<f64>,
    dcell: f64,
    g: f64,
    n_ader: usize,
    wall_lo: bool,
    wall_hi: bool,
) {
    let ngll = h.ngll();

    for ii in 0..ngll {
        h_un.set(0, ii, h.get(0, ii) * un.get(0, ii));
        un_un.set(0, ii, un.get(0, ii) * un.get(0, ii));
        un_dut.set(0, ii, un.get(0, ii) * dut.get(0, ii));
    }

    for kt in 0..n_ader.saturating_sub(1) {
        // State at the next temporal order.
        for ii in 0..ngll {
            let mut dflux_h = 0.0;
            let mut dflux_un = 0.0;
            for s in 0..ngll {
                dflux_h += deriv_matrix[(ii, s)] * h_un.get(kt, s);
                dflux_un +=
                    deriv_matrix[(ii, s)] * (0.5 * un_un.get(kt, s) + g * surf.get(kt, s));
            }
            h.set(kt + 1, ii, -(dflux_h / dcell) / (kt + 1) as f64);
            un.set(kt + 1, ii, -(dflux_un / dcell) / (kt + 1) as f64);
            ut.set(kt + 1, ii, -un_dut.get(kt, ii) / (kt + 1) as f64);
        }
        if wall_lo {
            un.set(kt + 1, 0, 0.0);
        }
        if wall_hi {
            un.set(kt + 1, ngll - 1, 0.0);
        }

        // Dependent quantities at the next order. Bathymetry carries no
        // time derivative, so the free surface inherits H's.
        for ii in 0..ngll {
            surf.set(kt + 1, ii, h.get(kt + 1, ii));
            let mut d = 0.0;
            for s in 0..ngll {
                d += deriv_matrix[(ii, s)] * ut.get(kt + 1, s);
            }
            dut.set(kt + 1, ii, d / dcell);
        }

        // Cauchy products at the next order.
        for ii in 0..ngll {
            let mut p_h_un = 0.0;
            let mut p_un_un = 0.0;
            let mut p_un_dut = 0.0;
            for rt in 0..=kt + 1 {
                p_h_un += h.get(rt, ii) * un.get(kt + 1 - rt, ii);
                p_un_un += un.get(rt, ii) * un.get(kt + 1 - rt, ii);
                p_un_dut += un.get(rt, ii) * dut.get(kt + 1 - rt, ii);
            }
            h_un.set(kt + 1, ii, p_h_un);
            un_un.set(kt + 1, ii, p_un_un);
            un_dut.set(kt + 1, ii, p_un_dut);
        }
    }
}

/// Replace row 0 with the average of the Taylor series over [0, dt]:
/// Σ_kt X(kt) · dt^kt / (kt + 1).
pub fn time_average(table: &mut DtTable, dt: f64, n_ader: usize) {
    let ngll = table.ngll();
    for ii in 0..ngll {
        let mut dtmult = 1.0;
        let mut avg = 0.0;
        for kt in 0..n_ader {
            avg += table.get(kt, ii) * dtmult / (kt + 1) as f64;
            dtmult *= dt;
        }
        table.set(0, ii, avg);
    }
}
