//! The spatial operator: WENO/ADER sweeps, f-wave coupling, splitting.
//!
//! `Solver` owns the precomputed operators, the bathymetry, and the
//! per-sweep interface scratch; the driver owns the state, the tendency
//! array, and the outer time loop:
//!
//! ```ignore
//! let mut solver = Solver::new(&config)?;
//! let mut state = solver.create_state();
//! let mut tend = solver.create_tendency();
//! solver.init_state(&mut state);
//! let dt = solver.compute_time_step(config.cfl, &state);
//! for split in 0..solver.num_split() {
//!     solver.compute_tendencies(&mut state, &mut tend, dt, split);
//!     solver.apply_tendencies(|loc| { /* state += dt * tend at loc */ }, split);
//! }
//! ```

pub mod ader;
pub mod boundary;
pub mod recon;
pub mod riemann;
mod sweep_x;
mod sweep_y;

use std::path::PathBuf;

use log::{debug, info};

use crate::basis::Transforms;
use crate::config::{BoundaryKind, ConfigError, InitProfile, SolverConfig};
use crate::grid::Grid;
use crate::init;
use crate::io::vtk::{self, VtkError};
use crate::limiter::WenoLimiter;
use crate::state::{
    BathArr, EdgeLimits, Location, StateArr, StateError, SurfLimits, TendArr, ID_H, ID_U, ID_V,
    NUM_STATE,
};

pub use sweep_x::compute_tendencies_x;
pub use sweep_y::compute_tendencies_y;

/// Precomputed reconstruction and time-integration operators.
pub struct AderOps {
    pub trans: Transforms,
    pub weno: WenoLimiter,
    /// Number of temporal Taylor coefficients.
    pub n_ader: usize,
    /// Replace row 0 with the step average of the Taylor series.
    pub time_avg: bool,
}

impl AderOps {
    pub fn new(ord: usize, ngll: usize, n_ader: usize, time_avg: bool) -> Self {
        Self {
            trans: Transforms::new(ord, ngll),
            weno: WenoLimiter::new(ord),
            n_ader,
            time_avg,
        }
    }
}

/// Which sweep runs first within the current full step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SweepDir {
    X,
    Y,
}

/// The shallow-water spatial operator on a Cartesian A-grid.
pub struct Solver {
    grid: Grid,
    bc_x: BoundaryKind,
    bc_y: BoundaryKind,
    profile: InitProfile,
    grav: f64,
    do_weno: bool,
    out_file: PathBuf,

    ops: AderOps,
    bath: BathArr,
    fwaves: EdgeLimits,
    surf_limits: SurfLimits,

    dim_switch: bool,
    mass_init: f64,
    frame: usize,
}

impl Solver {
    /// Build the operator from a validated configuration. Matrices are
    /// computed here, once.
    pub fn new(config: &SolverConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let ord = config.ord;
        let hs = (ord - 1) / 2;
        let grid = Grid::new(config.nx, config.ny, hs, config.xlen, config.ylen);
        let ops = AderOps::new(ord, config.ngll(), config.n_ader(), config.time_avg);

        info!(
            "swm2d: {}x{} cells, dx = {:.4}, dy = {:.4}, ord = {}, ngll = {}, nAder = {}, \
             bc = ({}, {}), profile = {}",
            grid.nx,
            grid.ny,
            grid.dx,
            grid.dy,
            ord,
            config.ngll(),
            config.n_ader(),
            config.bc_x,
            config.bc_y,
            config.init_data,
        );

        Ok(Self {
            grid,
            bc_x: config.bc_x,
            bc_y: config.bc_y,
            profile: config.init_data,
            grav: config.gravity(),
            do_weno: config.do_weno,
            out_file: config.out_file.clone(),
            bath: BathArr::new(grid.nx, grid.ny, hs),
            fwaves: EdgeLimits::new(grid.nx, grid.ny),
            surf_limits: SurfLimits::new(grid.nx, grid.ny),
            ops,
            dim_switch: true,
            mass_init: 0.0,
            frame: 0,
        })
    }

    /// Allocate a state array matching this operator's grid.
    pub fn create_state(&self) -> StateArr {
        StateArr::new(self.grid.nx, self.grid.ny, self.grid.hs)
    }

    /// Allocate a tendency array over the interior.
    pub fn create_tendency(&self) -> TendArr {
        TendArr::new(self.grid.nx, self.grid.ny)
    }

    /// Write the initial condition into `state` and the bathymetry, fill
    /// the bathymetry halos, and record the initial mass.
    pub fn init_state(&mut self, state: &mut StateArr) {
        init::apply_profile(
            self.profile,
            &self.grid,
            &self.ops.trans.gll_pts_ord,
            &self.ops.trans.gll_wts_ord,
            state,
            &mut self.bath,
        );
        boundary::fill_bath_halos(
            &mut self.bath,
            self.bc_x,
            self.bc_y,
            self.grid.nx,
            self.grid.ny,
            self.grid.hs,
        );
        self.mass_init = state.total_thickness(&self.grid);
        debug!("initial mass: {:.12e}", self.mass_init);
    }

    /// CFL-limited time step over the interior.
    pub fn compute_time_step(&self, cfl: f64, state: &StateArr) -> f64 {
        let grid = &self.grid;
        let grav = self.grav;
        let cell_dt = |j: usize, i: usize| -> f64 {
            let h = state.get_int(ID_H, j, i);
            let u = state.get_int(ID_U, j, i);
            let v = state.get_int(ID_V, j, i);
            let gw = (grav * h).sqrt();
            let dtx = cfl * grid.dx / (u + gw).abs().max((u - gw).abs());
            let dty = cfl * grid.dy / (v + gw).abs().max((v - gw).abs());
            dtx.min(dty)
        };

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            (0..grid.ny * grid.nx)
                .into_par_iter()
                .map(|q| cell_dt(q / grid.nx, q % grid.nx))
                .reduce(|| f64::INFINITY, f64::min)
        }
        #[cfg(not(feature = "parallel"))]
        {
            let mut dt = f64::INFINITY;
            for j in 0..grid.ny {
                for i in 0..grid.nx {
                    dt = dt.min(cell_dt(j, i));
                }
            }
            dt
        }
    }

    /// Number of split components per full step.
    pub fn num_split(&self) -> usize {
        2
    }

    /// The direction the given split index runs in the current step, or
    /// `None` for the 1-D no-op.
    pub fn split_direction(&self, split_index: usize) -> Option<SweepDir> {
        let first_x = self.dim_switch;
        let x_turn = (split_index == 0) == first_x;
        if x_turn {
            Some(SweepDir::X)
        } else if self.grid.sim1d() {
            None
        } else {
            Some(SweepDir::Y)
        }
    }

    /// Compute the tendencies for one split component. Mutates the state
    /// halos; the interior is read-only. After the last split of a full
    /// step the sweep order flips.
    pub fn compute_tendencies(
        &mut self,
        state: &mut StateArr,
        tend: &mut TendArr,
        dt: f64,
        split_index: usize,
    ) {
        match self.split_direction(split_index) {
            Some(SweepDir::X) => compute_tendencies_x(
                state,
                tend,
                &mut self.fwaves,
                &mut self.surf_limits,
                &self.bath,
                &self.ops,
                &self.grid,
                self.bc_x,
                self.grav,
                dt,
                self.do_weno,
            ),
            Some(SweepDir::Y) => compute_tendencies_y(
                state,
                tend,
                &mut self.fwaves,
                &mut self.surf_limits,
                &self.bath,
                &self.ops,
                &self.grid,
                self.bc_y,
                self.grav,
                dt,
                self.do_weno,
            ),
            None => tend.zero(),
        }

        if split_index == self.num_split() - 1 {
            self.dim_switch = !self.dim_switch;
        }
    }

    /// Iterate the interior, invoking the caller's update closure once
    /// per (field, j, i) location. The closure body is the integrator.
    pub fn apply_tendencies<F: FnMut(Location)>(&self, mut apply: F, _split_index: usize) {
        for l in 0..NUM_STATE {
            for j in 0..self.grid.ny {
                for i in 0..self.grid.nx {
                    apply(Location { l, j, i });
                }
            }
        }
    }

    /// Write one output frame to the configured sink.
    pub fn output(&mut self, state: &StateArr, etime: f64) -> Result<(), VtkError> {
        let path = vtk::frame_path(&self.out_file, self.frame);
        vtk::write_frame(&path, &self.grid, &self.bath, state, etime)?;
        debug!("frame {} at t = {:.6} -> {}", self.frame, etime, path.display());
        self.frame += 1;
        Ok(())
    }

    /// Relative mass change since initialisation.
    pub fn finalize(&self, state: &StateArr) -> f64 {
        let mass = state.total_thickness(&self.grid);
        let rel = (mass - self.mass_init) / self.mass_init;
        info!("relative mass change: {:.3e}", rel);
        rel
    }

    /// Optional invariant check (positivity, finiteness).
    pub fn check_state(&self, state: &StateArr) -> Result<(), StateError> {
        state.validate(&self.grid)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn bath(&self) -> &BathArr {
        &self.bath
    }

    pub fn gravity(&self) -> f64 {
        self.grav
    }

    pub fn mass_init(&self) -> f64 {
        self.mass_init
    }

    /// True while the next full step leads with the x sweep.
    pub fn first_sweep_is_x(&self) -> bool {
        self.dim_switch
    }

    /// Direct access for tests and drivers that build their own states.
    pub fn bath_mut(&mut self) -> &mut BathArr {
        &mut self.bath
    }

    /// Recompute and store the initial-mass reference (for drivers that
    /// fill the state themselves instead of using the profile catalogue).
    pub fn record_initial_mass(&mut self, state: &StateArr) {
        self.mass_init = state.total_thickness(&self.grid);
    }
}
