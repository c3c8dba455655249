//! # swm-rs
//!
//! A high-order shallow-water solver core on a Cartesian A-grid:
//! - WENO reconstruction from cell averages to GLL point values
//! - ADER single-stage time integration via Cauchy-Kowalewski
//!   differential transforms
//! - Well-balanced f-wave Riemann coupling (the free surface, not the
//!   thickness, enters the pressure gradient)
//! - Strang-alternating dimensional splitting with CFL step selection
//! - An analytic initial-condition catalogue and VTK frame output
//!
//! The crate exposes the spatial operator (`Solver`) to an outer
//! integrator; `simulation::run` is a ready-made driver.

pub mod basis;
pub mod config;
pub mod grid;
pub mod init;
pub mod io;
pub mod limiter;
pub mod polynomial;
pub mod simulation;
pub mod solver;
pub mod state;

// Re-export the main types for convenience.
pub use basis::Transforms;
pub use config::{BoundaryKind, ConfigError, InitProfile, SolverConfig};
pub use grid::Grid;
pub use limiter::WenoLimiter;
pub use simulation::{run, RunError, RunReport};
pub use solver::{AderOps, Solver, SweepDir};
pub use state::{
    BathArr, EdgeLimits, Location, StateArr, StateError, SurfLimits, TendArr, ID_H, ID_U, ID_V,
    NUM_STATE,
};
