//! The outer time loop: CFL step selection, split tendency computation,
//! single-stage application of the time-averaged tendencies, and
//! periodic frame output.

use log::info;
use thiserror::Error;

use crate::config::{ConfigError, SolverConfig};
use crate::io::vtk::VtkError;
use crate::solver::Solver;

/// Driver failure.
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Output(#[from] VtkError),
}

/// Summary of a completed run.
#[derive(Clone, Debug)]
pub struct RunReport {
    /// Simulation time reached.
    pub final_time: f64,
    /// Full steps taken.
    pub n_steps: usize,
    /// Smallest and largest CFL step used.
    pub dt_min: f64,
    pub dt_max: f64,
    /// Relative mass change over the run.
    pub mass_change: f64,
    /// Frames written.
    pub n_frames: usize,
}

/// Run a simulation to `simLength`, writing frames every `outFreq` time
/// units (plus the initial and final frames).
pub fn run(config: &SolverConfig) -> Result<RunReport, RunError> {
    let mut solver = Solver::new(config)?;
    let mut state = solver.create_state();
    let mut tend = solver.create_tendency();
    solver.init_state(&mut state);

    let mut etime = 0.0;
    let mut n_steps = 0;
    let mut dt_min = f64::INFINITY;
    let mut dt_max: f64 = 0.0;
    let mut n_frames = 0;
    let mut next_output = config.out_freq;

    solver.output(&state, etime)?;
    n_frames += 1;

    while etime < config.sim_length {
        let mut dt = solver.compute_time_step(config.cfl, &state);
        if etime + dt > config.sim_length {
            dt = config.sim_length - etime;
        }

        for split in 0..solver.num_split() {
            solver.compute_tendencies(&mut state, &mut tend, dt, split);
            solver.apply_tendencies(
                |loc| {
                    let update = dt * tend.get(loc.l, loc.j, loc.i);
                    state.add_int(loc.l, loc.j, loc.i, update);
                },
                split,
            );
        }

        etime += dt;
        n_steps += 1;
        dt_min = dt_min.min(dt);
        dt_max = dt_max.max(dt);

        if config.out_freq > 0.0 && etime >= next_output {
            solver.output(&state, etime)?;
            n_frames += 1;
            next_output += config.out_freq;
        }
    }

    solver.output(&state, etime)?;
    n_frames += 1;

    let mass_change = solver.finalize(&state);
    info!(
        "run finished: t = {:.6}, {} steps, dt in [{:.3e}, {:.3e}]",
        etime, n_steps, dt_min, dt_max
    );

    Ok(RunReport {
        final_time: etime,
        n_steps,
        dt_min,
        dt_max,
        mass_change,
        n_frames,
    })
}
