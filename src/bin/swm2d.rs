//! Command-line driver: `swm2d <input.json>`.

use std::path::Path;
use std::process::ExitCode;

use swm_rs::{simulation, SolverConfig};

fn main() -> ExitCode {
    env_logger::init();

    let Some(path) = std::env::args().nth(1) else {
        eprintln!("usage: swm2d <input.json>");
        return ExitCode::FAILURE;
    };

    let config = match SolverConfig::from_path(Path::new(&path)) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("swm2d: {}", err);
            return ExitCode::FAILURE;
        }
    };

    match simulation::run(&config) {
        Ok(report) => {
            println!(
                "t = {:.6} after {} steps; relative mass change {:.3e}",
                report.final_time, report.n_steps, report.mass_change
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("swm2d: {}", err);
            ExitCode::FAILURE
        }
    }
}
