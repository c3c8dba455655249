//! Mass conservation: periodic runs conserve total thickness exactly,
//! and walls let nothing through.

use swm_rs::{Solver, SolverConfig, StateArr, TendArr};

fn advance(solver: &mut Solver, state: &mut StateArr, tend: &mut TendArr, dt: f64) {
    for split in 0..solver.num_split() {
        solver.compute_tendencies(state, tend, dt, split);
        solver.apply_tendencies(
            |loc| {
                let update = dt * tend.get(loc.l, loc.j, loc.i);
                state.add_int(loc.l, loc.j, loc.i, update);
            },
            split,
        );
    }
}

/// 2-D dam break in a closed box: the water sloshes, the mass stays.
#[test]
fn dam_break_in_a_box_conserves_mass() {
    let config = SolverConfig::from_json(
        &serde_json::json!({
            "nx": 40,
            "ny": 40,
            "xlen": 1.0,
            "ylen": 1.0,
            "bc_x": "wall",
            "bc_y": "wall",
            "initData": "dam",
            "outFile": "out/dam2d"
        })
        .to_string(),
    )
    .unwrap();
    let mut solver = Solver::new(&config).unwrap();
    let mut state = solver.create_state();
    let mut tend = solver.create_tendency();
    solver.init_state(&mut state);

    let mut etime = 0.0;
    while etime < 0.2 {
        let dt = solver.compute_time_step(0.5, &state);
        advance(&mut solver, &mut state, &mut tend, dt);
        etime += dt;
    }

    solver.check_state(&state).expect("state stayed physical");
    let rel = solver.finalize(&state);
    assert!(
        rel.abs() < 1e-12,
        "relative mass change {:.3e} over t = {:.3}",
        rel,
        etime
    );
}

/// Long 1-D periodic run: waves lap the domain many times and the
/// reduction error stays at round-off.
#[test]
fn periodic_waves_conserve_mass_over_many_steps() {
    let config = SolverConfig::from_json(
        &serde_json::json!({
            "nx": 200,
            "ny": 1,
            "xlen": 2.0,
            "ylen": 0.01,
            "bc_x": "periodic",
            "bc_y": "periodic",
            "initData": "lake_at_rest_pert_1d",
            "outFile": "out/periodic"
        })
        .to_string(),
    )
    .unwrap();
    let mut solver = Solver::new(&config).unwrap();
    let mut state = solver.create_state();
    let mut tend = solver.create_tendency();
    solver.init_state(&mut state);

    for _ in 0..300 {
        let dt = solver.compute_time_step(0.5, &state);
        advance(&mut solver, &mut state, &mut tend, dt);
    }

    solver.check_state(&state).expect("state stayed physical");
    let rel = solver.finalize(&state);
    assert!(rel.abs() < 1e-10, "relative mass change {:.3e}", rel);
}
