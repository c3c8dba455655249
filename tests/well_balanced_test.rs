//! Well-balancing tests: lake-at-rest states must stay at rest exactly,
//! and small perturbations must not disturb the quiescent far field.

use swm_rs::{Solver, SolverConfig, StateArr, TendArr, ID_H, ID_U, ID_V};

/// One full split step with forward-Euler application of the
/// (time-averaged) tendencies.
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

fn step(solver: &mut Solver, state: &mut StateArr, tend: &mut TendArr, cfl: f64) -> f64 {
    let dt = solver.compute_time_step(cfl, state);
    advance(solver, state, tend, dt);
    dt
}

fn lake_config(bc: &str) -> SolverConfig {
    SolverConfig::from_json(
        &serde_json::json!({
            "nx": 100,
            "ny": 1,
            "xlen": 2.0,
            "ylen": 0.02,
            "bc_x": bc,
            "bc_y": bc,
            "initData": "lake_at_rest_pert_1d",
            "outFile": "out/lake"
        })
        .to_string(),
    )
    .unwrap()
}

/// Flatten the surface to exactly 1 everywhere, leaving the bump in the
/// bathymetry: a pure lake-at-rest state.
fn flatten_surface(solver: &mut Solver, state: &mut StateArr) {
    let nx = solver.grid().nx;
    for i in 0..nx {
        let b = solver.bath().get_int(0, i);
        state.set_int(ID_H, 0, i, 1.0 - b);
        state.set_int(ID_U, 0, i, 0.0);
        state.set_int(ID_V, 0, i, 0.0);
    }
    solver.record_initial_mass(state);
}

fn assert_lake_stays_at_rest(bc: &str) {
    let config = lake_config(bc);
    let mut solver = Solver::new(&config).unwrap();
    let mut state = solver.create_state();
    let mut tend = solver.create_tendency();
    solver.init_state(&mut state);
    flatten_surface(&mut solver, &mut state);

    for _ in 0..50 {
        step(&mut solver, &mut state, &mut tend, 0.5);
    }

    let nx = solver.grid().nx;
    let mut max_vel: f64 = 0.0;
    let mut max_surf_err: f64 = 0.0;
    for i in 0..nx {
        let surf = state.get_int(ID_H, 0, i) + solver.bath().get_int(0, i);
        max_surf_err = max_surf_err.max((surf - 1.0).abs());
        max_vel = max_vel
            .max(state.get_int(ID_U, 0, i).abs())
            .max(state.get_int(ID_V, 0, i).abs());
    }
    assert!(
        max_surf_err < 1e-12,
        "bc = {}: surface drifted by {:.3e}",
        bc,
        max_surf_err
    );
    assert!(
        max_vel < 1e-12,
        "bc = {}: spurious velocity {:.3e}",
        bc,
        max_vel
    );
}

#[test]
fn lake_at_rest_is_exact_with_walls() {
    assert_lake_stays_at_rest("wall");
}

#[test]
fn lake_at_rest_is_exact_with_periodic_boundaries() {
    assert_lake_stays_at_rest("periodic");
}

/// Scenario: the perturbed lake. Two wave packets leave the strip
/// [1.1, 1.2]; ahead of them the surface must stay flat to round-off.
#[test]
fn perturbation_leaves_the_far_field_quiescent() {
    let config = SolverConfig::from_json(
        &serde_json::json!({
            "nx": 200,
            "ny": 1,
            "xlen": 2.0,
            "ylen": 0.01,
            "bc_x": "wall",
            "bc_y": "wall",
            "initData": "lake_at_rest_pert_1d",
            "outFile": "out/lake_pert"
        })
        .to_string(),
    )
    .unwrap();
    let mut solver = Solver::new(&config).unwrap();
    let mut state = solver.create_state();
    let mut tend = solver.create_tendency();
    solver.init_state(&mut state);

    let mut etime = 0.0;
    while etime < 0.1 {
        let mut dt = solver.compute_time_step(0.5, &state);
        if etime + dt > 0.1 {
            dt = 0.1 - etime;
        }
        advance(&mut solver, &mut state, &mut tend, dt);
        etime += dt;
    }

    // The gravity-wave fronts (c ≈ 3.1 m/s) have moved ~0.31 from the
    // strip edges; well beyond them the lake is still flat.
    let grid = *solver.grid();
    let mut max_err: f64 = 0.0;
    let mut moved: f64 = 0.0;
    for i in 0..grid.nx {
        let x = grid.x_center(i);
        let surf = state.get_int(ID_H, 0, i) + solver.bath().get_int(0, i);
        if !(0.5..=1.8).contains(&x) {
            max_err = max_err.max((surf - 1.0).abs());
        }
        moved = moved.max((surf - 1.0).abs());
    }
    assert!(
        max_err < 1e-10,
        "quiescent region disturbed by {:.3e}",
        max_err
    );
    assert!(moved > 1e-5, "perturbation vanished entirely");
}
