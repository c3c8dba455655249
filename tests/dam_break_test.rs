//! Dam-break evolution and passive transverse advection.

use swm_rs::{Solver, SolverConfig, StateArr, TendArr, ID_H, ID_U, ID_V};

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

fn run_to(solver: &mut Solver, state: &mut StateArr, tend: &mut TendArr, t_end: f64) {
    let mut etime = 0.0;
    while etime < t_end {
        let mut dt = solver.compute_time_step(0.5, state);
        if etime + dt > t_end {
            dt = t_end - etime;
        }
        advance(solver, state, tend, dt);
        etime += dt;
    }
}

/// 1-D dam break over a rectangular obstacle with open ends: the left
/// plateau is untouched while a single bore runs ahead of the dam site.
#[test]
fn dam_rect_1d_produces_a_single_forward_bore() {
    let config = SolverConfig::from_json(
        &serde_json::json!({
            "nx": 200,
            "ny": 1,
            "xlen": 1000.0,
            "ylen": 5.0,
            "bc_x": "open",
            "bc_y": "open",
            "initData": "dam_rect_1d",
            "outFile": "out/dam_rect"
        })
        .to_string(),
    )
    .unwrap();
    let mut solver = Solver::new(&config).unwrap();
    let mut state = solver.create_state();
    let mut tend = solver.create_tendency();
    solver.init_state(&mut state);

    run_to(&mut solver, &mut state, &mut tend, 2.0);
    solver.check_state(&state).expect("state stayed physical");

    let grid = *solver.grid();

    // Left plateau: the rarefaction (speed ~14 m/s) has not reached it.
    let mut plateau_err: f64 = 0.0;
    for i in 0..grid.nx {
        let x = grid.x_center(i);
        if x <= 400.0 {
            let surf = state.get_int(ID_H, 0, i) + solver.bath().get_int(0, i);
            plateau_err = plateau_err.max((surf - 20.0).abs());
        }
    }
    assert!(plateau_err < 1e-2, "left plateau moved by {:.3e}", plateau_err);

    // The forward bore: steepest thickness jump downstream of the dam.
    let mut shock_x = 0.0;
    let mut steepest: f64 = 0.0;
    for i in 0..grid.nx - 1 {
        let x = grid.x_center(i);
        if x > 650.0 {
            let jump = (state.get_int(ID_H, 0, i + 1) - state.get_int(ID_H, 0, i)).abs();
            if jump > steepest {
                steepest = jump;
                shock_x = x;
            }
        }
    }
    assert!(
        (700.0..820.0).contains(&shock_x),
        "bore at x = {} (jump {:.3})",
        shock_x,
        steepest
    );
    assert!(steepest > 0.1, "no bore formed");
}

/// Uniform H and U advect a transverse-velocity bump without touching
/// the carrying flow: V translates at exactly u per unit time.
#[test]
fn transverse_velocity_bump_advects_with_the_flow() {
    let config = SolverConfig::from_json(
        &serde_json::json!({
            "nx": 100,
            "ny": 4,
            "xlen": 10.0,
            "ylen": 0.4,
            "bc_x": "periodic",
            "bc_y": "periodic",
            "initData": "dam",
            "outFile": "out/advect"
        })
        .to_string(),
    )
    .unwrap();
    let mut solver = Solver::new(&config).unwrap();
    let mut state = solver.create_state();
    let mut tend = solver.create_tendency();

    let grid = *solver.grid();
    let bump = |x: f64| (-(x - 3.0) * (x - 3.0)).exp();
    for j in 0..grid.ny {
        for i in 0..grid.nx {
            state.set_int(ID_H, j, i, 1.0);
            state.set_int(ID_U, j, i, 1.0);
            state.set_int(ID_V, j, i, bump(grid.x_center(i)));
        }
    }
    solver.record_initial_mass(&state);

    run_to(&mut solver, &mut state, &mut tend, 1.0);

    let mut max_carrier_err: f64 = 0.0;
    let mut max_v_err: f64 = 0.0;
    for j in 0..grid.ny {
        for i in 0..grid.nx {
            max_carrier_err = max_carrier_err
                .max((state.get_int(ID_H, j, i) - 1.0).abs())
                .max((state.get_int(ID_U, j, i) - 1.0).abs());
            // V should be the bump shifted by u * t = 1.
            let expect = bump(grid.x_center(i) - 1.0);
            max_v_err = max_v_err.max((state.get_int(ID_V, j, i) - expect).abs());
        }
    }
    assert!(
        max_carrier_err < 1e-11,
        "carrier flow disturbed by {:.3e}",
        max_carrier_err
    );
    assert!(max_v_err < 1e-2, "V phase/shape error {:.3e}", max_v_err);
}
