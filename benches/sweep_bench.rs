//! Benchmarks for the directional sweep and the step computation.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use swm_rs::{Solver, SolverConfig, StateArr, TendArr};

fn dam_solver(n: usize) -> (Solver, StateArr, TendArr) {
    let config = SolverConfig::from_json(
        &serde_json::json!({
            "nx": n,
            "ny": n,
            "xlen": 1.0,
            "ylen": 1.0,
            "bc_x": "wall",
            "bc_y": "wall",
            "initData": "dam",
            "outFile": "out/bench"
        })
        .to_string(),
    )
    .unwrap();
    let mut solver = Solver::new(&config).unwrap();
    let mut state = solver.create_state();
    let tend = solver.create_tendency();
    solver.init_state(&mut state);
    (solver, state, tend)
}

fn bench_compute_tendencies(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_tendencies");
    for n in [32usize, 64, 128] {
        let (mut solver, mut state, mut tend) = dam_solver(n);
        let dt = solver.compute_time_step(0.5, &state);
        group.throughput(Throughput::Elements((n * n) as u64));
        group.bench_with_input(BenchmarkId::new("x_sweep", n), &n, |b, _| {
            b.iter(|| {
                // Split 0 alternates X/Y between calls, which is exactly
                // the production access pattern.
                solver.compute_tendencies(
                    black_box(&mut state),
                    black_box(&mut tend),
                    black_box(dt),
                    0,
                );
                solver.compute_tendencies(
                    black_box(&mut state),
                    black_box(&mut tend),
                    black_box(dt),
                    1,
                );
            });
        });
    }
    group.finish();
}

fn bench_time_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_time_step");
    for n in [64usize, 256] {
        let (solver, state, _) = dam_solver(n);
        group.throughput(Throughput::Elements((n * n) as u64));
        group.bench_with_input(BenchmarkId::new("cfl", n), &n, |b, _| {
            b.iter(|| solver.compute_time_step(black_box(0.5), black_box(&state)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_compute_tendencies, bench_time_step);
criterion_main!(benches);
