//! Force evaluation and leapfrog step benchmarks
//!
//! Direct summation is O(N²), so the interesting output is how the serial
//! and rayon paths scale with N.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;

use nbsim::{bootstrap, gaussian_cloud, leapfrog_step, NVec3, NewtonianGravity, System};

fn make_system(n: usize) -> System {
    System::from_bodies(&gaussian_cloud(n, 1.0, 42)).unwrap()
}

fn bench_force_evaluation(c: &mut Criterion) {
    let mut group = c.benchmark_group("force_evaluation");
    let gravity = NewtonianGravity::new(1.0, 0.05);

    for &n in &[64, 256, 1024, 2048] {
        let sys = make_system(n);
        let mut out = vec![NVec3::zeros(); n];

        group.bench_with_input(BenchmarkId::new("serial", n), &n, |b, _| {
            b.iter(|| gravity.accelerations_serial(black_box(sys.positions()), sys.masses(), &mut out));
        });

        #[cfg(feature = "parallel")]
        group.bench_with_input(BenchmarkId::new("parallel", n), &n, |b, _| {
            b.iter(|| gravity.accelerations_parallel(black_box(sys.positions()), sys.masses(), &mut out));
        });
    }

    group.finish();
}

fn bench_leapfrog_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("leapfrog_step");
    let gravity = NewtonianGravity::new(1.0, 0.05);

    for &n in &[64, 256, 1024] {
        let mut sys = make_system(n);
        let mut acc = bootstrap(&sys, &gravity);

        group.bench_with_input(BenchmarkId::new("kdk", n), &n, |b, _| {
            b.iter(|| leapfrog_step(&mut sys, &mut acc, black_box(1e-3), &gravity));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_force_evaluation, bench_leapfrog_step);
criterion_main!(benches);
