use std::time::Instant;

use crate::simulation::forces::{Acceleration, NewtonianGravity};
use crate::simulation::integrator::{bootstrap, leapfrog_step};
use crate::simulation::states::{NVec3, System};

/// Deterministic system of `n` unit masses, no rand needed
pub fn make_system(n: usize) -> System {
    let positions = (0..n)
        .map(|i| {
            let i_f = i as f64;
            NVec3::new(
                (i_f * 0.37).sin() * 5.0,
                (i_f * 0.13).cos() * 5.0,
                (i_f * 0.07).sin() * 5.0,
            )
        })
        .collect();

    System {
        positions,
        velocities: vec![NVec3::zeros(); n],
        masses: vec![1.0; n],
        t: 0.0,
    }
}

fn make_gravity() -> NewtonianGravity {
    NewtonianGravity::new(0.1, 1e-2)
}

/// Time one force evaluation, serial against rayon, for growing N
pub fn bench_gravity() {
    let ns = [200, 400, 800, 1600, 3200, 6400];
    let gravity = make_gravity();

    for n in ns {
        let sys = make_system(n);
        let mut out = vec![NVec3::zeros(); n];

        // Warm up
        gravity.accelerations_serial(sys.positions(), sys.masses(), &mut out);

        let t0 = Instant::now();
        gravity.accelerations_serial(sys.positions(), sys.masses(), &mut out);
        let dt_serial = t0.elapsed().as_secs_f64();

        #[cfg(feature = "parallel")]
        {
            gravity.accelerations_parallel(sys.positions(), sys.masses(), &mut out);

            let t1 = Instant::now();
            gravity.accelerations_parallel(sys.positions(), sys.masses(), &mut out);
            let dt_par = t1.elapsed().as_secs_f64();

            println!(
                "N = {n:5}, serial = {dt_serial:8.6} s, parallel = {dt_par:8.6} s, speedup = {:5.2}x",
                dt_serial / dt_par
            );
        }

        #[cfg(not(feature = "parallel"))]
        println!("N = {n:5}, serial = {dt_serial:8.6} s");
    }
}

/// Per-step cost of the KDK integrator as CSV, paste into a spreadsheet to graph
pub fn bench_leapfrog_curve() {
    println!("N,ms_per_step");

    let gravity = make_gravity();
    let dt = 1e-3;

    for n in (200..=3200).step_by(200) {
        // Small n: average over a few steps to smooth noise
        let steps = if n <= 800 { 5 } else { 1 };

        let mut sys = make_system(n);
        let mut acc = bootstrap(&sys, &gravity);

        let t0 = Instant::now();
        for _ in 0..steps {
            leapfrog_step(&mut sys, &mut acc, dt, &gravity);
        }
        let ms = t0.elapsed().as_secs_f64() * 1000.0 / steps as f64;

        println!("{},{:.6}", n, ms);
    }
}

/// Check that the dispatching path and the serial path agree for a size
/// large enough to go parallel
pub fn check_parallel_agreement(n: usize) -> bool {
    let sys = make_system(n);
    let gravity = make_gravity();

    let mut serial = vec![NVec3::zeros(); n];
    let mut dispatched = vec![NVec3::zeros(); n];
    gravity.accelerations_serial(sys.positions(), sys.masses(), &mut serial);
    gravity.acceleration(sys.positions(), sys.masses(), &mut dispatched);
    serial == dispatched
}
