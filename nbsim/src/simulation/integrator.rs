//! Fixed-step kick-drift-kick leapfrog integrator
//!
//! The step expects the acceleration at the start of the step and leaves
//! the acceleration at the end of the step in the same buffer, so in steady
//! state each step costs exactly one force evaluation. The very first
//! acceleration comes from [`bootstrap`].

use super::error::InvalidInput;
use super::forces::Acceleration;
use super::states::{check_len, NVec3, System};

/// One-time force evaluation that seeds the first half-kick
pub fn bootstrap<A: Acceleration + ?Sized>(sys: &System, forces: &A) -> Vec<NVec3> {
    let mut acc = vec![NVec3::zeros(); sys.len()];
    forces.acceleration(&sys.positions, &sys.masses, &mut acc);
    acc
}

/// Advance positions and velocities by one KDK step of size `dt`.
///
/// `acc` holds a_n on entry and a_n+1 on return. The order of the stages is
/// what makes the scheme symplectic and time-reversible; do not reorder.
/// Time is left alone, the driver owns the clock. `acc` must have one
/// entry per body.
pub fn leapfrog_step<A: Acceleration + ?Sized>(
    sys: &mut System,
    acc: &mut [NVec3],
    dt: f64,
    forces: &A,
) {
    debug_assert_eq!(acc.len(), sys.len(), "one acceleration per body");
    let half_dt = 0.5 * dt;

    // Kick: v_n+1/2 = v_n + (dt/2) * a_n
    for (v, a) in sys.velocities.iter_mut().zip(acc.iter()) {
        *v += half_dt * *a;
    }

    // Drift: x_n+1 = x_n + dt * v_n+1/2
    for (x, v) in sys.positions.iter_mut().zip(sys.velocities.iter()) {
        *x += dt * *v;
    }

    // a_n+1 from x_n+1
    forces.acceleration(&sys.positions, &sys.masses, acc);

    // Kick: v_n+1 = v_n+1/2 + (dt/2) * a_n+1
    for (v, a) in sys.velocities.iter_mut().zip(acc.iter()) {
        *v += half_dt * *a;
    }
}

/// Non-mutating form of [`leapfrog_step`]: returns the advanced system and
/// the acceleration to carry into the next step.
///
/// Fails if `acc` does not hold exactly one entry per body.
pub fn leapfrog_advance<A: Acceleration + ?Sized>(
    sys: &System,
    acc: &[NVec3],
    dt: f64,
    forces: &A,
) -> Result<(System, Vec<NVec3>), InvalidInput> {
    check_len("accelerations", sys.len(), acc.len())?;

    let mut next = sys.clone();
    let mut next_acc = acc.to_vec();
    leapfrog_step(&mut next, &mut next_acc, dt, forces);
    Ok((next, next_acc))
}
