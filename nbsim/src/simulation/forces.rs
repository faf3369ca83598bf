//! Force / acceleration evaluation for the n-body engine
//!
//! Direct O(N²) Newtonian gravity with Plummer-style softening.
//! Every row `i` sums the contribution of every body `j`, including `j = i`,
//! which contributes zero because its displacement is the zero vector.
//!
//! Rows are independent, so with the `parallel` feature large systems are
//! evaluated row-by-row on the rayon pool. Each row is still summed in body
//! order, so the parallel and serial paths agree bit for bit.

use crate::simulation::error::InvalidInput;
use crate::simulation::states::{check_len, NVec3};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Below this many bodies the parallel path costs more than it saves
pub const PARALLEL_THRESHOLD: usize = 128;

/// Source of per-body accelerations for the integrator
///
/// Implementations overwrite `out[i]` for every body; `out`, `positions`
/// and `masses` always have the same length.
pub trait Acceleration {
    fn acceleration(&self, positions: &[NVec3], masses: &[f64], out: &mut [NVec3]);
}

/// 3D Newtonian gravity with softening (direct n^2 sum)
#[allow(non_snake_case)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewtonianGravity {
    pub G: f64,         // gravitational constant
    pub softening: f64, // softening length epsilon
}

impl NewtonianGravity {
    #[allow(non_snake_case)]
    pub fn new(G: f64, softening: f64) -> Self {
        Self { G, softening }
    }

    /// Squared softening length, added to every squared separation
    pub fn eps2(&self) -> f64 {
        self.softening * self.softening
    }

    /// Net acceleration on body `i` from all bodies in `positions`
    pub fn row(&self, i: usize, positions: &[NVec3], masses: &[f64]) -> NVec3 {
        let xi = positions[i];
        let eps2 = self.eps2();

        positions
            .iter()
            .zip(masses)
            .fold(NVec3::zeros(), |acc, (xj, &mj)| {
                acc + pair_acceleration(&xi, xj, mj, self.G, eps2)
            })
    }

    /// Evaluate every row on the calling thread
    pub fn accelerations_serial(&self, positions: &[NVec3], masses: &[f64], out: &mut [NVec3]) {
        for (i, a) in out.iter_mut().enumerate() {
            *a = self.row(i, positions, masses);
        }
    }

    /// Evaluate rows on the rayon pool; `out` is partitioned by body index
    #[cfg(feature = "parallel")]
    pub fn accelerations_parallel(&self, positions: &[NVec3], masses: &[f64], out: &mut [NVec3]) {
        out.par_iter_mut().enumerate().for_each(|(i, a)| {
            *a = self.row(i, positions, masses);
        });
    }
}

impl Acceleration for NewtonianGravity {
    fn acceleration(&self, positions: &[NVec3], masses: &[f64], out: &mut [NVec3]) {
        #[cfg(feature = "parallel")]
        if out.len() >= PARALLEL_THRESHOLD {
            self.accelerations_parallel(positions, masses, out);
            return;
        }

        self.accelerations_serial(positions, masses, out);
    }
}

/// Softened inverse-cube factor `(r2 + eps2)^(-3/2)`.
///
/// Returns 0 when the softened distance is exactly zero (coincident bodies
/// with no softening, or the self term with no softening).
#[inline]
pub fn inv_r3(r2: f64, eps2: f64) -> f64 {
    let d2 = r2 + eps2;
    if d2 > 0.0 {
        let inv_r = d2.sqrt().recip();
        inv_r * inv_r * inv_r
    } else {
        0.0
    }
}

/// Acceleration of a body at `xi` due to a mass `mj` at `xj`:
/// `G * mj * (xj - xi) / (|xj - xi|^2 + eps2)^(3/2)`
#[allow(non_snake_case)]
#[inline]
pub fn pair_acceleration(xi: &NVec3, xj: &NVec3, mj: f64, G: f64, eps2: f64) -> NVec3 {
    let r = xj - xi;
    (G * mj * inv_r3(r.dot(&r), eps2)) * r
}

/// Pure force evaluation: accelerations for every body.
///
/// Fails only when `positions` and `masses` disagree on the body count.
#[allow(non_snake_case)]
pub fn compute_accelerations(
    positions: &[NVec3],
    masses: &[f64],
    G: f64,
    softening: f64,
) -> Result<Vec<NVec3>, InvalidInput> {
    check_len("positions", masses.len(), positions.len())?;

    let mut out = vec![NVec3::zeros(); positions.len()];
    NewtonianGravity::new(G, softening).acceleration(positions, masses, &mut out);
    Ok(out)
}
