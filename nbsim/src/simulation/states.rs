//! Core state types for the N-body simulation.
//!
//! Defines the body set as three index-aligned arrays (positions,
//! velocities, masses) plus the current simulation time `t`.
//! `Body` is the per-body view used to build a system and by scenarios.
//!
//! The arrays are private to the crate so that their common length `N`
//! is fixed at construction and cannot drift during a run.

use nalgebra::Vector3;

use crate::simulation::error::InvalidInput;

pub type NVec3 = Vector3<f64>;

#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub x: NVec3, // position
    pub v: NVec3, // velocity
    pub m: f64,   // mass
}

impl Body {
    pub fn new(x: [f64; 3], v: [f64; 3], m: f64) -> Self {
        Self {
            x: x.into(),
            v: v.into(),
            m,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct System {
    pub(crate) positions: Vec<NVec3>,
    pub(crate) velocities: Vec<NVec3>,
    pub(crate) masses: Vec<f64>,
    pub(crate) t: f64,
}

impl System {
    /// Build a system at `t = 0`, validating shapes and masses.
    ///
    /// Fails with [`InvalidInput`] when the arrays disagree on `N`, a mass is
    /// not strictly positive, or any component is NaN/infinite.
    pub fn new(
        positions: Vec<NVec3>,
        velocities: Vec<NVec3>,
        masses: Vec<f64>,
    ) -> Result<Self, InvalidInput> {
        let n = masses.len();
        check_len("positions", n, positions.len())?;
        check_len("velocities", n, velocities.len())?;

        for (index, &mass) in masses.iter().enumerate() {
            if !mass.is_finite() {
                return Err(InvalidInput::NonFinite { what: "mass", index });
            }
            if mass <= 0.0 {
                return Err(InvalidInput::NonPositiveMass { index, mass });
            }
        }
        check_finite("position", &positions)?;
        check_finite("velocity", &velocities)?;

        Ok(Self {
            positions,
            velocities,
            masses,
            t: 0.0,
        })
    }

    pub fn from_bodies(bodies: &[Body]) -> Result<Self, InvalidInput> {
        Self::new(
            bodies.iter().map(|b| b.x).collect(),
            bodies.iter().map(|b| b.v).collect(),
            bodies.iter().map(|b| b.m).collect(),
        )
    }

    /// Number of bodies
    pub fn len(&self) -> usize {
        self.masses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.masses.is_empty()
    }

    pub fn positions(&self) -> &[NVec3] {
        &self.positions
    }

    pub fn velocities(&self) -> &[NVec3] {
        &self.velocities
    }

    pub fn masses(&self) -> &[f64] {
        &self.masses
    }

    /// Current simulation time
    pub fn time(&self) -> f64 {
        self.t
    }

    /// Copy out body `i`, if it exists
    pub fn body(&self, i: usize) -> Option<Body> {
        Some(Body {
            x: *self.positions.get(i)?,
            v: self.velocities[i],
            m: self.masses[i],
        })
    }

    pub fn bodies(&self) -> impl Iterator<Item = Body> + '_ {
        (0..self.len()).filter_map(|i| self.body(i))
    }

    // diagnostics ==========================================================================

    pub fn total_mass(&self) -> f64 {
        self.masses.iter().sum()
    }

    /// Σ m_i v_i, invariant for an isolated system
    pub fn total_momentum(&self) -> NVec3 {
        self.velocities
            .iter()
            .zip(&self.masses)
            .fold(NVec3::zeros(), |acc, (v, &m)| acc + m * v)
    }

    /// Σ m_i (x_i × v_i) about the origin
    pub fn total_angular_momentum(&self) -> NVec3 {
        self.positions
            .iter()
            .zip(&self.velocities)
            .zip(&self.masses)
            .fold(NVec3::zeros(), |acc, ((x, v), &m)| acc + m * x.cross(v))
    }

    pub fn kinetic_energy(&self) -> f64 {
        self.velocities
            .iter()
            .zip(&self.masses)
            .map(|(v, &m)| 0.5 * m * v.norm_squared())
            .sum()
    }

    /// Softened pair potential: -G Σ_{i<j} m_i m_j / sqrt(|r|² + ε²)
    ///
    /// Pairs with a zero softened distance contribute nothing, mirroring the
    /// guard in the force kernel.
    #[allow(non_snake_case)]
    pub fn potential_energy(&self, G: f64, softening: f64) -> f64 {
        let eps2 = softening * softening;
        let n = self.len();
        let mut u = 0.0;

        for i in 0..n {
            for j in (i + 1)..n {
                let r = self.positions[j] - self.positions[i];
                let d2 = r.norm_squared() + eps2;
                if d2 > 0.0 {
                    u -= G * self.masses[i] * self.masses[j] / d2.sqrt();
                }
            }
        }
        u
    }

    #[allow(non_snake_case)]
    pub fn total_energy(&self, G: f64, softening: f64) -> f64 {
        self.kinetic_energy() + self.potential_energy(G, softening)
    }

    /// Mass-weighted mean position, zero for an empty system
    pub fn center_of_mass(&self) -> NVec3 {
        let m = self.total_mass();
        if m > 0.0 {
            self.positions
                .iter()
                .zip(&self.masses)
                .fold(NVec3::zeros(), |acc, (x, &mi)| acc + mi * x)
                / m
        } else {
            NVec3::zeros()
        }
    }
}

// helpers ==============================================================================

pub(crate) fn check_len(what: &'static str, expected: usize, found: usize) -> Result<(), InvalidInput> {
    if expected != found {
        return Err(InvalidInput::LengthMismatch {
            what,
            expected,
            found,
        });
    }
    Ok(())
}

fn check_finite(what: &'static str, values: &[NVec3]) -> Result<(), InvalidInput> {
    match values.iter().position(|p| !p.iter().all(|c| c.is_finite())) {
        Some(index) => Err(InvalidInput::NonFinite { what, index }),
        None => Ok(()),
    }
}
