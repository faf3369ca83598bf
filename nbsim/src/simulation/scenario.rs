//! Build fully-initialized simulation scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces a `Scenario`
//! containing:
//! - numerical parameters (`Parameters`)
//! - system state (`System` with bodies at t = 0)
//!
//! Also provides the initial-condition generators a config can name:
//! a seeded Gaussian cloud, a two-body circular orbit, and the equilateral
//! Lagrange triangle.

use std::f64::consts::PI;

use log::debug;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::StandardNormal;

use crate::configuration::config::{BodyConfig, GeneratorConfig, ScenarioConfig};
use crate::simulation::error::SimError;
use crate::simulation::params::Parameters;
use crate::simulation::states::{Body, NVec3, System};

/// Runtime bundle built from a [`ScenarioConfig`]
#[derive(Debug, Clone)]
pub struct Scenario {
    pub parameters: Parameters,
    pub system: System,
}

impl Scenario {
    /// Generated bodies come first, followed by any explicit ones.
    pub fn build_scenario(cfg: ScenarioConfig) -> Result<Self, SimError> {
        let p_cfg = cfg.parameters;
        let parameters = Parameters {
            t_end: p_cfg.t_end,
            dt: p_cfg.dt,
            softening: p_cfg.softening,
            G: p_cfg.G,
        };
        parameters.validate()?;

        let mut bodies = match cfg.generator {
            Some(GeneratorConfig::GaussianCloud { n, total_mass, seed }) => {
                gaussian_cloud(n, total_mass, seed)
            }
            Some(GeneratorConfig::TwoBodyCircular { m1, m2, separation }) => {
                two_body_circular(m1, m2, separation, parameters.G)
            }
            Some(GeneratorConfig::LagrangeTriangle { m, side }) => {
                lagrange_triangle(m, side, parameters.G)
            }
            None => Vec::new(),
        };
        bodies.extend(cfg.bodies.iter().map(|bc: &BodyConfig| Body::new(bc.x, bc.v, bc.m)));

        let system = System::from_bodies(&bodies)?;
        debug!(
            "scenario: {} bodies, {} steps of dt = {}",
            system.len(),
            parameters.n_steps(),
            parameters.dt
        );

        Ok(Self { parameters, system })
    }
}

// =========================================================================================
// Initial conditions
// =========================================================================================

/// `n` equal masses summing to `total_mass`, with positions and velocities
/// drawn per component from a standard normal distribution.
///
/// The same `seed` always yields the same bodies.
pub fn gaussian_cloud(n: usize, total_mass: f64, seed: u64) -> Vec<Body> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let m = total_mass / n as f64;

    let normal3 = |rng: &mut ChaCha8Rng| {
        NVec3::new(
            rng.sample(StandardNormal),
            rng.sample(StandardNormal),
            rng.sample(StandardNormal),
        )
    };

    // positions for every body first, then velocities
    let xs: Vec<NVec3> = (0..n).map(|_| normal3(&mut rng)).collect();
    let vs: Vec<NVec3> = (0..n).map(|_| normal3(&mut rng)).collect();

    xs.into_iter()
        .zip(vs)
        .map(|(x, v)| Body { x, v, m })
        .collect()
}

/// Two bodies on a circular orbit about their common centre of mass, which
/// sits at the origin at rest. Separation is along x, motion along y.
///
/// For equal masses each body moves at `sqrt(G m / (2 d))`.
#[allow(non_snake_case)]
pub fn two_body_circular(m1: f64, m2: f64, d: f64, G: f64) -> Vec<Body> {
    let total = m1 + m2;
    let k = (G / (d * total)).sqrt();

    vec![
        Body {
            x: NVec3::new(-m2 / total * d, 0.0, 0.0),
            v: NVec3::new(0.0, -m2 * k, 0.0),
            m: m1,
        },
        Body {
            x: NVec3::new(m1 / total * d, 0.0, 0.0),
            v: NVec3::new(0.0, m1 * k, 0.0),
            m: m2,
        },
    ]
}

/// Orbital period of [`two_body_circular`]: `2π sqrt(d³ / (G M))`
#[allow(non_snake_case)]
pub fn two_body_period(m1: f64, m2: f64, d: f64, G: f64) -> f64 {
    2.0 * PI * (d * d * d / (G * (m1 + m2))).sqrt()
}

/// Three equal masses on the vertices of an equilateral triangle of side
/// `side` in the xy-plane, rotating rigidly about their centroid at the
/// origin. Each moves tangentially at `sqrt(G m / side)`.
#[allow(non_snake_case)]
pub fn lagrange_triangle(m: f64, side: f64, G: f64) -> Vec<Body> {
    let radius = side / 3f64.sqrt();
    let speed = (G * m / side).sqrt();

    (0..3)
        .map(|k| {
            let phi = PI / 2.0 + k as f64 * 2.0 * PI / 3.0;
            let (s, c) = phi.sin_cos();
            Body {
                x: NVec3::new(radius * c, radius * s, 0.0),
                v: NVec3::new(-speed * s, speed * c, 0.0),
                m,
            }
        })
        .collect()
}
