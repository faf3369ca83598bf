//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! simulation scenario. A scenario consists of:
//!
//! - [`ParametersConfig`] – numerical parameters and physical constants
//! - [`GeneratorConfig`]  – optional generated initial condition
//! - [`BodyConfig`]       – explicit initial state for individual bodies
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//! A Gaussian cloud plus one heavy body at rest in the middle:
//!
//! ```yaml
//! parameters:
//!   t_end: 10.0             # total simulation time
//!   dt: 0.1                 # fixed step size
//!   softening: 0.1          # softening length epsilon
//!   G: 6.67e-11             # gravitational constant
//!
//! generator:
//!   kind: gaussian_cloud    # or two_body_circular / lagrange_triangle
//!   n: 100
//!   total_mass: 20000.0
//!   seed: 9
//!
//! bodies:
//!   - x: [ 0.0, 0.0, 0.0 ]
//!     v: [ 0.0, 0.0, 0.0 ]
//!     m: 500.0
//! ```
//!
//! Validation (positive masses, dt > 0, ...) happens when the config is
//! turned into a runtime [`Scenario`](crate::simulation::scenario::Scenario).

use std::io::Read;

use serde::Deserialize;

/// Global numerical and physical parameters for a scenario
#[allow(non_snake_case)]
#[derive(Deserialize, Debug, Clone)]
pub struct ParametersConfig {
    pub t_end: f64, // time end
    pub dt: f64,    // time step size
    #[serde(default)]
    pub softening: f64, // softening length - prevents singular forces at very small separations
    pub G: f64,     // gravitational constant
}

/// Configuration for a single body's initial state
#[derive(Deserialize, Debug, Clone)]
pub struct BodyConfig {
    pub x: [f64; 3], // Initial position in simulation units
    pub v: [f64; 3], // Initial velocity in simulation units per time unit
    pub m: f64,      // Mass of the body
}

/// Generated initial conditions, selected by `kind`
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GeneratorConfig {
    /// `n` equal masses with normally distributed positions and velocities
    GaussianCloud {
        n: usize,
        total_mass: f64,
        #[serde(default)]
        seed: u64,
    },
    /// Two bodies on a circular orbit about their centre of mass
    TwoBodyCircular { m1: f64, m2: f64, separation: f64 },
    /// Three equal masses rotating as a rigid equilateral triangle
    LagrangeTriangle { m: f64, side: f64 },
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone)]
pub struct ScenarioConfig {
    pub parameters: ParametersConfig, // Global numerical and physical parameters
    #[serde(default)]
    pub generator: Option<GeneratorConfig>, // Generated bodies, placed first
    #[serde(default)]
    pub bodies: Vec<BodyConfig>, // Explicit bodies, appended after generated ones
}

impl ScenarioConfig {
    pub fn from_yaml_str(s: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(s)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_reader(reader)
    }
}
