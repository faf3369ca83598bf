//! Error types for simulation setup and runs
//!
//! Input validation happens once, when a [`System`](super::states::System)
//! or [`Simulation`](super::driver::Simulation) is built. Stepping itself is
//! pure arithmetic on validated data and never fails; the only run-time
//! error comes from the per-step observer.

use std::fmt;

/// Which validation check rejected the input
#[derive(Debug, Clone, PartialEq)]
pub enum InvalidInput {
    /// Two per-body arrays disagree on the number of bodies
    LengthMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },
    /// Mass at `index` is zero or negative
    NonPositiveMass { index: usize, mass: f64 },
    /// NaN or infinity in a per-body quantity or a parameter
    NonFinite { what: &'static str, index: usize },
    NonPositiveTimeStep(f64),
    NegativeSoftening(f64),
    NonPositiveGravity(f64),
    NegativeEndTime(f64),
}

impl fmt::Display for InvalidInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidInput::LengthMismatch { what, expected, found } => {
                write!(f, "{what} has {found} entries, expected {expected}")
            }
            InvalidInput::NonPositiveMass { index, mass } => {
                write!(f, "body {index} has non-positive mass {mass}")
            }
            InvalidInput::NonFinite { what, index } => {
                write!(f, "{what} of body {index} is not finite")
            }
            InvalidInput::NonPositiveTimeStep(dt) => write!(f, "time step must be > 0, got {dt}"),
            InvalidInput::NegativeSoftening(eps) => write!(f, "softening must be >= 0, got {eps}"),
            InvalidInput::NonPositiveGravity(g) => {
                write!(f, "gravitational constant must be > 0, got {g}")
            }
            InvalidInput::NegativeEndTime(t) => write!(f, "end time must be >= 0, got {t}"),
        }
    }
}

impl std::error::Error for InvalidInput {}

/// Errors surfaced by the simulation driver
#[derive(Debug)]
pub enum SimError {
    /// Rejected at construction, before any step ran
    InvalidInput(InvalidInput),
    /// The per-step observer failed; the run halted after `step`
    Hook {
        step: usize,
        time: f64,
        source: anyhow::Error,
    },
    /// A step was requested after the run terminated
    Terminated,
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::InvalidInput(e) => write!(f, "invalid input: {e}"),
            SimError::Hook { step, time, .. } => {
                write!(f, "step observer failed at step {step} (t = {time})")
            }
            SimError::Terminated => write!(f, "simulation already terminated"),
        }
    }
}

impl std::error::Error for SimError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimError::InvalidInput(e) => Some(e),
            SimError::Hook { source, .. } => Some(source.as_ref()),
            SimError::Terminated => None,
        }
    }
}

impl From<InvalidInput> for SimError {
    fn from(e: InvalidInput) -> Self {
        SimError::InvalidInput(e)
    }
}
