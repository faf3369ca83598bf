//! Numerical and physical parameters for the simulation
//!
//! `Parameters` holds the immutable settings of one run:
//! - integration step size and end time,
//! - softening length and gravitational constant (`softening`, `G`)

use crate::simulation::error::InvalidInput;
use crate::simulation::forces::NewtonianGravity;

#[allow(non_snake_case)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parameters {
    pub t_end: f64,     // time end
    pub dt: f64,        // step size
    pub softening: f64, // softening length (epsilon, not epsilon^2)
    pub G: f64,         // gravitational constant
}

impl Parameters {
    /// Reject non-positive `dt`/`G`, negative softening or end time, and
    /// non-finite values.
    pub fn validate(&self) -> Result<(), InvalidInput> {
        validate_physics(self.dt, self.G, self.softening)?;
        if !self.t_end.is_finite() || self.t_end < 0.0 {
            return Err(InvalidInput::NegativeEndTime(self.t_end));
        }
        Ok(())
    }

    /// Number of fixed steps needed to reach `t_end`: `ceil(t_end / dt)`
    pub fn n_steps(&self) -> usize {
        (self.t_end / self.dt).ceil() as usize
    }

    pub fn gravity(&self) -> NewtonianGravity {
        NewtonianGravity::new(self.G, self.softening)
    }
}

/// Shared checks for the step size and the force-law constants
#[allow(non_snake_case)]
pub fn validate_physics(dt: f64, G: f64, softening: f64) -> Result<(), InvalidInput> {
    if !(dt.is_finite() && dt > 0.0) {
        return Err(InvalidInput::NonPositiveTimeStep(dt));
    }
    if !(G.is_finite() && G > 0.0) {
        return Err(InvalidInput::NonPositiveGravity(G));
    }
    if !(softening.is_finite() && softening >= 0.0) {
        return Err(InvalidInput::NegativeSoftening(softening));
    }
    Ok(())
}
