//! Simulation driver
//!
//! Owns the canonical state and the carried acceleration, fixes the
//! bootstrap → KDK step → clock → observer ordering, and enforces the run
//! lifecycle `Uninitialized → Bootstrapped → Running → Terminated`.

use log::{debug, info, warn};

use crate::simulation::error::{InvalidInput, SimError};
use crate::simulation::forces::{Acceleration, NewtonianGravity};
use crate::simulation::integrator::{bootstrap, leapfrog_step};
use crate::simulation::observer::StepObserver;
use crate::simulation::params::{validate_physics, Parameters};
use crate::simulation::states::{NVec3, System};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Built, no force evaluated yet
    Uninitialized,
    /// Starting acceleration computed, no step taken
    Bootstrapped,
    /// At least one step taken
    Running,
    /// No further steps allowed
    Terminated,
}

pub struct Simulation<A = NewtonianGravity> {
    system: System,
    acc: Vec<NVec3>,
    forces: A,
    dt: f64,
    t_end: Option<f64>,
    steps_taken: usize,
    phase: Phase,
}

impl Simulation<NewtonianGravity> {
    /// Validate `params` and set up a direct-gravity run over `system`.
    ///
    /// The observer stops being called once the clock reaches `params.t_end`.
    pub fn new(system: System, params: &Parameters) -> Result<Self, SimError> {
        params.validate()?;
        if params.softening == 0.0 && system.len() > 1 {
            warn!("softening is zero: coincident bodies will exert no force on each other");
        }
        Ok(Self::with_forces(system, params.dt, params.gravity())?.with_end_time(params.t_end))
    }
}

impl<A: Acceleration> Simulation<A> {
    /// Set up a run with any acceleration source; only `dt` is validated here
    pub fn with_forces(system: System, dt: f64, forces: A) -> Result<Self, SimError> {
        if !(dt.is_finite() && dt > 0.0) {
            return Err(InvalidInput::NonPositiveTimeStep(dt).into());
        }
        Ok(Self {
            acc: Vec::new(),
            system,
            forces,
            dt,
            t_end: None,
            steps_taken: 0,
            phase: Phase::Uninitialized,
        })
    }

    /// Only notify observers while `t < t_end`; steps still run to `n_steps`
    pub fn with_end_time(mut self, t_end: f64) -> Self {
        self.t_end = Some(t_end);
        self
    }

    pub fn end_time(&self) -> Option<f64> {
        self.t_end
    }

    pub fn system(&self) -> &System {
        &self.system
    }

    pub fn time(&self) -> f64 {
        self.system.t
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    pub fn forces(&self) -> &A {
        &self.forces
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn steps_taken(&self) -> usize {
        self.steps_taken
    }

    /// Acceleration carried into the next step (empty before bootstrap)
    pub fn accelerations(&self) -> &[NVec3] {
        &self.acc
    }

    /// Compute the starting acceleration. No-op once bootstrapped.
    pub fn bootstrap(&mut self) -> Result<(), SimError> {
        match self.phase {
            Phase::Uninitialized => {
                self.acc = bootstrap(&self.system, &self.forces);
                self.phase = Phase::Bootstrapped;
                debug!("bootstrapped {} bodies", self.system.len());
                Ok(())
            }
            Phase::Terminated => Err(SimError::Terminated),
            Phase::Bootstrapped | Phase::Running => Ok(()),
        }
    }

    /// Take one KDK step and advance the clock by `dt`.
    ///
    /// Bootstraps first if needed; fails only after [`terminate`](Self::terminate).
    pub fn step(&mut self) -> Result<(), SimError> {
        self.bootstrap()?;

        leapfrog_step(&mut self.system, &mut self.acc, self.dt, &self.forces);
        self.system.t += self.dt;
        self.steps_taken += 1;
        self.phase = Phase::Running;
        debug!("step {} t = {}", self.steps_taken, self.system.t);
        Ok(())
    }

    /// Run `n_steps` steps, calling `observer` after each one that ends
    /// before the end time, then terminate.
    ///
    /// An observer error terminates the run immediately and is returned;
    /// the state is left as it was after the failing step.
    pub fn run<O: StepObserver + ?Sized>(
        &mut self,
        n_steps: usize,
        observer: &mut O,
    ) -> Result<(), SimError> {
        self.bootstrap()?;
        info!(
            "running {} bodies for {} steps (dt = {}, t0 = {})",
            self.system.len(),
            n_steps,
            self.dt,
            self.system.t
        );

        for _ in 0..n_steps {
            self.step()?;
            if self.t_end.is_some_and(|t_end| self.system.t >= t_end) {
                continue;
            }

            if let Err(source) = observer.on_step(&self.system, self.system.t) {
                self.phase = Phase::Terminated;
                warn!("observer failed at step {}: {source:#}", self.steps_taken);
                return Err(SimError::Hook {
                    step: self.steps_taken,
                    time: self.system.t,
                    source,
                });
            }
        }

        self.phase = Phase::Terminated;
        info!("finished after {} steps at t = {}", self.steps_taken, self.system.t);
        Ok(())
    }

    /// Refuse any further steps
    pub fn terminate(&mut self) {
        self.phase = Phase::Terminated;
    }

    /// Hand back the final state
    pub fn into_system(self) -> System {
        self.system
    }
}

/// Run a direct-gravity simulation from `initial` for `n_steps` steps.
///
/// `on_step(state, time)` is called after every step, the end time being
/// `n_steps * dt`; if it fails, the run stops and the error is returned.
#[allow(non_snake_case)]
pub fn run<F>(
    initial: System,
    dt: f64,
    n_steps: usize,
    G: f64,
    softening: f64,
    mut on_step: F,
) -> Result<System, SimError>
where
    F: FnMut(&System, f64) -> anyhow::Result<()>,
{
    validate_physics(dt, G, softening)?;

    let mut sim = Simulation::with_forces(initial, dt, NewtonianGravity::new(G, softening))?;
    sim.run(n_steps, &mut on_step)?;
    Ok(sim.into_system())
}
