pub mod simulation;
pub mod configuration;
pub mod benchmark;

pub use simulation::states::{Body, System, NVec3};
pub use simulation::error::{InvalidInput, SimError};
pub use simulation::params::Parameters;
pub use simulation::forces::{compute_accelerations, pair_acceleration, Acceleration, NewtonianGravity};
pub use simulation::integrator::{bootstrap, leapfrog_advance, leapfrog_step};
pub use simulation::driver::{run, Phase, Simulation};
pub use simulation::observer::{Fanout, Frame, Paced, ProgressLogger, StepObserver, TrajectoryRecorder};
pub use simulation::scenario::{gaussian_cloud, lagrange_triangle, two_body_circular, two_body_period, Scenario};

pub use configuration::config::{BodyConfig, GeneratorConfig, ParametersConfig, ScenarioConfig};

pub use benchmark::benchmark::{bench_gravity, bench_leapfrog_curve, check_parallel_agreement};
