pub mod error;
pub mod simulation;
pub mod configuration;
pub mod output;
pub mod benchmark;

pub use error::{Result, SimError};

pub use simulation::vector::{vec3, Vec3};
pub use simulation::states::{Particle, ParticleId, System};
pub use simulation::forces::{compute_gravity_forces, ForceLaw, ForceSet, NewtonianGravity, DEFAULT_SOFTENING};
pub use simulation::integrator::{ForwardEuler, Integrator};
pub use simulation::params::Parameters;
pub use simulation::engine::{RunSummary, Simulation};
pub use simulation::scenario::{sun_earth, sun_earth_parameters, sun_earth_particles};

pub use configuration::config::{IntegratorConfig, ParametersConfig, ParticleConfig, ScenarioConfig};

pub use output::writer::{CsvWriter, Snapshot, StateSink, Trajectory, CSV_HEADER};

pub use benchmark::benchmark::{bench_euler, bench_gravity};
