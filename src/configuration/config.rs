//! Configuration types for loading simulation scenarios from YAML.
//!
//! A scenario consists of:
//!
//! - [`IntegratorConfig`] – which stepping scheme advances the system
//! - [`ParametersConfig`] – constants, step size, duration, strictness
//! - [`ParticleConfig`]   – initial state for each particle
//! - [`ScenarioConfig`]   – top-level wrapper loaded from a file
//!
//! # YAML format
//!
//! ```yaml
//! integrator: euler
//!
//! parameters:
//!   G: 6.6743e-11           # gravitational constant
//!   softening: 1.0e3        # optional, defaults to 1.0e-3
//!   dt: 86400.0             # fixed step size
//!   t_end: 31536000.0       # total simulated time
//!   strict: false           # optional, validate inputs and check for NaN/inf
//!
//! particles:
//!   - id: 0                 # optional, defaults to the list index
//!     mass: 1.989e30
//!     position: [0.0, 0.0, 0.0]
//!     velocity: [0.0, 0.0, 0.0]
//!   - id: 1
//!     mass: 5.972e24
//!     position: [1.496e11, 0.0, 0.0]
//!     velocity: [0.0, 29780.0, 0.0]
//! ```

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;

use crate::error::Result;
use crate::simulation::forces::DEFAULT_SOFTENING;

/// Which integrator advances the system
#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IntegratorConfig {
    #[default]
    #[serde(rename = "euler")] // explicit first-order Euler
    ForwardEuler,
}

fn default_softening() -> f64 {
    DEFAULT_SOFTENING
}

/// Global numerical and physical parameters for a scenario
#[allow(non_snake_case)]
#[derive(Deserialize, Debug, Clone)]
pub struct ParametersConfig {
    pub G: f64, // gravitational constant
    #[serde(default = "default_softening")]
    pub softening: f64, // softening length, prevents singular forces at tiny separations
    pub dt: f64, // fixed time step
    pub t_end: f64, // total simulated time
    #[serde(default)]
    pub strict: bool, // reject bad inputs and stop on non-finite state
}

/// Initial state of a single particle
#[derive(Deserialize, Debug, Clone)]
pub struct ParticleConfig {
    #[serde(default)]
    pub id: Option<usize>, // defaults to the particle's index in the list
    pub mass: f64,
    pub position: [f64; 3],
    #[serde(default)]
    pub velocity: [f64; 3], // at rest when omitted
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub integrator: IntegratorConfig,
    pub parameters: ParametersConfig,
    pub particles: Vec<ParticleConfig>,
}

impl ScenarioConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_yaml::from_reader(reader)?)
    }
}
