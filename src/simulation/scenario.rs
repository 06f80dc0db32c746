//! Build ready-to-run simulations from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces a `Simulation`
//! holding the particles at t = 0, the runtime `Parameters`, the force set
//! and the chosen integrator.

use crate::configuration::config::{IntegratorConfig, ParticleConfig, ScenarioConfig};
use crate::error::Result;
use crate::simulation::engine::Simulation;
use crate::simulation::integrator::{ForwardEuler, Integrator};
use crate::simulation::params::Parameters;
use crate::simulation::states::Particle;
use crate::simulation::vector::{vec3, Vec3};

pub const G_SI: f64 = 6.67430e-11;
pub const DAY: f64 = 24.0 * 60.0 * 60.0;
pub const YEAR: f64 = 365.0 * DAY;

pub const SUN_MASS: f64 = 1.989e30;
pub const EARTH_MASS: f64 = 5.972e24;
pub const EARTH_ORBIT_RADIUS: f64 = 1.496e11;
pub const EARTH_ORBIT_SPEED: f64 = 29_780.0;

/// Softening used by the built-in scenario, in metres
pub const SUN_EARTH_SOFTENING: f64 = 1.0e3;

impl IntegratorConfig {
    pub fn build(self) -> Box<dyn Integrator> {
        match self {
            IntegratorConfig::ForwardEuler => Box::new(ForwardEuler),
        }
    }
}

fn to_vec3(c: [f64; 3]) -> Vec3 {
    vec3(c[0], c[1], c[2])
}

impl Simulation {
    pub fn from_config(cfg: ScenarioConfig) -> Result<Self> {
        // Particles: ids default to the list index
        let particles: Vec<Particle> = cfg
            .particles
            .iter()
            .enumerate()
            .map(|(i, pc): (usize, &ParticleConfig)| {
                Particle::new(
                    pc.id.unwrap_or(i),
                    to_vec3(pc.position),
                    to_vec3(pc.velocity),
                    pc.mass,
                )
            })
            .collect();

        let p_cfg = cfg.parameters;
        let parameters = Parameters {
            G: p_cfg.G,
            softening: p_cfg.softening,
            dt: p_cfg.dt,
            t_end: p_cfg.t_end,
            strict: p_cfg.strict,
        };

        Simulation::with_integrator(particles, parameters, cfg.integrator.build())
    }
}

/// Sun at rest at the origin, Earth on a near-circular orbit in the xy plane
pub fn sun_earth_particles() -> Vec<Particle> {
    vec![
        Particle::new(0, Vec3::zeros(), Vec3::zeros(), SUN_MASS),
        Particle::new(
            1,
            vec3(EARTH_ORBIT_RADIUS, 0.0, 0.0),
            vec3(0.0, EARTH_ORBIT_SPEED, 0.0),
            EARTH_MASS,
        ),
    ]
}

/// One year of Sun/Earth in daily steps
pub fn sun_earth_parameters() -> Parameters {
    Parameters::new(G_SI, DAY, YEAR).with_softening(SUN_EARTH_SOFTENING)
}

pub fn sun_earth() -> Result<Simulation> {
    Simulation::new(sun_earth_particles(), sun_earth_parameters())
}
