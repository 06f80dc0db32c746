//! Core state types for the N-body simulation.
//!
//! - `Particle` holds one body's identity, mass and kinematic state plus its
//!   pending force accumulator.
//! - `System` holds the ordered particle collection and the current
//!   simulation time `t`.

use super::vector::Vec3;

pub type ParticleId = usize;

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub id: ParticleId, // unique within a simulation
    pub mass: f64, // not validated here
    pub position: Vec3,
    pub velocity: Vec3,
    /// Pending force for the current step only. Force laws add into it,
    /// the integrator consumes it and resets it to zero.
    pub force: Vec3,
}

impl Particle {
    /// Create a particle with an empty force accumulator
    pub fn new(id: ParticleId, position: Vec3, velocity: Vec3, mass: f64) -> Self {
        Self {
            id,
            mass,
            position,
            velocity,
            force: Vec3::zeros(),
        }
    }

    /// True when position and velocity are both free of inf/NaN
    pub fn is_finite(&self) -> bool {
        self.position.iter().chain(self.velocity.iter()).all(|c| c.is_finite())
    }
}

#[derive(Debug, Clone)]
pub struct System {
    pub particles: Vec<Particle>, // index-stable for the whole run
    pub t: f64, // elapsed simulation time
}

impl System {
    pub fn new(particles: Vec<Particle>) -> Self {
        Self { particles, t: 0.0 }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Sum of m * v over all particles
    pub fn total_momentum(&self) -> Vec3 {
        self.particles
            .iter()
            .fold(Vec3::zeros(), |acc, p| acc + p.velocity * p.mass)
    }

    /// Sum of 1/2 m |v|^2 over all particles
    pub fn kinetic_energy(&self) -> f64 {
        self.particles
            .iter()
            .map(|p| 0.5 * p.mass * p.velocity.magnitude_squared())
            .sum()
    }
}
