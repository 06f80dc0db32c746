//! Force contributors for the n-body engine
//!
//! Force laws add into each particle's pending `force` accumulator; they
//! never assign. The accumulator must be zero when a step's force phase
//! begins, which the integrator guarantees by clearing it at the end of
//! every step.

use crate::simulation::states::Particle;

/// Softening length used when none is configured
pub const DEFAULT_SOFTENING: f64 = 1.0e-3;

/// A source of force acting on the particle collection
/// Implementations add their contribution into `particles[i].force`
pub trait ForceLaw {
    fn accumulate(&self, particles: &mut [Particle]);
}

/// Collection of force terms (gravity, and anything added later)
/// Each term's contribution is summed into the same accumulators
pub struct ForceSet {
    terms: Vec<Box<dyn ForceLaw + Send + Sync>>,
}

impl ForceSet {
    /// Create an empty force set
    pub fn new() -> Self {
        Self { terms: Vec::new() }
    }

    /// Add a force term
    pub fn with(mut self, term: impl ForceLaw + Send + Sync + 'static) -> Self {
        self.terms.push(Box::new(term));
        self
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Run every term once, in insertion order
    pub fn accumulate(&self, particles: &mut [Particle]) {
        for term in &self.terms {
            term.accumulate(particles);
        }
    }
}

impl Default for ForceSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Newtonian gravity with Plummer softening (direct n^2 sum)
#[allow(non_snake_case)]
#[derive(Debug, Clone, Copy)]
pub struct NewtonianGravity {
    pub G: f64, // gravitational constant
    pub softening: f64, // softening length, squared inside the force law
}

impl NewtonianGravity {
    #[allow(non_snake_case)]
    pub fn new(G: f64, softening: f64) -> Self {
        Self { G, softening }
    }

    /// Softened pairwise potential energy: -sum G m_i m_j / sqrt(|r|^2 + eps^2)
    pub fn potential_energy(&self, particles: &[Particle]) -> f64 {
        let eps2 = self.softening * self.softening;
        let n = particles.len();
        let mut energy = 0.0;
        for i in 0..n {
            for j in (i + 1)..n {
                let r = particles[j].position - particles[i].position;
                let dist = (r.magnitude_squared() + eps2).sqrt();
                energy -= self.G * particles[i].mass * particles[j].mass / dist;
            }
        }
        energy
    }
}

impl ForceLaw for NewtonianGravity {
    fn accumulate(&self, particles: &mut [Particle]) {
        let eps2 = self.softening * self.softening;
        let n = particles.len();

        // Each unordered pair (i, j) with i < j exactly once
        for i in 0..n {
            for j in (i + 1)..n {
                // r points from i to j: i is pulled along +r, j along -r
                let r = particles[j].position - particles[i].position;

                // Softened squared separation, never zero while eps > 0
                let dist_sq = r.magnitude_squared() + eps2;
                let dist = dist_sq.sqrt();

                // |F| = G m_i m_j / d^2, direction r / d
                let magnitude = self.G * particles[i].mass * particles[j].mass / dist_sq;
                let f = r * (magnitude / dist);

                // Equal and opposite
                particles[i].force += f;
                particles[j].force -= f;
            }
        }
    }
}

/// Accumulate softened gravity for every pair into the particles' forces
#[allow(non_snake_case)]
pub fn compute_gravity_forces(particles: &mut [Particle], G: f64, softening: f64) {
    NewtonianGravity::new(G, softening).accumulate(particles);
}
