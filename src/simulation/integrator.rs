//! Fixed-step time integrators for the N-body system
//!
//! An integrator reads each particle's pending force, advances position and
//! velocity by one step `dt`, and leaves the force accumulator at zero so the
//! next force phase starts clean.

use super::states::Particle;
use super::vector::Vec3;

/// One stepping strategy. The driver only sees this trait, so further
/// schemes slot in without touching the call site.
pub trait Integrator {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Advance every particle by `dt` from its accumulated force, then
    /// clear the force. Must leave every `force` at zero.
    fn integrate(&self, particles: &mut [Particle], dt: f64);
}

/// Explicit (forward) Euler, first order
///
/// Per particle, in this order:
/// 1. x_n+1 = x_n + v_n dt   (pre-step velocity)
/// 2. v_n+1 = v_n + F/m dt   (skipped when m <= 0)
/// 3. F = 0
#[derive(Debug, Clone, Copy, Default)]
pub struct ForwardEuler;

impl Integrator for ForwardEuler {
    fn name(&self) -> &'static str {
        "forward-euler"
    }

    fn integrate(&self, particles: &mut [Particle], dt: f64) {
        for p in particles.iter_mut() {
            // Drift with the velocity from the start of the step
            p.position += p.velocity * dt;

            if p.mass > 0.0 {
                let acceleration = p.force / p.mass;
                p.velocity += acceleration * dt;
            }

            // Cleared even when the velocity update was skipped
            p.force = Vec3::zeros();
        }
    }
}
