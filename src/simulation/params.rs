//! Numerical and physical parameters for the simulation
//!
//! `Parameters` holds runtime settings:
//! - gravitational constant `G` and softening length,
//! - fixed step size `dt` and total simulated time `t_end`,
//! - `strict`, which turns on validation and the per-step finiteness check

use crate::error::{Result, SimError};
use crate::simulation::forces::DEFAULT_SOFTENING;

#[allow(non_snake_case)]
#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    pub G: f64, // gravitational constant
    pub softening: f64, // softening length
    pub dt: f64, // fixed step size
    pub t_end: f64, // total simulated time
    pub strict: bool, // opt-in validation
}

impl Parameters {
    #[allow(non_snake_case)]
    pub fn new(G: f64, dt: f64, t_end: f64) -> Self {
        Self {
            G,
            softening: DEFAULT_SOFTENING,
            dt,
            t_end,
            strict: false,
        }
    }

    pub fn with_softening(mut self, softening: f64) -> Self {
        self.softening = softening;
        self
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// floor(t_end / dt), fixed for the run. Degenerate ratios
    /// (NaN, negative, dt = 0) give 0 steps.
    pub fn step_count(&self) -> usize {
        let ratio = (self.t_end / self.dt).floor();
        if ratio.is_finite() && ratio > 0.0 {
            ratio as usize
        } else {
            0
        }
    }

    /// Reject values that make the run meaningless
    pub fn validate(&self) -> Result<()> {
        if !(self.G.is_finite() && self.G > 0.0) {
            return Err(SimError::invalid(format!(
                "gravitational constant must be positive, got {}",
                self.G
            )));
        }
        if !(self.softening.is_finite() && self.softening >= 0.0) {
            return Err(SimError::invalid(format!(
                "softening must be non-negative, got {}",
                self.softening
            )));
        }
        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err(SimError::invalid(format!("dt must be positive, got {}", self.dt)));
        }
        if !(self.t_end.is_finite() && self.t_end >= 0.0) {
            return Err(SimError::invalid(format!(
                "total time must be non-negative, got {}",
                self.t_end
            )));
        }
        Ok(())
    }
}
