//! Simulation driver
//!
//! Owns the system state, the force set and one integrator, and runs the
//! fixed-step loop. Each step, in order:
//! 1. accumulate forces once over the whole collection
//! 2. integrate once with `dt` (which clears the forces)
//! 3. advance the clock by `dt`
//! 4. hand the collection and the new time to the sink

use log::{debug, info, log_enabled, trace, warn, Level};

use crate::error::{Result, SimError};
use crate::output::writer::StateSink;
use crate::simulation::forces::{ForceSet, NewtonianGravity};
use crate::simulation::integrator::{ForwardEuler, Integrator};
use crate::simulation::params::Parameters;
use crate::simulation::states::{Particle, System};

/// Energy/progress lines logged at debug level over a run
const PROGRESS_CHECKPOINTS: usize = 10;

/// What a completed run looked like
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub steps: usize,
    pub final_time: f64,
}

pub struct Simulation {
    pub system: System,
    pub parameters: Parameters,
    forces: ForceSet,
    integrator: Box<dyn Integrator>,
    gravity: NewtonianGravity, // kept for energy diagnostics
    steps_taken: usize,
    warned_non_finite: bool,
}

impl Simulation {
    /// Direct gravity from `parameters` and forward Euler
    pub fn new(particles: Vec<Particle>, parameters: Parameters) -> Result<Self> {
        Self::with_integrator(particles, parameters, Box::new(ForwardEuler))
    }

    /// In strict mode the parameters and particles are validated here
    pub fn with_integrator(
        particles: Vec<Particle>,
        parameters: Parameters,
        integrator: Box<dyn Integrator>,
    ) -> Result<Self> {
        if parameters.strict {
            parameters.validate()?;
            validate_particles(&particles)?;
        }

        let gravity = NewtonianGravity::new(parameters.G, parameters.softening);
        let forces = ForceSet::new().with(gravity);

        Ok(Self {
            system: System::new(particles),
            parameters,
            forces,
            integrator,
            gravity,
            steps_taken: 0,
            warned_non_finite: false,
        })
    }

    pub fn particles(&self) -> &[Particle] {
        &self.system.particles
    }

    pub fn time(&self) -> f64 {
        self.system.t
    }

    pub fn steps_taken(&self) -> usize {
        self.steps_taken
    }

    pub fn integrator_name(&self) -> &'static str {
        self.integrator.name()
    }

    /// Kinetic plus softened potential energy of the current state
    pub fn total_energy(&self) -> f64 {
        self.system.kinetic_energy() + self.gravity.potential_energy(&self.system.particles)
    }

    /// Advance one step: forces, integrate, clock
    pub fn step(&mut self) -> Result<()> {
        let dt = self.parameters.dt;

        self.forces.accumulate(&mut self.system.particles);
        self.integrator.integrate(&mut self.system.particles, dt);
        self.system.t += dt;

        self.steps_taken += 1;
        self.check_finite(self.steps_taken)
    }

    /// Run `floor(t_end / dt)` steps, recording t = 0 first and then the
    /// state after every step
    pub fn run(&mut self, sink: &mut dyn StateSink) -> Result<RunSummary> {
        let steps = self.parameters.step_count();
        let every = (steps / PROGRESS_CHECKPOINTS).max(1);

        info!(
            "running {} particles for {} steps (dt = {}, integrator = {})",
            self.system.len(),
            steps,
            self.parameters.dt,
            self.integrator.name()
        );
        let initial_energy = self.total_energy();
        debug!("t = {}: E = {:e}", self.system.t, initial_energy);

        sink.record(&self.system.particles, self.system.t)?;

        for step in 0..steps {
            self.step()?;
            trace!("step {} done, t = {}", step + 1, self.system.t);
            sink.record(&self.system.particles, self.system.t)?;

            if (step + 1) % every == 0 && log_enabled!(Level::Debug) {
                let energy = self.total_energy();
                debug!(
                    "step {}/{}: t = {}, E = {:e}, dE/E0 = {:e}",
                    step + 1,
                    steps,
                    self.system.t,
                    energy,
                    (energy - initial_energy) / initial_energy.abs()
                );
            }
        }

        info!("finished at t = {}", self.system.t);
        Ok(RunSummary {
            steps,
            final_time: self.system.t,
        })
    }

    /// `step` counts from 1, matching the progress logs
    fn check_finite(&mut self, step: usize) -> Result<()> {
        let Some(bad) = self.system.particles.iter().find(|p| !p.is_finite()) else {
            return Ok(());
        };

        if self.parameters.strict {
            return Err(SimError::NumericalInstability {
                step,
                time: self.system.t,
                id: bad.id,
            });
        }
        if !self.warned_non_finite {
            warn!(
                "particle {} has non-finite state at step {} (t = {}); continuing",
                bad.id, step, self.system.t
            );
            self.warned_non_finite = true;
        }
        Ok(())
    }
}

/// Positive finite masses and unique ids
fn validate_particles(particles: &[Particle]) -> Result<()> {
    let mut seen = std::collections::HashSet::with_capacity(particles.len());
    for p in particles {
        if !(p.mass.is_finite() && p.mass > 0.0) {
            return Err(SimError::invalid(format!(
                "particle {} has non-positive mass {}",
                p.id, p.mass
            )));
        }
        if !p.is_finite() {
            return Err(SimError::invalid(format!(
                "particle {} has non-finite initial state",
                p.id
            )));
        }
        if !seen.insert(p.id) {
            return Err(SimError::invalid(format!("duplicate particle id {}", p.id)));
        }
    }
    Ok(())
}
