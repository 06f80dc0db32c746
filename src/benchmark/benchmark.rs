//! Timing of the direct O(n^2) force law and of full Euler steps
//!
//! Bodies are placed on deterministic trigonometric positions so runs are
//! comparable without a random source.

use std::time::Instant;

use crate::simulation::forces::{ForceLaw, NewtonianGravity};
use crate::simulation::integrator::{ForwardEuler, Integrator};
use crate::simulation::states::Particle;
use crate::simulation::vector::{vec3, Vec3};

const G: f64 = 0.1;
const SOFTENING: f64 = 1.0e-2;
const DT: f64 = 1.0e-3;

/// Deterministic cloud of `n` unit masses at rest
pub fn particle_cloud(n: usize) -> Vec<Particle> {
    (0..n)
        .map(|i| {
            let i_f = i as f64;
            let x = vec3(
                (i_f * 0.37).sin() * 5.0,
                (i_f * 0.13).cos() * 5.0,
                (i_f * 0.07).sin() * 5.0,
            );
            Particle::new(i, x, Vec3::zeros(), 1.0)
        })
        .collect()
}

/// Seconds for one force accumulation over `n` particles
pub fn time_gravity(n: usize) -> f64 {
    let mut particles = particle_cloud(n);
    let gravity = NewtonianGravity::new(G, SOFTENING);

    // Warm up
    gravity.accumulate(&mut particles);
    for p in particles.iter_mut() {
        p.force = Vec3::zeros();
    }

    let t0 = Instant::now();
    gravity.accumulate(&mut particles);
    t0.elapsed().as_secs_f64()
}

/// Seconds per step (forces + Euler) averaged over `steps`
pub fn time_euler(n: usize, steps: usize) -> f64 {
    let mut particles = particle_cloud(n);
    let gravity = NewtonianGravity::new(G, SOFTENING);
    let steps = steps.max(1);

    let t0 = Instant::now();
    for _ in 0..steps {
        gravity.accumulate(&mut particles);
        ForwardEuler.integrate(&mut particles, DT);
    }
    t0.elapsed().as_secs_f64() / steps as f64
}

pub fn bench_gravity() {
    let ns = [200, 400, 800, 1600, 3200, 6400];

    for n in ns {
        let dt_direct = time_gravity(n);
        println!("N = {n:5}, direct = {:8.6} s", dt_direct);
    }
}

pub fn bench_euler() {
    let ns = [200, 400, 800, 1600, 3200];
    let steps = 5;

    for n in ns {
        let per_step = time_euler(n, steps);
        println!("N = {n:5}, euler step = {:8.6} s ({steps} steps)", per_step);
    }
}
