use nbsim::simulation::forces::{compute_gravity_forces, ForceLaw, NewtonianGravity};
use nbsim::simulation::integrator::{ForwardEuler, Integrator};
use nbsim::simulation::params::Parameters;
use nbsim::simulation::states::Particle;
use nbsim::simulation::vector::{vec3, Vec3};
use nbsim::simulation::engine::Simulation;
use nbsim::simulation::scenario::{sun_earth_particles, DAY, EARTH_ORBIT_RADIUS, G_SI, YEAR};
use nbsim::output::writer::{CsvWriter, StateSink, Trajectory, CSV_HEADER};
use nbsim::{ScenarioConfig, SimError};

use approx::assert_relative_eq;
use tempfile::TempDir;

/// Build a simple 2-body system separated along the x-axis
pub fn two_body(dist: f64, m1: f64, m2: f64) -> Vec<Particle> {
    vec![
        Particle::new(0, vec3(-dist / 2.0, 0.0, 0.0), Vec3::zeros(), m1),
        Particle::new(1, vec3(dist / 2.0, 0.0, 0.0), Vec3::zeros(), m2),
    ]
}

/// A handful of bodies scattered in 3D with mixed masses
pub fn scattered(n: usize) -> Vec<Particle> {
    (0..n)
        .map(|i| {
            let f = i as f64;
            Particle::new(
                i,
                vec3((f * 1.3).sin() * 4.0, (f * 0.7).cos() * 3.0, f * 0.25 - 1.0),
                vec3((f * 0.3).cos(), 0.0, (f * 0.9).sin()),
                1.0 + f * 0.5,
            )
        })
        .collect()
}

// ==================================================================================
// Gravity tests
// ==================================================================================

#[test]
fn gravity_newton_third_law() {
    let mut ps = two_body(1.0, 2.0, 3.0);
    compute_gravity_forces(&mut ps, 0.1, 0.0);

    let net = ps[0].force + ps[1].force;
    assert!(net.norm() < 1e-12, "net force not zero: {:?}", net);
    assert!(ps[0].force.norm() > 0.0);
}

#[test]
fn gravity_pairwise_contributions_cancel_for_many_bodies() {
    let mut ps = scattered(12);
    compute_gravity_forces(&mut ps, 1.0, 1.0e-3);

    let net = ps.iter().fold(Vec3::zeros(), |acc, p| acc + p.force);
    let scale: f64 = ps.iter().map(|p| p.force.norm()).sum();
    assert!(net.norm() <= 1e-12 * scale, "net force {:?} vs scale {}", net, scale);
}

#[test]
fn gravity_points_toward_other_body() {
    let mut ps = two_body(2.0, 1.0, 1.0);
    compute_gravity_forces(&mut ps, 0.1, 0.0);

    let dx = ps[1].position - ps[0].position;
    assert!(ps[0].force.dot(&dx) > 0.0, "force is not toward second body");
    assert!(ps[1].force.dot(&dx) < 0.0, "force is not toward first body");
}

#[test]
fn gravity_inverse_square_law() {
    let mut near = two_body(1.0, 1.0, 1.0);
    let mut far = two_body(2.0, 1.0, 1.0);
    compute_gravity_forces(&mut near, 0.1, 0.0);
    compute_gravity_forces(&mut far, 0.1, 0.0);

    let ratio = near[0].force.norm() / far[0].force.norm();
    assert_relative_eq!(ratio, 4.0, max_relative = 1e-12);
}

#[test]
fn gravity_scales_with_both_masses() {
    let mut base = two_body(1.0, 1.0, 1.0);
    let mut heavy = two_body(1.0, 2.0, 3.0);
    compute_gravity_forces(&mut base, 0.1, 0.0);
    compute_gravity_forces(&mut heavy, 0.1, 0.0);

    assert_relative_eq!(heavy[0].force.x, 6.0 * base[0].force.x, max_relative = 1e-12);
}

#[test]
fn gravity_softening_prevents_blowup() {
    let mut ps = two_body(1e-9, 1.0, 1.0);
    compute_gravity_forces(&mut ps, 0.1, 0.3);

    assert!(ps[0].force.norm().is_finite());
    assert!(ps[0].force.norm() < 1e-6, "softening failed; force too large");
}

// ==================================================================================
// Integrator tests
// ==================================================================================

#[test]
fn integrator_always_clears_force() {
    let mut ps = scattered(6);
    ps[2].mass = 0.0;
    ps[4].mass = -2.0;
    for (i, p) in ps.iter_mut().enumerate() {
        p.force = vec3(i as f64, -1.0, 1.0e20);
    }

    ForwardEuler.integrate(&mut ps, 0.01);

    for p in &ps {
        assert_eq!(p.force, Vec3::zeros(), "particle {} kept its force", p.id);
    }
}

#[test]
fn linear_motion_without_force() {
    let mut ps = vec![Particle::new(0, Vec3::zeros(), vec3(5.0, 0.0, 0.0), 1.0)];
    ForwardEuler.integrate(&mut ps, 1.0);

    assert_eq!(ps[0].position.x, 5.0);
    assert_eq!(ps[0].velocity.x, 5.0);
}

#[test]
fn constant_force_euler_semantics() {
    let mut p = Particle::new(0, Vec3::zeros(), Vec3::zeros(), 2.0);
    p.force = vec3(4.0, 0.0, 0.0);
    let mut ps = vec![p];

    ForwardEuler.integrate(&mut ps, 2.0);

    assert_eq!(ps[0].position.x, 0.0);
    assert_eq!(ps[0].velocity.x, 4.0);
    assert_eq!(ps[0].force, Vec3::zeros());
}

#[test]
fn forces_do_not_compound_across_steps() {
    // the same static configuration must see the same force every step
    let gravity = NewtonianGravity::new(1.0, 0.0);
    let mut ps = two_body(1.0, 1.0, 1.0);

    gravity.accumulate(&mut ps);
    let first = ps[0].force;
    // bodies start at rest, so the first step leaves positions unchanged
    ForwardEuler.integrate(&mut ps, 1.0);
    assert_eq!(ps[0].position, vec3(-0.5, 0.0, 0.0));

    gravity.accumulate(&mut ps);
    assert_eq!(ps[0].force, first);
}

// ==================================================================================
// Driver tests
// ==================================================================================

#[test]
fn momentum_is_conserved_over_a_run() {
    let params = Parameters::new(1.0, 1.0e-3, 0.5).with_softening(0.05);
    let mut sim = Simulation::new(scattered(8), params).unwrap();
    let p0 = sim.system.total_momentum();

    let mut trajectory = Trajectory::new();
    sim.run(&mut trajectory).unwrap();

    let p1 = sim.system.total_momentum();
    assert!((p1 - p0).norm() < 1e-9, "momentum drifted from {:?} to {:?}", p0, p1);
}

#[test]
fn step_count_is_floor_of_duration_over_dt() {
    let mut sim = Simulation::new(two_body(1.0, 1.0, 1.0), Parameters::new(1.0, 0.3, 1.0)).unwrap();
    let mut trajectory = Trajectory::new();
    let summary = sim.run(&mut trajectory).unwrap();

    assert_eq!(summary.steps, 3);
    assert_eq!(trajectory.len(), 4);
    assert_relative_eq!(summary.final_time, 0.9, max_relative = 1e-12);
}

#[test]
fn two_body_orbit_closes_after_a_year() {
    // ten-minute steps keep forward Euler's drift well under a percent
    let params = Parameters::new(G_SI, 600.0, YEAR).with_softening(1.0e3);
    let mut sim = Simulation::new(sun_earth_particles(), params).unwrap();
    let start = sim.particles()[1].position;
    let e0 = sim.total_energy();

    let mut trajectory = Trajectory::new();
    let summary = sim.run(&mut trajectory).unwrap();
    assert_eq!(summary.steps, 52_560);

    let end = sim.particles()[1].position;
    let miss = (end - start).norm() / EARTH_ORBIT_RADIUS;
    assert!(miss < 0.02, "orbit did not close: off by {:.4} radii", miss);

    let e1 = sim.total_energy();
    assert!(((e1 - e0) / e0).abs() < 0.01, "energy drifted from {e0:e} to {e1:e}");
}

#[test]
fn daily_steps_drift_outward() {
    // forward Euler gains energy; with daily steps Earth spirals out
    let params = Parameters::new(G_SI, DAY, YEAR).with_softening(1.0e3);
    let mut sim = Simulation::new(sun_earth_particles(), params).unwrap();
    let mut trajectory = Trajectory::new();
    sim.run(&mut trajectory).unwrap();

    let ps = sim.particles();
    let r = (ps[1].position - ps[0].position).norm();
    assert!(r > EARTH_ORBIT_RADIUS);
}

// ==================================================================================
// Output tests
// ==================================================================================

#[test]
fn csv_output_format() {
    let ps = vec![
        Particle::new(0, vec3(1.0, 2.0, 3.0), vec3(0.1, 0.2, 0.3), 5.0),
        Particle::new(1, vec3(4.0, 5.0, 6.0), vec3(0.4, 0.5, 0.6), 10.0),
    ];
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("log.csv");

    let mut writer = CsvWriter::create(&path).unwrap();
    writer.record(&ps, 0.0).unwrap();
    writer.flush().unwrap();
    drop(writer);

    let text = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        vec![CSV_HEADER, "0,0,5,1,2,3,0.1,0.2,0.3", "0,1,10,4,5,6,0.4,0.5,0.6"]
    );
}

#[test]
fn csv_run_writes_header_and_one_line_per_particle_per_record() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("nested").join("dir").join("out.csv");

    let mut sim = Simulation::new(two_body(1.0, 1.0, 1.0), Parameters::new(1.0, 0.1, 0.5)).unwrap();
    let mut writer = CsvWriter::create(&path).unwrap();
    sim.run(&mut writer).unwrap();
    writer.flush().unwrap();
    drop(writer);

    let text = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "time,id,mass,x,y,z,vx,vy,vz");
    // header + (initial + 5 steps) * 2 particles
    assert_eq!(lines.len(), 1 + 6 * 2);
    assert!(lines[1].starts_with("0,0,"));
    assert!(lines[2].starts_with("0,1,"));
    assert!(lines.iter().skip(1).all(|l| l.split(',').count() == 9));
}

#[test]
fn unopenable_output_is_an_error() {
    let tmp = TempDir::new().unwrap();
    // a directory cannot be opened as the output file
    let err = CsvWriter::create(tmp.path()).err().unwrap();
    assert!(matches!(err, SimError::Output { .. }));
}

// ==================================================================================
// Scenario tests
// ==================================================================================

#[test]
fn scenario_file_runs_end_to_end() {
    let tmp = TempDir::new().unwrap();
    let scenario = tmp.path().join("binary.yaml");
    std::fs::write(
        &scenario,
        r#"
integrator: euler
parameters:
  G: 1.0
  softening: 0.01
  dt: 0.01
  t_end: 1.0
  strict: true
particles:
  - { id: 10, mass: 1.0, position: [-0.5, 0.0, 0.0], velocity: [0.0, -0.7, 0.0] }
  - { id: 20, mass: 1.0, position: [0.5, 0.0, 0.0], velocity: [0.0, 0.7, 0.0] }
"#,
    )
    .unwrap();

    let cfg = ScenarioConfig::from_path(&scenario).unwrap();
    let mut sim = Simulation::from_config(cfg).unwrap();
    let mut trajectory = Trajectory::new();
    let summary = sim.run(&mut trajectory).unwrap();

    assert_eq!(summary.steps, 100);
    assert_eq!(trajectory.len(), 101);
    let ids: Vec<usize> = trajectory.last().unwrap().particles.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![10, 20]);
}

#[test]
fn bundled_scenarios_load() {
    let dir = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios");

    let sun_earth = Simulation::from_config(ScenarioConfig::from_path(dir.join("sun_earth.yaml")).unwrap()).unwrap();
    assert_eq!(sun_earth.parameters.step_count(), 365);
    assert_eq!(sun_earth.particles(), sun_earth_particles().as_slice());

    let eight = Simulation::from_config(ScenarioConfig::from_path(dir.join("figure_eight.yaml")).unwrap()).unwrap();
    assert_eq!(eight.particles().len(), 3);
    assert!(eight.parameters.strict);
    assert!(eight.system.total_momentum().norm() < 1e-8);
}
