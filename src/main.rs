use nbsim::{bench_euler, bench_gravity, sun_earth_parameters, sun_earth_particles};
use nbsim::{CsvWriter, ScenarioConfig, Simulation};

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about = "Fixed-step gravitational N-body simulator")]
struct Args {
    /// YAML scenario; the built-in Sun/Earth year runs when omitted
    scenario: Option<PathBuf>,

    /// CSV trajectory output
    #[arg(short, long, default_value = "data/output.csv")]
    output: PathBuf,

    /// Validate inputs and stop on NaN/inf state
    #[arg(long)]
    strict: bool,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Time the force law and Euler steps instead of simulating
    #[arg(long)]
    bench: bool,
}

// load here to keep main clean
fn load_simulation(args: &Args) -> Result<Simulation> {
    let sim = match &args.scenario {
        Some(path) => {
            let mut cfg = ScenarioConfig::from_path(path)
                .with_context(|| format!("failed to load scenario {}", path.display()))?;
            cfg.parameters.strict |= args.strict;
            Simulation::from_config(cfg)?
        }
        None => {
            info!("no scenario given, running the built-in Sun/Earth year");
            Simulation::new(sun_earth_particles(), sun_earth_parameters().strict(args.strict))?
        }
    };
    Ok(sim)
}

fn init_logging(args: &Args) {
    let level = match (args.quiet, args.verbose) {
        (true, _) => "warn",
        (false, 0) => "info",
        (false, 1) => "debug",
        (false, _) => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args);

    if args.bench {
        bench_gravity();
        bench_euler();
        return Ok(());
    }

    let mut sim = load_simulation(&args)?;

    // Open the output before stepping so a bad path aborts the run
    let mut writer = CsvWriter::create(&args.output)?;
    let summary = sim
        .run(&mut writer)
        .with_context(|| format!("simulation failed after {} steps", sim.steps_taken()))?;
    writer.flush()?;

    info!("{} steps, t = {}", summary.steps, summary.final_time);
    println!("Simulation complete. Output written to {}", args.output.display());

    Ok(())
}
