use nbsim::{bench_gravity, bench_leapfrog_curve, check_parallel_agreement};
use nbsim::{Fanout, Paced, ProgressLogger, Scenario, ScenarioConfig, Simulation, TrajectoryRecorder};

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(about = "Direct-summation N-body gravity with a kick-drift-kick leapfrog")]
struct Args {
    /// Scenario file: a path, or a name under `scenarios/`
    #[arg(short, default_value = "gaussian_cloud.yaml")]
    file_name: String,

    /// Write the recorded trajectory to this YAML file
    #[arg(long)]
    record: Option<PathBuf>,

    /// Record and log every k-th step
    #[arg(long, default_value_t = 1)]
    every: usize,

    /// Wall-clock pause after each step, in milliseconds
    #[arg(long, default_value_t = 0)]
    pace_ms: u64,

    /// Run the scaling benchmarks instead of a scenario
    #[arg(long)]
    bench: bool,
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let direct = PathBuf::from(file_name);
    let config_path = if direct.exists() {
        direct
    } else {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name)
    };

    let file = File::open(&config_path)
        .with_context(|| format!("opening scenario {}", config_path.display()))?;
    let scenario_cfg = ScenarioConfig::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing scenario {}", config_path.display()))?;

    Ok(scenario_cfg)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.bench {
        bench_gravity();
        bench_leapfrog_curve();
        println!("parallel path agrees with serial: {}", check_parallel_agreement(1024));
        return Ok(());
    }

    let scenario_cfg = load_scenario_from_yaml(&args.file_name)?;
    let Scenario { parameters, system } = Scenario::build_scenario(scenario_cfg)?;
    let n_steps = parameters.n_steps();

    let mut recorder = TrajectoryRecorder::new(args.every);
    let mut progress = ProgressLogger::new(args.every, parameters.G, parameters.softening, &system);
    let observers = Fanout::new().with(&mut progress).with(&mut recorder);
    let mut observer = Paced::new(observers, Duration::from_millis(args.pace_ms));

    let mut sim = Simulation::new(system, &parameters)?;
    sim.run(n_steps, &mut observer)?;
    drop(observer);

    let fin = sim.into_system();
    info!(
        "t = {:.4}, energy = {:+.6e}, |momentum| = {:.3e}",
        fin.time(),
        fin.total_energy(parameters.G, parameters.softening),
        fin.total_momentum().norm()
    );

    if let Some(path) = args.record {
        recorder.write_yaml(&path)?;
    }

    Ok(())
}
