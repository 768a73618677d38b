use sphsim::{ScenarioConfig, Scenario};
use sphsim::{run_2d, run_headless, bench_step};

use anyhow::Result;
use clap::Parser;
use log::info;

use std::path::PathBuf;

#[derive(Parser, Debug)]
struct Args {
    /// Scenario file, either a path or a name under `scenarios/`
    #[arg(short, default_value = "default.yaml")]
    file_name: String,

    /// Run without opening a window
    #[arg(long)]
    headless: bool,

    /// Number of headless steps (overrides the scenario)
    #[arg(long)]
    steps: Option<u64>,

    /// Time a single step for several particle counts and exit
    #[arg(long)]
    bench: bool,
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let direct = PathBuf::from(file_name);
    let config_path = if direct.is_file() {
        direct
    } else {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name)
    };
    info!("loading scenario {}", config_path.display());

    ScenarioConfig::load(&config_path)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.bench {
        bench_step();
        return Ok(());
    }

    let scenario_cfg = load_scenario_from_yaml(&args.file_name)?;
    let mut scenario = Scenario::build_scenario(scenario_cfg)?;

    if args.headless || !scenario.engine.viewer {
        let steps = args.steps.unwrap_or(scenario.engine.steps);
        let summary = run_headless(&mut scenario, steps)?;
        println!(
            "{} steps, {} resets, {} guarded pairs, {} guarded particles",
            summary.steps, summary.resets, summary.guarded_pairs, summary.guarded_particles
        );
    }
    else {
        run_2d(scenario);
    }

    Ok(())
}
