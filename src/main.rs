use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use pincollection::config::PinsConfig;
use pincollection::replay::{self, ReplayError, Scenario};

#[derive(Parser, Debug)]
#[command(name = "pin-replay", about = "Replay pointer input against a pin collection")]
struct Cli {
    /// Scenario JSON file.
    scenario: PathBuf,

    /// Pointer-move throttle window; overrides PINS_MOVE_THROTTLE_MS.
    #[arg(long)]
    throttle_ms: Option<u64>,

    /// Pick radius in world units; overrides PINS_PICK_THRESHOLD.
    #[arg(long)]
    pick_threshold: Option<f64>,
}

fn main() -> Result<(), ReplayError> {
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let cli = Cli::parse();
    let mut config = PinsConfig::from_env();
    if let Some(ms) = cli.throttle_ms {
        config.move_throttle_ms = ms;
    }
    if let Some(threshold) = cli.pick_threshold {
        config.pick_threshold = threshold;
    }
    tracing::info!(scenario = %cli.scenario.display(), ?config, "replaying");

    let scenario = Scenario::load(&cli.scenario)?;
    let events = replay::run(scenario, &config);

    let mut out = io::stdout().lock();
    for event in &events {
        writeln!(out, "{}", serde_json::to_string(event)?)?;
    }
    Ok(())
}
