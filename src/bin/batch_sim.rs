//! Batch decision simulation binary
//!
//! Replays one snapshot through many seeded decisions and reports how the
//! engine's choices are distributed.

use clap::Parser;
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

use siege_ai::batch::{run_batch, BatchConfig};
use siege_ai::{DecisionEngine, GameState, Result};

/// Batch Sim - distribution of AI decisions for one snapshot
#[derive(Parser, Debug)]
#[command(name = "batch_sim")]
#[command(about = "Run many seeded decisions against one snapshot")]
struct Args {
    /// Snapshot JSON file (an empty snapshot when omitted)
    #[arg(long)]
    state: Option<PathBuf>,

    /// Engine config TOML
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of decisions to run
    #[arg(long, default_value_t = 10_000)]
    trials: u32,

    /// Base random seed; trial i uses seed + i
    #[arg(long, default_value_t = 12345)]
    seed: u64,

    /// Write the full report as JSON
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("siege_ai=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let engine = match &args.config {
        Some(path) => DecisionEngine::from_config_file(path)?,
        None => DecisionEngine::default(),
    };
    let state = match &args.state {
        Some(path) => GameState::from_json_str(&std::fs::read_to_string(path)?)?,
        None => GameState::default(),
    };

    println!("Starting Batch Decision Simulation");
    println!("==================================");
    println!(
        "Money: {}, HP you/enemy: {}/{}",
        state.money, state.hp_you, state.hp_enemy
    );
    println!(
        "Structures you/enemy: {}/{}",
        state.buildings_you.len(),
        state.buildings_enemy.len()
    );
    println!("Running {} trials...", args.trials);
    println!();

    let start = Instant::now();
    let report = run_batch(
        &engine,
        &state,
        &BatchConfig {
            trials: args.trials,
            seed: args.seed,
        },
    );
    let elapsed = start.elapsed();

    print!("{}", report.summary());
    println!("Actual time: {:.2}ms", elapsed.as_secs_f64() * 1000.0);

    if let Some(path) = &args.output {
        std::fs::write(path, report.to_json()?)?;
        println!("\nFull report written to {}", path.display());
    }

    Ok(())
}
