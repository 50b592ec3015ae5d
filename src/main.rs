//! Siege AI - single decision entry point
//!
//! Reads one match snapshot as JSON (file or stdin), decides the AI's next
//! action and prints it as JSON on stdout. Logs go to stderr.

use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::io::{self, Read};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use siege_ai::{DecisionEngine, GameState, Result};

/// Decide the AI opponent's next action for a match snapshot
#[derive(Parser, Debug)]
#[command(name = "siege-ai")]
#[command(about = "Decide the AI opponent's next action")]
struct Args {
    /// Snapshot JSON file (reads stdin when omitted)
    state: Option<PathBuf>,

    /// Engine config TOML
    #[arg(long)]
    config: Option<PathBuf>,

    /// Random seed for a reproducible decision
    #[arg(long)]
    seed: Option<u64>,

    /// Print the full decision (rule and aggression), not just the action
    #[arg(long, default_value_t = false)]
    decision: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("siege_ai=info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let engine = match &args.config {
        Some(path) => DecisionEngine::from_config_file(path)?,
        None => DecisionEngine::default(),
    };

    let raw = match &args.state {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    let state = GameState::from_json_str(&raw)?;

    let mut rng = match args.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };

    let decision = engine.decide(&state, &mut rng);
    tracing::info!(
        rule = decision.rule.as_str(),
        aggression = decision.aggression,
        "Decided {}",
        decision.action.name()
    );

    let json = if args.decision {
        serde_json::to_string(&decision)?
    } else {
        serde_json::to_string(&decision.action)?
    };
    println!("{}", json);

    Ok(())
}
