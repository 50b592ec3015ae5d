//! Parallel batch runner

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

use crate::ai::{Decision, DecisionEngine};
use crate::batch::report::BatchReport;
use crate::core::types::GameState;

/// Configuration for a batch run
#[derive(Clone, Debug)]
pub struct BatchConfig {
    pub trials: u32,
    pub seed: u64,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            trials: 10_000,
            seed: 12345,
        }
    }
}

/// Run `config.trials` decisions on `state`
///
/// Trial `i` draws from its own generator seeded with `seed + i`, so the
/// report is identical for a given seed however rayon splits the work.
pub fn run_batch(engine: &DecisionEngine, state: &GameState, config: &BatchConfig) -> BatchReport {
    let start = std::time::Instant::now();

    let decisions: Vec<Decision> = (0..config.trials)
        .into_par_iter()
        .map(|trial| {
            let mut rng = ChaCha8Rng::seed_from_u64(config.seed.wrapping_add(u64::from(trial)));
            engine.decide(state, &mut rng)
        })
        .collect();

    let report = BatchReport::from_decisions(config.seed, &decisions);

    tracing::info!(
        trials = config.trials,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Batch complete"
    );

    report
}
