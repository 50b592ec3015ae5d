//! Aggression estimate from the player's recent behaviour and record

use crate::core::config::AggressionConfig;
use crate::core::types::GameState;

fn matches_any(tag: &str, markers: &[String]) -> bool {
    markers.iter().any(|m| tag.contains(m.as_str()))
}

/// Estimate how offensively the AI should play this turn
///
/// 1. Start from the baseline
/// 2. Shift by `step` per offensive tag minus defensive tag
/// 3. Back off against a player with more than `veteran_wins` wins
/// 4. Clamp into `[min, max]`
///
/// A tag matching both marker sets counts on both sides.
pub fn estimate_aggression(state: &GameState, config: &AggressionConfig) -> f64 {
    let offense = state
        .recent_player_actions
        .iter()
        .filter(|tag| matches_any(tag, &config.offense_markers))
        .count() as f64;
    let defense = state
        .recent_player_actions
        .iter()
        .filter(|tag| matches_any(tag, &config.defense_markers))
        .count() as f64;

    let mut aggression = config.baseline + config.step * (offense - defense);

    if state.player_wins() > config.veteran_wins {
        aggression -= config.veteran_penalty;
    }

    aggression.clamp(config.min, config.max)
}
