//! Utility-weighted structure selection

use rand::Rng;

use crate::actions::{Action, WaitReason};
use crate::core::config::EngineConfig;
use crate::core::types::{BuildingKind, GameState};

/// Utility of building `kind` right now
///
/// Depends only on the kind, the state's money, enemy structures and radar
/// flag, and the aggression passed in.
pub fn utility_score(
    kind: &BuildingKind,
    state: &GameState,
    aggression: f64,
    config: &EngineConfig,
) -> f64 {
    let weight = config.catalog.weight(kind);
    let build = &config.build;

    match kind {
        // Economy first when money is tight
        BuildingKind::Petro => {
            weight + build.scarcity_rate * (build.scarcity_ceiling - state.money).max(0.0)
        }
        BuildingKind::Radar if !state.buildings_enemy.is_empty() && !state.radar_active => {
            weight + build.radar_scouting_bonus
        }
        BuildingKind::Radar => weight,
        BuildingKind::Launcher => {
            weight + (aggression - config.aggression.baseline) * build.launcher_aggression_factor
        }
        BuildingKind::Defense | BuildingKind::Airport | BuildingKind::Other(_) => weight,
    }
}

/// Affordable structures with their utility, in catalog order
pub fn affordable_scores(
    state: &GameState,
    aggression: f64,
    config: &EngineConfig,
) -> Vec<(BuildingKind, f64)> {
    config
        .catalog
        .affordable(state.money)
        .map(|entry| {
            let score = utility_score(&entry.kind, state, aggression, config);
            (entry.kind.clone(), score)
        })
        .collect()
}

/// Weighted random selection from scored options
///
/// Draws `r` from `[0, total)` and returns the first option whose running
/// sum reaches `r`. Falls back to the first option if accumulated rounding
/// leaves every running sum below the draw.
pub fn weighted_pick<'a, T, R: Rng + ?Sized>(
    scores: &'a [(T, f64)],
    rng: &mut R,
) -> Option<&'a T> {
    let (first, _) = scores.first()?;

    let total: f64 = scores.iter().map(|(_, s)| *s).sum();
    if !(total > 0.0 && total.is_finite()) {
        return Some(first);
    }

    let roll = rng.gen_range(0.0..total);
    let mut acc = 0.0;
    for (option, score) in scores {
        acc += score;
        if acc >= roll {
            return Some(option);
        }
    }

    Some(first)
}

/// Choose a structure to buy, or wait when nothing is affordable
pub fn choose_build<R: Rng + ?Sized>(
    state: &GameState,
    aggression: f64,
    config: &EngineConfig,
    rng: &mut R,
) -> Action {
    let scores = affordable_scores(state, aggression, config);

    let Some(kind) = weighted_pick(&scores, rng) else {
        tracing::trace!(money = state.money, "Nothing affordable");
        return Action::wait(WaitReason::NotEnoughMoney);
    };

    tracing::trace!(?scores, chosen = %kind, "Build scores");

    // Every affordable entry carries a price
    let price = config.catalog.price(kind).unwrap_or_default();
    Action::Build {
        kind: kind.clone(),
        price,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Building;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rich_state() -> GameState {
        GameState {
            money: 3000.0,
            ..GameState::default()
        }
    }

    #[test]
    fn test_petro_scarcity_bonus() {
        let config = EngineConfig::default();
        let mut state = rich_state();
        let rich = utility_score(&BuildingKind::Petro, &state, 0.5, &config);
        assert!((rich - (0.9 + 2.0)).abs() < 1e-9);

        state.money = 6000.0;
        let flush = utility_score(&BuildingKind::Petro, &state, 0.5, &config);
        assert!((flush - 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_radar_bonus_needs_enemy_and_inactive_radar() {
        let config = EngineConfig::default();
        let mut state = rich_state();
        assert_eq!(utility_score(&BuildingKind::Radar, &state, 0.5, &config), 0.8);

        state.buildings_enemy.push(Building::new(1, "airport", 100.0));
        let scouting = utility_score(&BuildingKind::Radar, &state, 0.5, &config);
        assert!((scouting - 0.9).abs() < 1e-9);

        state.radar_active = true;
        assert_eq!(utility_score(&BuildingKind::Radar, &state, 0.5, &config), 0.8);
    }

    #[test]
    fn test_launcher_tracks_aggression() {
        let config = EngineConfig::default();
        let state = rich_state();
        let calm = utility_score(&BuildingKind::Launcher, &state, 0.1, &config);
        let hot = utility_score(&BuildingKind::Launcher, &state, 0.9, &config);
        assert!((calm - 0.69).abs() < 1e-9);
        assert!((hot - 1.01).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_kind_uses_default_weight() {
        let config = EngineConfig::default();
        let score = utility_score(&BuildingKind::from("silo"), &rich_state(), 0.5, &config);
        assert_eq!(score, 0.5);
    }

    #[test]
    fn test_score_is_pure() {
        let config = EngineConfig::default();
        let mut state = rich_state();
        state.buildings_enemy.push(Building::new(1, "launcher", 10.0));
        for kind in config.catalog.entries().iter().map(|e| &e.kind) {
            let a = utility_score(kind, &state, 0.7, &config);
            let b = utility_score(kind, &state.clone(), 0.7, &config);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_broke_ai_waits() {
        let config = EngineConfig::default();
        let state = GameState {
            money: 1199.0,
            ..GameState::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        assert_eq!(
            choose_build(&state, 0.5, &config, &mut rng),
            Action::wait(WaitReason::NotEnoughMoney)
        );
    }

    #[test]
    fn test_build_is_always_affordable() {
        let config = EngineConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for money in [1200.0, 1500.0, 2000.0, 2499.0, 2500.0, 9000.0] {
            let state = GameState {
                money,
                ..GameState::default()
            };
            for _ in 0..50 {
                match choose_build(&state, 0.5, &config, &mut rng) {
                    Action::Build { kind, price } => {
                        assert!(price <= money, "{} costs {} > {}", kind, price, money);
                        assert_eq!(config.catalog.price(&kind), Some(price));
                    }
                    other => panic!("expected a build, got {:?}", other),
                }
            }
        }
    }

    #[test]
    fn test_single_option_always_chosen() {
        let config = EngineConfig::default();
        let state = GameState {
            money: 1200.0,
            ..GameState::default()
        };
        let scores = affordable_scores(&state, 0.5, &config);
        let kinds: Vec<_> = scores.iter().map(|(k, _)| k.clone()).collect();
        assert_eq!(kinds, vec![BuildingKind::Launcher, BuildingKind::Airport]);

        let only = [(BuildingKind::Airport, 0.6)];
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..20 {
            assert_eq!(weighted_pick(&only, &mut rng), Some(&BuildingKind::Airport));
        }
    }

    #[test]
    fn test_zero_weights_fall_back_to_first() {
        let scores = [("a", 0.0), ("b", 0.0)];
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        assert_eq!(weighted_pick(&scores, &mut rng), Some(&"a"));
        let runaway = [("a", f64::INFINITY), ("b", 1.0)];
        assert_eq!(weighted_pick(&runaway, &mut rng), Some(&"a"));
        let empty: [(&str, f64); 0] = [];
        assert_eq!(weighted_pick(&empty, &mut rng), None);
    }
}
