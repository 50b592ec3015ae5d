//! Attack target selection and hit resolution

use rand::Rng;

use crate::actions::{Action, WaitReason};
use crate::core::config::{AttackConfig, EngineConfig};
use crate::core::types::{Building, BuildingKind, GameState};

/// Kill value of a target: favours damaged structures, economy doubly so
pub fn target_value(target: &Building, config: &AttackConfig) -> f64 {
    let base = match target.kind {
        BuildingKind::Petro => config.petro_target_value,
        _ => config.default_target_value,
    };
    base / target.hp.max(1.0)
}

/// Highest-value target; the earliest one wins a tie
pub fn select_target<'a>(targets: &'a [Building], config: &AttackConfig) -> Option<&'a Building> {
    targets
        .iter()
        .map(|t| (t, target_value(t, config)))
        .fold(None, |best: Option<(&Building, f64)>, (t, value)| match best {
            Some((_, best_value)) if best_value >= value => best,
            _ => Some((t, value)),
        })
        .map(|(t, _)| t)
}

/// Probability that the attack misses
///
/// Aggression above the baseline sharpens aim. A defense structure on the
/// target side adds `defense_miss_penalty` on top.
pub fn miss_chance(state: &GameState, aggression: f64, config: &EngineConfig) -> f64 {
    let attack = &config.attack;
    let mut chance = (attack.base_miss_chance
        - (aggression - config.aggression.baseline) * attack.miss_aggression_factor)
        .max(0.0);

    if state.player_has(&BuildingKind::Defense) {
        chance += attack.defense_miss_penalty;
    }

    chance.min(1.0)
}

/// Choose an attack from the first enemy launcher onto the best target
pub fn choose_attack<R: Rng + ?Sized>(
    state: &GameState,
    aggression: f64,
    config: &EngineConfig,
    rng: &mut R,
) -> Action {
    let Some(launcher) = state.enemy_launchers().next() else {
        return Action::wait(WaitReason::NoLauncher);
    };
    let Some(target) = select_target(&state.buildings_you, &config.attack) else {
        return Action::wait(WaitReason::NoTarget);
    };

    let miss = miss_chance(state, aggression, config);
    let roll: f64 = rng.gen();
    let expected_hit = roll >= miss;

    tracing::trace!(
        from = %launcher.id,
        target = %target.id,
        miss,
        roll,
        expected_hit,
        "Attack resolved"
    );

    Action::Attack {
        from: launcher.id.clone(),
        target: target.id.clone(),
        expected_hit,
    }
}
