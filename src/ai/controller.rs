//! Top-level decision policy for the AI opponent

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::actions::Action;
use crate::ai::aggression::estimate_aggression;
use crate::ai::attack::choose_attack;
use crate::ai::build::choose_build;
use crate::core::config::{load_config, EngineConfig};
use crate::core::error::Result;
use crate::core::types::{BuildingKind, GameState};

/// Which policy rule produced a decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionRule {
    EmergencyDefense,
    RadarActivation,
    Offense,
    Economy,
}

impl DecisionRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            DecisionRule::EmergencyDefense => "emergency_defense",
            DecisionRule::RadarActivation => "radar_activation",
            DecisionRule::Offense => "offense",
            DecisionRule::Economy => "economy",
        }
    }
}

/// One action plus the aggression it was chosen under
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub action: Action,
    pub aggression: f64,
    pub rule: DecisionRule,
}

impl Decision {
    /// Copy of `state` carrying the aggression computed for this decision
    pub fn annotate(&self, state: &GameState) -> GameState {
        GameState {
            aggression: Some(self.aggression),
            ..state.clone()
        }
    }
}

/// Stateless decision engine over an immutable configuration
///
/// Safe to share across threads; every call brings its own random source.
#[derive(Debug, Clone, Default)]
pub struct DecisionEngine {
    config: EngineConfig,
}

impl DecisionEngine {
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn from_config_file(path: &Path) -> Result<Self> {
        Ok(Self {
            config: load_config(path)?,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Decide the next action for a raw request payload
    pub fn decide_value<R: Rng + ?Sized>(
        &self,
        payload: &serde_json::Value,
        rng: &mut R,
    ) -> Result<Decision> {
        let state = GameState::from_value(payload)?;
        Ok(self.decide(&state, rng))
    }

    /// Decide the next action
    ///
    /// Aggression is estimated once, then the first matching rule wins:
    /// 1. Emergency defense when the AI trails badly and can pay for it
    /// 2. Radar when requested and money allows
    /// 3. Attack with probability `aggression` if a launcher and a target exist
    /// 4. Otherwise build
    pub fn decide<R: Rng + ?Sized>(&self, state: &GameState, rng: &mut R) -> Decision {
        let aggression = estimate_aggression(state, &self.config.aggression);
        let (rule, action) = self.apply_policy(state, aggression, rng);

        tracing::debug!(
            rule = rule.as_str(),
            aggression,
            action = action.name(),
            money = state.money,
            "Decision made"
        );

        Decision {
            action,
            aggression,
            rule,
        }
    }

    fn apply_policy<R: Rng + ?Sized>(
        &self,
        state: &GameState,
        aggression: f64,
        rng: &mut R,
    ) -> (DecisionRule, Action) {
        let policy = &self.config.policy;

        if let Some(action) = self.emergency_defense(state) {
            return (DecisionRule::EmergencyDefense, action);
        }

        if state.money > policy.radar_min_money && state.radar_needed {
            return (DecisionRule::RadarActivation, Action::UseRadar);
        }

        if state.enemy_has_launcher() && !state.buildings_you.is_empty() {
            let roll: f64 = rng.gen();
            if roll < aggression {
                let action = choose_attack(state, aggression, &self.config, rng);
                return (DecisionRule::Offense, action);
            }
        }

        (
            DecisionRule::Economy,
            choose_build(state, aggression, &self.config, rng),
        )
    }

    /// Hard override to buy defense, bypassing utility weighting
    ///
    /// Only fires when the defense price is covered by current money.
    fn emergency_defense(&self, state: &GameState) -> Option<Action> {
        let policy = &self.config.policy;
        if state.hp_margin() >= policy.emergency_hp_margin
            || state.money <= policy.emergency_min_money
        {
            return None;
        }

        let price = self.config.catalog.price(&BuildingKind::Defense)?;
        if price > state.money {
            tracing::debug!(price, money = state.money, "Emergency defense unaffordable");
            return None;
        }

        Some(Action::Build {
            kind: BuildingKind::Defense,
            price,
        })
    }
}
