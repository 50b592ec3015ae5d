//! Engine configuration with documented constants
//!
//! Every tuning number the decision engine uses lives here. The defaults
//! reproduce the shipped opponent; a TOML file may override any table:
//!
//! ```toml
//! [aggression]
//! veteran_wins = 5
//!
//! [policy]
//! radar_min_money = 2500.0
//!
//! [[catalog]]
//! kind = "petro"
//! weight = 0.9
//! price = 2500.0
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::actions::catalog::UtilityCatalog;
use crate::core::error::{EngineError, Result};

/// Lowest aggression any configuration may produce
pub const AGGRESSION_FLOOR: f64 = 0.1;

/// Highest aggression any configuration may produce
pub const AGGRESSION_CEILING: f64 = 0.95;

/// How the player's recent behaviour maps to an aggression level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggressionConfig {
    /// Neutral aggression, also the pivot for aggression-scaled bonuses
    pub baseline: f64,
    /// Shift per net offensive (or defensive) action tag
    pub step: f64,
    /// Substrings that mark an action tag as offensive
    pub offense_markers: Vec<String>,
    /// Substrings that mark an action tag as defensive
    pub defense_markers: Vec<String>,
    /// Combined player wins above which the AI turns cautious
    pub veteran_wins: u32,
    /// Aggression removed when facing a veteran player
    pub veteran_penalty: f64,
    pub min: f64,
    pub max: f64,
}

impl Default for AggressionConfig {
    fn default() -> Self {
        Self {
            baseline: 0.5,
            step: 0.1,
            offense_markers: vec!["launch".into(), "attack".into(), "drone".into()],
            defense_markers: vec!["defend".into(), "radar".into()],
            veteran_wins: 8,
            veteran_penalty: 0.1,
            min: AGGRESSION_FLOOR,
            max: AGGRESSION_CEILING,
        }
    }
}

/// Dynamic adjustments applied on top of catalog weights
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Below this balance petro gains a scarcity bonus
    pub scarcity_ceiling: f64,
    /// Bonus per unit of money below the ceiling
    ///
    /// At 0.001 a broke AI scores petro 5.0 above its base weight, which
    /// makes economy the near-certain pick when money is tight.
    pub scarcity_rate: f64,
    /// Extra radar weight while the enemy has structures and radar is off
    pub radar_scouting_bonus: f64,
    /// Launcher bonus per unit of aggression above the baseline
    pub launcher_aggression_factor: f64,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            scarcity_ceiling: 5000.0,
            scarcity_rate: 0.001,
            radar_scouting_bonus: 0.1,
            launcher_aggression_factor: 0.4,
        }
    }
}

/// Target valuation and hit resolution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttackConfig {
    /// Miss chance at baseline aggression
    pub base_miss_chance: f64,
    /// Miss chance removed per unit of aggression above the baseline
    pub miss_aggression_factor: f64,
    /// Hit probability lost when the target side owns a defense structure
    ///
    /// Set to 0.0 to resolve hits from aggression alone.
    pub defense_miss_penalty: f64,
    /// Kill value numerator for economy targets
    pub petro_target_value: f64,
    /// Kill value numerator for every other target
    pub default_target_value: f64,
}

impl Default for AttackConfig {
    fn default() -> Self {
        Self {
            base_miss_chance: 0.08,
            miss_aggression_factor: 0.04,
            defense_miss_penalty: 0.1,
            petro_target_value: 2.0,
            default_target_value: 1.0,
        }
    }
}

/// Thresholds of the ordered decision policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    /// Emergency defense fires when `hp_enemy - hp_you` drops below this
    pub emergency_hp_margin: f64,
    /// Emergency defense also needs strictly more money than this
    pub emergency_min_money: f64,
    /// Radar activation needs strictly more money than this
    pub radar_min_money: f64,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            emergency_hp_margin: -20.0,
            emergency_min_money: 1400.0,
            radar_min_money: 2000.0,
        }
    }
}

/// Complete engine configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub aggression: AggressionConfig,
    pub build: BuildConfig,
    pub attack: AttackConfig,
    pub policy: PolicyConfig,
    pub catalog: UtilityCatalog,
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: EngineConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        self.ensure_finite()?;

        let a = &self.aggression;
        if a.min < AGGRESSION_FLOOR || a.max > AGGRESSION_CEILING || a.min > a.max {
            return Err(EngineError::InvalidConfig(format!(
                "aggression bounds must satisfy {} <= min ({}) <= max ({}) <= {}",
                AGGRESSION_FLOOR, a.min, a.max, AGGRESSION_CEILING
            )));
        }
        if a.step < 0.0 || a.veteran_penalty < 0.0 {
            return Err(EngineError::InvalidConfig(
                "aggression step and veteran penalty must be non-negative".into(),
            ));
        }

        let attack = &self.attack;
        if !(0.0..=1.0).contains(&attack.base_miss_chance)
            || !(0.0..=1.0).contains(&attack.defense_miss_penalty)
        {
            return Err(EngineError::InvalidConfig(
                "miss chance and defense penalty must lie in [0, 1]".into(),
            ));
        }
        if attack.petro_target_value <= 0.0 || attack.default_target_value <= 0.0 {
            return Err(EngineError::InvalidConfig(
                "target values must be positive".into(),
            ));
        }

        if self.build.scarcity_rate < 0.0 {
            return Err(EngineError::InvalidConfig(
                "scarcity_rate must be non-negative".into(),
            ));
        }

        self.catalog.validate()
    }

    /// Every tuning number must be finite; NaN slips past ordering checks
    fn ensure_finite(&self) -> Result<()> {
        let (a, b, t, p) = (&self.aggression, &self.build, &self.attack, &self.policy);
        let values = [
            ("aggression.baseline", a.baseline),
            ("aggression.step", a.step),
            ("aggression.veteran_penalty", a.veteran_penalty),
            ("aggression.min", a.min),
            ("aggression.max", a.max),
            ("build.scarcity_ceiling", b.scarcity_ceiling),
            ("build.scarcity_rate", b.scarcity_rate),
            ("build.radar_scouting_bonus", b.radar_scouting_bonus),
            ("build.launcher_aggression_factor", b.launcher_aggression_factor),
            ("attack.base_miss_chance", t.base_miss_chance),
            ("attack.miss_aggression_factor", t.miss_aggression_factor),
            ("attack.defense_miss_penalty", t.defense_miss_penalty),
            ("attack.petro_target_value", t.petro_target_value),
            ("attack.default_target_value", t.default_target_value),
            ("policy.emergency_hp_margin", p.emergency_hp_margin),
            ("policy.emergency_min_money", p.emergency_min_money),
            ("policy.radar_min_money", p.radar_min_money),
        ];

        match values.iter().find(|(_, v)| !v.is_finite()) {
            Some((name, value)) => Err(EngineError::InvalidConfig(format!(
                "{} must be a finite number, got {}",
                name, value
            ))),
            None => Ok(()),
        }
    }
}

/// Load engine configuration from a TOML file
pub fn load_config(path: &Path) -> Result<EngineConfig> {
    let contents = fs::read_to_string(path)?;
    let config = EngineConfig::from_toml_str(&contents)?;
    tracing::info!("Loaded engine config from {}", path.display());
    Ok(config)
}
