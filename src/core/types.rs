//! Core type definitions: match snapshot and structures

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::error::{EngineError, Result};

/// Structure type
///
/// Anything outside the known set is kept verbatim as `Other` so that
/// unknown structures still count as targets and enemy presence.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BuildingKind {
    Petro,
    Radar,
    Defense,
    Launcher,
    Airport,
    Other(String),
}

impl BuildingKind {
    pub fn as_str(&self) -> &str {
        match self {
            BuildingKind::Petro => "petro",
            BuildingKind::Radar => "radar",
            BuildingKind::Defense => "defense",
            BuildingKind::Launcher => "launcher",
            BuildingKind::Airport => "airport",
            BuildingKind::Other(name) => name,
        }
    }
}

impl Default for BuildingKind {
    fn default() -> Self {
        BuildingKind::Other(String::new())
    }
}

impl From<String> for BuildingKind {
    fn from(name: String) -> Self {
        match name.as_str() {
            "petro" => BuildingKind::Petro,
            "radar" => BuildingKind::Radar,
            "defense" => BuildingKind::Defense,
            "launcher" => BuildingKind::Launcher,
            "airport" => BuildingKind::Airport,
            _ => BuildingKind::Other(name),
        }
    }
}

impl From<&str> for BuildingKind {
    fn from(name: &str) -> Self {
        BuildingKind::from(name.to_string())
    }
}

impl From<BuildingKind> for String {
    fn from(kind: BuildingKind) -> Self {
        match kind {
            BuildingKind::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for BuildingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structure identifier, numeric or textual on the wire
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BuildingId {
    Number(i64),
    Text(String),
}

impl From<i64> for BuildingId {
    fn from(id: i64) -> Self {
        BuildingId::Number(id)
    }
}

impl From<&str> for BuildingId {
    fn from(id: &str) -> Self {
        BuildingId::Text(id.to_string())
    }
}

impl fmt::Display for BuildingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildingId::Number(id) => write!(f, "{}", id),
            BuildingId::Text(id) => f.write_str(id),
        }
    }
}

fn default_hp() -> f64 {
    100.0
}

/// A structure owned by one side of the match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Building {
    pub id: BuildingId,
    #[serde(rename = "type", default)]
    pub kind: BuildingKind,
    #[serde(default = "default_hp")]
    pub hp: f64,
}

impl Building {
    pub fn new(id: impl Into<BuildingId>, kind: impl Into<BuildingKind>, hp: f64) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            hp,
        }
    }
}

/// Snapshot of a match as sent by the player's client
///
/// `*_you` fields describe the human player (attack targets), `*_enemy`
/// fields describe the AI opponent (the launchers it attacks from).
/// Every field is optional on the wire and falls back to a neutral value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameState {
    pub money: f64,
    pub hp_you: f64,
    pub hp_enemy: f64,
    pub buildings_you: Vec<Building>,
    pub buildings_enemy: Vec<Building>,
    /// Player's latest action tags, most recent last
    pub recent_player_actions: Vec<String>,
    pub player_offline_wins: u32,
    pub player_online_wins: u32,
    pub radar_active: bool,
    pub radar_needed: bool,
    /// Aggression reported by the engine for this snapshot, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aggression: Option<f64>,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            money: 0.0,
            hp_you: 100.0,
            hp_enemy: 100.0,
            buildings_you: Vec::new(),
            buildings_enemy: Vec::new(),
            recent_player_actions: Vec::new(),
            player_offline_wins: 0,
            player_online_wins: 0,
            radar_active: false,
            radar_needed: false,
            aggression: None,
        }
    }
}

impl GameState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a state from a raw request payload
    pub fn from_value(value: &serde_json::Value) -> Result<Self> {
        let state = GameState::deserialize(value)
            .map_err(|e| EngineError::InvalidState(e.to_string()))?;
        state.validate()?;
        Ok(state)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let state: GameState =
            serde_json::from_str(json).map_err(|e| EngineError::InvalidState(e.to_string()))?;
        state.validate()?;
        Ok(state)
    }

    /// Reject values that deserialize but cannot describe a real match
    pub fn validate(&self) -> Result<()> {
        if !self.money.is_finite() || self.money < 0.0 {
            return Err(EngineError::InvalidState(format!(
                "money must be a non-negative number, got {}",
                self.money
            )));
        }
        if !self.hp_you.is_finite() || !self.hp_enemy.is_finite() {
            return Err(EngineError::InvalidState("health must be finite".into()));
        }
        if let Some(b) = self
            .buildings_you
            .iter()
            .chain(&self.buildings_enemy)
            .find(|b| !b.hp.is_finite())
        {
            return Err(EngineError::InvalidState(format!(
                "building {} has non-finite hp",
                b.id
            )));
        }
        Ok(())
    }

    /// AI health minus player health; negative when the AI trails
    pub fn hp_margin(&self) -> f64 {
        self.hp_enemy - self.hp_you
    }

    pub fn player_wins(&self) -> u32 {
        self.player_offline_wins
            .saturating_add(self.player_online_wins)
    }

    pub fn enemy_launchers(&self) -> impl Iterator<Item = &Building> {
        self.buildings_enemy
            .iter()
            .filter(|b| b.kind == BuildingKind::Launcher)
    }

    pub fn enemy_has_launcher(&self) -> bool {
        self.enemy_launchers().next().is_some()
    }

    pub fn player_has(&self, kind: &BuildingKind) -> bool {
        self.buildings_you.iter().any(|b| &b.kind == kind)
    }
}
