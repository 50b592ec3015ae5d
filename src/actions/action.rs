//! Action definitions returned by the decision engine

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::types::{BuildingId, BuildingKind};

/// Why the engine chose to do nothing this turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaitReason {
    NotEnoughMoney,
    NoLauncher,
    NoTarget,
}

impl WaitReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            WaitReason::NotEnoughMoney => "not_enough_money",
            WaitReason::NoLauncher => "no_launcher",
            WaitReason::NoTarget => "no_target",
        }
    }
}

impl fmt::Display for WaitReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The single action chosen for one decision
///
/// Serialized with an `"action"` tag, e.g.
/// `{"action":"build","type":"petro","price":2500.0}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    Wait {
        reason: WaitReason,
    },
    Build {
        #[serde(rename = "type")]
        kind: BuildingKind,
        price: f64,
    },
    Attack {
        from: BuildingId,
        target: BuildingId,
        expected_hit: bool,
    },
    UseRadar,
}

impl Action {
    pub fn wait(reason: WaitReason) -> Self {
        Action::Wait { reason }
    }

    /// Wire name of the action tag
    pub fn name(&self) -> &'static str {
        match self {
            Action::Wait { .. } => "wait",
            Action::Build { .. } => "build",
            Action::Attack { .. } => "attack",
            Action::UseRadar => "use_radar",
        }
    }

    pub fn is_attack(&self) -> bool {
        matches!(self, Action::Attack { .. })
    }

    pub fn built_kind(&self) -> Option<&BuildingKind> {
        match self {
            Action::Build { kind, .. } => Some(kind),
            _ => None,
        }
    }
}
