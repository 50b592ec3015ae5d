//! Siege AI - adaptive opponent decision engine
//!
//! Given a match snapshot, picks exactly one next action for the AI side:
//! build a structure, attack, switch on radar, or wait.

pub mod actions;
pub mod ai;
pub mod batch;
pub mod core;

pub use crate::actions::{Action, UtilityCatalog, WaitReason};
pub use crate::ai::{Decision, DecisionEngine, DecisionRule};
pub use crate::core::{EngineConfig, EngineError, GameState, Result};
