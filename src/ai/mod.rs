//! Opponent AI decision-making
//!
//! Architecture: pure functions + one facade
//! - `aggression` turns player history into a single scalar
//! - `build` and `attack` pick concrete actions under that aggression
//! - `controller` orders the rules and owns the configuration

pub mod aggression;
pub mod attack;
pub mod build;
pub mod controller;

pub use aggression::estimate_aggression;
pub use attack::{choose_attack, miss_chance, select_target, target_value};
pub use build::{affordable_scores, choose_build, utility_score, weighted_pick};
pub use controller::{Decision, DecisionEngine, DecisionRule};
