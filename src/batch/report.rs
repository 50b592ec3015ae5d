//! Batch report and serialization

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::actions::Action;
use crate::ai::Decision;
use crate::core::error::Result;
use crate::core::types::BuildingKind;

/// Tally of a batch of decisions
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    pub seed: u64,
    pub trials: u32,
    /// Count per action tag ("build", "attack", ...)
    pub actions: BTreeMap<String, u32>,
    /// Count per policy rule that fired
    pub rules: BTreeMap<String, u32>,
    /// Count per structure type among builds
    pub builds: BTreeMap<String, u32>,
    /// Count per reason among waits
    pub waits: BTreeMap<String, u32>,
    pub expected_hits: u32,
    pub expected_misses: u32,
    pub mean_aggression: f64,
}

impl BatchReport {
    pub fn from_decisions(seed: u64, decisions: &[Decision]) -> Self {
        let mut report = BatchReport {
            seed,
            trials: decisions.len() as u32,
            ..Default::default()
        };

        let mut aggression_sum = 0.0;
        for decision in decisions {
            aggression_sum += decision.aggression;
            *report
                .actions
                .entry(decision.action.name().to_string())
                .or_default() += 1;
            *report
                .rules
                .entry(decision.rule.as_str().to_string())
                .or_default() += 1;

            match &decision.action {
                Action::Build { kind, .. } => {
                    *report.builds.entry(kind.to_string()).or_default() += 1;
                }
                Action::Wait { reason } => {
                    *report.waits.entry(reason.to_string()).or_default() += 1;
                }
                Action::Attack { expected_hit: true, .. } => report.expected_hits += 1,
                Action::Attack { expected_hit: false, .. } => report.expected_misses += 1,
                Action::UseRadar => {}
            }
        }

        if !decisions.is_empty() {
            report.mean_aggression = aggression_sum / decisions.len() as f64;
        }

        report
    }

    /// Fraction of trials that ended in the given action tag
    pub fn action_share(&self, name: &str) -> f64 {
        self.share(self.actions.get(name).copied())
    }

    /// Fraction of trials that built `kind`
    pub fn build_share(&self, kind: &BuildingKind) -> f64 {
        self.share(self.builds.get(kind.as_str()).copied())
    }

    fn share(&self, count: Option<u32>) -> f64 {
        if self.trials == 0 {
            return 0.0;
        }
        f64::from(count.unwrap_or(0)) / f64::from(self.trials)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn summary(&self) -> String {
        let mut out = format!(
            "{} decisions (seed {}), mean aggression {:.3}\n",
            self.trials, self.seed, self.mean_aggression
        );
        for (name, count) in &self.actions {
            out.push_str(&format!(
                "  {:<10} {:>7} ({:5.1}%)\n",
                name,
                count,
                self.action_share(name) * 100.0
            ));
        }
        if !self.builds.is_empty() {
            out.push_str("builds:\n");
            for (kind, count) in &self.builds {
                out.push_str(&format!(
                    "  {:<10} {:>7} ({:5.1}%)\n",
                    kind,
                    count,
                    self.share(Some(*count)) * 100.0
                ));
            }
        }
        let attacks = self.expected_hits + self.expected_misses;
        if attacks > 0 {
            out.push_str(&format!(
                "attacks: {} expected hits, {} expected misses\n",
                self.expected_hits, self.expected_misses
            ));
        }
        out
    }
}
