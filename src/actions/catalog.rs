//! Structure catalog: base priority weight and price per structure type

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::core::error::{EngineError, Result};
use crate::core::types::BuildingKind;

/// Weight assumed for a type the catalog does not list
pub const DEFAULT_WEIGHT: f64 = 0.5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub kind: BuildingKind,
    pub weight: f64,
    /// Types without a price are scored but never purchasable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

impl CatalogEntry {
    pub fn new(kind: BuildingKind, weight: f64, price: Option<f64>) -> Self {
        Self {
            kind,
            weight,
            price,
        }
    }

    pub fn affordable(&self, money: f64) -> bool {
        self.price.is_some_and(|p| p <= money)
    }
}

/// Immutable, ordered structure catalog
///
/// Entry order is significant: it is the iteration order of weighted
/// sampling and the fallback order when sampling fails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UtilityCatalog {
    entries: Vec<CatalogEntry>,
}

impl Default for UtilityCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl UtilityCatalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Result<Self> {
        let catalog = Self { entries };
        catalog.validate()?;
        Ok(catalog)
    }

    /// The shipped opponent's catalog
    pub fn standard() -> Self {
        Self {
            entries: vec![
                CatalogEntry::new(BuildingKind::Petro, 0.9, Some(2500.0)),
                CatalogEntry::new(BuildingKind::Radar, 0.8, Some(2000.0)),
                CatalogEntry::new(BuildingKind::Defense, 0.7, Some(1500.0)),
                CatalogEntry::new(BuildingKind::Launcher, 0.85, Some(1200.0)),
                CatalogEntry::new(BuildingKind::Airport, 0.6, Some(1200.0)),
            ],
        }
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, kind: &BuildingKind) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| &e.kind == kind)
    }

    pub fn weight(&self, kind: &BuildingKind) -> f64 {
        self.get(kind).map_or(DEFAULT_WEIGHT, |e| e.weight)
    }

    pub fn price(&self, kind: &BuildingKind) -> Option<f64> {
        self.get(kind).and_then(|e| e.price)
    }

    /// Entries priced at or below `money`, in catalog order
    pub fn affordable(&self, money: f64) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter().filter(move |e| e.affordable(money))
    }

    pub fn cheapest_price(&self) -> Option<f64> {
        self.entries
            .iter()
            .filter_map(|e| e.price)
            .min_by(|a, b| a.total_cmp(b))
    }

    pub fn validate(&self) -> Result<()> {
        if self.entries.is_empty() {
            return Err(EngineError::InvalidConfig("catalog is empty".into()));
        }

        let mut seen = HashSet::new();
        for entry in &self.entries {
            if !seen.insert(&entry.kind) {
                return Err(EngineError::InvalidConfig(format!(
                    "catalog lists '{}' twice",
                    entry.kind
                )));
            }
            if !entry.weight.is_finite() || entry.weight < 0.0 {
                return Err(EngineError::InvalidConfig(format!(
                    "weight for '{}' must be a non-negative number",
                    entry.kind
                )));
            }
            if let Some(price) = entry.price {
                if !price.is_finite() || price < 0.0 {
                    return Err(EngineError::InvalidConfig(format!(
                        "price for '{}' must be a non-negative number",
                        entry.kind
                    )));
                }
            }
        }

        Ok(())
    }
}
