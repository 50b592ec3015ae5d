//! Actions the opponent can take and the structure catalog

pub mod action;
pub mod catalog;

pub use action::{Action, WaitReason};
pub use catalog::{CatalogEntry, UtilityCatalog, DEFAULT_WEIGHT};
