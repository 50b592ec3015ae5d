pub mod config;
pub mod error;
pub mod types;

pub use config::{load_config, EngineConfig};
pub use error::{EngineError, Result};
pub use types::{Building, BuildingId, BuildingKind, GameState};
