use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid game state: {0}")]
    InvalidState(String),

    #[error("Invalid engine config: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
