use thiserror::Error;

#[derive(Error, Debug)]
pub enum ForageError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Depot not found: {0:?}")]
    DepotNotFound(crate::core::types::DepotId),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    ConfigParseError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ForageError>;
