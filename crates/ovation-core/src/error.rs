//! Error types for Ovation

use thiserror::Error;

/// The main error type for Ovation operations
#[derive(Debug, Error)]
pub enum OvationError {
    #[error("Profile parse error: {0}")]
    ProfileParse(String),

    #[error("Snapshot error: {0}")]
    Snapshot(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type alias for Ovation operations
pub type Result<T> = std::result::Result<T, OvationError>;

impl From<toml::de::Error> for OvationError {
    fn from(err: toml::de::Error) -> Self {
        OvationError::ProfileParse(err.to_string())
    }
}
