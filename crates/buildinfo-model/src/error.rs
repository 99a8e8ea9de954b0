//! Error types for buildinfo-model.

use thiserror::Error;

/// Result type for buildinfo-model operations.
pub type Result<T> = std::result::Result<T, BuildError>;

/// Errors that can occur while loading dependency build metadata.
#[derive(Error, Debug)]
pub enum BuildError {
    /// Failed to read the input document.
    #[error("Failed to read build info file: {0}")]
    ReadInput(#[from] std::io::Error),

    /// Failed to parse a TOML input document.
    #[error("Failed to parse TOML build info: {0}")]
    ParseToml(#[from] toml::de::Error),

    /// Failed to parse a JSON input document.
    #[error("Failed to parse JSON build info: {0}")]
    ParseJson(#[from] serde_json::Error),

    /// Input validation error.
    #[error("Build info validation error: {0}")]
    Validation(String),

    /// Two dependency identifiers collide once uppercased.
    #[error("Duplicate dependency identifier: {0}")]
    DuplicateDependency(String),
}
