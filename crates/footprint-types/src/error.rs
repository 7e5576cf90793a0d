//! Error types for footprint.

use thiserror::Error;

use crate::ConfigError;

/// Result type alias for footprint operations.
pub type Result<T> = std::result::Result<T, FootprintError>;

/// Errors surfaced outside the per-tick hot path.
#[derive(Error, Debug)]
pub enum FootprintError {
    /// Cluster configuration was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Symbol not found in the preset registry.
    #[error("Unknown symbol: {0}")]
    UnknownSymbol(String),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
