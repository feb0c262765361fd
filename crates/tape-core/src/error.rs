//! Error types for tape-core.

use thiserror::Error;

/// Core error types.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Cannot convert {value:?} to {target}")]
    Convert { value: String, target: &'static str },

    #[error("Field count mismatch: {labels} labels, {values} values")]
    FieldMismatch { labels: usize, values: usize },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
