//! Format error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("Unknown table format: {0}")]
    UnknownFormat(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type FormatResult<T> = Result<T, FormatError>;
