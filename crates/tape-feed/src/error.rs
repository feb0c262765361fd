//! Feed error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Malformed row: {0}")]
    Malformed(String),

    #[error("Conversion error: {0}")]
    Convert(#[from] tape_core::CoreError),

    #[error("Split error: {0}")]
    Split(#[from] tape_csv::CsvError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl FeedError {
    /// Whether this error is caused by the data of a single row, as opposed
    /// to a configuration or I/O failure that invalidates the whole feed.
    pub fn is_row_error(&self) -> bool {
        matches!(
            self,
            Self::Malformed(_) | Self::Convert(_) | Self::Split(_)
        )
    }
}

pub type FeedResult<T> = Result<T, FeedError>;
