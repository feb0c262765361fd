//! CSV parsing error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CsvError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Selected column not found in headers: {0}")]
    MissingColumn(String),

    #[error("Invalid portfolio row: {0}")]
    InvalidPortfolio(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type CsvResult<T> = Result<T, CsvError>;
