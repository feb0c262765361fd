//! Application error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Core error: {0}")]
    Core(#[from] tape_core::CoreError),

    #[error("CSV error: {0}")]
    Csv(#[from] tape_csv::CsvError),

    #[error("Feed error: {0}")]
    Feed(#[from] tape_feed::FeedError),

    #[error("Format error: {0}")]
    Format(#[from] tape_format::FormatError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type AppResult<T> = Result<T, AppError>;
