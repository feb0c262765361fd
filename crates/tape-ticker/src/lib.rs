//! Live stock ticker over a growing quote feed file.
//!
//! Wires the pieces together:
//! - follow the feed file for newly appended quote lines
//! - split, project, convert and label each line into a record
//! - keep only records whose symbol is in the portfolio
//! - render survivors through the selected table format

pub mod app;
pub mod config;
pub mod error;
pub mod logging;

pub use app::Ticker;
pub use config::TickerConfig;
pub use error::{AppError, AppResult};
pub use logging::init_logging;
