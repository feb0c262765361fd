//! Delimited-text parsing for tickertape.
//!
//! The batch side of record parsing: reads a whole delimited-text source
//! into typed records, with optional column selection and per-column
//! conversion. Also provides the single-line split used by the live
//! pipeline and the portfolio loader.

pub mod error;
pub mod parser;
pub mod portfolio;

pub use error::{CsvError, CsvResult};
pub use parser::{parse_csv, split_line, CsvRecord, ParseOptions};
pub use portfolio::{read_portfolio, read_portfolio_from};
