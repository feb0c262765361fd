//! Core domain types for the tickertape feed pipeline.
//!
//! This crate provides the fundamental types shared by the batch parser,
//! the live feed pipeline, and the orchestrator:
//! - `FieldType`, `Value`: typed conversion of raw text fields
//! - `Record`: ordered name-to-value mapping produced by the label stage
//! - `Portfolio`, `Holding`: tracked symbols with O(1) membership testing

pub mod error;
pub mod portfolio;
pub mod record;
pub mod value;

pub use error::{CoreError, Result};
pub use portfolio::{Holding, Portfolio};
pub use record::{Field, Record};
pub use value::{FieldType, Value};
