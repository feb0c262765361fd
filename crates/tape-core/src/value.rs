//! Typed field conversion.
//!
//! Raw feed fields arrive as text. A `FieldType` names the target type a
//! field is converted to, and a `Value` carries the converted result.

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Target type for a raw text field.
///
/// Deserializes from lowercase names (`text`, `int`, `float`) so conversion
/// lists can be written directly in config files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Int,
    Float,
}

impl FieldType {
    /// Convert a raw field into a typed value.
    ///
    /// Numeric conversions trim surrounding whitespace first; signed values
    /// ("+0.1", "-0.05") parse as expected.
    pub fn parse(&self, raw: &str) -> Result<Value> {
        match self {
            Self::Text => Ok(Value::Text(raw.to_string())),
            Self::Int => raw
                .trim()
                .parse::<i64>()
                .map(Value::Int)
                .map_err(|_| CoreError::Convert {
                    value: raw.to_string(),
                    target: "int",
                }),
            Self::Float => raw
                .trim()
                .parse::<f64>()
                .map(Value::Float)
                .map_err(|_| CoreError::Convert {
                    value: raw.to_string(),
                    target: "float",
                }),
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Int => write!(f, "int"),
            Self::Float => write!(f, "float"),
        }
    }
}

/// A converted field value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Int(i64),
    Float(f64),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => write!(f, "{s}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(v) => write!(f, "{v}"),
        }
    }
}
