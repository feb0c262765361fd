//! Ticker configuration.

use crate::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tape_core::FieldType;
use tape_feed::ConvertErrorPolicy;

/// Application configuration.
///
/// Loaded from a TOML file with per-field defaults; the feed and portfolio
/// paths may instead come from the command line. All validation happens at
/// setup, before any row is processed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickerConfig {
    /// Quote feed file to follow.
    #[serde(default)]
    pub feed: Option<PathBuf>,
    /// Portfolio CSV with name,shares,price columns.
    #[serde(default)]
    pub portfolio: Option<PathBuf>,
    /// Output format name: txt, csv or html.
    #[serde(default = "default_format")]
    pub format: String,
    /// Feed field delimiter (single character).
    #[serde(default = "default_delimiter")]
    pub delimiter: String,
    /// Poll interval when the feed has no new data (ms).
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// Feed columns to project, in output order.
    #[serde(default = "default_columns")]
    pub columns: Vec<usize>,
    /// Conversion for each projected column.
    #[serde(default = "default_types")]
    pub types: Vec<FieldType>,
    /// Record field name for each projected column.
    #[serde(default = "default_labels")]
    pub labels: Vec<String>,
    /// Display titles, one per label.
    #[serde(default = "default_headings")]
    pub headings: Vec<String>,
    /// Label holding the symbol used for the portfolio membership test.
    #[serde(default = "default_name_field")]
    pub name_field: String,
    /// Policy for rows that fail projection or conversion.
    #[serde(default)]
    pub on_convert_error: ConvertErrorPolicy,
    /// Stop after this long with no feed growth (ms). Unset = run forever.
    #[serde(default)]
    pub max_idle_ms: Option<u64>,
}

fn default_format() -> String {
    "txt".to_string()
}

fn default_delimiter() -> String {
    ",".to_string()
}

fn default_poll_interval_ms() -> u64 {
    100
}

fn default_columns() -> Vec<usize> {
    vec![0, 1, 4]
}

fn default_types() -> Vec<FieldType> {
    vec![FieldType::Text, FieldType::Float, FieldType::Float]
}

fn default_labels() -> Vec<String> {
    vec![
        "name".to_string(),
        "price".to_string(),
        "change".to_string(),
    ]
}

fn default_headings() -> Vec<String> {
    vec![
        "Name".to_string(),
        "Price".to_string(),
        "Change".to_string(),
    ]
}

fn default_name_field() -> String {
    "name".to_string()
}

impl Default for TickerConfig {
    fn default() -> Self {
        Self {
            feed: None,
            portfolio: None,
            format: default_format(),
            delimiter: default_delimiter(),
            poll_interval_ms: default_poll_interval_ms(),
            columns: default_columns(),
            types: default_types(),
            labels: default_labels(),
            headings: default_headings(),
            name_field: default_name_field(),
            on_convert_error: ConvertErrorPolicy::default(),
            max_idle_ms: None,
        }
    }
}

impl TickerConfig {
    /// Load from a file if it exists, defaults otherwise.
    pub fn load(path: &str) -> AppResult<Self> {
        if Path::new(path).exists() {
            Self::from_file(path)
        } else {
            tracing::warn!(path, "Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load from a specific file.
    pub fn from_file(path: &str) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("Failed to read config: {e}")))?;

        toml::from_str(&content)
            .map_err(|e| AppError::Config(format!("Failed to parse config: {e}")))
    }

    /// Check everything that can be checked before any row is processed.
    pub fn validate(&self) -> AppResult<()> {
        if self.feed.is_none() {
            return Err(AppError::Config("no feed file given".to_string()));
        }
        if self.portfolio.is_none() {
            return Err(AppError::Config("no portfolio file given".to_string()));
        }
        self.delimiter_byte()?;
        if self.headings.len() != self.labels.len() {
            return Err(AppError::Config(format!(
                "{} headings for {} labels",
                self.headings.len(),
                self.labels.len()
            )));
        }
        if !self.labels.iter().any(|label| label == &self.name_field) {
            return Err(AppError::Config(format!(
                "name_field {:?} is not one of the labels",
                self.name_field
            )));
        }
        Ok(())
    }

    /// The delimiter as a single byte.
    pub fn delimiter_byte(&self) -> AppResult<u8> {
        match self.delimiter.as_bytes() {
            [byte] => Ok(*byte),
            _ => Err(AppError::Config(format!(
                "delimiter must be a single character, got {:?}",
                self.delimiter
            ))),
        }
    }
}
