//! Record transformation stages.
//!
//! Each appended line passes through four ordered stages:
//! split (delimited fields), project (column selection by index), convert
//! (typed conversion), label (name-to-value record). Every stage is a pure
//! single-record transformation; nothing is buffered or reordered, so the
//! pipeline runs in constant memory over an unbounded feed.

use crate::error::{FeedError, FeedResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tape_core::{FieldType, Record};
use tape_csv::split_line;
use tracing::warn;

/// What to do when a row fails projection or conversion.
///
/// `Fatal` is the reference behavior for the live feed: there is no unit of
/// redo once the read cursor has advanced, so the pull fails. `Skip` mirrors
/// the batch parser: log and drop the row, keep the feed alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConvertErrorPolicy {
    #[default]
    Fatal,
    Skip,
}

/// Validated stage configuration.
///
/// The selection, conversion and label lists are positional and must have
/// equal length; duplicate labels are rejected because they would make
/// later lookups ambiguous. Both are configuration errors raised at
/// construction, never per row.
#[derive(Debug, Clone)]
pub struct RecordSpec {
    select: Vec<usize>,
    types: Vec<FieldType>,
    labels: Vec<String>,
    delimiter: u8,
    on_convert_error: ConvertErrorPolicy,
}

impl RecordSpec {
    pub fn new(
        select: Vec<usize>,
        types: Vec<FieldType>,
        labels: Vec<String>,
    ) -> FeedResult<Self> {
        if select.len() != types.len() || select.len() != labels.len() {
            return Err(FeedError::Config(format!(
                "selection, conversion and label lists must have equal length \
                 (got {}, {}, {})",
                select.len(),
                types.len(),
                labels.len()
            )));
        }
        if select.is_empty() {
            return Err(FeedError::Config("no columns selected".to_string()));
        }
        let mut seen = HashSet::new();
        for label in &labels {
            if !seen.insert(label.as_str()) {
                return Err(FeedError::Config(format!("duplicate label: {label}")));
            }
        }
        Ok(Self {
            select,
            types,
            labels,
            delimiter: b',',
            on_convert_error: ConvertErrorPolicy::default(),
        })
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_convert_policy(mut self, policy: ConvertErrorPolicy) -> Self {
        self.on_convert_error = policy;
        self
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }
}

/// Applies the stage chain to one line at a time.
#[derive(Debug, Clone)]
pub struct RecordPipeline {
    spec: RecordSpec,
}

impl RecordPipeline {
    pub fn new(spec: RecordSpec) -> Self {
        Self { spec }
    }

    pub fn spec(&self) -> &RecordSpec {
        &self.spec
    }

    /// Transform one line into a labeled record.
    ///
    /// Returns `Ok(None)` when the row was dropped under the `Skip` policy;
    /// under `Fatal`, row-level failures propagate to the caller.
    pub fn process(&self, line: &str) -> FeedResult<Option<Record>> {
        match self.transform(line) {
            Ok(record) => Ok(Some(record)),
            Err(err) if err.is_row_error() => match self.spec.on_convert_error {
                ConvertErrorPolicy::Fatal => Err(err),
                ConvertErrorPolicy::Skip => {
                    warn!(line, error = %err, "Dropping malformed row");
                    Ok(None)
                }
            },
            Err(err) => Err(err),
        }
    }

    fn transform(&self, line: &str) -> FeedResult<Record> {
        let spec = &self.spec;

        // Split
        let raw = split_line(line, spec.delimiter)?;

        // Project: index-list order defines output order; duplicates are
        // legal and duplicate the field.
        let mut projected = Vec::with_capacity(spec.select.len());
        for &idx in &spec.select {
            let field = raw.get(idx).ok_or_else(|| {
                FeedError::Malformed(format!(
                    "column {idx} out of range for row with {} fields",
                    raw.len()
                ))
            })?;
            projected.push(field.as_str());
        }

        // Convert: lists are equal length by construction.
        let values = spec
            .types
            .iter()
            .zip(&projected)
            .map(|(ty, raw)| ty.parse(raw))
            .collect::<tape_core::Result<Vec<_>>>()?;

        // Label
        Ok(Record::from_pairs(&spec.labels, values)?)
    }
}
