//! Batch delimited-text parsing.
//!
//! `parse_csv` reads a whole delimited source into typed records, resolving
//! column selection against the header line and converting each field with
//! its positional conversion function. Rows that fail conversion are logged
//! and dropped; the caller can silence the logging. `split_line` is the
//! single-record entry point the live pipeline uses.

use crate::error::{CsvError, CsvResult};
use csv::StringRecord;
use std::io::Read;
use tape_core::{FieldType, Record, Value};
use tracing::{debug, warn};

/// Options for `parse_csv`.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Column names to select, in output order. Requires `has_headers`.
    pub select: Option<Vec<String>>,
    /// Positional conversion functions. Fields beyond the list are dropped.
    pub types: Option<Vec<FieldType>>,
    /// Whether the first line names the columns.
    pub has_headers: bool,
    /// Field delimiter.
    pub delimiter: u8,
    /// Drop unconvertible rows without logging.
    pub silence_errors: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            select: None,
            types: None,
            has_headers: true,
            delimiter: b',',
            silence_errors: false,
        }
    }
}

/// One parsed row: named when the source has headers, positional otherwise.
#[derive(Debug, Clone, PartialEq)]
pub enum CsvRecord {
    Named(Record),
    Positional(Vec<Value>),
}

/// Parse a delimited-text source into records.
///
/// Column selection without a header line is a configuration error, raised
/// before any row is read. A selected name absent from the headers is too.
/// Per-row conversion failures drop the row with a warning (or silently,
/// under `silence_errors`); they never abort the batch.
pub fn parse_csv<R: Read>(reader: R, opts: &ParseOptions) -> CsvResult<Vec<CsvRecord>> {
    if opts.select.is_some() && !opts.has_headers {
        return Err(CsvError::Config(
            "column selection requires a header line".to_string(),
        ));
    }

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(opts.delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);
    let mut rows = reader.records();

    // Resolve selection against the header line; selection order defines
    // output order and narrows the headers.
    let mut headers: Vec<String> = Vec::new();
    let mut indices: Option<Vec<usize>> = None;
    if opts.has_headers {
        match rows.next() {
            Some(header_row) => {
                headers = header_row?.iter().map(str::to_string).collect();
                if let Some(select) = &opts.select {
                    let mut selected = Vec::with_capacity(select.len());
                    for name in select {
                        let idx = headers
                            .iter()
                            .position(|header| header == name)
                            .ok_or_else(|| CsvError::MissingColumn(name.clone()))?;
                        selected.push(idx);
                    }
                    indices = Some(selected);
                    headers = select.clone();
                }
            }
            None => return Ok(Vec::new()),
        }
    }

    let mut records = Vec::new();
    for (row_num, row) in rows.enumerate() {
        let row = row?;
        let row_num = row_num + 1;
        if row.is_empty() || (row.len() == 1 && row.get(0) == Some("")) {
            continue;
        }

        let fields: Vec<&str> = match &indices {
            Some(indices) => match project(&row, indices) {
                Some(fields) => fields,
                None => {
                    if !opts.silence_errors {
                        warn!(row = row_num, "Row is missing selected columns, dropping");
                    }
                    continue;
                }
            },
            None => row.iter().collect(),
        };

        let values: Vec<Value> = match &opts.types {
            Some(types) => match convert(types, &fields) {
                Ok(values) => values,
                Err(err) => {
                    if !opts.silence_errors {
                        warn!(row = row_num, "Couldn't convert row, dropping");
                        debug!(row = row_num, reason = %err, "Conversion failure");
                    }
                    continue;
                }
            },
            None => fields.iter().map(|f| Value::Text(f.to_string())).collect(),
        };

        if opts.has_headers {
            records.push(CsvRecord::Named(
                headers.iter().cloned().zip(values).collect(),
            ));
        } else {
            records.push(CsvRecord::Positional(values));
        }
    }

    Ok(records)
}

/// Split one delimited line into its string fields.
///
/// Quoted fields are honored, so an embedded delimiter inside quotes does
/// not split.
pub fn split_line(line: &str, delimiter: u8) -> CsvResult<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .from_reader(line.as_bytes());
    match reader.records().next() {
        Some(record) => Ok(record?.iter().map(str::to_string).collect()),
        None => Ok(Vec::new()),
    }
}

fn project<'a>(row: &'a StringRecord, indices: &[usize]) -> Option<Vec<&'a str>> {
    indices.iter().map(|&idx| row.get(idx)).collect()
}

// zip semantics: conversion stops at the shorter of the two lists.
fn convert(types: &[FieldType], fields: &[&str]) -> tape_core::Result<Vec<Value>> {
    types
        .iter()
        .zip(fields)
        .map(|(ty, raw)| ty.parse(raw))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const STOCKS: &str = "\
name,shares,price
AAPL,100,32.20
IBM,50,91.10
";

    fn names(select: &[&str]) -> Option<Vec<String>> {
        Some(select.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_parse_named_with_select_and_types() {
        let opts = ParseOptions {
            select: names(&["name", "price"]),
            types: Some(vec![FieldType::Text, FieldType::Float]),
            ..ParseOptions::default()
        };
        let records = parse_csv(Cursor::new(STOCKS), &opts).unwrap();
        assert_eq!(records.len(), 2);

        let CsvRecord::Named(first) = &records[0] else {
            panic!("Expected named record");
        };
        assert_eq!(first.get("name"), Some(&Value::Text("AAPL".to_string())));
        assert_eq!(first.get("price"), Some(&Value::Float(32.2)));
        assert_eq!(first.get("shares"), None);
    }

    #[test]
    fn test_select_order_defines_output_order() {
        let opts = ParseOptions {
            select: names(&["price", "name"]),
            ..ParseOptions::default()
        };
        let records = parse_csv(Cursor::new(STOCKS), &opts).unwrap();
        let CsvRecord::Named(first) = &records[0] else {
            panic!("Expected named record");
        };
        let fields: Vec<&str> = first.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(fields, vec!["price", "name"]);
    }

    #[test]
    fn test_select_without_headers_is_config_error() {
        let opts = ParseOptions {
            select: names(&["name"]),
            has_headers: false,
            ..ParseOptions::default()
        };
        let err = parse_csv(Cursor::new(STOCKS), &opts).unwrap_err();
        assert!(matches!(err, CsvError::Config(_)));
    }

    #[test]
    fn test_unknown_selected_column() {
        let opts = ParseOptions {
            select: names(&["volume"]),
            ..ParseOptions::default()
        };
        let err = parse_csv(Cursor::new(STOCKS), &opts).unwrap_err();
        assert!(matches!(err, CsvError::MissingColumn(name) if name == "volume"));
    }

    #[test]
    fn test_positional_without_headers() {
        let input = "AAPL,100\nIBM,50\n";
        let opts = ParseOptions {
            has_headers: false,
            types: Some(vec![FieldType::Text, FieldType::Int]),
            ..ParseOptions::default()
        };
        let records = parse_csv(Cursor::new(input), &opts).unwrap();
        assert_eq!(
            records[0],
            CsvRecord::Positional(vec![Value::Text("AAPL".to_string()), Value::Int(100)])
        );
        assert_eq!(
            records[1],
            CsvRecord::Positional(vec![Value::Text("IBM".to_string()), Value::Int(50)])
        );
    }

    #[test]
    fn test_unconvertible_row_is_dropped_not_fatal() {
        let input = "name,shares,price\nAAPL,n/a,32.20\nIBM,50,91.10\n";
        let opts = ParseOptions {
            types: Some(vec![FieldType::Text, FieldType::Int, FieldType::Float]),
            silence_errors: true,
            ..ParseOptions::default()
        };
        let records = parse_csv(Cursor::new(input), &opts).unwrap();
        assert_eq!(records.len(), 1);
        let CsvRecord::Named(survivor) = &records[0] else {
            panic!("Expected named record");
        };
        assert_eq!(survivor.get("name"), Some(&Value::Text("IBM".to_string())));
    }

    #[test]
    fn test_custom_delimiter() {
        let input = "name;price\nAAPL;32.20\n";
        let opts = ParseOptions {
            delimiter: b';',
            ..ParseOptions::default()
        };
        let records = parse_csv(Cursor::new(input), &opts).unwrap();
        let CsvRecord::Named(first) = &records[0] else {
            panic!("Expected named record");
        };
        assert_eq!(first.get("price"), Some(&Value::Text("32.20".to_string())));
    }

    #[test]
    fn test_split_line() {
        let fields = split_line("AAPL,100,10.5,,3.2", b',').unwrap();
        assert_eq!(fields, vec!["AAPL", "100", "10.5", "", "3.2"]);
    }

    #[test]
    fn test_split_line_honors_quoting() {
        let fields = split_line("\"Acme, Inc\",10", b',').unwrap();
        assert_eq!(fields, vec!["Acme, Inc", "10"]);
    }

    #[test]
    fn test_split_empty_line() {
        assert!(split_line("", b',').unwrap().is_empty());
    }
}
