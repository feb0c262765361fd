//! Portfolio loading.

use crate::error::{CsvError, CsvResult};
use crate::parser::{parse_csv, CsvRecord, ParseOptions};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tape_core::{FieldType, Holding, Portfolio, Value};
use tracing::debug;

/// Load a portfolio from a CSV file with `name,shares,price` columns.
pub fn read_portfolio(path: impl AsRef<Path>) -> CsvResult<Portfolio> {
    let file = File::open(path.as_ref())?;
    read_portfolio_from(BufReader::new(file))
}

/// Load a portfolio from any delimited-text reader.
///
/// Selects the `name`, `shares` and `price` columns by header name, so
/// extra columns and column order do not matter. Rows that fail conversion
/// are dropped by the parser with a warning.
pub fn read_portfolio_from<R: Read>(reader: R) -> CsvResult<Portfolio> {
    let opts = ParseOptions {
        select: Some(vec![
            "name".to_string(),
            "shares".to_string(),
            "price".to_string(),
        ]),
        types: Some(vec![FieldType::Text, FieldType::Int, FieldType::Float]),
        ..ParseOptions::default()
    };

    let mut portfolio = Portfolio::new();
    for record in parse_csv(reader, &opts)? {
        let CsvRecord::Named(record) = record else {
            return Err(CsvError::InvalidPortfolio(
                "expected named records".to_string(),
            ));
        };
        let name = record
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| CsvError::InvalidPortfolio("missing name field".to_string()))?;
        let shares = record
            .get("shares")
            .and_then(Value::as_int)
            .ok_or_else(|| CsvError::InvalidPortfolio("missing shares field".to_string()))?;
        let price = record
            .get("price")
            .and_then(Value::as_float)
            .ok_or_else(|| CsvError::InvalidPortfolio("missing price field".to_string()))?;
        portfolio.push(Holding::new(name, shares, price));
    }

    debug!(holdings = portfolio.len(), "Portfolio read");
    Ok(portfolio)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const PORTFOLIO: &str = "\
name,shares,price
AAPL,100,32.20
IBM,50,91.10
CAT,150,83.44
";

    #[test]
    fn test_read_portfolio() {
        let portfolio = read_portfolio_from(Cursor::new(PORTFOLIO)).unwrap();
        assert_eq!(portfolio.len(), 3);
        assert!(portfolio.contains("AAPL"));
        assert!(portfolio.contains("CAT"));
        assert!(!portfolio.contains("MSFT"));
    }

    #[test]
    fn test_read_portfolio_reordered_columns() {
        let input = "price,name,shares\n32.20,AAPL,100\n";
        let portfolio = read_portfolio_from(Cursor::new(input)).unwrap();
        assert_eq!(portfolio.len(), 1);
        let holding = portfolio.iter().next().unwrap();
        assert_eq!(holding.name, "AAPL");
        assert_eq!(holding.shares, 100);
        assert!((holding.price - 32.2).abs() < 1e-9);
    }

    #[test]
    fn test_read_portfolio_drops_malformed_row() {
        let input = "name,shares,price\nAAPL,lots,32.20\nIBM,50,91.10\n";
        let portfolio = read_portfolio_from(Cursor::new(input)).unwrap();
        assert_eq!(portfolio.len(), 1);
        assert!(portfolio.contains("IBM"));
    }

    #[test]
    fn test_read_portfolio_missing_file() {
        let err = read_portfolio("/no/such/portfolio.csv").unwrap_err();
        assert!(matches!(err, CsvError::Io(_)));
    }
}
