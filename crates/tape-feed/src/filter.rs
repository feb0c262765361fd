//! Portfolio membership filter.

use tape_core::{Portfolio, Record, Value};

/// Whether a record's name field belongs to the portfolio.
///
/// Membership is evaluated exactly once per record against the portfolio's
/// name index. A record without the name field never matches.
pub fn filter_symbols(record: &Record, portfolio: &Portfolio, name_field: &str) -> bool {
    record
        .get(name_field)
        .and_then(Value::as_str)
        .map(|name| portfolio.contains(name))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tape_core::Holding;

    fn record(name: &str) -> Record {
        Record::from_pairs(
            &["name".to_string(), "price".to_string()],
            vec![Value::Text(name.to_string()), Value::Float(10.5)],
        )
        .unwrap()
    }

    fn portfolio() -> Portfolio {
        Portfolio::from_holdings(vec![Holding::new("AAPL", 100, 32.2)])
    }

    #[test]
    fn test_member_passes() {
        assert!(filter_symbols(&record("AAPL"), &portfolio(), "name"));
    }

    #[test]
    fn test_non_member_dropped() {
        assert!(!filter_symbols(&record("MSFT"), &portfolio(), "name"));
    }

    #[test]
    fn test_missing_name_field_dropped() {
        assert!(!filter_symbols(&record("AAPL"), &portfolio(), "symbol"));
    }
}
