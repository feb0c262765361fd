//! Portfolio of tracked symbols.

use std::collections::{HashMap, HashSet};

/// One position held in the portfolio.
#[derive(Debug, Clone, PartialEq)]
pub struct Holding {
    pub name: String,
    pub shares: i64,
    pub price: f64,
}

impl Holding {
    pub fn new(name: impl Into<String>, shares: i64, price: f64) -> Self {
        Self {
            name: name.into(),
            shares,
            price,
        }
    }

    /// Acquisition cost of this position.
    pub fn cost(&self) -> f64 {
        self.shares as f64 * self.price
    }
}

/// In-memory set of tracked symbols with their holdings.
///
/// The live pipeline only consumes `contains`; membership is answered from a
/// name index so the per-record filter cost does not grow with portfolio
/// size. The pipeline never mutates a portfolio it is handed.
#[derive(Debug, Clone, Default)]
pub struct Portfolio {
    holdings: Vec<Holding>,
    names: HashSet<String>,
}

impl Portfolio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_holdings(holdings: Vec<Holding>) -> Self {
        let mut portfolio = Self::new();
        for holding in holdings {
            portfolio.push(holding);
        }
        portfolio
    }

    pub fn push(&mut self, holding: Holding) {
        self.names.insert(holding.name.clone());
        self.holdings.push(holding);
    }

    /// Membership test by symbol name.
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Number of holdings (a symbol held in multiple lots counts per lot).
    pub fn len(&self) -> usize {
        self.holdings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.holdings.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Holding> {
        self.holdings.iter()
    }

    /// Total acquisition cost across all holdings.
    pub fn total_cost(&self) -> f64 {
        self.holdings.iter().map(Holding::cost).sum()
    }

    /// Aggregate share counts by symbol.
    pub fn tabulate_shares(&self) -> HashMap<String, i64> {
        let mut totals = HashMap::new();
        for holding in &self.holdings {
            *totals.entry(holding.name.clone()).or_insert(0) += holding.shares;
        }
        totals
    }
}

impl<'a> IntoIterator for &'a Portfolio {
    type Item = &'a Holding;
    type IntoIter = std::slice::Iter<'a, Holding>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Portfolio {
        Portfolio::from_holdings(vec![
            Holding::new("AAPL", 100, 32.2),
            Holding::new("IBM", 50, 91.1),
            Holding::new("AAPL", 25, 40.0),
        ])
    }

    #[test]
    fn test_contains() {
        let portfolio = sample();
        assert!(portfolio.contains("AAPL"));
        assert!(portfolio.contains("IBM"));
        assert!(!portfolio.contains("MSFT"));
    }

    #[test]
    fn test_total_cost() {
        let portfolio = sample();
        let expected = 100.0 * 32.2 + 50.0 * 91.1 + 25.0 * 40.0;
        assert!((portfolio.total_cost() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_tabulate_shares_aggregates_lots() {
        let totals = sample().tabulate_shares();
        assert_eq!(totals.get("AAPL"), Some(&125));
        assert_eq!(totals.get("IBM"), Some(&50));
    }

    #[test]
    fn test_empty() {
        let portfolio = Portfolio::new();
        assert!(portfolio.is_empty());
        assert!(!portfolio.contains("AAPL"));
        assert_eq!(portfolio.total_cost(), 0.0);
    }
}
