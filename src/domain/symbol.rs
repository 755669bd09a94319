//! Asset identifiers threaded between selection stages and order placement.

use std::fmt;

/// Opaque, immutable handle to a tradable instrument.
///
/// Tickers are normalised to trimmed upper case so that `"aapl "` and
/// `"AAPL"` resolve to the same asset.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(String);

impl Symbol {
    pub fn new(ticker: impl AsRef<str>) -> Self {
        Symbol(ticker.as_ref().trim().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for Symbol {
    fn from(value: String) -> Self {
        Symbol::new(value)
    }
}

impl From<&str> for Symbol {
    fn from(value: &str) -> Self {
        Symbol::new(value)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalises_case_and_whitespace() {
        assert_eq!(Symbol::new("  aapl "), Symbol::new("AAPL"));
        assert_eq!(Symbol::new("spy").as_str(), "SPY");
    }

    #[test]
    fn display_is_ticker() {
        assert_eq!(Symbol::from("msft").to_string(), "MSFT");
    }

    #[test]
    fn orders_lexicographically() {
        let mut symbols = vec![Symbol::new("IBM"), Symbol::new("AAPL"), Symbol::new("GOOG")];
        symbols.sort();
        assert_eq!(
            symbols,
            vec![Symbol::new("AAPL"), Symbol::new("GOOG"), Symbol::new("IBM")]
        );
    }
}
