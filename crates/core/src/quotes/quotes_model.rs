//! Quote domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use stockboard_market_data::TradeQuote;

/// A live trade enriched with the cached percent change.
///
/// Serializes flat, `{s, t, p, v, vw, td, pc}`, so clients see the vendor's
/// record with one extra key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EnrichedQuote {
    #[serde(flatten)]
    pub trade: TradeQuote,

    /// Percent change without the `%` sign, `"0"` when unknown.
    #[serde(rename = "pc")]
    pub percent_change: String,
}

/// Cached percent change for one symbol.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeCacheEntry {
    pub percent_change: String,
    pub fetched_at: DateTime<Utc>,
}

/// Entry of the fixed "popular stocks" shelf.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PopularStock {
    pub symbol: String,
    pub name: String,
}

/// Splits a comma-separated symbol list: entries are trimmed, empties
/// dropped and duplicates removed, keeping first-occurrence order.
pub fn parse_symbol_list(raw: &str) -> Vec<String> {
    dedupe_symbols(raw.split(','))
}

/// Trims, drops empties and removes duplicates while keeping order.
pub fn dedupe_symbols<I, S>(symbols: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for symbol in symbols {
        let symbol = symbol.as_ref().trim();
        if !symbol.is_empty() && !out.iter().any(|s| s == symbol) {
            out.push(symbol.to_string());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_symbol_list() {
        assert_eq!(
            parse_symbol_list(" 600519.SH,,000858.SZ ,600519.SH,"),
            vec!["600519.SH".to_string(), "000858.SZ".to_string()]
        );
        assert!(parse_symbol_list(" , ").is_empty());
    }

    #[test]
    fn test_enriched_quote_is_flat() {
        let quote = EnrichedQuote {
            trade: TradeQuote {
                symbol: "600519.SH".to_string(),
                timestamp: 1,
                price: "1520.50".to_string(),
                volume: "300".to_string(),
                turnover: "456150".to_string(),
                direction: 1,
            },
            percent_change: "1.25".to_string(),
        };
        let json = serde_json::to_value(&quote).unwrap();
        assert_eq!(json["s"], "600519.SH");
        assert_eq!(json["p"], "1520.50");
        assert_eq!(json["pc"], "1.25");
        assert!(json.get("trade").is_none());
    }
}
