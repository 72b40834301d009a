use serde::{Deserialize, Serialize};

/// Latest trade for one symbol, as reported by the live trade feed.
///
/// Field names follow the vendor's compact keys on the wire so the server can
/// pass the record through to the browser unchanged.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TradeQuote {
    /// Symbol, e.g. `600519.SH`
    #[serde(rename = "s")]
    pub symbol: String,

    /// Trade timestamp (epoch milliseconds)
    #[serde(rename = "t", default)]
    pub timestamp: i64,

    /// Last trade price as a decimal string
    #[serde(rename = "p")]
    pub price: String,

    /// Volume as a decimal string
    #[serde(rename = "v", default)]
    pub volume: String,

    /// Turnover as a decimal string
    #[serde(rename = "vw", default)]
    pub turnover: String,

    /// Trade direction flag
    #[serde(rename = "td", default)]
    pub direction: i32,
}

impl TradeQuote {
    /// Price parsed as a number. `None` when the vendor sent something unparsable.
    pub fn price_value(&self) -> Option<f64> {
        self.price.trim().parse::<f64>().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_vendor_keys() {
        let raw =
            r#"{"s":"600519.SH","t":1718000000000,"p":"1520.50","v":"300","vw":"456150","td":1}"#;
        let quote: TradeQuote = serde_json::from_str(raw).unwrap();
        assert_eq!(quote.symbol, "600519.SH");
        assert_eq!(quote.timestamp, 1_718_000_000_000);
        assert_eq!(quote.price_value(), Some(1520.5));
        assert_eq!(quote.direction, 1);
    }

    #[test]
    fn test_unparsable_price() {
        let raw = r#"{"s":"A","p":"n/a"}"#;
        let quote: TradeQuote = serde_json::from_str(raw).unwrap();
        assert_eq!(quote.price_value(), None);
        assert_eq!(quote.volume, "");
    }
}
