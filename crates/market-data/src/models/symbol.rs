use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Entry of the vendor's symbol list.
///
/// Only the fields used for search are typed; everything else the vendor
/// sends is kept in `extra` and passed through.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SymbolInfo {
    pub symbol: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_cn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_en: Option<String>,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl SymbolInfo {
    /// Case-insensitive substring match on symbol, Chinese name, or English name.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        let hit = |field: &str| field.to_lowercase().contains(&query);
        hit(&self.symbol)
            || self.name_cn.as_deref().is_some_and(hit)
            || self.name_en.as_deref().is_some_and(hit)
    }

    /// Preferred display name: Chinese, then English, then the symbol itself.
    pub fn display_name(&self) -> &str {
        self.name_cn
            .as_deref()
            .or(self.name_en.as_deref())
            .unwrap_or(&self.symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(symbol: &str, cn: Option<&str>, en: Option<&str>) -> SymbolInfo {
        SymbolInfo {
            symbol: symbol.to_string(),
            name_cn: cn.map(str::to_string),
            name_en: en.map(str::to_string),
            extra: HashMap::new(),
        }
    }

    #[test]
    fn test_matches_any_name_field() {
        let moutai = info("600519.SH", Some("贵州茅台"), Some("Kweichow Moutai"));
        assert!(moutai.matches("600519"));
        assert!(moutai.matches("茅台"));
        assert!(moutai.matches("MOUTAI"));
        assert!(!moutai.matches("byd"));
    }

    #[test]
    fn test_display_name_fallbacks() {
        assert_eq!(info("A", None, Some("Alpha")).display_name(), "Alpha");
        assert_eq!(info("A", None, None).display_name(), "A");
    }

    #[test]
    fn test_extra_fields_round_trip() {
        let raw = r#"{"symbol":"300750.SZ","name_cn":"宁德时代","exchange":"SZSE"}"#;
        let parsed: SymbolInfo = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.extra.get("exchange").and_then(|v| v.as_str()), Some("SZSE"));
    }
}
