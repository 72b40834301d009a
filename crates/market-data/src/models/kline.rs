use serde::{Deserialize, Serialize};

/// One K-line bar. The vendor sends every numeric field as a string.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct KlineBar {
    #[serde(default)]
    pub t: Option<String>,
    #[serde(default)]
    pub o: Option<String>,
    #[serde(default)]
    pub h: Option<String>,
    #[serde(default)]
    pub l: Option<String>,
    #[serde(default)]
    pub c: Option<String>,
    #[serde(default)]
    pub v: Option<String>,
    #[serde(default)]
    pub vw: Option<String>,
    /// Percent change, suffixed with `%` (e.g. `"-1.23%"`)
    #[serde(default)]
    pub pc: Option<String>,
    /// Price change amount
    #[serde(default)]
    pub pca: Option<String>,
}

/// K-line bars for one symbol, oldest first.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct KlineSeries {
    #[serde(rename = "s")]
    pub symbol: String,

    #[serde(rename = "respList", default)]
    pub bars: Vec<KlineBar>,
}

impl KlineSeries {
    /// Most recent bar, if any.
    pub fn latest(&self) -> Option<&KlineBar> {
        self.bars.last()
    }

    /// Percent change of the most recent bar, normalized with
    /// [`normalize_percent_change`]. `None` when the series has no bars.
    pub fn latest_percent_change(&self) -> Option<String> {
        self.latest()
            .map(|bar| normalize_percent_change(bar.pc.as_deref()))
    }
}

/// Strips a trailing `%` from the vendor's percent-change string.
///
/// Absent, empty, or non-numeric values become `"0"`.
pub fn normalize_percent_change(raw: Option<&str>) -> String {
    let Some(raw) = raw else {
        return "0".to_string();
    };
    let trimmed = raw.trim();
    let value = trimmed.strip_suffix('%').unwrap_or(trimmed).trim();
    if value.is_empty() || value.parse::<f64>().is_err() {
        return "0".to_string();
    }
    value.to_string()
}
