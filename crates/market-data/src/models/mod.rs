//! Market data models
//!
//! Wire-level types returned by the upstream vendor:
//! - `trade` - Live trade ticks (TradeQuote)
//! - `kline` - K-line bars and percent-change normalization (KlineSeries, KlineBar)
//! - `symbol` - Symbol list entries (SymbolInfo)

mod kline;
mod symbol;
mod trade;

pub use kline::{normalize_percent_change, KlineBar, KlineSeries};
pub use symbol::SymbolInfo;
pub use trade::TradeQuote;
