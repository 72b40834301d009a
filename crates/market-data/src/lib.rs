//! Stockboard Market Data Crate
//!
//! Provider-agnostic access to the upstream quote vendor.
//!
//! # Overview
//!
//! Two upstream data sources back every quote the dashboard shows:
//! - a **live trade** feed (last trade price, volume, turnover), queried on
//!   every request and never cached;
//! - a **K-line** feed whose latest bar carries the percent-change figure.
//!   It is slower, so callers are expected to cache it.
//!
//! # Architecture
//!
//! ```text
//! +------------------+
//! |   Domain Layer   |  (stockboard-core QuoteService)
//! +------------------+
//!          |
//!          v
//! +------------------+
//! |  QuoteProvider   |  (trait)
//! +------------------+
//!          |
//!          v
//! +------------------+
//! | InfowayProvider  |  (reqwest, batched endpoints)
//! +------------------+
//! ```
//!
//! # Core Types
//!
//! - [`TradeQuote`] - One live trade tick per symbol
//! - [`KlineSeries`] / [`KlineBar`] - K-line bars per symbol
//! - [`SymbolInfo`] - Entry of the vendor's symbol list

pub mod errors;
pub mod models;
pub mod provider;

pub use errors::{MarketDataError, RetryClass};
pub use models::{KlineBar, KlineSeries, SymbolInfo, TradeQuote};
pub use provider::infoway::InfowayProvider;
pub use provider::QuoteProvider;
