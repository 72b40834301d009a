//! Quotes module - live prices enriched with a cached percent change.
//!
//! ```text
//! QuoteService ──batch_trade (every call)──▶ QuoteProvider
//!      │        ──batch_kline (stale only)──▶
//!      ▼
//! ChangeCache (symbol → pc, fetched_at)
//! ```

mod change_cache;
mod quotes_model;
mod quotes_service;
mod quotes_traits;

#[cfg(test)]
mod quotes_service_tests;

pub use change_cache::ChangeCache;
pub use quotes_model::{
    dedupe_symbols, parse_symbol_list, ChangeCacheEntry, EnrichedQuote, PopularStock,
};
pub use quotes_service::QuoteService;
pub use quotes_traits::QuoteServiceTrait;
