use async_trait::async_trait;
use stockboard_market_data::{KlineSeries, SymbolInfo};

use crate::errors::Result;
use crate::quotes::quotes_model::{EnrichedQuote, PopularStock};

/// Trait for quote service operations
#[async_trait]
pub trait QuoteServiceTrait: Send + Sync {
    /// Live trades for `symbols` paired with their cached percent change.
    async fn get_quotes(&self, symbols: &[String]) -> Result<Vec<EnrichedQuote>>;

    /// Raw K-line series, uncached.
    async fn get_kline(
        &self,
        symbols: &[String],
        kline_type: u32,
        kline_num: u32,
    ) -> Result<Vec<KlineSeries>>;

    async fn search_symbols(&self, query: &str) -> Result<Vec<SymbolInfo>>;

    fn popular_stocks(&self) -> Vec<PopularStock>;
}
