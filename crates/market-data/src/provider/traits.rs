//! Quote provider trait definition.

use async_trait::async_trait;

use crate::errors::MarketDataError;
use crate::models::{KlineSeries, SymbolInfo, TradeQuote};

/// Trait for upstream quote vendors.
///
/// Implementations must issue a single upstream request per call, regardless
/// of how many symbols are passed.
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Unique identifier for this provider, used in logs and errors.
    fn id(&self) -> &'static str;

    /// Fetch the latest trade for every symbol.
    ///
    /// Symbols the vendor does not know are simply absent from the result.
    async fn batch_trade(&self, symbols: &[String]) -> Result<Vec<TradeQuote>, MarketDataError>;

    /// Fetch K-line bars for every symbol.
    ///
    /// # Arguments
    ///
    /// * `symbols` - Symbols to fetch
    /// * `kline_type` - Vendor bar period code
    /// * `kline_num` - Number of most recent bars per symbol
    async fn batch_kline(
        &self,
        symbols: &[String],
        kline_type: u32,
        kline_num: u32,
    ) -> Result<Vec<KlineSeries>, MarketDataError>;

    /// Fetch the vendor's full stock symbol list.
    async fn symbol_list(&self) -> Result<Vec<SymbolInfo>, MarketDataError>;
}
