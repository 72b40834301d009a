use async_trait::async_trait;
use log::{debug, warn};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use stockboard_market_data::{KlineSeries, QuoteProvider, SymbolInfo, TradeQuote};

use super::change_cache::ChangeCache;
use super::quotes_model::{dedupe_symbols, EnrichedQuote, PopularStock};
use super::quotes_traits::QuoteServiceTrait;
use crate::clock::Clock;
use crate::constants::{
    CHANGE_KLINE_NUM, CHANGE_KLINE_TYPE, POPULAR_STOCKS, SEARCH_RESULT_LIMIT,
    UNKNOWN_PERCENT_CHANGE,
};
use crate::errors::{Result, ValidationError};

/// Combines the live trade feed with the cached K-line percent change.
pub struct QuoteService {
    provider: Arc<dyn QuoteProvider>,
    cache: ChangeCache,
    clock: Arc<dyn Clock>,
}

impl QuoteService {
    pub fn new(
        provider: Arc<dyn QuoteProvider>,
        clock: Arc<dyn Clock>,
        change_ttl: Duration,
    ) -> Self {
        Self {
            provider,
            cache: ChangeCache::new(change_ttl),
            clock,
        }
    }

    pub fn change_cache(&self) -> &ChangeCache {
        &self.cache
    }

    /// Refreshes the percent change of every stale symbol with one batched
    /// K-line request. Failures leave the cache as it was.
    async fn refresh_changes(&self, symbols: &[String]) {
        let stale = self.cache.stale_symbols(symbols, self.clock.now());
        if stale.is_empty() {
            return;
        }

        debug!("Fetching percent change for {} stale symbol(s)", stale.len());
        match self
            .provider
            .batch_kline(&stale, CHANGE_KLINE_TYPE, CHANGE_KLINE_NUM)
            .await
        {
            Ok(series) => {
                // Arrival time; per-symbol fetch times never decrease.
                let fetched_at = self.clock.now();
                for item in series {
                    if !stale.contains(&item.symbol) {
                        continue;
                    }
                    if let Some(pc) = item.latest_percent_change() {
                        self.cache.store(&item.symbol, pc, fetched_at);
                    }
                }
            }
            Err(e) => {
                warn!(
                    "Percent change fetch from {} failed ({:?}), serving cached values: {}",
                    self.provider.id(),
                    e.retry_class(),
                    e
                );
            }
        }
    }
}

#[async_trait]
impl QuoteServiceTrait for QuoteService {
    async fn get_quotes(&self, symbols: &[String]) -> Result<Vec<EnrichedQuote>> {
        let symbols = dedupe_symbols(symbols);
        if symbols.is_empty() {
            return Err(ValidationError::MissingField("symbols".to_string()).into());
        }

        let trades = self.provider.batch_trade(&symbols).await?;

        self.refresh_changes(&symbols).await;

        let mut by_symbol: HashMap<String, TradeQuote> = trades
            .into_iter()
            .map(|trade| (trade.symbol.clone(), trade))
            .collect();

        Ok(symbols
            .iter()
            .filter_map(|symbol| by_symbol.remove(symbol))
            .map(|trade| {
                let percent_change = self
                    .cache
                    .percent_change(&trade.symbol)
                    .unwrap_or_else(|| UNKNOWN_PERCENT_CHANGE.to_string());
                EnrichedQuote {
                    trade,
                    percent_change,
                }
            })
            .collect())
    }

    async fn get_kline(
        &self,
        symbols: &[String],
        kline_type: u32,
        kline_num: u32,
    ) -> Result<Vec<KlineSeries>> {
        let symbols = dedupe_symbols(symbols);
        if symbols.is_empty() {
            return Err(ValidationError::MissingField("symbols".to_string()).into());
        }
        Ok(self
            .provider
            .batch_kline(&symbols, kline_type, kline_num)
            .await?)
    }

    async fn search_symbols(&self, query: &str) -> Result<Vec<SymbolInfo>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(ValidationError::MissingField("q".to_string()).into());
        }
        Ok(self
            .provider
            .symbol_list()
            .await?
            .into_iter()
            .filter(|info| info.matches(query))
            .take(SEARCH_RESULT_LIMIT)
            .collect())
    }

    fn popular_stocks(&self) -> Vec<PopularStock> {
        POPULAR_STOCKS
            .iter()
            .map(|(symbol, name)| PopularStock {
                symbol: symbol.to_string(),
                name: name.to_string(),
            })
            .collect()
    }
}
