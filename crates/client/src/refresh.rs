//! Quote refresh: one batched request for every tracked symbol, merged back
//! onto the dashboard by symbol.

use std::collections::HashMap;

use stockboard_core::quotes::EnrichedQuote;
use tracing::{debug, warn};

use crate::client::{ApiClient, QuoteFetcher};
use crate::errors::ClientError;
use crate::models::{DashboardState, SharedDashboard, StockView};

fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Writes quotes onto matching stocks. A price that is missing, unparsable
/// or zero keeps the previous one; an unparsable change becomes `0`.
/// Stocks without a returned quote are left alone.
pub fn merge_quotes(state: &mut DashboardState, quotes: &[EnrichedQuote]) -> usize {
    let by_symbol: HashMap<&str, &EnrichedQuote> = quotes
        .iter()
        .map(|q| (q.trade.symbol.as_str(), q))
        .collect();

    let mut updated = 0;
    for stock in state.boards.iter_mut().flat_map(|b| b.stocks.iter_mut()) {
        if let Some(quote) = by_symbol.get(stock.symbol.as_str()) {
            if let Some(price) = parse_number(&quote.trade.price).filter(|p| *p != 0.0) {
                stock.price = Some(price);
            }
            stock.change = Some(parse_number(&quote.percent_change).unwrap_or(0.0));
            updated += 1;
        }
    }
    updated
}

/// Fetches quotes for the union of all tracked symbols and merges them in.
///
/// Failures are logged and swallowed; the last known values stay in place.
/// Returns the number of stock rows updated.
pub async fn refresh_quotes(dashboard: &SharedDashboard, fetcher: &dyn QuoteFetcher) -> usize {
    let symbols = match dashboard.read() {
        Ok(state) => state.all_symbols(),
        Err(poisoned) => poisoned.into_inner().all_symbols(),
    };
    if symbols.is_empty() {
        return 0;
    }

    let quotes = match fetcher.get_quotes(&symbols).await {
        Ok(quotes) => quotes,
        Err(e) => {
            warn!("Failed to refresh quotes for {} symbols: {}", symbols.len(), e);
            return 0;
        }
    };

    let mut state = dashboard.write().unwrap_or_else(|p| p.into_inner());
    let updated = merge_quotes(&mut state, &quotes);
    debug!(requested = symbols.len(), updated, "Quotes merged");
    updated
}

/// Adds a stock to a board on the server, then fetches its price right away
/// so the new row does not wait for the next poll.
///
/// A failed price lookup is logged; the stock is still added without a price.
pub async fn add_stock(
    client: &ApiClient,
    dashboard: &SharedDashboard,
    board_id: i32,
    symbol: &str,
    name: &str,
) -> Result<(), ClientError> {
    client.add_stock(board_id, symbol, name).await?;

    let mut stock = StockView::new(symbol, name);
    match client.get_quotes(&[symbol.to_string()]).await {
        Ok(quotes) => {
            if let Some(quote) = quotes.first() {
                stock.price = Some(parse_number(&quote.trade.price).unwrap_or(0.0));
            }
        }
        Err(e) => warn!("Failed to fetch price for new stock {}: {}", symbol, e),
    }

    let mut state = dashboard.write().unwrap_or_else(|p| p.into_inner());
    if let Some(board) = state.board_mut(board_id) {
        board.stocks.push(stock);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BoardView;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::{Arc, Mutex, RwLock};

    fn quote(symbol: &str, price: &str, pc: &str) -> EnrichedQuote {
        serde_json::from_value(json!({
            "s": symbol, "t": 1, "p": price, "v": "1", "vw": "1", "td": 0, "pc": pc
        }))
        .unwrap()
    }

    fn dashboard(boards: Vec<Vec<StockView>>) -> DashboardState {
        DashboardState {
            boards: boards
                .into_iter()
                .enumerate()
                .map(|(i, stocks)| BoardView {
                    id: i as i32 + 1,
                    title: format!("b{}", i),
                    stocks,
                    ai_summary: false,
                })
                .collect(),
        }
    }

    #[derive(Default)]
    struct RecordingFetcher {
        calls: Mutex<Vec<Vec<String>>>,
        fail: bool,
    }

    #[async_trait]
    impl QuoteFetcher for RecordingFetcher {
        async fn get_quotes(&self, symbols: &[String]) -> Result<Vec<EnrichedQuote>, ClientError> {
            self.calls.lock().unwrap().push(symbols.to_vec());
            if self.fail {
                return Err(ClientError::Api {
                    status: 502,
                    message: "upstream down".to_string(),
                });
            }
            Ok(symbols.iter().map(|s| quote(s, "9.99", "1.5")).collect())
        }
    }

    #[test]
    fn test_merge_updates_matching_stocks_on_every_board() {
        let mut state = dashboard(vec![
            vec![StockView::new("A", "a"), StockView::new("B", "b")],
            vec![StockView::new("A", "a")],
        ]);

        let updated = merge_quotes(&mut state, &[quote("A", "10.5", "2.25")]);

        assert_eq!(updated, 2);
        assert_eq!(state.boards[0].stocks[0].price, Some(10.5));
        assert_eq!(state.boards[0].stocks[0].change, Some(2.25));
        assert_eq!(state.boards[1].stocks[0].price, Some(10.5));
        assert_eq!(state.boards[0].stocks[1], StockView::new("B", "b"));
    }

    #[test]
    fn test_merge_keeps_previous_price_on_zero_or_garbage() {
        let mut state = dashboard(vec![vec![StockView {
            price: Some(8.0),
            change: Some(1.0),
            ..StockView::new("A", "a")
        }]]);

        merge_quotes(&mut state, &[quote("A", "0", "abc")]);
        assert_eq!(state.boards[0].stocks[0].price, Some(8.0));
        assert_eq!(state.boards[0].stocks[0].change, Some(0.0));

        merge_quotes(&mut state, &[quote("A", "n/a", "-3.1")]);
        assert_eq!(state.boards[0].stocks[0].price, Some(8.0));
        assert_eq!(state.boards[0].stocks[0].change, Some(-3.1));
    }

    #[tokio::test]
    async fn test_refresh_makes_one_batched_call() {
        let shared = Arc::new(RwLock::new(dashboard(vec![
            vec![StockView::new("A", "a"), StockView::new("B", "b")],
            vec![StockView::new("B", "b"), StockView::new("C", "c")],
        ])));
        let fetcher = RecordingFetcher::default();

        let updated = refresh_quotes(&shared, &fetcher).await;

        assert_eq!(updated, 4);
        assert_eq!(
            *fetcher.calls.lock().unwrap(),
            vec![vec!["A".to_string(), "B".to_string(), "C".to_string()]]
        );
        assert!(!shared.read().unwrap().has_stocks_without_price());
    }

    #[tokio::test]
    async fn test_refresh_failure_keeps_last_values() {
        let before = dashboard(vec![vec![StockView {
            price: Some(8.0),
            change: Some(1.0),
            ..StockView::new("A", "a")
        }]]);
        let shared = Arc::new(RwLock::new(before.clone()));
        let fetcher = RecordingFetcher {
            fail: true,
            ..Default::default()
        };

        assert_eq!(refresh_quotes(&shared, &fetcher).await, 0);
        assert_eq!(*shared.read().unwrap(), before);
    }

    #[tokio::test]
    async fn test_refresh_without_symbols_skips_the_call() {
        let shared = Arc::new(RwLock::new(dashboard(vec![vec![]])));
        let fetcher = RecordingFetcher::default();
        assert_eq!(refresh_quotes(&shared, &fetcher).await, 0);
        assert!(fetcher.calls.lock().unwrap().is_empty());
    }
}
