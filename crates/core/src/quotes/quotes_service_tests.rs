use crate::clock::ManualClock;
use crate::errors::Error;
use crate::quotes::{QuoteService, QuoteServiceTrait};
use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, TimeZone, Utc};
use serde_json::json;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;
use stockboard_market_data::{KlineSeries, MarketDataError, QuoteProvider, SymbolInfo, TradeQuote};

// --- Mock QuoteProvider ---
#[derive(Default)]
struct MockProvider {
    prices: Mutex<HashMap<String, String>>,
    changes: Mutex<HashMap<String, String>>,
    trade_calls: Mutex<Vec<Vec<String>>>,
    kline_calls: Mutex<Vec<Vec<String>>>,
    fail_trades: Mutex<bool>,
    fail_klines: Mutex<bool>,
    symbols: Vec<SymbolInfo>,
}

impl MockProvider {
    fn with_market(entries: &[(&str, &str, &str)]) -> Self {
        let provider = Self::default();
        for (symbol, price, pc) in entries {
            provider.set_price(symbol, price);
            provider.set_change(symbol, pc);
        }
        provider
    }

    fn set_price(&self, symbol: &str, price: &str) {
        self.prices
            .lock()
            .unwrap()
            .insert(symbol.to_string(), price.to_string());
    }

    fn set_change(&self, symbol: &str, pc: &str) {
        self.changes
            .lock()
            .unwrap()
            .insert(symbol.to_string(), pc.to_string());
    }

    fn kline_calls(&self) -> Vec<Vec<String>> {
        self.kline_calls.lock().unwrap().clone()
    }

    fn trade_call_count(&self) -> usize {
        self.trade_calls.lock().unwrap().len()
    }
}

#[async_trait]
impl QuoteProvider for MockProvider {
    fn id(&self) -> &'static str {
        "MOCK"
    }

    async fn batch_trade(&self, symbols: &[String]) -> Result<Vec<TradeQuote>, MarketDataError> {
        self.trade_calls.lock().unwrap().push(symbols.to_vec());
        if *self.fail_trades.lock().unwrap() {
            return Err(MarketDataError::Timeout {
                provider: "MOCK".to_string(),
            });
        }
        let prices = self.prices.lock().unwrap();
        // Reverse order: the vendor does not promise request order.
        Ok(symbols
            .iter()
            .rev()
            .filter_map(|s| {
                prices.get(s).map(|p| TradeQuote {
                    symbol: s.clone(),
                    timestamp: 1,
                    price: p.clone(),
                    volume: "100".to_string(),
                    turnover: "1000".to_string(),
                    direction: 0,
                })
            })
            .collect())
    }

    async fn batch_kline(
        &self,
        symbols: &[String],
        kline_type: u32,
        kline_num: u32,
    ) -> Result<Vec<KlineSeries>, MarketDataError> {
        assert_eq!((kline_type, kline_num), (6, 1));
        self.kline_calls.lock().unwrap().push(symbols.to_vec());
        if *self.fail_klines.lock().unwrap() {
            return Err(MarketDataError::RateLimited {
                provider: "MOCK".to_string(),
            });
        }
        let changes = self.changes.lock().unwrap();
        Ok(symbols
            .iter()
            .filter_map(|s| {
                changes.get(s).map(|pc| {
                    serde_json::from_value(json!({"s": s, "respList": [{"pc": pc}]})).unwrap()
                })
            })
            .collect())
    }

    async fn symbol_list(&self) -> Result<Vec<SymbolInfo>, MarketDataError> {
        Ok(self.symbols.clone())
    }
}

// --- K-line calls after the first return immediately; the first one parks
// until released, so a second request can overtake it. ---
#[derive(Default)]
struct HeldKlineProvider {
    kline_calls: AtomicUsize,
    first_kline_started: Notify,
    release_first_kline: Notify,
}

#[async_trait]
impl QuoteProvider for HeldKlineProvider {
    fn id(&self) -> &'static str {
        "HELD"
    }

    async fn batch_trade(&self, symbols: &[String]) -> Result<Vec<TradeQuote>, MarketDataError> {
        Ok(symbols
            .iter()
            .map(|s| {
                serde_json::from_value(json!({"s": s, "p": "1520.50"})).unwrap()
            })
            .collect())
    }

    async fn batch_kline(
        &self,
        symbols: &[String],
        _kline_type: u32,
        _kline_num: u32,
    ) -> Result<Vec<KlineSeries>, MarketDataError> {
        let call = self.kline_calls.fetch_add(1, Ordering::SeqCst);
        let pc = if call == 0 {
            self.first_kline_started.notify_one();
            self.release_first_kline.notified().await;
            "1.00%"
        } else {
            "2.00%"
        };
        Ok(symbols
            .iter()
            .map(|s| serde_json::from_value(json!({"s": s, "respList": [{"pc": pc}]})).unwrap())
            .collect())
    }

    async fn symbol_list(&self) -> Result<Vec<SymbolInfo>, MarketDataError> {
        Ok(Vec::new())
    }
}

struct Fixture {
    provider: Arc<MockProvider>,
    clock: Arc<ManualClock>,
    service: QuoteService,
}

fn fixture(provider: MockProvider) -> Fixture {
    let provider = Arc::new(provider);
    let clock = Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2024, 3, 4, 2, 0, 0).unwrap(),
    ));
    let service = QuoteService::new(provider.clone(), clock.clone(), Duration::from_secs(60));
    Fixture {
        provider,
        clock,
        service,
    }
}

fn symbols(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn test_second_call_within_ttl_skips_kline_fetch() {
    let f = fixture(MockProvider::with_market(&[
        ("600519.SH", "1520.50", "1.25%"),
        ("000858.SZ", "140.10", "-0.80%"),
    ]));
    let request = symbols(&["600519.SH", "000858.SZ"]);

    f.service.get_quotes(&request).await.unwrap();
    f.clock.advance(ChronoDuration::seconds(30));
    let quotes = f.service.get_quotes(&request).await.unwrap();

    assert_eq!(f.provider.kline_calls().len(), 1);
    assert_eq!(f.provider.trade_call_count(), 2);
    assert_eq!(quotes[0].percent_change, "1.25");
    assert_eq!(quotes[1].percent_change, "-0.80");
}

#[tokio::test]
async fn test_expired_entry_triggers_exactly_one_fetch() {
    let f = fixture(MockProvider::with_market(&[("600519.SH", "1520.50", "1.25%")]));
    let request = symbols(&["600519.SH"]);

    f.service.get_quotes(&request).await.unwrap();
    f.provider.set_change("600519.SH", "2.00%");
    f.clock.advance(ChronoDuration::seconds(60));
    let quotes = f.service.get_quotes(&request).await.unwrap();

    assert_eq!(
        f.provider.kline_calls(),
        vec![symbols(&["600519.SH"]), symbols(&["600519.SH"])]
    );
    assert_eq!(quotes[0].percent_change, "2.00");
}

#[tokio::test]
async fn test_only_stale_symbols_are_fetched_in_one_batch() {
    let f = fixture(MockProvider::with_market(&[
        ("600519.SH", "1520.50", "1.25%"),
        ("000858.SZ", "140.10", "-0.80%"),
        ("300750.SZ", "180.00", "3.10%"),
    ]));

    f.service.get_quotes(&symbols(&["600519.SH"])).await.unwrap();
    f.clock.advance(ChronoDuration::seconds(10));
    f.service
        .get_quotes(&symbols(&["600519.SH", "000858.SZ", "300750.SZ"]))
        .await
        .unwrap();

    assert_eq!(
        f.provider.kline_calls(),
        vec![
            symbols(&["600519.SH"]),
            symbols(&["000858.SZ", "300750.SZ"])
        ]
    );
}

#[tokio::test]
async fn test_overlapping_requests_never_move_fetch_time_backwards() {
    let provider = Arc::new(HeldKlineProvider::default());
    let t0 = Utc.with_ymd_and_hms(2024, 3, 4, 2, 0, 0).unwrap();
    let clock = Arc::new(ManualClock::new(t0));
    let service = QuoteService::new(provider.clone(), clock.clone(), Duration::from_secs(60));
    let request = symbols(&["600519.SH"]);

    let slow = service.get_quotes(&request);
    let fast = async {
        provider.first_kline_started.notified().await;
        clock.advance(ChronoDuration::seconds(5));
        service.get_quotes(&request).await.unwrap();
        let after_fast = service.change_cache().get("600519.SH").unwrap();
        assert_eq!(after_fast.fetched_at, t0 + ChronoDuration::seconds(5));
        provider.release_first_kline.notify_one();
    };
    let (slow, ()) = tokio::join!(slow, fast);

    // The slower request lands last: its value wins, its timestamp does not regress.
    assert_eq!(slow.unwrap()[0].percent_change, "1.00");
    let entry = service.change_cache().get("600519.SH").unwrap();
    assert_eq!(entry.percent_change, "1.00");
    assert!(entry.fetched_at >= t0 + ChronoDuration::seconds(5));
    assert_eq!(provider.kline_calls.load(Ordering::SeqCst), 2);

    // Fresh for a full TTL from the newest fetch.
    clock.advance(ChronoDuration::seconds(59));
    service.get_quotes(&request).await.unwrap();
    assert_eq!(provider.kline_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_kline_failure_falls_back_to_cache() {
    let f = fixture(MockProvider::with_market(&[
        ("600519.SH", "1520.50", "1.25%"),
        ("000858.SZ", "140.10", "-0.80%"),
    ]));
    f.service.get_quotes(&symbols(&["600519.SH"])).await.unwrap();

    *f.provider.fail_klines.lock().unwrap() = true;
    f.provider.set_price("600519.SH", "1530.00");
    f.clock.advance(ChronoDuration::seconds(90));
    let quotes = f
        .service
        .get_quotes(&symbols(&["600519.SH", "000858.SZ"]))
        .await
        .unwrap();

    assert_eq!(quotes.len(), 2);
    assert_eq!(quotes[0].trade.price, "1530.00");
    assert_eq!(quotes[0].percent_change, "1.25");
    assert_eq!(quotes[1].percent_change, "0");
}

#[tokio::test]
async fn test_trade_failure_is_an_error() {
    let f = fixture(MockProvider::with_market(&[("600519.SH", "1520.50", "1.25%")]));
    *f.provider.fail_trades.lock().unwrap() = true;

    let err = f
        .service
        .get_quotes(&symbols(&["600519.SH"]))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::MarketData(MarketDataError::Timeout { .. })));
    assert!(f.provider.kline_calls().is_empty());
}

#[tokio::test]
async fn test_results_follow_request_order_and_skip_unknown_symbols() {
    let f = fixture(MockProvider::with_market(&[
        ("600519.SH", "1520.50", "1.25%"),
        ("000858.SZ", "140.10", "-0.80%"),
    ]));

    let quotes = f
        .service
        .get_quotes(&symbols(&["000858.SZ", "999999.SH", "600519.SH", "000858.SZ"]))
        .await
        .unwrap();

    let order: Vec<_> = quotes.iter().map(|q| q.trade.symbol.as_str()).collect();
    assert_eq!(order, vec!["000858.SZ", "600519.SH"]);
    assert_eq!(f.provider.trade_calls.lock().unwrap()[0].len(), 3);
}

#[tokio::test]
async fn test_unparsable_change_is_zero() {
    let f = fixture(MockProvider::with_market(&[("600519.SH", "1520.50", "--")]));
    let quotes = f.service.get_quotes(&symbols(&["600519.SH"])).await.unwrap();
    assert_eq!(quotes[0].percent_change, "0");
}

#[tokio::test]
async fn test_empty_symbol_set_is_rejected() {
    let f = fixture(MockProvider::default());
    let err = f.service.get_quotes(&symbols(&[" ", ""])).await.unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
    assert_eq!(f.provider.trade_call_count(), 0);
}

#[tokio::test]
async fn test_search_caps_results() {
    let provider = MockProvider {
        symbols: (0..30)
            .map(|i| {
                serde_json::from_value(json!({
                    "symbol": format!("6000{:02}.SH", i),
                    "name_cn": "银行"
                }))
                .unwrap()
            })
            .collect(),
        ..Default::default()
    };
    let f = fixture(provider);

    assert_eq!(f.service.search_symbols("银行").await.unwrap().len(), 20);
    assert_eq!(f.service.search_symbols("600001").await.unwrap().len(), 1);
    assert!(f.service.search_symbols("  ").await.is_err());
}

#[test]
fn test_popular_stocks_shelf() {
    let f = fixture(MockProvider::default());
    let popular = f.service.popular_stocks();
    assert_eq!(popular.len(), 10);
    assert_eq!(popular[0].symbol, "600519.SH");
    assert_eq!(popular[0].name, "贵州茅台");
}
