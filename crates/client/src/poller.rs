//! Market-hours poller.
//!
//! One timer task per poller. On start it refreshes once if any stock lacks
//! a price, whatever the time; after that each tick refreshes only while the
//! exchange is in a trading session.

use std::sync::Arc;
use std::time::Duration;

use stockboard_core::clock::Clock;
use stockboard_core::market_hours::MarketHours;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::debug;

use crate::client::QuoteFetcher;
use crate::models::{DashboardState, SharedDashboard};
use crate::refresh::refresh_quotes;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(60);

/// Called after every refresh with the merged dashboard.
pub type RefreshHook = Arc<dyn Fn(&DashboardState) + Send + Sync>;

pub struct MarketHoursPoller {
    dashboard: SharedDashboard,
    fetcher: Arc<dyn QuoteFetcher>,
    clock: Arc<dyn Clock>,
    hours: MarketHours,
    period: Duration,
    on_refresh: Option<RefreshHook>,
    timer: Option<JoinHandle<()>>,
}

impl MarketHoursPoller {
    pub fn new(
        dashboard: SharedDashboard,
        fetcher: Arc<dyn QuoteFetcher>,
        clock: Arc<dyn Clock>,
        hours: MarketHours,
    ) -> Self {
        Self {
            dashboard,
            fetcher,
            clock,
            hours,
            period: DEFAULT_POLL_INTERVAL,
            on_refresh: None,
            timer: None,
        }
    }

    pub fn with_period(mut self, period: Duration) -> Self {
        self.period = period;
        self
    }

    pub fn with_refresh_hook(mut self, hook: RefreshHook) -> Self {
        self.on_refresh = Some(hook);
        self
    }

    pub fn is_running(&self) -> bool {
        self.timer.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Installs a fresh timer, replacing any running one. Does nothing while
    /// the dashboard has no boards.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn start(&mut self) {
        self.stop();

        let (has_boards, needs_prices) = {
            let state = self.dashboard.read().unwrap_or_else(|p| p.into_inner());
            (state.has_boards(), state.has_stocks_without_price())
        };
        if !has_boards {
            debug!("Poller not started: no boards");
            return;
        }

        let dashboard = self.dashboard.clone();
        let fetcher = self.fetcher.clone();
        let clock = self.clock.clone();
        let hours = self.hours;
        let period = self.period;
        let on_refresh = self.on_refresh.clone();

        self.timer = Some(tokio::spawn(async move {
            // Cadence is anchored at install time, not after the first refresh.
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            if needs_prices {
                debug!("Stocks without price; refreshing now");
                refresh_and_notify(&dashboard, fetcher.as_ref(), on_refresh.as_ref()).await;
            }

            loop {
                ticker.tick().await;
                if hours.is_open_at(clock.now()) {
                    refresh_and_notify(&dashboard, fetcher.as_ref(), on_refresh.as_ref()).await;
                } else {
                    debug!("Market closed; tick skipped");
                }
            }
        }));
        debug!(period_ms = period.as_millis() as u64, "Poller timer installed");
    }

    /// Cancels the timer. An in-flight refresh is dropped with it.
    pub fn stop(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
            debug!("Poller timer cancelled");
        }
    }

    /// Call after the board set changed: stops when it empties, starts on the
    /// empty to non-empty transition, and restarts a running timer when a
    /// stock still lacks a price so it is fetched right away.
    pub fn sync_with_boards(&mut self) {
        let (has_boards, needs_prices) = {
            let state = self.dashboard.read().unwrap_or_else(|p| p.into_inner());
            (state.has_boards(), state.has_stocks_without_price())
        };
        match (has_boards, self.is_running()) {
            (false, true) => self.stop(),
            (true, false) => self.start(),
            (true, true) if needs_prices => self.start(),
            _ => {}
        }
    }
}

async fn refresh_and_notify(
    dashboard: &SharedDashboard,
    fetcher: &dyn QuoteFetcher,
    on_refresh: Option<&RefreshHook>,
) {
    refresh_quotes(dashboard, fetcher).await;
    if let Some(hook) = on_refresh {
        let state = dashboard.read().unwrap_or_else(|p| p.into_inner());
        hook(&*state);
    }
}

impl Drop for MarketHoursPoller {
    fn drop(&mut self) {
        self.stop();
    }
}
