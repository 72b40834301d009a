//! Client side of the stock board.
//!
//! - [`ApiClient`] talks to the REST server.
//! - [`DashboardState`] holds what the dashboard shows.
//! - [`refresh_quotes`] pulls live prices for every tracked symbol in one call.
//! - [`MarketHoursPoller`] drives refreshes during trading sessions.

pub mod client;
pub mod errors;
pub mod models;
pub mod poller;
pub mod refresh;

pub use client::{ApiClient, QuoteFetcher, DEFAULT_TIMEOUT};
pub use errors::ClientError;
pub use models::{BoardView, DashboardState, MarketStatusInfo, SharedDashboard, StockView};
pub use poller::{MarketHoursPoller, RefreshHook, DEFAULT_POLL_INTERVAL};
pub use refresh::{add_stock, merge_quotes, refresh_quotes};
