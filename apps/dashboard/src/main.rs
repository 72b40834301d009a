mod config;
mod render;

use std::sync::{Arc, RwLock};

use anyhow::Context;
use stockboard_client::{
    add_stock, ApiClient, DashboardState, MarketHoursPoller, QuoteFetcher, RefreshHook,
};
use stockboard_core::clock::{Clock, SystemClock};
use stockboard_core::market_hours::MarketHours;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .init();
}

fn header(hours: &MarketHours, clock: &dyn Clock) -> String {
    let now = clock.now();
    format!(
        "{} {:?}",
        hours.local_time(now).format("%H:%M"),
        hours.status_at(now)
    )
}

/// `add <board_id> <symbol> <name>` adds a stock before the dashboard starts.
fn parse_add(args: &[String]) -> anyhow::Result<Option<(i32, String, String)>> {
    match args {
        [] => Ok(None),
        [cmd, board_id, symbol, name] if cmd == "add" => {
            let board_id = board_id.parse().context("board id must be a number")?;
            Ok(Some((board_id, symbol.clone(), name.clone())))
        }
        _ => anyhow::bail!("usage: stockboard-dashboard [add <board_id> <symbol> <name>]"),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env();
    init_tracing();
    let args: Vec<String> = std::env::args().skip(1).collect();
    let pending_add = parse_add(&args)?;

    let client = Arc::new(ApiClient::new(&config.server_url)?);
    tracing::info!("Using server {}", client.base_url());

    if let Some(user_id) = &config.user_id {
        match client.get_user(user_id).await {
            Ok(user) => tracing::info!("Signed in as {}", user.name),
            Err(e) => tracing::warn!("Unknown user {}: {}", user_id, e),
        }
    }

    let boards = client
        .list_boards()
        .await
        .context("Failed to load boards")?;
    let dashboard = Arc::new(RwLock::new(DashboardState::from_boards(boards)));

    if let Some((board_id, symbol, name)) = pending_add {
        add_stock(&client, &dashboard, board_id, &symbol, &name)
            .await
            .with_context(|| format!("Failed to add {} to board {}", symbol, board_id))?;
    }

    let hours = MarketHours::cn_a_share();
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let me = config.user_id.clone();
    let hook_clock = clock.clone();
    let on_refresh: RefreshHook = Arc::new(move |state: &DashboardState| {
        println!(
            "{}",
            render::render(state, &header(&hours, hook_clock.as_ref()), me.as_deref())
        );
    });

    {
        let state = dashboard.read().unwrap_or_else(|p| p.into_inner());
        on_refresh(&*state);
    }

    let fetcher: Arc<dyn QuoteFetcher> = client.clone();
    let mut poller = MarketHoursPoller::new(dashboard.clone(), fetcher, clock, hours)
        .with_period(config.poll_interval)
        .with_refresh_hook(on_refresh);
    poller.sync_with_boards();

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for Ctrl-C")?;
    poller.stop();
    tracing::info!("Dashboard stopped");
    Ok(())
}
