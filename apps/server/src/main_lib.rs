use std::sync::Arc;

use crate::{auth::Argon2Hasher, config::Config};
use stockboard_core::{
    boards::{BoardService, BoardServiceTrait},
    clock::{Clock, SystemClock},
    market_hours::MarketHours,
    markings::{MarkingService, MarkingServiceTrait},
    quotes::{QuoteService, QuoteServiceTrait},
    users::{UserService, UserServiceTrait},
};
use stockboard_market_data::{InfowayProvider, QuoteProvider};
use stockboard_storage_sqlite::{
    boards::BoardRepository, db, markings::MarkingRepository, users::UserRepository,
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub struct AppState {
    pub board_service: Arc<dyn BoardServiceTrait>,
    pub marking_service: Arc<dyn MarkingServiceTrait>,
    pub user_service: Arc<dyn UserServiceTrait>,
    pub quote_service: Arc<dyn QuoteServiceTrait>,
    pub market_hours: MarketHours,
    pub clock: Arc<dyn Clock>,
}

pub fn init_tracing() {
    let log_format = std::env::var("SB_LOG_FORMAT").unwrap_or_else(|_| "json".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let provider = InfowayProvider::with_base_url(
        config.quote_api_key.clone(),
        &config.quote_api_url,
    );
    if config.quote_api_key.is_empty() {
        tracing::warn!("INFOWAY_API_KEY is not set; upstream quote calls will be rejected");
    }
    build_state_with_provider(config, Arc::new(provider), Arc::new(SystemClock)).await
}

/// Wires storage and services around the given quote provider and clock.
pub async fn build_state_with_provider(
    config: &Config,
    provider: Arc<dyn QuoteProvider>,
    clock: Arc<dyn Clock>,
) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = db::spawn_writer(&pool)?;

    let board_repo = Arc::new(BoardRepository::new(pool.clone(), writer.clone()));
    let marking_repo = Arc::new(MarkingRepository::new(pool.clone(), writer.clone()));
    let user_repo = Arc::new(UserRepository::new(pool.clone(), writer.clone()));

    let board_service = Arc::new(BoardService::new(board_repo, marking_repo.clone()));
    let marking_service = Arc::new(MarkingService::new(marking_repo));
    let user_service = Arc::new(UserService::new(user_repo, Arc::new(Argon2Hasher::new())));
    tracing::info!(
        provider = provider.id(),
        ttl_ms = config.change_ttl.as_millis() as u64,
        "Quote service ready"
    );
    let quote_service = Arc::new(QuoteService::new(provider, clock.clone(), config.change_ttl));

    Ok(Arc::new(AppState {
        board_service,
        marking_service,
        user_service,
        quote_service,
        market_hours: MarketHours::default(),
        clock,
    }))
}
