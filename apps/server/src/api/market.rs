use std::sync::Arc;

use crate::{
    main_lib::AppState,
    models::{Envelope, MarketStatusView},
};
use axum::{extract::State, routing::get, Json, Router};

async fn market_status(State(state): State<Arc<AppState>>) -> Json<Envelope<MarketStatusView>> {
    let now = state.clock.now();
    let status = state.market_hours.status_at(now);
    Json(Envelope::data(MarketStatusView {
        open: status.is_open(),
        status,
        local_time: state.market_hours.local_time(now).format("%H:%M").to_string(),
    }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/market/status", get(market_status))
}
