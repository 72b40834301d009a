use std::sync::Arc;

use crate::{main_lib::AppState, models::HealthView};
use axum::{extract::State, routing::get, Json, Router};

async fn health(State(state): State<Arc<AppState>>) -> Json<HealthView> {
    Json(HealthView {
        status: "ok",
        timestamp: state.clock.now(),
    })
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(health))
}
