use std::sync::Arc;

use crate::{main_lib::AppState, models::Envelope};
use axum::{routing::get, Json, Router};
use stockboard_core::summaries::{global_summary, MarketSummary};

async fn get_global_summary() -> Json<Envelope<MarketSummary>> {
    Json(Envelope::data(global_summary()))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/summaries/global", get(get_global_summary))
}
