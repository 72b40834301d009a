use std::sync::Arc;

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
    models::Envelope,
};
use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use stockboard_core::{
    constants::{DEFAULT_KLINE_NUM, DEFAULT_KLINE_TYPE},
    quotes::{parse_symbol_list, EnrichedQuote, PopularStock},
};
use stockboard_market_data::{KlineSeries, SymbolInfo};

#[derive(Deserialize)]
struct SymbolsQuery {
    symbols: Option<String>,
}

#[derive(Deserialize)]
struct KlineQuery {
    symbols: Option<String>,
    #[serde(rename = "type")]
    kline_type: Option<String>,
    num: Option<String>,
}

#[derive(Deserialize)]
struct SearchQuery {
    q: Option<String>,
}

fn required_symbols(raw: Option<String>) -> ApiResult<Vec<String>> {
    raw.map(|s| parse_symbol_list(&s))
        .filter(|list| !list.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Symbols parameter is required".to_string()))
}

fn parse_count(raw: Option<&str>, default: u32, name: &str) -> ApiResult<u32> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(default),
        Some(s) => s
            .parse()
            .map_err(|_| ApiError::BadRequest(format!("Invalid {} parameter: {}", name, s))),
    }
}

async fn get_quotes(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SymbolsQuery>,
) -> ApiResult<Json<Envelope<Vec<EnrichedQuote>>>> {
    let symbols = required_symbols(query.symbols)?;
    let quotes = state.quote_service.get_quotes(&symbols).await?;
    Ok(Json(Envelope::data(quotes)))
}

async fn get_kline(
    State(state): State<Arc<AppState>>,
    Query(query): Query<KlineQuery>,
) -> ApiResult<Json<Envelope<Vec<KlineSeries>>>> {
    let symbols = required_symbols(query.symbols)?;
    let kline_type = parse_count(query.kline_type.as_deref(), DEFAULT_KLINE_TYPE, "type")?;
    let kline_num = parse_count(query.num.as_deref(), DEFAULT_KLINE_NUM, "num")?;
    let series = state
        .quote_service
        .get_kline(&symbols, kline_type, kline_num)
        .await?;
    Ok(Json(Envelope::data(series)))
}

async fn search_symbols(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Json<Envelope<Vec<SymbolInfo>>>> {
    let q = query
        .q
        .ok_or_else(|| ApiError::BadRequest("Query parameter is required".to_string()))?;
    let results = state.quote_service.search_symbols(&q).await?;
    Ok(Json(Envelope::data(results)))
}

async fn popular_stocks(State(state): State<Arc<AppState>>) -> Json<Envelope<Vec<PopularStock>>> {
    Json(Envelope::data(state.quote_service.popular_stocks()))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/stocks/quotes", get(get_quotes))
        .route("/stocks/kline", get(get_kline))
        .route("/stocks/search", get(search_symbols))
        .route("/stocks/popular", get(popular_stocks))
}
