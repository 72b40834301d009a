use std::sync::Arc;

use crate::{error::ApiResult, main_lib::AppState, models::Envelope};
use axum::{
    extract::{Path, State},
    routing::{delete, get, post},
    Json, Router,
};
use stockboard_core::{
    boards::{Board, BoardStockRecord, NewBoard, NewBoardStock},
    summaries::{board_summary, MarketSummary},
};

async fn list_boards(State(state): State<Arc<AppState>>) -> ApiResult<Json<Envelope<Vec<Board>>>> {
    let boards = state.board_service.list_boards()?;
    Ok(Json(Envelope::data(boards)))
}

async fn create_board(
    State(state): State<Arc<AppState>>,
    Json(new_board): Json<NewBoard>,
) -> ApiResult<Json<Envelope<Board>>> {
    let board = state.board_service.create_board(new_board).await?;
    tracing::info!(board_id = board.id, "Board created");
    Ok(Json(Envelope::data(board)))
}

async fn delete_board(
    Path(id): Path<i32>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Envelope<()>>> {
    state.board_service.delete_board(id).await?;
    Ok(Json(Envelope::ok()))
}

async fn add_stock(
    Path(id): Path<i32>,
    State(state): State<Arc<AppState>>,
    Json(stock): Json<NewBoardStock>,
) -> ApiResult<Json<Envelope<BoardStockRecord>>> {
    let record = state.board_service.add_stock(id, stock).await?;
    Ok(Json(Envelope::data(record)))
}

async fn remove_stock(
    Path((id, symbol)): Path<(i32, String)>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Envelope<()>>> {
    state.board_service.remove_stock(id, &symbol).await?;
    Ok(Json(Envelope::ok()))
}

/// `data` is null for a board without stocks.
async fn get_board_summary(
    Path(id): Path<i32>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Envelope<Option<MarketSummary>>>> {
    let board = state.board_service.get_board(id)?;
    Ok(Json(Envelope::data(board_summary(&board))))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/boards", get(list_boards).post(create_board))
        .route("/boards/{id}", delete(delete_board))
        .route("/boards/{id}/stocks", post(add_stock))
        .route("/boards/{id}/stocks/{symbol}", delete(remove_stock))
        .route("/boards/{id}/summary", get(get_board_summary))
}
