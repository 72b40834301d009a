use std::sync::Arc;

use crate::{error::ApiResult, main_lib::AppState, models::Envelope};
use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use stockboard_core::{
    markings::{SaveMarking, SaveMarkingOutcome, StockMarking},
    users::User,
};

async fn save_marking(
    State(state): State<Arc<AppState>>,
    Json(input): Json<SaveMarking>,
) -> ApiResult<Response> {
    let response = match state.marking_service.save_marking(input).await? {
        SaveMarkingOutcome::Saved(marking) => Json(Envelope::data(marking)).into_response(),
        SaveMarkingOutcome::Removed => Json(Envelope::message("Marking removed")).into_response(),
    };
    Ok(response)
}

async fn get_markings(
    Path((board_id, symbol)): Path<(i32, String)>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Envelope<Vec<StockMarking>>>> {
    let markings = state.marking_service.get_markings(board_id, &symbol)?;
    Ok(Json(Envelope::data(markings)))
}

async fn delete_marking(
    Path((board_id, symbol, user_id)): Path<(i32, String, String)>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Envelope<()>>> {
    state
        .marking_service
        .delete_marking(board_id, &symbol, &user_id)
        .await?;
    Ok(Json(Envelope::message("Marking deleted")))
}

async fn list_users(State(state): State<Arc<AppState>>) -> ApiResult<Json<Envelope<Vec<User>>>> {
    let users = state.user_service.list_users()?;
    Ok(Json(Envelope::data(users)))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/markings", post(save_marking))
        .route("/markings/users/all", get(list_users))
        .route("/markings/{board_id}/{symbol}", get(get_markings))
        .route(
            "/markings/{board_id}/{symbol}/{user_id}",
            delete(delete_marking),
        )
}
