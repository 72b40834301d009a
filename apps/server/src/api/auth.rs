use std::sync::Arc;

use crate::{error::ApiResult, main_lib::AppState, models::Envelope};
use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use stockboard_core::users::{Credentials, User};

async fn register(
    State(state): State<Arc<AppState>>,
    Json(credentials): Json<Credentials>,
) -> ApiResult<Json<Envelope<User>>> {
    let user = state.user_service.register(credentials).await?;
    tracing::info!(user_id = %user.id, "User registered");
    Ok(Json(Envelope::data(user)))
}

async fn login(
    State(state): State<Arc<AppState>>,
    Json(credentials): Json<Credentials>,
) -> ApiResult<Json<Envelope<User>>> {
    let user = state.user_service.login(credentials).await?;
    Ok(Json(Envelope::data(user)))
}

async fn me(
    Path(user_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Envelope<User>>> {
    let user = state.user_service.get_user(&user_id)?;
    Ok(Json(Envelope::data(user)))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/me/{user_id}", get(me))
}
