//! Watchlist service routes

use axum::{Json, Router, response::IntoResponse, routing::get};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::{
    error::{ApiError, ApiResult},
    models::{Show, User},
    state::AppState,
};

pub mod shows;
pub mod users;

/// Create the router for the watchlist service
///
/// Show routes are mounted under both `/shows` and `/movies`.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/shows", shows::router())
        .nest("/movies", shows::router())
        .nest("/users", users::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "watchlist"
    }))
}

/// Ids that are not UUIDs can never have been issued, so they are reported as missing.
pub(crate) async fn find_show(state: &AppState, raw_id: &str) -> ApiResult<Show> {
    let id = Uuid::parse_str(raw_id).map_err(|_| ApiError::show_not_found(raw_id))?;
    state
        .show_repository
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::show_not_found(raw_id))
}

pub(crate) async fn find_user(state: &AppState, raw_id: &str) -> ApiResult<User> {
    let id = Uuid::parse_str(raw_id).map_err(|_| ApiError::user_not_found(raw_id))?;
    state
        .user_repository
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::user_not_found(raw_id))
}

/// Read an already-parsed JSON body into a payload allowlist
pub(crate) fn from_body<T: DeserializeOwned>(body: Value) -> ApiResult<T> {
    serde_json::from_value(body).map_err(|e| ApiError::BadRequest(e.to_string()))
}
