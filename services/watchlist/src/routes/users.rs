//! User resource handlers

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
};
use axum_extra::extract::WithRejection;
use serde_json::{Value, json};

use super::{find_show, find_user, from_body};
use crate::{
    error::{ApiError, ApiResult},
    models::{AddShowRequest, NewUser, Show, UpdateUser, User},
    state::AppState,
};

/// Routes relative to `/users`
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/:id", get(get_user).put(update_user).delete(delete_user))
        .route("/:id/movies", get(get_user_shows))
        .route("/:id/shows", put(add_show_to_user))
}

/// Get all users
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Json<Vec<User>>> {
    let users = state.user_repository.find_all().await?;
    Ok(Json(users))
}

/// Get a user by ID
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<User>> {
    let user = find_user(&state, &id).await?;
    Ok(Json(user))
}

/// Get the shows on a user's watch list
pub async fn get_user_shows(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Vec<Show>>> {
    let user = find_user(&state, &id).await?;
    let shows = state.user_repository.shows_of(user.id).await?;
    Ok(Json(shows))
}

/// Create a new user
pub async fn create_user(
    State(state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<NewUser>, ApiError>,
) -> ApiResult<impl IntoResponse> {
    let user = state.user_repository.create(&payload).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Add a show to a user's watch list
pub async fn add_show_to_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    WithRejection(Json(payload), _): WithRejection<Json<AddShowRequest>, ApiError>,
) -> ApiResult<impl IntoResponse> {
    let user = find_user(&state, &id).await?;
    let show = find_show(&state, &payload.show_id).await?;

    state.user_repository.add_show(user.id, show.id).await?;

    Ok(Json(json!({ "message": "Show added to user watched list" })))
}

/// Merge the supplied fields into a user
///
/// The id is resolved before the body is checked against the allowlist.
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    WithRejection(Json(body), _): WithRejection<Json<Value>, ApiError>,
) -> ApiResult<Json<User>> {
    let mut user = find_user(&state, &id).await?;
    let changes: UpdateUser = from_body(body)?;
    user.apply(changes);

    let user = state.user_repository.save(&user).await?;
    Ok(Json(user))
}

/// Delete a user
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let user = find_user(&state, &id).await?;
    state.user_repository.delete(user.id).await?;
    Ok(StatusCode::NO_CONTENT)
}
