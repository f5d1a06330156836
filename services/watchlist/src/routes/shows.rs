//! Show resource handlers

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
};
use axum_extra::extract::WithRejection;
use serde_json::{Value, json};
use tracing::info;

use super::{find_show, from_body};
use crate::{
    error::{ApiError, ApiResult},
    models::{GenreFilter, NewShow, Show, UpdateShow, User},
    state::AppState,
    validation::{self, AVAILABILITY_RULES, RATING_RULES, STATUS_RULES},
};

/// Routes relative to the show mount point
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_shows).post(create_show))
        .route("/genre/:genre", get(list_shows_by_genre))
        .route("/:id", get(get_show).put(update_show).delete(delete_show))
        .route("/:id/users", get(get_show_users))
        .route("/:id/rating", put(update_rating))
        .route("/:id/availability", put(update_availability))
        .route("/:id/updates", put(toggle_status))
}

/// Get all shows
pub async fn list_shows(State(state): State<AppState>) -> ApiResult<Json<Vec<Show>>> {
    let shows = state.show_repository.find_all().await?;
    Ok(Json(shows))
}

/// Get a show by ID
pub async fn get_show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Show>> {
    let show = find_show(&state, &id).await?;
    Ok(Json(show))
}

/// Get the users watching a show
pub async fn get_show_users(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Vec<User>>> {
    let show = find_show(&state, &id).await?;
    let users = state.show_repository.users_of(show.id).await?;
    Ok(Json(users))
}

/// Get shows whose genre contains the given text
pub async fn list_shows_by_genre(
    State(state): State<AppState>,
    Path(genre): Path<String>,
) -> ApiResult<Json<Vec<Show>>> {
    let filter = GenreFilter::new(&genre);
    let shows = state.show_repository.find_by_genre(&filter).await?;
    Ok(Json(shows))
}

/// Create a new show
pub async fn create_show(
    State(state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<NewShow>, ApiError>,
) -> ApiResult<impl IntoResponse> {
    let show = state.show_repository.create(&payload).await?;
    Ok((StatusCode::CREATED, Json(show)))
}

/// Merge the supplied fields into a show
///
/// The id is resolved before the body is checked against the allowlist.
pub async fn update_show(
    State(state): State<AppState>,
    Path(id): Path<String>,
    WithRejection(Json(body), _): WithRejection<Json<Value>, ApiError>,
) -> ApiResult<Json<Show>> {
    let mut show = find_show(&state, &id).await?;
    let changes: UpdateShow = from_body(body)?;
    show.apply(changes);

    let show = state.show_repository.save(&show).await?;
    Ok(Json(show))
}

/// Set the rating of a show
pub async fn update_rating(
    State(state): State<AppState>,
    Path(id): Path<String>,
    WithRejection(Json(body), _): WithRejection<Json<Value>, ApiError>,
) -> ApiResult<impl IntoResponse> {
    validation::validate(&body, RATING_RULES)?;

    let mut show = find_show(&state, &id).await?;
    show.rating = Some(validation::trimmed_str(&body, "rating"));
    state.show_repository.save(&show).await?;

    info!("Updated rating of show {}", show.id);
    Ok(Json(json!({ "message": "Show rating updated successfully" })))
}

/// Set whether a show is available
pub async fn update_availability(
    State(state): State<AppState>,
    Path(id): Path<String>,
    WithRejection(Json(body), _): WithRejection<Json<Value>, ApiError>,
) -> ApiResult<impl IntoResponse> {
    validation::validate(&body, AVAILABILITY_RULES)?;

    let mut show = find_show(&state, &id).await?;
    show.available = body["available"].as_bool().unwrap_or(show.available);
    state.show_repository.save(&show).await?;

    info!("Updated availability of show {}", show.id);
    Ok(Json(json!({ "message": "Show availability updated successfully" })))
}

/// Flip a show between canceled and on-going
///
/// The body must carry a `status` field but its value is not applied.
pub async fn toggle_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    WithRejection(Json(body), _): WithRejection<Json<Value>, ApiError>,
) -> ApiResult<impl IntoResponse> {
    validation::validate(&body, STATUS_RULES)?;

    let mut show = find_show(&state, &id).await?;
    show.toggle_status();
    let show = state.show_repository.save(&show).await?;

    info!("Show {} is now {}", show.id, show.status);
    Ok(Json(json!({
        "message": "Show status updated successfully",
        "show": show,
    })))
}

/// Delete a show
pub async fn delete_show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let show = find_show(&state, &id).await?;
    state.show_repository.delete(show.id).await?;
    Ok(StatusCode::NO_CONTENT)
}
