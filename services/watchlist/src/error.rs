//! Error contract for the watchlist HTTP surface

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::validation::FieldViolation;

/// Custom error type for the watchlist service
#[derive(Error, Debug)]
pub enum ApiError {
    /// Referenced record does not exist
    #[error("{0}")]
    NotFound(String),

    /// Body could not be read into the expected payload
    #[error("{0}")]
    BadRequest(String),

    /// One or more field constraints failed
    #[error("Validation failed")]
    Validation(Vec<FieldViolation>),

    /// Database error
    #[error(transparent)]
    Database(#[from] common::error::DatabaseError),
}

impl ApiError {
    pub fn show_not_found(id: &str) -> Self {
        Self::NotFound(format!("Show with ID {} not found", id))
    }

    pub fn user_not_found(id: &str) -> Self {
        Self::NotFound(format!("User with ID {} not found", id))
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<Vec<FieldViolation>> for ApiError {
    fn from(violations: Vec<FieldViolation>) -> Self {
        ApiError::Validation(violations)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::Validation(violations) => json!({ "errors": violations }),
            ApiError::Database(e) => {
                error!("Database operation failed: {}", e);
                json!({ "error": e.to_string() })
            }
            other => json!({ "error": other.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;
