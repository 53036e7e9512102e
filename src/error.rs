//! Error types for the Bookshelf server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing field: {0}")]
    MissingField(String),

    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Invalid status: {0}")]
    InvalidStatus(String),

    #[error("Catalog lookup failed: {0}")]
    UpstreamFetch(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::MissingField(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::InvalidCredentials(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Duplicate(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::InvalidStatus(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::UpstreamFetch(msg) => {
                tracing::error!("Catalog lookup failed: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to fetch from OpenLibrary".to_string(),
                )
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error".to_string(),
                )
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse { message });

        (status, body).into_response()
    }
}

impl AppError {
    /// Map a sqlx unique-constraint violation to a domain duplicate error,
    /// leaving every other database error untouched.
    pub fn duplicate_on_unique(err: sqlx::Error, message: impl Into<String>) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                AppError::Duplicate(message.into())
            }
            _ => AppError::Database(err),
        }
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
