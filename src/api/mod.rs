//! API handlers for Bookshelf REST endpoints

pub mod auth;
pub mod favorites;
pub mod health;
pub mod library;
pub mod openapi;
pub mod reviews;

use serde::Serialize;
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};

/// Plain message response body
#[derive(Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Extract a required request field, rejecting absent or blank values
pub(crate) fn require_field<'a>(value: &'a Option<String>, name: &str) -> AppResult<&'a str> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(AppError::MissingField(format!("Please provide a {}", name))),
    }
}
