//! Favorites endpoint

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{error::AppResult, models::book::LibraryBook};

use super::require_field;

#[derive(Deserialize, ToSchema)]
pub struct AddFavoriteRequest {
    pub username: Option<String>,
    pub book_id: Option<i32>,
}

#[derive(Serialize, ToSchema)]
pub struct AddFavoriteResponse {
    pub message: String,
    pub book: LibraryBook,
}

/// Mark a library book as favorite, forcing its status to "Read"
#[utoipa::path(
    post,
    path = "/api/add-book-favorite-books",
    tag = "favorites",
    request_body = AddFavoriteRequest,
    responses(
        (status = 200, description = "Book added to favorites", body = AddFavoriteResponse),
        (status = 400, description = "Missing field or already favorited"),
        (status = 404, description = "User or book not found")
    )
)]
pub async fn add_favorite(
    State(state): State<crate::AppState>,
    Json(request): Json<AddFavoriteRequest>,
) -> AppResult<Json<AddFavoriteResponse>> {
    let username = require_field(&request.username, "username")?;
    let book_id = request.book_id.ok_or_else(|| {
        crate::error::AppError::MissingField("Please provide a book ID".to_string())
    })?;

    let (message, book) = state
        .services
        .library
        .add_favorite(username, book_id)
        .await?;

    Ok(Json(AddFavoriteResponse { message, book }))
}
