//! Personal library endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{
    error::AppResult,
    models::book::{CatalogBook, LibraryBook, LibraryView},
    services::library::AddBookOutcome,
};

use super::{require_field, MessageResponse};

#[derive(Deserialize, IntoParams)]
pub struct UsernameQuery {
    pub username: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct AddBookRequest {
    pub username: Option<String>,
    pub title: Option<String>,
    pub author: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct UpdateStatusRequest {
    pub username: Option<String>,
    pub status: Option<String>,
}

/// Response when a book was resolved and added
#[derive(Serialize, ToSchema)]
pub struct AddBookResponse {
    pub message: String,
    pub book: LibraryBook,
}

/// Disambiguation response when several authors match the title
#[derive(Serialize, ToSchema)]
pub struct AmbiguousMatchResponse {
    pub message: String,
    pub books: Vec<CatalogBook>,
}

/// Response carrying an updated library book view
#[derive(Serialize, ToSchema)]
pub struct BookStatusResponse {
    pub message: String,
    pub book: LibraryBook,
}

/// Get a user's library grouped by reading status
#[utoipa::path(
    get,
    path = "/api/get-library",
    tag = "library",
    params(UsernameQuery),
    responses(
        (status = 200, description = "The user's library", body = LibraryView),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_library(
    State(state): State<crate::AppState>,
    Query(query): Query<UsernameQuery>,
) -> AppResult<Json<LibraryView>> {
    let username = require_field(&query.username, "username")?;

    let library = state.services.library.get_library(username).await?;
    Ok(Json(library))
}

/// Add a book to the library, resolved through the OpenLibrary catalog
#[utoipa::path(
    post,
    path = "/api/add-book",
    tag = "library",
    request_body = AddBookRequest,
    responses(
        (status = 200, description = "Book added", body = AddBookResponse),
        (status = 300, description = "Several authors match, pick one", body = AmbiguousMatchResponse),
        (status = 400, description = "Missing field, or already in library (body carries the existing view)", body = AddBookResponse),
        (status = 404, description = "No catalog match"),
        (status = 500, description = "Catalog lookup failed")
    )
)]
pub async fn add_book(
    State(state): State<crate::AppState>,
    Json(request): Json<AddBookRequest>,
) -> AppResult<Response> {
    let username = require_field(&request.username, "username")?;
    let title = require_field(&request.title, "book title")?;
    let author = request.author.as_deref().map(str::trim).filter(|a| !a.is_empty());

    let outcome = state
        .services
        .library
        .add_book(username, title, author)
        .await?;

    let response = match outcome {
        AddBookOutcome::Added { message, book } => {
            (StatusCode::OK, Json(AddBookResponse { message, book })).into_response()
        }
        AddBookOutcome::AlreadyInLibrary { message, book } => (
            StatusCode::BAD_REQUEST,
            Json(AddBookResponse { message, book }),
        )
            .into_response(),
        AddBookOutcome::Ambiguous { message, candidates } => (
            StatusCode::MULTIPLE_CHOICES,
            Json(AmbiguousMatchResponse {
                message,
                books: candidates,
            }),
        )
            .into_response(),
    };

    Ok(response)
}

/// Remove a book from the library (the catalog entry stays)
#[utoipa::path(
    delete,
    path = "/api/delete-book/{id}",
    tag = "library",
    params(
        ("id" = i32, Path, description = "Book ID"),
        UsernameQuery
    ),
    responses(
        (status = 200, description = "Book removed", body = MessageResponse),
        (status = 404, description = "User or book not found")
    )
)]
pub async fn delete_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Query(query): Query<UsernameQuery>,
) -> AppResult<Json<MessageResponse>> {
    let username = require_field(&query.username, "username")?;

    state.services.library.delete_book(username, id).await?;

    Ok(Json(MessageResponse::new(
        "Book removed from your library",
    )))
}

/// Update the reading status of a library book
#[utoipa::path(
    put,
    path = "/api/update-status/{id}",
    tag = "library",
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = BookStatusResponse),
        (status = 400, description = "Invalid reading status"),
        (status = 404, description = "User or book not found")
    )
)]
pub async fn update_status(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(request): Json<UpdateStatusRequest>,
) -> AppResult<Json<BookStatusResponse>> {
    let username = require_field(&request.username, "username")?;
    let status = require_field(&request.status, "status")?;

    let book = state
        .services
        .library
        .update_status(username, id, status)
        .await?;

    Ok(Json(BookStatusResponse {
        message: format!("Status of '{}' updated to '{}'", book.title, book.status),
        book,
    }))
}
