//! Review endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::review::{Review, ReviewView},
};

use super::{library::UsernameQuery, require_field, MessageResponse};

#[derive(Deserialize, ToSchema)]
pub struct AddReviewRequest {
    pub username: Option<String>,
    pub book_id: Option<i32>,
    pub review: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct AddReviewResponse {
    pub message: String,
    pub review: Review,
}

#[derive(Serialize, ToSchema)]
pub struct ReviewsResponse {
    pub reviews: Vec<ReviewView>,
}

/// Add a review for a book in the user's library
#[utoipa::path(
    post,
    path = "/api/add-review",
    tag = "reviews",
    request_body = AddReviewRequest,
    responses(
        (status = 200, description = "Review added", body = AddReviewResponse),
        (status = 400, description = "Missing field or already reviewed"),
        (status = 404, description = "User or book not found")
    )
)]
pub async fn add_review(
    State(state): State<crate::AppState>,
    Json(request): Json<AddReviewRequest>,
) -> AppResult<Json<AddReviewResponse>> {
    let username = require_field(&request.username, "username")?;
    let review = require_field(&request.review, "review")?;
    let book_id = request.book_id.ok_or_else(|| {
        crate::error::AppError::MissingField("Please provide a book ID".to_string())
    })?;

    let (message, review) = state
        .services
        .reviews
        .add_review(username, book_id, review)
        .await?;

    Ok(Json(AddReviewResponse { message, review }))
}

/// Get all of the user's reviews
#[utoipa::path(
    get,
    path = "/api/get-reviews",
    tag = "reviews",
    params(UsernameQuery),
    responses(
        (status = 200, description = "The user's reviews", body = ReviewsResponse),
        (status = 404, description = "User not found or no reviews yet")
    )
)]
pub async fn get_reviews(
    State(state): State<crate::AppState>,
    Query(query): Query<UsernameQuery>,
) -> AppResult<Json<ReviewsResponse>> {
    let username = require_field(&query.username, "username")?;

    let reviews = state.services.reviews.get_reviews(username).await?;

    Ok(Json(ReviewsResponse { reviews }))
}

/// Delete the user's review of a book
#[utoipa::path(
    delete,
    path = "/api/delete-review/{id}",
    tag = "reviews",
    params(
        ("id" = i32, Path, description = "Book ID"),
        UsernameQuery
    ),
    responses(
        (status = 200, description = "Review deleted", body = MessageResponse),
        (status = 404, description = "User or review not found")
    )
)]
pub async fn delete_review(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Query(query): Query<UsernameQuery>,
) -> AppResult<Json<MessageResponse>> {
    let username = require_field(&query.username, "username")?;

    state.services.reviews.delete_review(username, id).await?;

    Ok(Json(MessageResponse::new("Review deleted")))
}
