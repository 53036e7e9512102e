//! Review model

use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

/// A user's free-text review of one book. At most one per (user, book)
/// pair, enforced by a unique constraint.
#[derive(Debug, Clone, FromRow, Serialize, ToSchema)]
pub struct Review {
    pub id: i32,
    pub user_id: i32,
    pub book_id: i32,
    pub review: String,
}

/// A review joined with the reviewed book's catalog fields
#[derive(Debug, Clone, FromRow, Serialize, ToSchema)]
pub struct ReviewView {
    pub id: i32,
    pub book_id: i32,
    pub title: String,
    pub author: String,
    pub review: String,
}
