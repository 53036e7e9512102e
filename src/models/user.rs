//! User model

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

/// A registered account.
///
/// `password` holds the hex-encoded SHA-512 digest of `password + salt`;
/// neither field is ever serialized back to the client.
#[derive(Debug, Clone, FromRow, Serialize, ToSchema)]
pub struct User {
    pub id: i32,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
    #[serde(skip_serializing)]
    pub salt: String,
    pub created_at: DateTime<Utc>,
}
