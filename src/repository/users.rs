//! Users repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::user::User,
};

#[derive(Clone)]
pub struct UsersRepository {
    pool: Pool<Postgres>,
}

impl UsersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get user by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<User> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User with id {} not found", id)))?;

        Ok(user)
    }

    /// Get user by username (primary lookup for every handler)
    pub async fn get_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    /// Create a new user. Username uniqueness is enforced by the
    /// database and surfaced as a Duplicate error.
    pub async fn create(&self, username: &str, password: &str, salt: &str) -> AppResult<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, password, salt)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(username)
        .bind(password)
        .bind(salt)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::duplicate_on_unique(
                e,
                format!("User with username '{}' already exists", username),
            )
        })?;

        Ok(user)
    }

    /// Replace a user's password hash and salt
    pub async fn update_password(&self, id: i32, password: &str, salt: &str) -> AppResult<()> {
        sqlx::query("UPDATE users SET password = $1, salt = $2 WHERE id = $3")
            .bind(password)
            .bind(salt)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Delete a user. Library entries, favorites and reviews go with the
    /// row via foreign-key cascades; shared book rows stay.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
