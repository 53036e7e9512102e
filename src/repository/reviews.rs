//! Reviews repository

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::review::{Review, ReviewView},
};

#[derive(Clone)]
pub struct ReviewsRepository {
    pool: Pool<Postgres>,
}

impl ReviewsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Check whether a user has already reviewed a book
    pub async fn exists(&self, user_id: i32, book_id: i32) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM reviews WHERE user_id = $1 AND book_id = $2)",
        )
        .bind(user_id)
        .bind(book_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    /// Persist a review. The (user, book) unique constraint backstops
    /// the duplicate check done in the service.
    pub async fn create(&self, user_id: i32, book_id: i32, review: &str) -> AppResult<Review> {
        let review = sqlx::query_as::<_, Review>(
            r#"
            INSERT INTO reviews (user_id, book_id, review)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(book_id)
        .bind(review)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::duplicate_on_unique(e, "You have already reviewed this book"))?;

        Ok(review)
    }

    /// All reviews by a user, joined with book title and author
    pub async fn get_for_user(&self, user_id: i32) -> AppResult<Vec<ReviewView>> {
        let reviews = sqlx::query_as::<_, ReviewView>(
            r#"
            SELECT r.id, r.book_id, b.title, b.author, r.review
            FROM reviews r
            JOIN books b ON b.id = r.book_id
            WHERE r.user_id = $1
            ORDER BY r.id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(reviews)
    }

    /// Delete a user's review of a book. Returns false when no review existed.
    pub async fn delete(&self, user_id: i32, book_id: i32) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM reviews WHERE user_id = $1 AND book_id = $2")
            .bind(user_id)
            .bind(book_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
