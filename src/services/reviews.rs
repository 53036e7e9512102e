//! Review management service

use crate::{
    error::{AppError, AppResult},
    models::{review::{Review, ReviewView}, user::User},
    repository::Repository,
};

#[derive(Clone)]
pub struct ReviewsService {
    repository: Repository,
}

impl ReviewsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    async fn get_user(&self, username: &str) -> AppResult<User> {
        self.repository
            .users
            .get_by_username(username)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User '{}' not found", username)))
    }

    /// Attach a review to a book in the user's library. One review per
    /// (user, book) pair; a second attempt is a duplicate error.
    pub async fn add_review(
        &self,
        username: &str,
        book_id: i32,
        review: &str,
    ) -> AppResult<(String, Review)> {
        let user = self.get_user(username).await?;

        let book = self
            .repository
            .books
            .get_library_book(user.id, book_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "Book with ID {} not found in your personal library",
                    book_id
                ))
            })?;

        if self.repository.reviews.exists(user.id, book_id).await? {
            return Err(AppError::Duplicate(format!(
                "You have already reviewed '{}'",
                book.title
            )));
        }

        let review = self
            .repository
            .reviews
            .create(user.id, book_id, review)
            .await?;

        tracing::info!("Review added for '{}' by user {}", book.title, username);

        Ok((format!("Review added for '{}'", book.title), review))
    }

    /// All of a user's reviews. Having none is reported as a not-found
    /// condition with a domain message.
    pub async fn get_reviews(&self, username: &str) -> AppResult<Vec<ReviewView>> {
        let user = self.get_user(username).await?;

        let reviews = self.repository.reviews.get_for_user(user.id).await?;

        if reviews.is_empty() {
            return Err(AppError::NotFound("You have no reviews yet".to_string()));
        }

        Ok(reviews)
    }

    /// Remove the user's review of a book
    pub async fn delete_review(&self, username: &str, book_id: i32) -> AppResult<()> {
        let user = self.get_user(username).await?;

        let deleted = self.repository.reviews.delete(user.id, book_id).await?;

        if !deleted {
            return Err(AppError::NotFound(format!(
                "No review found for book with ID {}",
                book_id
            )));
        }

        tracing::info!("Review deleted for book {} by user {}", book_id, username);

        Ok(())
    }
}
