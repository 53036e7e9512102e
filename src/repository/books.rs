//! Books and library associations repository

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, CatalogBook, LibraryBook, ReadingStatus},
};

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Find an existing catalog row matching a lookup result, by ISBN
    /// first and falling back to (title, author).
    pub async fn find_by_catalog(&self, record: &CatalogBook) -> AppResult<Option<Book>> {
        if let Some(ref isbn) = record.isbn {
            let book = sqlx::query_as::<_, Book>("SELECT * FROM books WHERE isbn = $1")
                .bind(isbn)
                .fetch_optional(&self.pool)
                .await?;
            if book.is_some() {
                return Ok(book);
            }
        }

        let book = sqlx::query_as::<_, Book>(
            "SELECT * FROM books WHERE LOWER(title) = LOWER($1) AND LOWER(author) = LOWER($2)",
        )
        .bind(&record.title)
        .bind(&record.author)
        .fetch_optional(&self.pool)
        .await?;

        Ok(book)
    }

    /// Insert a new catalog row from a lookup result
    pub async fn create(&self, record: &CatalogBook) -> AppResult<Book> {
        let book = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (title, author, isbn)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(&record.title)
        .bind(&record.author)
        .bind(&record.isbn)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::duplicate_on_unique(
                e,
                format!("'{}' by {} already exists in the catalog", record.title, record.author),
            )
        })?;

        Ok(book)
    }

    /// All books in a user's library with their reading status
    pub async fn get_library(&self, user_id: i32) -> AppResult<Vec<LibraryBook>> {
        let books = sqlx::query_as::<_, LibraryBook>(
            r#"
            SELECT b.id, b.title, b.author, b.isbn, ub.status
            FROM user_books ub
            JOIN books b ON b.id = ub.book_id
            WHERE ub.user_id = $1
            ORDER BY ub.added_at
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(books)
    }

    /// One book in a user's library, if the association exists
    pub async fn get_library_book(
        &self,
        user_id: i32,
        book_id: i32,
    ) -> AppResult<Option<LibraryBook>> {
        let book = sqlx::query_as::<_, LibraryBook>(
            r#"
            SELECT b.id, b.title, b.author, b.isbn, ub.status
            FROM user_books ub
            JOIN books b ON b.id = ub.book_id
            WHERE ub.user_id = $1 AND ub.book_id = $2
            "#,
        )
        .bind(user_id)
        .bind(book_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(book)
    }

    /// Associate a book with a user's library
    pub async fn add_to_library(
        &self,
        user_id: i32,
        book_id: i32,
        status: ReadingStatus,
    ) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO user_books (user_id, book_id, status)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(user_id)
        .bind(book_id)
        .bind(status)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::duplicate_on_unique(e, "Book is already in your library"))?;

        Ok(())
    }

    /// Remove a book from a user's library. The favorite row, if any,
    /// goes with the association via foreign-key cascade; the shared
    /// book row stays. Returns false when no association existed.
    pub async fn remove_from_library(&self, user_id: i32, book_id: i32) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM user_books WHERE user_id = $1 AND book_id = $2")
            .bind(user_id)
            .bind(book_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Update the reading status of a library association. Returns false
    /// when no association existed.
    pub async fn update_status(
        &self,
        user_id: i32,
        book_id: i32,
        status: ReadingStatus,
    ) -> AppResult<bool> {
        let result =
            sqlx::query("UPDATE user_books SET status = $1 WHERE user_id = $2 AND book_id = $3")
                .bind(status)
                .bind(user_id)
                .bind(book_id)
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected() > 0)
    }

    /// All favorite books of a user
    pub async fn get_favorites(&self, user_id: i32) -> AppResult<Vec<LibraryBook>> {
        let books = sqlx::query_as::<_, LibraryBook>(
            r#"
            SELECT b.id, b.title, b.author, b.isbn, ub.status
            FROM favorite_books fb
            JOIN user_books ub ON ub.user_id = fb.user_id AND ub.book_id = fb.book_id
            JOIN books b ON b.id = fb.book_id
            WHERE fb.user_id = $1
            ORDER BY fb.added_at
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(books)
    }

    /// Check whether a library book is already favorited
    pub async fn is_favorite(&self, user_id: i32, book_id: i32) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM favorite_books WHERE user_id = $1 AND book_id = $2)",
        )
        .bind(user_id)
        .bind(book_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    /// Insert a favorite association and force the library status to
    /// "Read" in one transaction. Favoriting implies the book has been
    /// read; doing both in a single commit means a favorite row can
    /// never exist beside a non-Read status.
    pub async fn add_favorite_marking_read(&self, user_id: i32, book_id: i32) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("INSERT INTO favorite_books (user_id, book_id) VALUES ($1, $2)")
            .bind(user_id)
            .bind(book_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::duplicate_on_unique(e, "Book is already in your favorites"))?;

        sqlx::query("UPDATE user_books SET status = $1 WHERE user_id = $2 AND book_id = $3")
            .bind(ReadingStatus::Read)
            .bind(user_id)
            .bind(book_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(())
    }
}
