//! Library management service: catalog resolution, status buckets,
//! favorites.

use crate::{
    error::{AppError, AppResult},
    models::{
        book::{CatalogBook, LibraryBook, LibraryBuckets, LibraryView, ReadingStatus},
        user::User,
    },
    repository::Repository,
    services::openlibrary::OpenLibraryClient,
};

#[derive(Clone)]
pub struct LibraryService {
    repository: Repository,
    catalog: OpenLibraryClient,
}

/// Result of an add-book request. A title matching several catalog
/// authors without an author filter is not an error, it is a prompt to
/// resubmit with one.
#[derive(Debug)]
pub enum AddBookOutcome {
    Added {
        message: String,
        book: LibraryBook,
    },
    /// The book is already in the library; the existing view rides
    /// along so the caller sees its current status.
    AlreadyInLibrary {
        message: String,
        book: LibraryBook,
    },
    Ambiguous {
        message: String,
        candidates: Vec<CatalogBook>,
    },
}

impl LibraryService {
    pub fn new(repository: Repository, catalog: OpenLibraryClient) -> Self {
        Self { repository, catalog }
    }

    async fn get_user(&self, username: &str) -> AppResult<User> {
        self.repository
            .users
            .get_by_username(username)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User '{}' not found", username)))
    }

    /// All books in a user's library, grouped by reading status, with
    /// the favorites list alongside.
    pub async fn get_library(&self, username: &str) -> AppResult<LibraryView> {
        let user = self.get_user(username).await?;

        let books = self.repository.books.get_library(user.id).await?;
        let favorites = self.repository.books.get_favorites(user.id).await?;

        Ok(LibraryView {
            books: LibraryBuckets::from_books(books),
            favorites,
        })
    }

    /// Resolve a title against the catalog and add the matching book to
    /// the user's library with status "Want to Read".
    pub async fn add_book(
        &self,
        username: &str,
        title: &str,
        author: Option<&str>,
    ) -> AppResult<AddBookOutcome> {
        let user = self.get_user(username).await?;

        let matches = self.catalog.search(title, author).await?;

        if matches.len() > 1 && author.is_none() {
            // Several authors wrote a book with this title; ask the
            // caller to disambiguate. Nothing is inserted.
            return Ok(AddBookOutcome::Ambiguous {
                message: format!(
                    "I found {} books with that title. Please specify the author's name to help me find the right one:",
                    matches.len()
                ),
                candidates: matches,
            });
        }

        let record = match matches.into_iter().next() {
            Some(record) => record,
            None => {
                return Err(AppError::NotFound(
                    "No books found with that title".to_string(),
                ))
            }
        };

        let book = match self.repository.books.find_by_catalog(&record).await? {
            Some(book) => book,
            None => self.repository.books.create(&record).await?,
        };

        if let Some(existing) = self
            .repository
            .books
            .get_library_book(user.id, book.id)
            .await?
        {
            return Ok(AddBookOutcome::AlreadyInLibrary {
                message: format!(
                    "'{}' by {} is already in your library with status: '{}'",
                    existing.title, existing.author, existing.status
                ),
                book: existing,
            });
        }

        self.repository
            .books
            .add_to_library(user.id, book.id, ReadingStatus::WantToRead)
            .await?;

        tracing::info!(
            "Added '{}' by {} to library of user {}",
            book.title,
            book.author,
            username
        );

        Ok(AddBookOutcome::Added {
            message: format!(
                "Success! '{}' by {} has been added to your library.",
                book.title, book.author
            ),
            book: LibraryBook {
                id: book.id,
                title: book.title,
                author: book.author,
                isbn: book.isbn,
                status: ReadingStatus::WantToRead,
            },
        })
    }

    /// Remove a book from the user's library. The shared catalog row
    /// stays available for other users.
    pub async fn delete_book(&self, username: &str, book_id: i32) -> AppResult<()> {
        let user = self.get_user(username).await?;

        let removed = self
            .repository
            .books
            .remove_from_library(user.id, book_id)
            .await?;

        if !removed {
            return Err(AppError::NotFound(format!(
                "Book with ID {} not found in your personal library",
                book_id
            )));
        }

        tracing::info!("Removed book {} from library of user {}", book_id, username);

        Ok(())
    }

    /// Change the reading status of a library book. The status string
    /// must be one of the three enumerated values.
    pub async fn update_status(
        &self,
        username: &str,
        book_id: i32,
        status: &str,
    ) -> AppResult<LibraryBook> {
        let status: ReadingStatus = status
            .parse()
            .map_err(AppError::InvalidStatus)?;

        let user = self.get_user(username).await?;

        let updated = self
            .repository
            .books
            .update_status(user.id, book_id, status)
            .await?;

        if !updated {
            return Err(AppError::NotFound(format!(
                "Book with ID {} not found in your personal library",
                book_id
            )));
        }

        self.repository
            .books
            .get_library_book(user.id, book_id)
            .await?
            .ok_or_else(|| AppError::Internal("Library entry vanished after update".to_string()))
    }

    /// Mark a library book as favorite. Favoriting implies the book has
    /// been read, so the status is forced to "Read".
    pub async fn add_favorite(
        &self,
        username: &str,
        book_id: i32,
    ) -> AppResult<(String, LibraryBook)> {
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

        if self.repository.books.is_favorite(user.id, book_id).await? {
            return Err(AppError::Duplicate(format!(
                "'{}' is already in your favorites",
                book.title
            )));
        }

        self.repository
            .books
            .add_favorite_marking_read(user.id, book_id)
            .await?;

        tracing::info!(
            "Marked '{}' as favorite for user {}",
            book.title,
            username
        );

        let message = format!(
            "'{}' has been added to your favorites and marked as Read",
            book.title
        );

        Ok((
            message,
            LibraryBook {
                status: ReadingStatus::Read,
                ..book
            },
        ))
    }
}
