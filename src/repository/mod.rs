//! Repository layer for database operations

pub mod books;
pub mod reviews;
pub mod users;

use sqlx::{Pool, Postgres};

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub users: users::UsersRepository,
    pub books: books::BooksRepository,
    pub reviews: reviews::ReviewsRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            users: users::UsersRepository::new(pool.clone()),
            books: books::BooksRepository::new(pool.clone()),
            reviews: reviews::ReviewsRepository::new(pool.clone()),
            pool,
        }
    }
}
