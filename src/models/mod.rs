//! Data models for Bookshelf

pub mod book;
pub mod review;
pub mod user;

// Re-export commonly used types
pub use book::{Book, CatalogBook, LibraryBook, LibraryBuckets, LibraryView, ReadingStatus};
pub use review::{Review, ReviewView};
pub use user::User;
