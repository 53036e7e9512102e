//! Book model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, FromRow, Postgres};
use utoipa::ToSchema;

/// Reading status of a book inside a user's library
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum ReadingStatus {
    #[serde(rename = "Want to Read")]
    WantToRead,
    #[serde(rename = "Reading")]
    Reading,
    #[serde(rename = "Read")]
    Read,
}

impl ReadingStatus {
    pub const ALL: [ReadingStatus; 3] = [
        ReadingStatus::WantToRead,
        ReadingStatus::Reading,
        ReadingStatus::Read,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReadingStatus::WantToRead => "Want to Read",
            ReadingStatus::Reading => "Reading",
            ReadingStatus::Read => "Read",
        }
    }
}

impl std::fmt::Display for ReadingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ReadingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Want to Read" => Ok(ReadingStatus::WantToRead),
            "Reading" => Ok(ReadingStatus::Reading),
            "Read" => Ok(ReadingStatus::Read),
            _ => Err(format!("Invalid reading status: {}", s)),
        }
    }
}

// SQLx conversion for ReadingStatus (stored as TEXT)
impl sqlx::Type<Postgres> for ReadingStatus {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }
}

impl<'r> Decode<'r, Postgres> for ReadingStatus {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for ReadingStatus {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        let s: String = self.as_str().to_string();
        <String as Encode<Postgres>>::encode(s, buf)
    }
}

/// Shared catalog entry. Inserted once and referenced by many users'
/// libraries; never deleted by user actions.
#[derive(Debug, Clone, FromRow, Serialize, ToSchema)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub author: String,
    pub isbn: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A book as seen from one user's library: catalog fields plus the
/// per-user reading status.
#[derive(Debug, Clone, FromRow, Serialize, ToSchema)]
pub struct LibraryBook {
    pub id: i32,
    pub title: String,
    pub author: String,
    pub isbn: Option<String>,
    pub status: ReadingStatus,
}

/// A normalized record returned by the catalog lookup, before any
/// database row exists for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CatalogBook {
    pub title: String,
    pub author: String,
    pub isbn: Option<String>,
}

/// Library books grouped by reading status. All three buckets are
/// always present, empty or not.
#[derive(Debug, Clone, Default, Serialize, ToSchema)]
pub struct LibraryBuckets {
    #[serde(rename = "Want to Read")]
    pub want_to_read: Vec<LibraryBook>,
    #[serde(rename = "Reading")]
    pub reading: Vec<LibraryBook>,
    #[serde(rename = "Read")]
    pub read: Vec<LibraryBook>,
}

impl LibraryBuckets {
    /// Distribute a flat list of library books into status buckets
    pub fn from_books(books: Vec<LibraryBook>) -> Self {
        let mut buckets = LibraryBuckets::default();
        for book in books {
            match book.status {
                ReadingStatus::WantToRead => buckets.want_to_read.push(book),
                ReadingStatus::Reading => buckets.reading.push(book),
                ReadingStatus::Read => buckets.read.push(book),
            }
        }
        buckets
    }
}

/// The full view of one user's library
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LibraryView {
    pub books: LibraryBuckets,
    pub favorites: Vec<LibraryBook>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_display_and_parse() {
        for status in ReadingStatus::ALL {
            let parsed: ReadingStatus = status.as_str().parse().unwrap();
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn unknown_status_strings_are_rejected() {
        assert!("Finished".parse::<ReadingStatus>().is_err());
        assert!("want to read".parse::<ReadingStatus>().is_err());
        assert!("".parse::<ReadingStatus>().is_err());
    }

    #[test]
    fn status_serializes_with_spaces() {
        let json = serde_json::to_string(&ReadingStatus::WantToRead).unwrap();
        assert_eq!(json, "\"Want to Read\"");
    }

    #[test]
    fn buckets_include_empty_groups() {
        let book = LibraryBook {
            id: 1,
            title: "Dune".to_string(),
            author: "Frank Herbert".to_string(),
            isbn: None,
            status: ReadingStatus::Reading,
        };

        let buckets = LibraryBuckets::from_books(vec![book]);
        assert!(buckets.want_to_read.is_empty());
        assert_eq!(buckets.reading.len(), 1);
        assert!(buckets.read.is_empty());

        let json = serde_json::to_value(&buckets).unwrap();
        assert!(json.get("Want to Read").unwrap().as_array().unwrap().is_empty());
        assert_eq!(json.get("Reading").unwrap().as_array().unwrap().len(), 1);
        assert!(json.get("Read").unwrap().as_array().unwrap().is_empty());
    }
}
