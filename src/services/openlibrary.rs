//! OpenLibrary catalog client
//!
//! Resolves a book title (and optional author) to normalized
//! (title, author, isbn) records via the OpenLibrary search API.

use serde::Deserialize;
use std::time::Duration;

use crate::{
    config::CatalogConfig,
    error::{AppError, AppResult},
    models::book::CatalogBook,
};

/// Fields requested from the search API; everything else is dead weight.
const SEARCH_FIELDS: &str = "title,author_name,isbn";

#[derive(Clone)]
pub struct OpenLibraryClient {
    http: reqwest::Client,
    config: CatalogConfig,
}

/// Raw search response from OpenLibrary
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    docs: Vec<SearchDoc>,
}

/// One document as OpenLibrary returns it. Author and ISBN come back as
/// arrays and may be absent entirely.
#[derive(Debug, Deserialize)]
struct SearchDoc {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    author_name: Vec<String>,
    #[serde(default)]
    isbn: Vec<String>,
}

impl From<SearchDoc> for CatalogBook {
    fn from(doc: SearchDoc) -> Self {
        CatalogBook {
            title: doc.title.unwrap_or_else(|| "Unknown".to_string()),
            author: doc
                .author_name
                .into_iter()
                .next()
                .unwrap_or_else(|| "Unknown".to_string()),
            isbn: doc.isbn.into_iter().next(),
        }
    }
}

impl OpenLibraryClient {
    pub fn new(config: CatalogConfig) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { http, config })
    }

    /// Search OpenLibrary by title, optionally narrowed by author.
    /// Returns up to `search_limit` normalized records; any network or
    /// upstream failure surfaces as an UpstreamFetch error.
    pub async fn search(&self, title: &str, author: Option<&str>) -> AppResult<Vec<CatalogBook>> {
        let url = format!("{}/search.json", self.config.base_url);

        let mut params = vec![
            ("title", title.to_string()),
            ("fields", SEARCH_FIELDS.to_string()),
            ("limit", self.config.search_limit.to_string()),
        ];
        if let Some(author) = author {
            params.push(("author", author.to_string()));
        }

        tracing::debug!("OpenLibrary search: title={:?} author={:?}", title, author);

        let response = self
            .http
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| AppError::UpstreamFetch(e.to_string()))?
            .error_for_status()
            .map_err(|e| AppError::UpstreamFetch(e.to_string()))?;

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| AppError::UpstreamFetch(format!("Invalid response body: {}", e)))?;

        tracing::debug!("OpenLibrary returned {} docs", body.docs.len());

        Ok(body.docs.into_iter().map(CatalogBook::from).collect())
    }
}
