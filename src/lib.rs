//! Bookshelf - Personal Library Bookkeeping API
//!
//! A Rust REST JSON API for keeping a personal book library: accounts,
//! reading statuses, favorites, and reviews, with book metadata resolved
//! through the OpenLibrary catalog.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
