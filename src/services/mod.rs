//! Business logic services

pub mod accounts;
pub mod library;
pub mod openlibrary;
pub mod reviews;

use crate::{config::CatalogConfig, error::AppResult, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub accounts: accounts::AccountsService,
    pub library: library::LibraryService,
    pub reviews: reviews::ReviewsService,
    pub catalog: openlibrary::OpenLibraryClient,
    pub repository: Repository,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, catalog_config: CatalogConfig) -> AppResult<Self> {
        let catalog = openlibrary::OpenLibraryClient::new(catalog_config)?;

        Ok(Self {
            accounts: accounts::AccountsService::new(repository.clone()),
            library: library::LibraryService::new(repository.clone(), catalog.clone()),
            reviews: reviews::ReviewsService::new(repository.clone()),
            catalog,
            repository,
        })
    }
}
