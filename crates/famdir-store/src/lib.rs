//! famdir-store — document-store backends for famdir.
//!
//! Each backend implements [`famdir_core::FamilyStore`]: it fetches raw family
//! documents, decodes them with [`famdir_core::decode`], and returns the
//! records matching the caller's filters.

pub mod file;
pub mod http;

pub use file::JsonFileStore;
pub use http::HttpStore;

use famdir_core::config::{BackendKind, StoreConfig};
use famdir_core::{FamilyRecord, FamilyStore, FilterCriteria, RetrievalError};
use std::time::Duration;

/// A backend chosen at runtime from configuration.
#[derive(Debug, Clone)]
pub enum AnyStore {
    File(JsonFileStore),
    Http(HttpStore),
}

impl AnyStore {
    /// Build the backend named by `config.backend`.
    pub fn from_config(config: &StoreConfig) -> Result<Self, RetrievalError> {
        match config.backend {
            BackendKind::File => Ok(AnyStore::File(JsonFileStore::new(&config.path))),
            BackendKind::Http => HttpStore::new(
                &config.base_url,
                &config.collection,
                Duration::from_millis(config.timeout_ms),
            )
            .map(AnyStore::Http),
        }
    }

    pub fn kind(&self) -> BackendKind {
        match self {
            AnyStore::File(_) => BackendKind::File,
            AnyStore::Http(_) => BackendKind::Http,
        }
    }
}

impl FamilyStore for AnyStore {
    async fn fetch(&self, filters: &FilterCriteria) -> Result<Vec<FamilyRecord>, RetrievalError> {
        match self {
            AnyStore::File(store) => store.fetch(filters).await,
            AnyStore::Http(store) => store.fetch(filters).await,
        }
    }
}
