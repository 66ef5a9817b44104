//! JSON file backend.
//!
//! The file is re-read on every fetch, so edits show up on the next search
//! without restarting anything. It holds either a bare array of family
//! documents or `{"documents": [...]}`.

use famdir_core::decode::decode_collection;
use famdir_core::{apply_filters, FamilyRecord, FamilyStore, FilterCriteria, RetrievalError};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and decode every document in the file, unfiltered.
    pub async fn load_all(&self) -> Result<Vec<FamilyRecord>, RetrievalError> {
        let payload = tokio::fs::read(&self.path)
            .await
            .map_err(|source| RetrievalError::Io {
                path: self.path.clone(),
                source,
            })?;
        let records = decode_collection(&payload)?;
        tracing::debug!(path = %self.path.display(), records = records.len(), "file store: loaded");
        Ok(records)
    }
}

impl FamilyStore for JsonFileStore {
    async fn fetch(&self, filters: &FilterCriteria) -> Result<Vec<FamilyRecord>, RetrievalError> {
        Ok(apply_filters(self.load_all().await?, filters))
    }
}
