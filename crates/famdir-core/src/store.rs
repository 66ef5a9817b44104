//! Store — the document-store boundary consumed by the search engine.
//!
//! [`FamilyStore`] is the single seam between ranking and retrieval. The
//! in-memory [`MemoryStore`] lives here; file and HTTP backends live in
//! `famdir-store`.

use crate::error::RetrievalError;
use crate::search::apply_filters;
use crate::tokens::derive_search_tokens;
use crate::types::{FamilyRecord, FilterCriteria};
use std::future::Future;
use std::sync::Arc;

/// A query-capable family collection.
///
/// `fetch` returns every record satisfying all set fields of `filters` (exact
/// equality), in the store's natural order. It either returns the complete
/// set or fails; partial results are never returned.
pub trait FamilyStore: Send + Sync {
    fn fetch(
        &self,
        filters: &FilterCriteria,
    ) -> impl Future<Output = Result<Vec<FamilyRecord>, RetrievalError>> + Send;
}

impl<S: FamilyStore> FamilyStore for &S {
    fn fetch(
        &self,
        filters: &FilterCriteria,
    ) -> impl Future<Output = Result<Vec<FamilyRecord>, RetrievalError>> + Send {
        (**self).fetch(filters)
    }
}

impl<S: FamilyStore> FamilyStore for Arc<S> {
    fn fetch(
        &self,
        filters: &FilterCriteria,
    ) -> impl Future<Output = Result<Vec<FamilyRecord>, RetrievalError>> + Send {
        (**self).fetch(filters)
    }
}

// ---------------------------------------------------------------------------
// MemoryStore
// ---------------------------------------------------------------------------

/// Records held in memory, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Vec<FamilyRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record. An empty token set is derived here, at write time,
    /// so every stored record satisfies the token invariant.
    pub fn insert(&mut self, mut record: FamilyRecord) {
        if record.search_tokens.is_empty() {
            record.search_tokens = derive_search_tokens(&record);
        }
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[FamilyRecord] {
        &self.records
    }
}

impl FromIterator<FamilyRecord> for MemoryStore {
    fn from_iter<I: IntoIterator<Item = FamilyRecord>>(iter: I) -> Self {
        let mut store = MemoryStore::new();
        for record in iter {
            store.insert(record);
        }
        store
    }
}

impl FamilyStore for MemoryStore {
    async fn fetch(&self, filters: &FilterCriteria) -> Result<Vec<FamilyRecord>, RetrievalError> {
        Ok(apply_filters(self.records.clone(), filters))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
