//! Test builders — ergonomic constructors for `FamilyRecord`s, stores and
//! engines.
//!
//! These builders are designed for readability in test assertions, not for
//! production use. They panic on invalid input rather than returning `Result`.

use famdir_core::{FamilyRecord, FamilyStore, FilterCriteria, MemberRecord, MemoryStore, RetrievalError};
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicUsize, Ordering};

// ---------------------------------------------------------------------------
// FamilyBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`FamilyRecord`] test fixtures.
///
/// # Example
///
/// ```rust
/// let family = FamilyBuilder::new("fam-001", "M M Varkey")
///     .place("Cheengeri")
///     .phone("9446860975")
///     .member("Annamma Varkey", "Wife")
///     .tokens(&["varkey"])
///     .build();
/// ```
pub struct FamilyBuilder {
    record: FamilyRecord,
}

impl FamilyBuilder {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            record: FamilyRecord {
                id: id.into(),
                name: name.into(),
                place: "Meenangadi".to_string(),
                post_office: None,
                region: "Wayanad".to_string(),
                parish: "St.Peter's Church".to_string(),
                blood_group: None,
                gender: None,
                date_of_birth: None,
                phone: "0000000000".to_string(),
                email: None,
                occupation: None,
                education: None,
                notes: None,
                members: vec![],
                search_tokens: BTreeSet::new(),
            },
        }
    }

    pub fn place(mut self, place: &str) -> Self {
        self.record.place = place.to_string();
        self
    }

    pub fn region(mut self, region: &str) -> Self {
        self.record.region = region.to_string();
        self
    }

    pub fn parish(mut self, parish: &str) -> Self {
        self.record.parish = parish.to_string();
        self
    }

    pub fn phone(mut self, phone: &str) -> Self {
        self.record.phone = phone.to_string();
        self
    }

    pub fn blood_group(mut self, blood_group: &str) -> Self {
        self.record.blood_group = Some(blood_group.to_string());
        self
    }

    pub fn gender(mut self, gender: &str) -> Self {
        self.record.gender = Some(gender.to_string());
        self
    }

    pub fn member(mut self, name: &str, relation: &str) -> Self {
        self.record.members.push(MemberRecord::new(name, relation));
        self
    }

    pub fn tokens(mut self, tokens: &[&str]) -> Self {
        self.record.search_tokens = tokens.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn build(self) -> FamilyRecord {
        self.record
    }

    /// The record in its store wire format.
    pub fn document(self) -> serde_json::Value {
        to_document(&self.record)
    }
}

/// Serialise a record into the camelCase document shape stores serve.
pub fn to_document(record: &FamilyRecord) -> serde_json::Value {
    serde_json::to_value(record).unwrap()
}

// ---------------------------------------------------------------------------
// Stores
// ---------------------------------------------------------------------------

/// A [`MemoryStore`] holding `records` verbatim, in order.
pub fn memory_store(records: Vec<FamilyRecord>) -> MemoryStore {
    records.into_iter().collect()
}

/// Wraps a store and counts how often it is fetched from.
pub struct CountingStore<S> {
    pub inner: S,
    fetches: AtomicUsize,
}

impl<S> CountingStore<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            fetches: AtomicUsize::new(0),
        }
    }

    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

impl<S: FamilyStore> FamilyStore for CountingStore<S> {
    async fn fetch(&self, filters: &FilterCriteria) -> Result<Vec<FamilyRecord>, RetrievalError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.inner.fetch(filters).await
    }
}

/// A store whose every fetch fails with a backend error.
pub struct FailingStore {
    pub reason: String,
}

impl FailingStore {
    pub fn new(reason: &str) -> Self {
        Self {
            reason: reason.to_string(),
        }
    }
}

impl FamilyStore for FailingStore {
    async fn fetch(&self, _filters: &FilterCriteria) -> Result<Vec<FamilyRecord>, RetrievalError> {
        Err(RetrievalError::Backend(self.reason.clone()))
    }
}

/// A store that ignores filters and returns everything, like a backend that
/// silently drops an unsupported constraint.
pub struct UnfilteredStore(pub Vec<FamilyRecord>);

impl FamilyStore for UnfilteredStore {
    async fn fetch(&self, _filters: &FilterCriteria) -> Result<Vec<FamilyRecord>, RetrievalError> {
        Ok(self.0.clone())
    }
}
