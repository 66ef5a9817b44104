//! famdir-core — family directory core library.
//!
//! This crate holds the data model, document decoding, the store boundary
//! and the search engine that ranks households against a free-text query.
//!
//! # Architecture
//!
//! ```text
//! FamilyStore ──► SearchEngine ──► caller
//!     │               │
//!     └─ decode       └─ filter ─► score ─► classify ─► sort
//! ```
//!
//! The engine is stateless per call; the only shared resource is the store,
//! which it reads and never writes.

pub mod config;
pub mod decode;
pub mod error;
pub mod search;
pub mod store;
pub mod tokens;
pub mod types;

pub use error::{DecodeError, RetrievalError};
pub use search::{apply_filters, SearchEngine};
pub use store::{FamilyStore, MemoryStore};
pub use types::{FamilyRecord, FilterCriteria, MatchLocation, MemberRecord, RankedMatch};
