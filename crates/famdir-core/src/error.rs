//! Error types for famdir-core.
//!
//! [`RetrievalError`] is the single failure kind the search engine surfaces:
//! anything that goes wrong while fetching candidates from a store. Its
//! variants record the cause so callers can decide on retry policy.

use std::path::PathBuf;
use thiserror::Error;

/// A document could not be turned into a [`FamilyRecord`](crate::FamilyRecord).
#[derive(Debug, Error)]
pub enum DecodeError {
    /// A required field is missing or a field has the wrong JSON type.
    #[error("malformed family document{}: {source}", describe_id(.id))]
    Malformed {
        id: Option<String>,
        #[source]
        source: serde_json::Error,
    },
    /// A required text field is present but empty.
    #[error("family document{} has a blank `{field}`", describe_id(.id))]
    BlankField {
        id: Option<String>,
        field: &'static str,
    },
}

impl DecodeError {
    /// Document id, when one could be read.
    pub fn id(&self) -> Option<&str> {
        match self {
            DecodeError::Malformed { id, .. } | DecodeError::BlankField { id, .. } => id.as_deref(),
        }
    }
}

fn describe_id(id: &Option<String>) -> String {
    match id {
        Some(id) => format!(" {id:?}"),
        None => String::new(),
    }
}

/// Fetching candidates from a [`FamilyStore`](crate::FamilyStore) failed.
#[derive(Debug, Error)]
pub enum RetrievalError {
    /// The store could not be reached, or the connection broke mid-response.
    #[error("store unreachable: {0}")]
    Transport(String),
    #[error("store did not answer within {after_ms} ms")]
    Timeout { after_ms: u64 },
    /// The store answered with a non-success status.
    #[error("store returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Decode(#[from] DecodeError),
    /// The configured endpoint is not a usable URL.
    #[error("invalid store endpoint: {0}")]
    InvalidEndpoint(String),
    /// Any other backend-specific failure.
    #[error("store error: {0}")]
    Backend(String),
}
