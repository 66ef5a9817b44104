//! Decoder — turns raw store documents into typed [`FamilyRecord`]s.
//!
//! Required fields must be present with the right JSON type; nothing is
//! silently defaulted. Optional attributes decode to `None` when absent.
//! Unknown keys are ignored because document stores attach their own
//! bookkeeping fields.

use crate::error::DecodeError;
use crate::tokens::derive_search_tokens;
use crate::types::{FamilyRecord, MemberRecord};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeSet;

// ---------------------------------------------------------------------------
// Wire shapes
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FamilyDocument {
    id: String,
    name: String,
    place: String,
    post_office: Option<String>,
    region: String,
    parish: String,
    blood_group: Option<String>,
    gender: Option<String>,
    date_of_birth: Option<String>,
    phone: String,
    email: Option<String>,
    occupation: Option<String>,
    education: Option<String>,
    notes: Option<String>,
    // An absent list is an explicit "no members", not a scalar default.
    #[serde(default)]
    members: Vec<MemberDocument>,
    search_tokens: Option<BTreeSet<String>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MemberDocument {
    name: String,
    relation: String,
    father_name: Option<String>,
    mother_name: Option<String>,
    spouse_name: Option<String>,
    phone: Option<String>,
    email: Option<String>,
    blood_group: Option<String>,
    gender: Option<String>,
    date_of_birth: Option<String>,
    occupation: Option<String>,
    education: Option<String>,
}

impl From<MemberDocument> for MemberRecord {
    fn from(doc: MemberDocument) -> Self {
        MemberRecord {
            name: doc.name,
            relation: doc.relation,
            father_name: doc.father_name,
            mother_name: doc.mother_name,
            spouse_name: doc.spouse_name,
            phone: doc.phone,
            email: doc.email,
            blood_group: doc.blood_group,
            gender: doc.gender,
            date_of_birth: doc.date_of_birth,
            occupation: doc.occupation,
            education: doc.education,
        }
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Decode one family document.
///
/// When the document carries no `searchTokens`, the token set is derived
/// from the decoded fields with [`derive_search_tokens`].
pub fn decode_family(document: Value) -> Result<FamilyRecord, DecodeError> {
    let id = document
        .get("id")
        .and_then(Value::as_str)
        .map(str::to_string);

    let doc: FamilyDocument = serde_json::from_value(document)
        .map_err(|source| DecodeError::Malformed { id: id.clone(), source })?;

    if doc.id.trim().is_empty() {
        return Err(DecodeError::BlankField { id: None, field: "id" });
    }
    if doc.name.trim().is_empty() {
        return Err(DecodeError::BlankField { id, field: "name" });
    }

    let mut record = FamilyRecord {
        id: doc.id,
        name: doc.name,
        place: doc.place,
        post_office: doc.post_office,
        region: doc.region,
        parish: doc.parish,
        blood_group: doc.blood_group,
        gender: doc.gender,
        date_of_birth: doc.date_of_birth,
        phone: doc.phone,
        email: doc.email,
        occupation: doc.occupation,
        education: doc.education,
        notes: doc.notes,
        members: doc.members.into_iter().map(MemberRecord::from).collect(),
        search_tokens: BTreeSet::new(),
    };

    record.search_tokens = match doc.search_tokens {
        Some(tokens) => tokens,
        None => {
            tracing::debug!(id = %record.id, "decode: deriving missing search tokens");
            derive_search_tokens(&record)
        }
    };

    Ok(record)
}

/// Decode a batch of documents in order, failing on the first bad one.
pub fn decode_families(documents: Vec<Value>) -> Result<Vec<FamilyRecord>, DecodeError> {
    documents.into_iter().map(decode_family).collect()
}

/// A collection payload: either a bare array of documents or an object with a
/// `documents` array.
#[derive(Deserialize)]
#[serde(untagged)]
enum Collection {
    Bare(Vec<Value>),
    Wrapped { documents: Vec<Value> },
}

/// Decode a raw collection payload as served by a file or HTTP store.
pub fn decode_collection(payload: &[u8]) -> Result<Vec<FamilyRecord>, DecodeError> {
    let documents = match serde_json::from_slice::<Collection>(payload)
        .map_err(|source| DecodeError::Malformed { id: None, source })?
    {
        Collection::Bare(documents) | Collection::Wrapped { documents } => documents,
    };
    decode_families(documents)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
