//! Search layer — filter, score and rank family records for a query.
//!
//! Scoring is additive and per term, with no cap:
//!
//! | Channel                                   | Points |
//! |-------------------------------------------|--------|
//! | token set contains the term exactly       | 10     |
//! | head-of-household name contains the term  | 20     |
//! | phone contains the term (case-sensitive)  | 15     |
//! | place contains the term                   | 10     |
//!
//! With a non-blank query, records scoring zero are dropped. A filter-only
//! search (blank query, at least one filter) keeps every filter-matching
//! record at score zero.

use crate::error::RetrievalError;
use crate::store::FamilyStore;
use crate::types::{FamilyRecord, FilterCriteria, MatchLocation, RankedMatch};

pub const TOKEN_POINTS: u32 = 10;
pub const NAME_POINTS: u32 = 20;
pub const PHONE_POINTS: u32 = 15;
pub const PLACE_POINTS: u32 = 10;

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Ranks family records fetched from an injected [`FamilyStore`].
///
/// The engine keeps no state between calls. Concurrent searches are
/// independent; discarding stale results is the caller's job.
#[derive(Debug, Clone)]
pub struct SearchEngine<S> {
    store: S,
}

impl<S: FamilyStore> SearchEngine<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Run one search: fetch candidates matching `filters`, score them against
    /// the terms of `query`, and return them by descending score.
    ///
    /// A blank query with no filters returns nothing without touching the
    /// store. Ties keep the order the store returned them in.
    pub async fn search(
        &self,
        query: &str,
        filters: &FilterCriteria,
    ) -> Result<Vec<RankedMatch>, RetrievalError> {
        if query.trim().is_empty() && filters.is_empty() {
            tracing::debug!("search: blank query without filters, skipping fetch");
            return Ok(Vec::new());
        }

        let terms = tokenize(query);
        let fetched = self.store.fetch(filters).await?;
        let fetched_len = fetched.len();
        let candidates = apply_filters(fetched, filters);
        if candidates.len() != fetched_len {
            tracing::warn!(
                fetched = fetched_len,
                kept = candidates.len(),
                "search: store returned records outside the filters"
            );
        }
        tracing::debug!(
            terms = terms.len(),
            candidates = candidates.len(),
            "search: candidates fetched"
        );

        let mut results = rank(candidates, &terms);
        // `sort_by` is stable, so equal scores keep store order.
        results.sort_by(|a, b| b.score.cmp(&a.score));

        tracing::debug!(matches = results.len(), "search: ranked");
        Ok(results)
    }
}

fn rank(candidates: Vec<FamilyRecord>, terms: &[String]) -> Vec<RankedMatch> {
    candidates
        .into_iter()
        .filter_map(|record| {
            let score = match_score(&record, terms);
            if !terms.is_empty() && score == 0 {
                return None;
            }
            let matched_in = classify_match(&record, terms);
            Some(RankedMatch { record, score, matched_in })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Pure helpers
// ---------------------------------------------------------------------------

/// Lowercase `query` and split it on whitespace, dropping empty pieces.
pub fn tokenize(query: &str) -> Vec<String> {
    query
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Keep only the candidates that satisfy every set field of `filters`.
pub fn apply_filters(candidates: Vec<FamilyRecord>, filters: &FilterCriteria) -> Vec<FamilyRecord> {
    if filters.is_empty() {
        return candidates;
    }
    candidates
        .into_iter()
        .filter(|record| filters.matches(record))
        .collect()
}

/// Sum the per-term points for `record`. `terms` must already be lowercase.
pub fn match_score(record: &FamilyRecord, terms: &[String]) -> u32 {
    let name = record.name.to_lowercase();
    let place = record.place.to_lowercase();

    terms
        .iter()
        .map(|term| {
            let mut points = 0;
            if record.search_tokens.contains(term) {
                points += TOKEN_POINTS;
            }
            if name.contains(term.as_str()) {
                points += NAME_POINTS;
            }
            if record.phone.contains(term.as_str()) {
                points += PHONE_POINTS;
            }
            if place.contains(term.as_str()) {
                points += PLACE_POINTS;
            }
            points
        })
        .sum()
}

/// Label the field that best explains why `record` matched.
///
/// Terms are scanned in query order; for each term the fields are checked in
/// precedence name, phone, place, parish, members. The first hit wins.
pub fn classify_match(record: &FamilyRecord, terms: &[String]) -> MatchLocation {
    let name = record.name.to_lowercase();
    let place = record.place.to_lowercase();
    let parish = record.parish.to_lowercase();
    let members: Vec<String> = record
        .members
        .iter()
        .map(|m| m.name.to_lowercase())
        .collect();

    for term in terms {
        let term = term.as_str();
        if name.contains(term) {
            return MatchLocation::Name;
        }
        if record.phone.contains(term) {
            return MatchLocation::Phone;
        }
        if place.contains(term) {
            return MatchLocation::Location;
        }
        if parish.contains(term) {
            return MatchLocation::Parish;
        }
        if members.iter().any(|m| m.contains(term)) {
            return MatchLocation::FamilyMember;
        }
    }
    MatchLocation::General
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
