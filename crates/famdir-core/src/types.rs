//! Core types for famdir-core.
//!
//! This module defines the data shared between the store backends and the
//! search engine: the decoded [`FamilyRecord`] with its [`MemberRecord`]s, the
//! caller-supplied [`FilterCriteria`], and the [`RankedMatch`] results.

use serde::Serialize;
use std::collections::BTreeSet;

/// One household's directory entry, as decoded from the document store.
///
/// Records are owned by the store and loaded read-only per query. The
/// `search_tokens` set is derived at write time and is already lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyRecord {
    /// Opaque document id.
    pub id: String,
    /// Head-of-household name.
    pub name: String,
    /// Residential place.
    pub place: String,
    pub post_office: Option<String>,
    pub region: String,
    pub parish: String,
    pub blood_group: Option<String>,
    pub gender: Option<String>,
    pub date_of_birth: Option<String>,
    /// Phone number as text; matched literally, digits included.
    pub phone: String,
    pub email: Option<String>,
    pub occupation: Option<String>,
    pub education: Option<String>,
    /// Free-text notes.
    pub notes: Option<String>,
    pub members: Vec<MemberRecord>,
    /// Precomputed lowercase indexing terms.
    pub search_tokens: BTreeSet<String>,
}

/// One individual belonging to a [`FamilyRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberRecord {
    pub name: String,
    /// Relation to the head of household ("Wife", "Son", …).
    pub relation: String,
    pub father_name: Option<String>,
    pub mother_name: Option<String>,
    pub spouse_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub blood_group: Option<String>,
    pub gender: Option<String>,
    pub date_of_birth: Option<String>,
    pub occupation: Option<String>,
    pub education: Option<String>,
}

impl MemberRecord {
    /// A member with only the required fields set.
    pub fn new(name: impl Into<String>, relation: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            relation: relation.into(),
            father_name: None,
            mother_name: None,
            spouse_name: None,
            phone: None,
            email: None,
            blood_group: None,
            gender: None,
            date_of_birth: None,
            occupation: None,
            education: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Filters
// ---------------------------------------------------------------------------

/// Optional exact-match constraints applied before scoring.
///
/// An unset field imposes no restriction. A blank value counts as unset, so a
/// cleared dropdown in a caller's form does not narrow the result set to
/// records with an empty parish.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    pub parish: Option<String>,
    pub region: Option<String>,
    pub blood_group: Option<String>,
    pub gender: Option<String>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parish(mut self, parish: impl Into<String>) -> Self {
        self.parish = Some(parish.into());
        self
    }

    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn blood_group(mut self, blood_group: impl Into<String>) -> Self {
        self.blood_group = Some(blood_group.into());
        self
    }

    pub fn gender(mut self, gender: impl Into<String>) -> Self {
        self.gender = Some(gender.into());
        self
    }

    /// Set constraints as `(wire field name, value)` pairs, in a fixed order.
    pub fn active(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("parish", constraint(&self.parish)),
            ("region", constraint(&self.region)),
            ("bloodGroup", constraint(&self.blood_group)),
            ("gender", constraint(&self.gender)),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.map(|v| (key, v)))
    }

    /// True when no field constrains the result set.
    pub fn is_empty(&self) -> bool {
        self.active().next().is_none()
    }

    /// AND of exact, case-sensitive equality over every set field.
    ///
    /// A record whose optional attribute is `None` never satisfies a set
    /// constraint on that attribute.
    pub fn matches(&self, record: &FamilyRecord) -> bool {
        satisfies(&self.parish, Some(record.parish.as_str()))
            && satisfies(&self.region, Some(record.region.as_str()))
            && satisfies(&self.blood_group, record.blood_group.as_deref())
            && satisfies(&self.gender, record.gender.as_deref())
    }
}

fn constraint(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

fn satisfies(wanted: &Option<String>, actual: Option<&str>) -> bool {
    match constraint(wanted) {
        Some(wanted) => actual == Some(wanted),
        None => true,
    }
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// Which field produced the strongest match for a result.
///
/// This is a presentation hint; it does not influence ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MatchLocation {
    #[serde(rename = "Name")]
    Name,
    #[serde(rename = "Phone")]
    Phone,
    #[serde(rename = "Location")]
    Location,
    #[serde(rename = "Parish")]
    Parish,
    #[serde(rename = "Family Member")]
    FamilyMember,
    #[serde(rename = "General Match")]
    General,
}

impl MatchLocation {
    pub fn label(self) -> &'static str {
        match self {
            MatchLocation::Name => "Name",
            MatchLocation::Phone => "Phone",
            MatchLocation::Location => "Location",
            MatchLocation::Parish => "Parish",
            MatchLocation::FamilyMember => "Family Member",
            MatchLocation::General => "General Match",
        }
    }
}

impl std::fmt::Display for MatchLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A [`FamilyRecord`] annotated with its relevance score for one query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedMatch {
    pub record: FamilyRecord,
    pub score: u32,
    pub matched_in: MatchLocation,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
