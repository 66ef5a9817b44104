//! Search-token derivation.
//!
//! Tokens are computed once when a family is written and stored alongside it.
//! The search engine only ever checks set membership, so everything here is
//! lowercase and deterministic for a given record.

use crate::types::FamilyRecord;
use std::collections::BTreeSet;

/// Characters that separate words inside a field, besides whitespace.
const WORD_SEPARATORS: &[char] = &['.', ',', '\'', '-', '(', ')', '/'];

/// Derive the lowercase token set for `record`.
///
/// Text fields contribute their whole trimmed value plus each word. The phone
/// contributes its trimmed value and, when punctuated, its bare digits.
pub fn derive_search_tokens(record: &FamilyRecord) -> BTreeSet<String> {
    let mut tokens = BTreeSet::new();

    let text_fields = [
        Some(record.name.as_str()),
        Some(record.place.as_str()),
        record.post_office.as_deref(),
        Some(record.region.as_str()),
        Some(record.parish.as_str()),
        record.occupation.as_deref(),
    ];
    for value in text_fields.into_iter().flatten() {
        add_text(&mut tokens, value);
    }
    for member in &record.members {
        add_text(&mut tokens, &member.name);
    }

    let phone = record.phone.trim();
    if !phone.is_empty() {
        tokens.insert(phone.to_string());
        let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
        if !digits.is_empty() && digits != phone {
            tokens.insert(digits);
        }
    }

    tokens
}

fn add_text(tokens: &mut BTreeSet<String>, value: &str) {
    let whole = value.trim().to_lowercase();
    if whole.is_empty() {
        return;
    }
    tokens.extend(
        whole
            .split(|c: char| c.is_whitespace() || WORD_SEPARATORS.contains(&c))
            .filter(|word| !word.is_empty())
            .map(str::to_string),
    );
    tokens.insert(whole);
}
