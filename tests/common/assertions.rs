//! Domain-specific assertion macros for famdir harnesses.
//!
//! These wrap `pretty_assertions` and add context-rich failure messages that
//! make it clear *which* ranking invariant was violated.

use famdir_core::RankedMatch;

/// Assert the exact ranked `(id, score)` sequence.
///
/// ```rust
/// assert_ranked!(results, [("fam-004", 35), ("fam-001", 15)]);
/// ```
#[macro_export]
macro_rules! assert_ranked {
    ($results:expr, [$(($id:expr, $score:expr)),* $(,)?]) => {{
        let results: &[famdir_core::RankedMatch] = &$results;
        let actual: Vec<(&str, u32)> = results
            .iter()
            .map(|m| (m.record.id.as_str(), m.score))
            .collect();
        let expected: Vec<(&str, u32)> = vec![$(($id, $score)),*];
        pretty_assertions::assert_eq!(actual, expected, "ranked (id, score) sequence differs");
    }};
}

/// Assert that the match for `id` carries the given location label.
#[macro_export]
macro_rules! assert_matched_in {
    ($results:expr, $id:expr, $location:expr) => {{
        let results: &[famdir_core::RankedMatch] = &$results;
        let id: &str = $id;
        match results.iter().find(|m| m.record.id == id) {
            Some(m) => pretty_assertions::assert_eq!(
                m.matched_in, $location,
                "assert_matched_in! failed for {:?}", id
            ),
            None => panic!(
                "assert_matched_in! failed: {:?} not in results {:?}",
                id,
                ids(results)
            ),
        }
    }};
}

/// Record ids in result order.
pub fn ids(results: &[RankedMatch]) -> Vec<&str> {
    results.iter().map(|m| m.record.id.as_str()).collect()
}

/// Panic unless scores never increase along `results`.
pub fn assert_descending(results: &[RankedMatch]) {
    for pair in results.windows(2) {
        if pair[0].score < pair[1].score {
            panic!(
                "results not sorted by descending score: {:?} ({}) before {:?} ({})",
                pair[0].record.id, pair[0].score, pair[1].record.id, pair[1].score
            );
        }
    }
}
