//! famdir — family directory search.
//!
//! Command-line front end over [`famdir_core::SearchEngine`]. This crate wires
//! configuration to a store backend, runs one search, and renders the ranked
//! results. Integration tests drive [`run_search`] directly.
//!
//! # Architecture
//!
//! ```text
//! Config ──► AnyStore ──► SearchEngine ──► render
//! ```

use anyhow::Context;
use famdir_core::config::{BackendKind, Config};
use famdir_core::tokens::derive_search_tokens;
use famdir_core::{FamilyStore, FilterCriteria, RankedMatch, SearchEngine};
use famdir_store::{AnyStore, JsonFileStore};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Where the CLI should read families from, overriding `[store]` in config.
#[derive(Debug, Clone, Default)]
pub struct StoreOverride {
    pub file: Option<PathBuf>,
    pub url: Option<String>,
}

/// Apply CLI overrides to the loaded config and build the store.
pub fn build_store(config: &mut Config, overrides: &StoreOverride) -> anyhow::Result<AnyStore> {
    if let Some(path) = &overrides.file {
        config.store.backend = BackendKind::File;
        config.store.path = path.clone();
    } else if let Some(url) = &overrides.url {
        config.store.backend = BackendKind::Http;
        config.store.base_url = url.clone();
    }
    let store = AnyStore::from_config(&config.store).context("failed to configure the family store")?;
    tracing::debug!(backend = ?store.kind(), "store configured");
    Ok(store)
}

/// Run one search and truncate to `limit` results (0 keeps everything).
pub async fn run_search<S: FamilyStore>(
    engine: &SearchEngine<S>,
    query: &str,
    filters: &FilterCriteria,
    limit: usize,
) -> anyhow::Result<Vec<RankedMatch>> {
    let mut matches = engine
        .search(query, filters)
        .await
        .with_context(|| format!("search for {query:?} failed"))?;
    if limit > 0 {
        matches.truncate(limit);
    }
    Ok(matches)
}

/// Write one line per match: score, match location, and the key fields.
pub fn render_table(out: &mut impl Write, matches: &[RankedMatch]) -> std::io::Result<()> {
    for m in matches {
        writeln!(
            out,
            "{:>4}  {:<13}  {}  |  {}  |  {}  |  {}",
            m.score, m.matched_in, m.record.name, m.record.place, m.record.parish, m.record.phone
        )?;
    }
    Ok(())
}

/// Write the matches as a pretty-printed JSON array.
pub fn render_json(out: &mut impl Write, matches: &[RankedMatch]) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *out, matches)?;
    writeln!(out)?;
    Ok(())
}

/// Print each family in a document file with the tokens it would be indexed
/// under. Handy for checking hand-written fixture files.
pub async fn print_tokens(out: &mut impl Write, path: &Path) -> anyhow::Result<()> {
    let records = JsonFileStore::new(path)
        .load_all()
        .await
        .with_context(|| format!("failed to load {}", path.display()))?;
    for record in &records {
        let tokens = derive_search_tokens(record);
        let tokens: Vec<&str> = tokens.iter().map(String::as_str).collect();
        writeln!(out, "{}\t{}", record.id, tokens.join(" "))?;
    }
    Ok(())
}
