//! Command implementations behind the CLI.
//!
//! Each `execute_*` function takes a loaded [`SearchIndexSet`] and returns the
//! text to print, so the binary only parses arguments and writes stdout.

use crate::config::{MatchMode, QueryOptions};
use crate::error::{LoadError, Result};
use crate::format::{render_entries, render_no_results};
use crate::search::{IndexSection, SearchIndexSet};
use std::fmt::Write as _;
use std::path::Path;

/// Loads a generated `search/` directory, or a single shard file.
pub fn load_index(
    path: &Path,
    options: QueryOptions,
) -> std::result::Result<SearchIndexSet, LoadError> {
    if path.is_dir() {
        SearchIndexSet::load_dir(path, options)
    } else {
        SearchIndexSet::load_file(path, options)
    }
}

/// The section a query on `path` is restricted to.
///
/// A directory is filtered by the requested section. A single file already
/// belongs to one section, taken from its name, so `None` (search all loaded
/// sections) is returned and the requested one is ignored.
pub fn section_filter(path: &Path, requested: &str) -> Option<IndexSection> {
    path.is_dir().then(|| IndexSection::from_name(requested))
}

/// Parameters for [`execute_query`].
#[derive(Debug, Clone)]
pub struct QueryRequest {
    pub text: String,
    /// `None` searches every loaded section.
    pub section: Option<IndexSection>,
    pub mode: MatchMode,
    pub limit: Option<usize>,
    pub json: bool,
    /// Maximum suggestions printed when nothing matches.
    pub suggestions: usize,
}

/// Runs a query and renders its results.
///
/// JSON output is always an array, empty when nothing matches. Text output
/// falls back to "did you mean" suggestions when nothing matches.
pub fn execute_query(set: &SearchIndexSet, request: &QueryRequest) -> Result<String> {
    let sections: Vec<IndexSection> = match &request.section {
        Some(section) => vec![section.clone()],
        None => set.sections().cloned().collect(),
    };

    let queries: Vec<_> = sections
        .iter()
        .map(|section| set.search(section, &request.text, request.mode))
        .collect();
    let results: Vec<_> = queries
        .iter()
        .flat_map(|query| query.iter())
        .take(request.limit.unwrap_or(usize::MAX))
        .collect();

    tracing::debug!(
        "Query '{}' ({:?}) over {} section(s): {} result(s)",
        request.text,
        request.mode,
        sections.len(),
        results.len()
    );

    if request.json {
        return Ok(serde_json::to_string_pretty(&results)?);
    }
    if results.is_empty() {
        let suggestions = set.suggest(&sections, &request.text, request.suggestions);
        return Ok(render_no_results(&request.text, &suggestions));
    }
    Ok(render_entries(results))
}

/// One-line validation summary.
pub fn execute_check(set: &SearchIndexSet) -> String {
    format!(
        "OK: {} entries in {} shard(s)",
        set.entry_count(),
        set.shard_count()
    )
}

/// Per-section shard, entry and target counts, one line per section.
pub fn execute_stats(set: &SearchIndexSet) -> String {
    let mut output = String::new();
    for section in set.sections() {
        let shards = set.shards(section);
        let entries: usize = shards.iter().map(|s| s.table.len()).sum();
        let targets: usize = shards.iter().map(|s| s.table.target_count()).sum();
        if !output.is_empty() {
            output.push('\n');
        }
        let _ = write!(
            output,
            "{:<12} {:>4} shards {:>7} entries {:>7} targets",
            section,
            shards.len(),
            entries,
            targets
        );
    }
    output
}
