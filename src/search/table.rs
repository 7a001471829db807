//! The in-memory search index table and its queries.

use super::parse::parse_entries;
use crate::config::{EmptyQueryPolicy, MatchMode, QueryOptions};
use crate::error::MalformedIndexError;
use crate::types::IndexEntry;
use ahash::AHashMap;
use rapidfuzz::distance::jaro_winkler;
use std::iter::FusedIterator;

/// An immutable, ordered table of search index entries.
///
/// Built once from generated search data and then only read. Queries borrow
/// the table, so one table can serve any number of concurrent readers.
#[derive(Debug, Clone)]
pub struct SearchIndexTable {
    entries: Vec<IndexEntry>,
    /// Lowercased labels, parallel to `entries`.
    folded: Vec<String>,
    /// Lowercased label to entry positions, in table order.
    exact: AHashMap<String, Vec<usize>>,
    options: QueryOptions,
}

/// A "did you mean" candidate for a query without results.
#[derive(Debug, Clone, PartialEq)]
pub struct Suggestion<'t> {
    pub label: &'t str,
    pub score: f64,
}

impl SearchIndexTable {
    /// Parses serialized search data with default query options.
    pub fn load(raw: &str) -> Result<Self, MalformedIndexError> {
        Self::load_with(raw, QueryOptions::default())
    }

    /// Parses serialized search data.
    ///
    /// Fails on the first malformed record; no partial table is returned.
    pub fn load_with(raw: &str, options: QueryOptions) -> Result<Self, MalformedIndexError> {
        let start = std::time::Instant::now();
        let entries = parse_entries(raw)?;
        let table = Self::from_entries(entries, options)?;
        tracing::debug!(
            "Loaded search index table: {} entries, {} targets in {:?}",
            table.len(),
            table.target_count(),
            start.elapsed()
        );
        Ok(table)
    }

    /// Builds a table from entries, enforcing that every entry has a label
    /// and at least one target.
    pub fn from_entries(
        entries: Vec<IndexEntry>,
        options: QueryOptions,
    ) -> Result<Self, MalformedIndexError> {
        let mut folded = Vec::with_capacity(entries.len());
        let mut exact: AHashMap<String, Vec<usize>> = AHashMap::with_capacity(entries.len());

        for (record, entry) in entries.iter().enumerate() {
            if entry.label.is_empty() {
                return Err(MalformedIndexError::MissingLabel { record });
            }
            if entry.targets.is_empty() {
                return Err(MalformedIndexError::EmptyTargets {
                    record,
                    label: entry.label.clone(),
                });
            }

            let lower = fold_case(&entry.label);
            exact.entry(lower.clone()).or_default().push(record);
            folded.push(lower);
        }

        Ok(Self {
            entries,
            folded,
            exact,
            options,
        })
    }

    /// Returns a copy of the table that answers queries with `options`.
    #[must_use]
    pub fn with_options(mut self, options: QueryOptions) -> Self {
        self.options = options;
        self
    }

    pub const fn options(&self) -> &QueryOptions {
        &self.options
    }

    /// Entries whose label contains `text`, ignoring case, in table order.
    pub fn query(&self, text: &str) -> Query<'_> {
        self.search(text, MatchMode::Substring)
    }

    /// Entries whose label starts with `text`, ignoring case, in table order.
    pub fn query_prefix(&self, text: &str) -> Query<'_> {
        self.search(text, MatchMode::Prefix)
    }

    /// Query with an explicit match mode.
    pub fn search(&self, text: &str, mode: MatchMode) -> Query<'_> {
        Query {
            table: self,
            needle: fold_case(text),
            mode,
        }
    }

    /// Entries whose label equals `label`, ignoring case.
    pub fn find_exact(&self, label: &str) -> impl Iterator<Item = &IndexEntry> + '_ {
        self.exact
            .get(&fold_case(label))
            .into_iter()
            .flatten()
            .map(|&i| &self.entries[i])
    }

    /// Labels similar to `text`, best first.
    ///
    /// Each distinct label (ignoring case) appears once. Candidates scoring
    /// below the configured threshold are dropped; ties keep table order.
    pub fn suggest(&self, text: &str, limit: usize) -> Vec<Suggestion<'_>> {
        let needle = fold_case(text);
        let mut scored: Vec<(usize, f64)> = self
            .exact
            .iter()
            .map(|(folded, positions)| {
                let score = jaro_winkler::similarity(needle.chars(), folded.chars());
                (positions[0], score)
            })
            .filter(|&(_, score)| score >= self.options.suggestion_threshold)
            .collect();

        scored.sort_by(|(ia, a), (ib, b)| b.total_cmp(a).then(ia.cmp(ib)));

        scored
            .into_iter()
            .take(limit)
            .map(|(i, score)| Suggestion {
                label: &self.entries[i].label,
                score,
            })
            .collect()
    }

    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&IndexEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of targets across all entries.
    pub fn target_count(&self) -> usize {
        self.entries.iter().map(|e| e.targets.len()).sum()
    }
}

/// Lowercases each character on its own, so a label and any substring of it
/// fold the same way (no final-sigma rule).
pub(crate) fn fold_case(text: &str) -> String {
    text.chars().flat_map(char::to_lowercase).collect()
}

/// A pending query against a [`SearchIndexTable`].
///
/// Nothing is scanned until the query is iterated, and it can be iterated
/// any number of times with the same result.
#[derive(Debug, Clone)]
pub struct Query<'t> {
    table: &'t SearchIndexTable,
    needle: String,
    mode: MatchMode,
}

impl<'t> Query<'t> {
    /// Starts a fresh pass over the table.
    pub fn iter(&self) -> Matches<'t, '_> {
        Matches {
            query: self,
            pos: 0,
        }
    }

    /// The lowercased query text.
    pub fn text(&self) -> &str {
        &self.needle
    }

    pub const fn mode(&self) -> MatchMode {
        self.mode
    }

    /// Collects the matches of one pass.
    pub fn to_vec(&self) -> Vec<&'t IndexEntry> {
        self.iter().collect()
    }

    fn is_match(&self, index: usize) -> bool {
        if self.needle.is_empty() {
            return self.table.options.empty_query == EmptyQueryPolicy::All;
        }
        let label = &self.table.folded[index];
        match self.mode {
            MatchMode::Substring => label.contains(self.needle.as_str()),
            MatchMode::Prefix => label.starts_with(self.needle.as_str()),
        }
    }
}

impl<'t, 'q> IntoIterator for &'q Query<'t> {
    type Item = &'t IndexEntry;
    type IntoIter = Matches<'t, 'q>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// One pass over the matches of a [`Query`].
#[derive(Debug, Clone)]
pub struct Matches<'t, 'q> {
    query: &'q Query<'t>,
    pos: usize,
}

impl<'t> Iterator for Matches<'t, '_> {
    type Item = &'t IndexEntry;

    fn next(&mut self) -> Option<Self::Item> {
        let entries = &self.query.table.entries;
        while self.pos < entries.len() {
            let index = self.pos;
            self.pos += 1;
            if self.query.is_match(index) {
                return Some(&entries[index]);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.query.table.entries.len() - self.pos))
    }
}

impl FusedIterator for Matches<'_, '_> {}
