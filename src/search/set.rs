//! Loading a whole generated `search/` directory.
//!
//! The generator splits its index into one file per section and leading
//! character, named `<section>_<hex>.js` (`all_5.js`, `functions_f.js`).
//! Each file becomes a shard holding its own [`SearchIndexTable`].

use super::table::{Query, SearchIndexTable, Suggestion, fold_case};
use crate::config::{MatchMode, QueryOptions};
use crate::error::LoadError;
use crate::types::IndexEntry;
use ahash::AHashSet;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// Which index a shard belongs to.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IndexSection {
    All,
    Classes,
    Namespaces,
    Files,
    Functions,
    Variables,
    Typedefs,
    Enums,
    Enumvalues,
    Related,
    Defines,
    Groups,
    Pages,
    Concepts,
    Other(String),
}

impl IndexSection {
    pub fn from_name(name: &str) -> Self {
        match name {
            "all" => Self::All,
            "classes" => Self::Classes,
            "namespaces" => Self::Namespaces,
            "files" => Self::Files,
            "functions" => Self::Functions,
            "variables" => Self::Variables,
            "typedefs" => Self::Typedefs,
            "enums" => Self::Enums,
            "enumvalues" => Self::Enumvalues,
            "related" => Self::Related,
            "defines" => Self::Defines,
            "groups" => Self::Groups,
            "pages" => Self::Pages,
            "concepts" => Self::Concepts,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::All => "all",
            Self::Classes => "classes",
            Self::Namespaces => "namespaces",
            Self::Files => "files",
            Self::Functions => "functions",
            Self::Variables => "variables",
            Self::Typedefs => "typedefs",
            Self::Enums => "enums",
            Self::Enumvalues => "enumvalues",
            Self::Related => "related",
            Self::Defines => "defines",
            Self::Groups => "groups",
            Self::Pages => "pages",
            Self::Concepts => "concepts",
            Self::Other(name) => name,
        }
    }
}

impl fmt::Display for IndexSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// One loaded shard file.
#[derive(Debug, Clone)]
pub struct Shard {
    /// Hex suffix of the file name.
    pub number: u32,
    pub path: PathBuf,
    pub table: SearchIndexTable,
}

/// Splits `functions_f.js` into its section and shard number.
pub fn parse_shard_name(file_name: &str) -> Option<(IndexSection, u32)> {
    let stem = file_name.strip_suffix(".js")?;
    let (section, number) = stem.rsplit_once('_')?;
    if section.is_empty() || !section.bytes().all(|b| b.is_ascii_lowercase()) {
        return None;
    }
    let number = u32::from_str_radix(number, 16).ok()?;
    Some((IndexSection::from_name(section), number))
}

/// Every shard of a generated search directory, grouped by section.
#[derive(Debug, Clone, Default)]
pub struct SearchIndexSet {
    sections: BTreeMap<IndexSection, Vec<Shard>>,
}

impl SearchIndexSet {
    /// Loads all shard files in `dir`.
    ///
    /// Files that are not shards are skipped. Any unreadable or malformed
    /// shard fails the whole load.
    pub fn load_dir(dir: &Path, options: QueryOptions) -> Result<Self, LoadError> {
        let start = std::time::Instant::now();
        let io_err = |source| LoadError::Io {
            path: dir.to_path_buf(),
            source,
        };

        let mut found = Vec::new();
        for dir_entry in std::fs::read_dir(dir).map_err(io_err)? {
            let path = dir_entry.map_err(io_err)?.path();
            let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            match parse_shard_name(file_name) {
                Some((section, number)) if path.is_file() => found.push((section, number, path)),
                _ => tracing::debug!("Skipping non-shard file {}", path.display()),
            }
        }
        found.sort_by(|(sa, na, _), (sb, nb, _)| sa.cmp(sb).then(na.cmp(nb)));

        let mut set = Self::default();
        for (section, number, path) in found {
            let table = load_table(&path, options)?;
            set.insert(section, Shard {
                number,
                path,
                table,
            });
        }

        tracing::info!(
            "Loaded search index from {}: {} sections, {} shards, {} entries in {:?}",
            dir.display(),
            set.sections.len(),
            set.shard_count(),
            set.entry_count(),
            start.elapsed()
        );
        Ok(set)
    }

    /// Loads a single shard file. Its section and number come from the file
    /// name; a name that doesn't follow the shard pattern lands in `all`.
    pub fn load_file(path: &Path, options: QueryOptions) -> Result<Self, LoadError> {
        let (section, number) = path
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(parse_shard_name)
            .unwrap_or((IndexSection::All, 0));

        let table = load_table(path, options)?;
        let mut set = Self::default();
        set.insert(section, Shard {
            number,
            path: path.to_path_buf(),
            table,
        });
        Ok(set)
    }

    fn insert(&mut self, section: IndexSection, shard: Shard) {
        let shards = self.sections.entry(section).or_default();
        let at = shards.partition_point(|s| s.number <= shard.number);
        shards.insert(at, shard);
    }

    pub fn sections(&self) -> impl Iterator<Item = &IndexSection> {
        self.sections.keys()
    }

    /// Shards of `section`, ordered by shard number.
    pub fn shards(&self, section: &IndexSection) -> &[Shard] {
        self.sections
            .get(section)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn shard_count(&self) -> usize {
        self.sections.values().map(Vec::len).sum()
    }

    pub fn entry_count(&self) -> usize {
        self.sections
            .values()
            .flatten()
            .map(|shard| shard.table.len())
            .sum()
    }

    /// Substring query over every shard of `section`.
    pub fn query(&self, section: &IndexSection, text: &str) -> SetQuery<'_> {
        self.search(section, text, MatchMode::Substring)
    }

    /// Prefix query over every shard of `section`.
    pub fn query_prefix(&self, section: &IndexSection, text: &str) -> SetQuery<'_> {
        self.search(section, text, MatchMode::Prefix)
    }

    /// "Did you mean" labels across every shard of `sections`, best first.
    ///
    /// Each label appears once (ignoring case); equal scores keep shard order.
    pub fn suggest(
        &self,
        sections: &[IndexSection],
        text: &str,
        limit: usize,
    ) -> Vec<Suggestion<'_>> {
        let mut suggestions: Vec<_> = sections
            .iter()
            .flat_map(|section| self.shards(section))
            .flat_map(|shard| shard.table.suggest(text, limit))
            .collect();

        suggestions.sort_by(|a, b| b.score.total_cmp(&a.score));
        let mut seen = AHashSet::new();
        suggestions.retain(|s| seen.insert(fold_case(s.label)));
        suggestions.truncate(limit);
        suggestions
    }

    pub fn search(&self, section: &IndexSection, text: &str, mode: MatchMode) -> SetQuery<'_> {
        SetQuery {
            queries: self
                .shards(section)
                .iter()
                .map(|shard| shard.table.search(text, mode))
                .collect(),
        }
    }
}

fn load_table(path: &Path, options: QueryOptions) -> Result<SearchIndexTable, LoadError> {
    let raw = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    SearchIndexTable::load_with(&raw, options).map_err(|source| LoadError::Malformed {
        path: path.to_path_buf(),
        source,
    })
}

/// A query spanning the shards of one section, in shard order.
#[derive(Debug, Clone)]
pub struct SetQuery<'s> {
    queries: Vec<Query<'s>>,
}

impl<'s> SetQuery<'s> {
    pub fn iter(&self) -> impl Iterator<Item = &'s IndexEntry> + '_ {
        self.queries.iter().flat_map(|query| query.iter())
    }

    pub fn to_vec(&self) -> Vec<&'s IndexEntry> {
        self.iter().collect()
    }

    /// The per-shard queries, for callers that need shard-level detail.
    pub fn shards(&self) -> &[Query<'s>] {
        &self.queries
    }
}
