//! Query configuration loaded from TOML.
//!
//! Lookup order: an explicit path, then `<config dir>/doxy-search/config.toml`,
//! then built-in defaults. Every field is optional in the file.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// What an empty query string matches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmptyQueryPolicy {
    /// Every entry, in table order.
    #[default]
    All,
    /// No entries.
    Nothing,
}

/// How query text is compared against labels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchMode {
    #[default]
    Substring,
    Prefix,
}

/// Options a [`SearchIndexTable`](crate::SearchIndexTable) carries for its queries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueryOptions {
    pub empty_query: EmptyQueryPolicy,
    /// Minimum Jaro-Winkler similarity for a "did you mean" suggestion.
    pub suggestion_threshold: f64,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            empty_query: EmptyQueryPolicy::All,
            suggestion_threshold: DEFAULT_SUGGESTION_THRESHOLD,
        }
    }
}

const DEFAULT_SUGGESTION_THRESHOLD: f64 = 0.8;
const DEFAULT_SUGGESTIONS: usize = 5;

/// On-disk configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct SearchConfig {
    pub empty_query: EmptyQueryPolicy,
    pub match_mode: MatchMode,
    /// Maximum number of suggestions shown for a query without results.
    pub suggestions: usize,
    pub suggestion_threshold: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            empty_query: EmptyQueryPolicy::default(),
            match_mode: MatchMode::default(),
            suggestions: DEFAULT_SUGGESTIONS,
            suggestion_threshold: DEFAULT_SUGGESTION_THRESHOLD,
        }
    }
}

impl SearchConfig {
    /// Parse a config from TOML text.
    pub fn from_toml(content: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Read a config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content, path)
    }

    /// Resolve the configuration to use.
    ///
    /// An explicit path must exist. The default location is optional and
    /// falls back to [`SearchConfig::default`] when absent.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            tracing::debug!("Loading config from {}", path.display());
            return Self::from_file(path);
        }

        match default_config_path() {
            Some(path) if path.is_file() => {
                tracing::debug!("Loading config from {}", path.display());
                Self::from_file(&path)
            }
            _ => Ok(Self::default()),
        }
    }

    pub const fn query_options(&self) -> QueryOptions {
        QueryOptions {
            empty_query: self.empty_query,
            suggestion_threshold: self.suggestion_threshold,
        }
    }
}

/// `<config dir>/doxy-search/config.toml`, if the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("doxy-search").join("config.toml"))
}
