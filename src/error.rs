//! Error handling types and utilities.

use std::path::PathBuf;
use thiserror::Error;

/// A specialized Result type for doxy-search binary operations.
///
/// This is an alias for `anyhow::Result` with context added via `.context()` and
/// `.with_context()` in the command-line front end.
pub type Result<T> = anyhow::Result<T>;

/// A search index that could not be loaded.
///
/// Loading is all-or-nothing: any of these aborts the load and no partial
/// table is produced. `record` is the zero-based position of the offending
/// record in the serialized array.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedIndexError {
    /// The input is not a valid search data literal.
    #[error("syntax error at byte {offset}: expected {expected}")]
    Syntax { offset: usize, expected: String },

    /// The top-level value is not an array of records.
    #[error("search data must be an array of records")]
    NotAnArray,

    /// A record is not shaped like `[key, [label, target...]]`.
    #[error("record {record} is not a [key, [label, targets...]] pair")]
    MalformedRecord { record: usize },

    /// A record has no label, or an empty one.
    #[error("record {record} has no label")]
    MissingLabel { record: usize },

    /// A record has a label but no destinations.
    #[error("record {record} ('{label}') has no targets")]
    EmptyTargets { record: usize, label: String },

    /// A target is not shaped like `[link, flag?, description?]`.
    #[error("record {record} has a malformed target at position {target}")]
    MalformedTarget { record: usize, target: usize },
}

/// Error returned when reading a search index from disk fails.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file or directory could not be read.
    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file was read but its contents are not a valid index.
    #[error("malformed search index in {}", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: MalformedIndexError,
    },
}

/// Error returned when a configuration file cannot be used.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
