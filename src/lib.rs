pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod format;
pub mod search;
pub mod tracing;
pub mod types;

pub use config::{EmptyQueryPolicy, MatchMode, QueryOptions, SearchConfig};
pub use error::{ConfigError, LoadError, MalformedIndexError};
pub use search::{IndexSection, Query, SearchIndexSet, SearchIndexTable, Suggestion};
pub use types::{IndexEntry, Target};
