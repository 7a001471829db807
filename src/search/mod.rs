//! Search index loading and lookup.
//!
//! This module reads generated search data into immutable tables and answers
//! case-insensitive substring and prefix queries against them.

// Module declarations
pub(crate) mod entities;
pub(crate) mod parse;
pub(crate) mod set;
pub(crate) mod table;

// Public re-exports (used via lib.rs)
pub use set::{IndexSection, SearchIndexSet, SetQuery, Shard, parse_shard_name};
pub use table::{Matches, Query, SearchIndexTable, Suggestion};
