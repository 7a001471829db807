//! Shared test fixtures and utilities for integration tests.
//!
//! Fixture data under `tests/fixtures/search/` is a trimmed copy of a real
//! generated search directory: `all_5.js` holds the first records of the
//! "all" index for the letter `f`, `functions_f.js` the first records of the
//! "functions" index for the letter `s`.

// Not every integration test crate uses every helper.
#![allow(dead_code)]

use doxy_search::{QueryOptions, SearchIndexTable};
use rstest::fixture;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Returns the project root directory (where Cargo.toml lives).
pub fn project_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

pub fn fixture_dir() -> PathBuf {
    project_root().join("tests/fixtures/search")
}

/// Reads a fixture shard as a string.
pub fn read_fixture(name: &str) -> String {
    std::fs::read_to_string(fixture_dir().join(name))
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", name, e))
}

/// The `all_5.js` fixture loaded with default options.
#[fixture]
pub fn all_table() -> SearchIndexTable {
    SearchIndexTable::load(&read_fixture("all_5.js")).expect("all_5.js fixture should load")
}

/// The `functions_f.js` fixture loaded with default options.
#[fixture]
pub fn functions_table() -> SearchIndexTable {
    SearchIndexTable::load_with(&read_fixture("functions_f.js"), QueryOptions::default())
        .expect("functions_f.js fixture should load")
}

/// A temporary directory laid out like a generated `search/` directory.
///
/// Holds both fixture shards plus the non-shard files the generator writes
/// next to them.
pub struct SearchDir {
    _temp: TempDir,
    root: PathBuf,
}

impl SearchDir {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let root = temp.path().to_path_buf();
        Self { _temp: temp, root }
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Writes `content` to `name` inside the directory.
    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.root.join(name);
        std::fs::write(&path, content)
            .unwrap_or_else(|e| panic!("Failed to write {}: {}", path.display(), e));
        path
    }
}

#[fixture]
pub fn search_dir() -> SearchDir {
    let dir = SearchDir::new();
    dir.write("all_5.js", &read_fixture("all_5.js"));
    dir.write("functions_f.js", &read_fixture("functions_f.js"));
    dir.write("search.js", "function SearchBox(name) {}\n");
    dir.write("searchdata.js", "var indexSectionsWithContent = {};\n");
    dir.write("nomatches.html", "<html></html>\n");
    std::fs::create_dir(dir.path().join("all_0.js")).expect("Failed to create decoy directory");
    dir
}
