//! Plain-text rendering of entries for the command line.

use crate::search::Suggestion;
use crate::types::{IndexEntry, Target};
use std::fmt::Write as _;

/// Render one entry.
///
/// A single-target entry fits on one line; otherwise the label is followed
/// by one indented line per target.
pub fn render_entry(entry: &IndexEntry) -> String {
    let mut output = String::new();

    if let [target] = entry.targets.as_slice() {
        let _ = write!(output, "{}  {}", entry.label, render_target(target));
        return output;
    }

    output.push_str(&entry.label);
    for target in &entry.targets {
        let _ = write!(output, "\n    {}", render_target(target));
    }
    output
}

fn render_target(target: &Target) -> String {
    let mut line = target.href();
    if let Some(description) = &target.description {
        let _ = write!(line, "  ({})", description);
    }
    if target.external {
        line.push_str("  [external]");
    }
    line
}

/// Render a list of entries, one block per entry.
pub fn render_entries<'a>(entries: impl IntoIterator<Item = &'a IndexEntry>) -> String {
    entries
        .into_iter()
        .map(render_entry)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render the "no results" message with optional suggestions.
pub fn render_no_results(text: &str, suggestions: &[Suggestion<'_>]) -> String {
    let mut output = format!("No results found for '{}'", text);
    if !suggestions.is_empty() {
        output.push_str("\n\nDid you mean:");
        for suggestion in suggestions {
            let _ = write!(output, "\n    {}", suggestion.label);
        }
    }
    output
}
