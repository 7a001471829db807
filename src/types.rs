use serde::{Deserialize, Serialize};

/// One searchable name and its destinations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    /// Display name, possibly qualified (`vara::feature::Feature`).
    pub label: String,
    /// Destinations in generated order. Never empty in a loaded table.
    pub targets: Vec<Target>,
}

impl IndexEntry {
    pub fn new(label: impl Into<String>, targets: Vec<Target>) -> Self {
        Self {
            label: label.into(),
            targets,
        }
    }
}

/// A single destination for an [`IndexEntry`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    /// Document the target lives in, relative to the documentation root.
    pub page_reference: String,
    /// In-page anchor, without the leading `#`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchor_id: Option<String>,
    /// Disambiguating text such as a scope or signature.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Link points at a site pulled in through a tag file.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub external: bool,
}

impl Target {
    /// Create a target pointing at a whole page.
    pub fn page(page_reference: impl Into<String>) -> Self {
        Self {
            page_reference: page_reference.into(),
            anchor_id: None,
            description: None,
            external: false,
        }
    }

    #[must_use]
    pub fn with_anchor(mut self, anchor: impl Into<String>) -> Self {
        self.anchor_id = Some(anchor.into());
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Reassembles the link as `page#anchor`.
    pub fn href(&self) -> String {
        match &self.anchor_id {
            Some(anchor) => format!("{}#{}", self.page_reference, anchor),
            None => self.page_reference.clone(),
        }
    }
}
