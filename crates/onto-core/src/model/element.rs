//! Element and relation types

use serde::{Deserialize, Serialize};

use super::ContextWindow;
use crate::error::{OntologyError, Result};

/// An element as produced by a format parser, before normalization
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawElement {
    pub name: String,
    #[serde(rename = "type", default)]
    pub element_type: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub positions: Vec<i64>,
}

impl RawElement {
    pub fn new(
        name: impl Into<String>,
        element_type: impl Into<String>,
        description: impl Into<String>,
        positions: Vec<i64>,
    ) -> Self {
        Self {
            name: name.into(),
            element_type: element_type.into(),
            description: description.into(),
            positions,
        }
    }

    /// Build from textual fields, parsing the position list.
    ///
    /// A position list that is not made of integers yields
    /// `OntologyError::RecordSkipped`.
    pub fn from_fields(
        name: &str,
        element_type: &str,
        description: &str,
        positions: &str,
    ) -> Result<Self> {
        let name = name.trim();
        let positions = parse_positions(positions).map_err(|reason| {
            OntologyError::skipped(format!("element '{}'", name), reason)
        })?;
        Ok(Self::new(
            name,
            element_type.trim(),
            description.trim(),
            positions,
        ))
    }

    /// First position, used as the merge tie-breaker
    pub fn first_position(&self) -> Option<i64> {
        self.positions.first().copied()
    }
}

/// Parse a comma and/or whitespace separated list of integer offsets
pub fn parse_positions(text: &str) -> std::result::Result<Vec<i64>, String> {
    text.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(|token| {
            token
                .parse::<i64>()
                .map_err(|_| format!("invalid position '{}'", token))
        })
        .collect()
}

/// A canonical, merged element
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// Canonical display name
    pub name: String,

    /// Name as first seen by the merger, kept for audit
    pub original_name: String,

    /// Slash-joined, sorted, deduplicated type tags
    #[serde(rename = "type")]
    pub element_type: String,

    /// Longest known description
    pub description: String,

    /// Occurrence offsets; duplicates across source records are kept
    pub positions: Vec<i64>,

    /// Associated windows, at most one per window position, ordered by position
    #[serde(default)]
    pub contexts: Vec<ContextWindow>,
}

impl Element {
    /// Individual type tags
    pub fn type_tags(&self) -> impl Iterator<Item = &str> {
        self.element_type.split('/').filter(|t| !t.is_empty())
    }

    /// First occurrence offset, 0 when the element has none
    pub fn first_position(&self) -> i64 {
        self.positions.first().copied().unwrap_or(0)
    }

    /// True if a window with this position is already attached
    pub fn has_context(&self, position: i64) -> bool {
        self.contexts
            .binary_search_by_key(&position, |c| c.position)
            .is_ok()
    }

    /// Attach a window unless one with the same position is present.
    ///
    /// Returns true if the window was added.
    pub fn attach_context(&mut self, window: ContextWindow) -> bool {
        match self
            .contexts
            .binary_search_by_key(&window.position, |c| c.position)
        {
            Ok(_) => false,
            Err(idx) => {
                self.contexts.insert(idx, window);
                true
            }
        }
    }
}

/// A typed, directed edge between two element names
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Relation {
    pub source: String,
    #[serde(rename = "type")]
    pub relation_type: String,
    pub target: String,
    #[serde(default)]
    pub description: String,
}

impl Relation {
    pub fn new(
        source: impl Into<String>,
        relation_type: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            relation_type: relation_type.into(),
            target: target.into(),
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}
