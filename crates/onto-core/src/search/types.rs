//! Search request filters and result rows

use serde::{Deserialize, Serialize};

use crate::model::{ContextWindow, SourceMetadata};

/// Optional restrictions applied to one search
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchFilters {
    /// Scan only this ontology
    pub ontology_id: Option<String>,
    /// Keep elements carrying this type tag
    pub element_type: Option<String>,
    /// Keep elements with a context in this file; their contexts are
    /// narrowed to it
    pub file_id: Option<String>,
    /// Preview tokens per side; `None` uses the configured default
    pub context_preview_size: Option<usize>,
}

impl SearchFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ontology(mut self, id: impl Into<String>) -> Self {
        self.ontology_id = Some(id.into());
        self
    }

    pub fn element_type(mut self, element_type: impl Into<String>) -> Self {
        self.element_type = Some(element_type.into());
        self
    }

    pub fn file(mut self, file_id: impl Into<String>) -> Self {
        self.file_id = Some(file_id.into());
        self
    }

    pub fn preview_size(mut self, tokens: usize) -> Self {
        self.context_preview_size = Some(tokens);
        self
    }
}

/// One ranked element match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub ontology_id: String,
    pub element_name: String,
    pub element_type: String,
    pub description: String,
    /// `before [label] after` of the first context, empty without contexts
    pub preview_context: String,
    /// First occurrence offset, 0 when the element has none
    pub position: i64,
    pub relevance: f64,
    pub contexts: Vec<ContextWindow>,
    pub source_metadata: Option<SourceMetadata>,
}
