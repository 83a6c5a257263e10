//! Ontology and provenance types

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Element, Relation};

/// Provenance of one concrete source file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileProvenance {
    pub source_file: String,
    #[serde(default)]
    pub directory: String,
    #[serde(default)]
    pub file_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub sha256_hash: String,
}

/// Source metadata attached to an ontology
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceMetadata {
    pub source_file: String,
    pub directory: String,
    pub file_date: Option<DateTime<Utc>>,
    pub sha256_hash: String,
    pub ontology_file: String,
    pub context_file: String,
    pub processing_date: Option<DateTime<Utc>>,
    /// Per-file provenance keyed by file ID
    pub files: BTreeMap<String, FileProvenance>,
}

impl SourceMetadata {
    /// Hash recorded for a source file name, looked up across `files`
    pub fn hash_for(&self, source_file: &str) -> Option<&str> {
        self.files
            .values()
            .find(|f| f.source_file == source_file)
            .map(|f| f.sha256_hash.as_str())
    }
}

/// A named collection of elements and relations extracted from one artifact
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ontology {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub format: String,
    #[serde(default)]
    pub sha256: String,
    #[serde(default)]
    pub imported_at: Option<DateTime<Utc>>,
    /// Unique by canonical name, ordered by name
    pub elements: Vec<Element>,
    pub relations: Vec<Relation>,
    #[serde(default)]
    pub source: Option<SourceMetadata>,
}

impl Ontology {
    pub fn element(&self, name: &str) -> Option<&Element> {
        self.elements.iter().find(|e| e.name == name)
    }

    /// Elements with at least one associated context
    pub fn elements_with_contexts(&self) -> usize {
        self.elements.iter().filter(|e| !e.contexts.is_empty()).count()
    }

    pub fn total_contexts(&self) -> usize {
        self.elements.iter().map(|e| e.contexts.len()).sum()
    }
}

/// Builder for ontologies
#[derive(Debug, Default)]
pub struct OntologyBuilder {
    ontology: Ontology,
}

impl OntologyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.ontology.id = id.into();
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.ontology.name = name.into();
        self
    }

    /// Record the ontology file; `format` is taken from its extension
    pub fn filename(mut self, filename: impl Into<String>) -> Self {
        let filename = filename.into();
        self.ontology.format = Path::new(&filename)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_string();
        self.ontology.filename = filename;
        self
    }

    pub fn sha256(mut self, sha256: impl Into<String>) -> Self {
        self.ontology.sha256 = sha256.into();
        self
    }

    pub fn imported_at(mut self, imported_at: DateTime<Utc>) -> Self {
        self.ontology.imported_at = Some(imported_at);
        self
    }

    pub fn element(mut self, element: Element) -> Self {
        self.ontology.elements.push(element);
        self
    }

    pub fn elements(mut self, elements: impl IntoIterator<Item = Element>) -> Self {
        self.ontology.elements.extend(elements);
        self
    }

    pub fn relations(mut self, relations: impl IntoIterator<Item = Relation>) -> Self {
        self.ontology.relations.extend(relations);
        self
    }

    pub fn source(mut self, source: SourceMetadata) -> Self {
        self.ontology.source = Some(source);
        self
    }

    pub fn build(self) -> Ontology {
        self.ontology
    }
}
