//! Storage trait definitions

use std::sync::Arc;

use crate::error::{OntologyError, Result};
use crate::model::{ContextWindow, Element, Ontology, Relation};
use crate::normalize::normalize_name;

/// Whole-ontology storage operations.
///
/// Writers replace or remove a complete ontology at once; readers receive
/// shared snapshots that later writes never mutate.
pub trait OntologyStore: Send + Sync {
    /// Store a new ontology.
    ///
    /// Returns `OntologyError::Duplicate` if the ID is taken; the store is
    /// left unchanged.
    fn add(&self, ontology: Ontology) -> Result<()>;

    /// Retrieve an ontology by ID.
    fn get(&self, id: &str) -> Result<Arc<Ontology>>;

    fn exists(&self, id: &str) -> bool {
        self.get(id).is_ok()
    }

    /// Every stored ontology, ordered by ID
    fn list(&self) -> Vec<Arc<Ontology>>;

    /// Replace an existing ontology.
    ///
    /// Returns `OntologyError::NotFound` if the ID is unknown.
    fn update(&self, ontology: Ontology) -> Result<()>;

    /// Remove an ontology.
    ///
    /// Returns `OntologyError::NotFound` if the ID is unknown.
    fn delete(&self, id: &str) -> Result<()>;

    /// All ontology IDs, sorted
    fn ids(&self) -> Vec<String>;

    fn count(&self) -> usize {
        self.ids().len()
    }

    fn clear(&self);
}

/// Lookups by element name across every stored ontology.
///
/// Names are compared in canonical form, so `"Foo_Bar"` finds `"Foo Bar"`.
/// Ontologies are scanned in ID order; the first match wins.
pub trait ElementStore: OntologyStore {
    fn element(&self, name: &str) -> Result<Element> {
        let canonical = normalize_name(name);
        self.list()
            .iter()
            .find_map(|ontology| ontology.element(&canonical).cloned())
            .ok_or_else(|| OntologyError::element_not_found(name))
    }

    fn element_contexts(&self, name: &str) -> Result<Vec<ContextWindow>> {
        Ok(self.element(name)?.contexts)
    }

    /// Relations whose source or target names the element.
    ///
    /// Returns `OntologyError::NotFound` when there are none.
    fn element_relations(&self, name: &str) -> Result<Vec<Relation>> {
        let canonical = normalize_name(name);
        let relations: Vec<Relation> = self
            .list()
            .iter()
            .flat_map(|ontology| ontology.relations.iter())
            .filter(|r| normalize_name(&r.source) == canonical || normalize_name(&r.target) == canonical)
            .cloned()
            .collect();

        if relations.is_empty() {
            return Err(OntologyError::relations_not_found(name));
        }
        Ok(relations)
    }
}
