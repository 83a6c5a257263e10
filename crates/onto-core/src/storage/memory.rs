//! In-memory storage backend
//!
//! A HashMap of shared ontology snapshots behind a read/write lock. Restart
//! loses everything.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::{OntologyError, Result};
use crate::logging::{SharedLogger, TracingLogger};
use crate::model::Ontology;
use crate::storage::traits::{ElementStore, OntologyStore};

/// In-memory ontology store.
///
/// `add`/`update`/`delete` take the write lock and swap a whole value;
/// reads take the read lock only long enough to clone `Arc` handles.
pub struct MemoryStore {
    ontologies: RwLock<HashMap<String, Arc<Ontology>>>,
    logger: SharedLogger,
}

impl MemoryStore {
    /// Create an empty store logging through `tracing`
    pub fn new() -> Self {
        Self::with_logger(TracingLogger::shared("store"))
    }

    pub fn with_logger(logger: SharedLogger) -> Self {
        Self {
            ontologies: RwLock::new(HashMap::new()),
            logger,
        }
    }

    /// Create a store with initial ontologies; duplicates are ignored.
    pub fn with_ontologies(ontologies: Vec<Ontology>, logger: SharedLogger) -> Self {
        let store = Self::with_logger(logger);
        for ontology in ontologies {
            let _ = store.add(ontology);
        }
        store
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl OntologyStore for MemoryStore {
    fn add(&self, ontology: Ontology) -> Result<()> {
        let mut ontologies = self.ontologies.write();
        if ontologies.contains_key(&ontology.id) {
            self.logger
                .warning(&format!("rejected duplicate ontology '{}'", ontology.id));
            return Err(OntologyError::Duplicate(ontology.id));
        }

        self.logger.info(&format!(
            "stored ontology '{}' ({} elements, {} relations)",
            ontology.id,
            ontology.elements.len(),
            ontology.relations.len()
        ));
        ontologies.insert(ontology.id.clone(), Arc::new(ontology));
        Ok(())
    }

    fn get(&self, id: &str) -> Result<Arc<Ontology>> {
        self.ontologies
            .read()
            .get(id)
            .cloned()
            .ok_or_else(|| OntologyError::ontology_not_found(id))
    }

    fn exists(&self, id: &str) -> bool {
        self.ontologies.read().contains_key(id)
    }

    fn list(&self) -> Vec<Arc<Ontology>> {
        let mut snapshot: Vec<Arc<Ontology>> = self.ontologies.read().values().cloned().collect();
        snapshot.sort_by(|a, b| a.id.cmp(&b.id));
        snapshot
    }

    fn update(&self, ontology: Ontology) -> Result<()> {
        let mut ontologies = self.ontologies.write();
        match ontologies.get_mut(&ontology.id) {
            Some(slot) => {
                self.logger.info(&format!("replaced ontology '{}'", ontology.id));
                *slot = Arc::new(ontology);
                Ok(())
            }
            None => Err(OntologyError::ontology_not_found(ontology.id)),
        }
    }

    fn delete(&self, id: &str) -> Result<()> {
        match self.ontologies.write().remove(id) {
            Some(_) => {
                self.logger.info(&format!("deleted ontology '{}'", id));
                Ok(())
            }
            None => Err(OntologyError::ontology_not_found(id)),
        }
    }

    fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.ontologies.read().keys().cloned().collect();
        ids.sort();
        ids
    }

    fn count(&self) -> usize {
        self.ontologies.read().len()
    }

    fn clear(&self) {
        self.ontologies.write().clear();
    }
}

impl ElementStore for MemoryStore {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::MemoryLogger;
    use crate::model::{ContextWindow, Element, OntologyBuilder, Relation};
    use pretty_assertions::assert_eq;

    fn store() -> MemoryStore {
        MemoryStore::with_logger(Arc::new(MemoryLogger::new()))
    }

    fn test_ontology(id: &str) -> Ontology {
        OntologyBuilder::new().id(id).name(format!("name-{}", id)).build()
    }

    fn element(name: &str) -> Element {
        Element {
            name: name.into(),
            original_name: name.into(),
            element_type: "Fruit".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_add_and_get() {
        let store = store();
        store.add(test_ontology("onto_1")).unwrap();

        let retrieved = store.get("onto_1").unwrap();
        assert_eq!(retrieved.name, "name-onto_1");
        assert!(store.exists("onto_1"));
        assert_eq!(store.count(), 1);
    }

    #[test]
    fn test_add_duplicate_leaves_store_unchanged() {
        let store = store();
        store.add(test_ontology("onto_1")).unwrap();

        let mut second = test_ontology("onto_1");
        second.name = "other".into();
        let err = store.add(second).unwrap_err();

        assert_eq!(err, OntologyError::Duplicate("onto_1".into()));
        assert_eq!(store.get("onto_1").unwrap().name, "name-onto_1");
        assert_eq!(store.count(), 1);
    }

    #[test]
    fn test_get_missing() {
        let err = store().get("nope").unwrap_err();
        assert_eq!(err, OntologyError::ontology_not_found("nope"));
    }

    #[test]
    fn test_update() {
        let store = store();
        store.add(test_ontology("onto_1")).unwrap();
        let before = store.get("onto_1").unwrap();

        let mut updated = test_ontology("onto_1");
        updated.name = "renamed".into();
        store.update(updated).unwrap();

        assert_eq!(store.get("onto_1").unwrap().name, "renamed");
        // earlier snapshot is untouched
        assert_eq!(before.name, "name-onto_1");
    }

    #[test]
    fn test_update_and_delete_not_found() {
        let store = store();
        assert!(matches!(
            store.update(test_ontology("x")),
            Err(OntologyError::NotFound { .. })
        ));
        assert!(matches!(
            store.delete("x"),
            Err(OntologyError::NotFound { .. })
        ));
    }

    #[test]
    fn test_delete_and_clear() {
        let store = store();
        store.add(test_ontology("a")).unwrap();
        store.add(test_ontology("b")).unwrap();

        store.delete("a").unwrap();
        assert_eq!(store.ids(), vec!["b".to_string()]);

        store.clear();
        assert_eq!(store.count(), 0);
    }

    #[test]
    fn test_list_sorted_by_id() {
        let store = MemoryStore::with_ontologies(
            vec![test_ontology("c"), test_ontology("a"), test_ontology("b")],
            Arc::new(MemoryLogger::new()),
        );
        let ids: Vec<String> = store.list().iter().map(|o| o.id.clone()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_element_lookup_uses_canonical_name() {
        let store = store();
        let mut pomme = element("Grande Pomme");
        pomme.attach_context(ContextWindow::new(4, "f1", "pomme"));
        store
            .add(OntologyBuilder::new().id("b").element(pomme).build())
            .unwrap();
        store
            .add(
                OntologyBuilder::new()
                    .id("a")
                    .element(element("Poire"))
                    .build(),
            )
            .unwrap();

        let found = store.element("Grande_Pomme").unwrap();
        assert_eq!(found.name, "Grande Pomme");
        assert_eq!(store.element_contexts("Grande Pomme").unwrap().len(), 1);
        assert!(matches!(
            store.element("Kiwi"),
            Err(OntologyError::NotFound { kind: "element", .. })
        ));
    }

    #[test]
    fn test_element_relations() {
        let store = store();
        store
            .add(
                OntologyBuilder::new()
                    .id("a")
                    .relations(vec![
                        Relation::new("Grande_Pomme", "est_un", "Fruit"),
                        Relation::new("Verger", "contient", "Grande Pomme"),
                        Relation::new("Poire", "est_un", "Fruit"),
                    ])
                    .build(),
            )
            .unwrap();

        // canonical form keeps case
        let err = store.element_relations("grande_pomme").unwrap_err();
        assert!(matches!(err, OntologyError::NotFound { .. }));

        let relations = store.element_relations("Grande Pomme").unwrap();
        assert_eq!(relations.len(), 2);
        assert!(store.element_relations("Kiwi").is_err());
    }
}
