//! OntologyService - the caller-facing facade
//!
//! Wires one `MemoryStore`, an `OntologyLoader` and a `SearchEngine` that
//! share a logger and configuration. Transport layers sit on top of this.

use std::sync::Arc;

use crate::config::CoreConfig;
use crate::error::Result;
use crate::loader::{LoadReport, LoadRequest, OntologyLoader};
use crate::logging::{SharedLogger, TracingLogger};
use crate::model::{ContextWindow, Element, Ontology, Relation};
use crate::search::{SearchEngine, SearchFilters, SearchResult};
use crate::storage::{ElementStore, MemoryStore, OntologyStore};

pub struct OntologyService {
    store: Arc<MemoryStore>,
    loader: OntologyLoader,
    search: SearchEngine,
}

impl OntologyService {
    /// Service with default configuration logging through `tracing`
    pub fn new() -> Self {
        Self::with_config(CoreConfig::default(), TracingLogger::shared("onto"))
    }

    pub fn with_config(config: CoreConfig, logger: SharedLogger) -> Self {
        let store = Arc::new(MemoryStore::with_logger(Arc::clone(&logger)));
        let loader = OntologyLoader::new(store.clone(), &config, Arc::clone(&logger));
        let search = SearchEngine::new(store.clone(), config.search, logger);
        Self {
            store,
            loader,
            search,
        }
    }

    pub fn store(&self) -> &MemoryStore {
        &self.store
    }

    pub fn load_ontology(&self, request: LoadRequest) -> Result<LoadReport> {
        self.loader.load(request)
    }

    pub async fn search(&self, query: &str, filters: &SearchFilters) -> Result<Vec<SearchResult>> {
        self.search.search(query, filters).await
    }

    pub fn get_element(&self, name: &str) -> Result<Element> {
        self.store.element(name)
    }

    pub fn get_element_contexts(&self, name: &str) -> Result<Vec<ContextWindow>> {
        self.store.element_contexts(name)
    }

    pub fn get_element_relations(&self, name: &str) -> Result<Vec<Relation>> {
        self.store.element_relations(name)
    }

    pub fn get_ontology(&self, id: &str) -> Result<Arc<Ontology>> {
        self.store.get(id)
    }

    pub fn list_ontologies(&self) -> Vec<Arc<Ontology>> {
        self.store.list()
    }

    pub fn update_ontology(&self, ontology: Ontology) -> Result<()> {
        self.store.update(ontology)
    }

    pub fn delete_ontology(&self, id: &str) -> Result<()> {
        self.store.delete(id)
    }
}

impl Default for OntologyService {
    fn default() -> Self {
        Self::new()
    }
}
