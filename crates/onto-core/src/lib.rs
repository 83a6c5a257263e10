//! Onto Core
//!
//! In-memory ontology ingestion and search. Raw element records from format
//! parsers are normalized and merged by canonical name, text-occurrence
//! windows are associated back onto the merged elements, and finished
//! ontologies are kept in a lock-guarded store that a concurrent fuzzy
//! search engine scans.
//!
//! # Example
//!
//! ```rust
//! use onto_core::{LoadRequest, OntologyService, RawElement, SearchFilters};
//!
//! let rt = tokio::runtime::Runtime::new().unwrap();
//! let service = OntologyService::new();
//!
//! service
//!     .load_ontology(
//!         LoadRequest::new(vec![
//!             RawElement::new("Fruit", "Category", "", vec![]),
//!             RawElement::new("Frut", "Category", "", vec![]),
//!         ])
//!         .id("onto_fruits"),
//!     )
//!     .unwrap();
//!
//! let results = rt
//!     .block_on(service.search("fruit", &SearchFilters::new()))
//!     .unwrap();
//! assert_eq!(results[0].element_name, "Fruit");
//! assert_eq!(results[0].relevance, 1.0);
//! ```

pub mod config;
pub mod context;
pub mod error;
pub mod loader;
pub mod logging;
pub mod merge;
pub mod model;
pub mod normalize;
pub mod search;
pub mod service;
pub mod source;
pub mod storage;

// Re-export main types at crate root
pub use config::{AssociationConfig, CoreConfig, SearchConfig};
pub use context::{element_in_context, AssociationReport, ContextAssociator};
pub use error::{OntologyError, Result};
pub use loader::{LoadReport, LoadRequest, OntologyLoader};
pub use logging::{Logger, MemoryLogger, SharedLogger, TracingLogger};
pub use merge::{ElementMerger, MergeOutcome};
pub use model::{
    ContextWindow, Element, FileProvenance, Ontology, OntologyBuilder, RawElement, Relation,
    SourceMetadata,
};
pub use normalize::{dedup_types, normalize_name, normalize_type};
pub use search::{fuzzy, SearchEngine, SearchFilters, SearchResult};
pub use service::OntologyService;
pub use source::{
    ContextSource, JsonContextSource, JsonRecordSource, RecordBatch, RecordSource, WindowBatch,
};
pub use storage::{ElementStore, MemoryStore, OntologyStore};
