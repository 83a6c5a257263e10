//! Storage abstraction for loaded ontologies
//!
//! `OntologyStore` covers whole-ontology CRUD; `ElementStore` adds lookups
//! by element name across every stored ontology. The only backend is the
//! lock-guarded in-memory `MemoryStore`; nothing is persisted.
//!
//! # Example
//!
//! ```rust
//! use onto_core::model::OntologyBuilder;
//! use onto_core::storage::{MemoryStore, OntologyStore};
//!
//! let store = MemoryStore::new();
//! store
//!     .add(OntologyBuilder::new().id("onto_1").name("fruits").build())
//!     .unwrap();
//!
//! assert_eq!(store.get("onto_1").unwrap().name, "fruits");
//! assert!(store.add(OntologyBuilder::new().id("onto_1").build()).is_err());
//! ```

mod memory;
mod traits;

pub use memory::MemoryStore;
pub use traits::{ElementStore, OntologyStore};
