//! Ontology data model - elements, relations, context windows and provenance
//!
//! # Example
//!
//! ```rust
//! use onto_core::model::{ContextWindow, OntologyBuilder, RawElement};
//!
//! let raw = RawElement::from_fields("Pomme", "Fruit", "", "5, 12").unwrap();
//! assert_eq!(raw.positions, vec![5, 12]);
//!
//! let window = ContextWindow::new(5, "file-1", "pomme")
//!     .with_offset(5)
//!     .with_before(["une"])
//!     .with_after(["rouge"]);
//! assert_eq!((window.start_offset, window.end_offset), (4, 6));
//!
//! let ontology = OntologyBuilder::new().id("onto_1").name("fruits").build();
//! assert!(ontology.elements.is_empty());
//! ```

mod context;
mod element;
mod ontology;

pub use context::ContextWindow;
pub use element::{parse_positions, Element, RawElement, Relation};
pub use ontology::{FileProvenance, Ontology, OntologyBuilder, SourceMetadata};
