//! Fuzzy search over stored ontologies
//!
//! # Example
//!
//! ```rust
//! use onto_core::search::fuzzy;
//!
//! assert_eq!(fuzzy("apple", "apple", 0.3), 1.0);
//! assert_eq!(fuzzy("apple", "appl", 0.3), 0.8);
//! // containment is checked one way only
//! assert_eq!(fuzzy("appl", "apple", 0.3), 1.0);
//! ```

mod engine;
mod relevance;
mod types;

pub use engine::SearchEngine;
pub use relevance::{fuzzy, relevance, similarity};
pub use types::{SearchFilters, SearchResult};
