//! Engine configuration

use serde::{Deserialize, Serialize};

/// Search scoring and fan-out configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Weight of the name similarity in the relevance sum
    pub name_weight: f64,
    /// Weight of the type similarity
    pub type_weight: f64,
    /// Weight of the description similarity
    pub description_weight: f64,
    /// Edit-distance similarities below this are scored 0
    pub min_similarity: f64,
    /// Only elements scoring strictly above this are returned
    pub min_relevance: f64,
    /// Relevance is never lower than the name similarity alone
    pub name_match_floor: bool,
    /// Ontologies scanned concurrently (0 = available parallelism)
    pub max_parallel_ontologies: usize,
    /// Preview tokens per side when the caller passes none (0 = all)
    pub default_preview_size: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            name_weight: 0.6,
            type_weight: 0.3,
            description_weight: 0.1,
            min_similarity: 0.3,
            min_relevance: 0.3,
            name_match_floor: true,
            max_parallel_ontologies: 0,
            default_preview_size: 0,
        }
    }
}

impl SearchConfig {
    /// Resolved worker count for the search pool
    pub fn worker_count(&self) -> usize {
        if self.max_parallel_ontologies > 0 {
            return self.max_parallel_ontologies;
        }
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(4)
    }
}

/// Context association configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssociationConfig {
    /// Repair gaps and overlaps between neighboring windows of the same file
    pub stitch_neighbors: bool,
}

impl Default for AssociationConfig {
    fn default() -> Self {
        Self {
            stitch_neighbors: true,
        }
    }
}

/// Top-level configuration shared by loader, store and search engine
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    pub search: SearchConfig,
    pub association: AssociationConfig,
}
