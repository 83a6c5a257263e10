//! SearchEngine - concurrent fuzzy search over stored ontologies
//!
//! Every ontology that passes the ID filter is scored on its own task. A
//! semaphore bounds how many run at once. Workers publish rows over an
//! unbounded channel; a supervisor joins them and then drops the last
//! sender, which ends the caller's drain loop.

use std::cmp::Ordering;
use std::sync::Arc;

use tokio::sync::{mpsc, Semaphore};
use tokio::task::JoinSet;

use super::relevance::relevance;
use super::types::{SearchFilters, SearchResult};
use crate::config::SearchConfig;
use crate::error::{OntologyError, Result};
use crate::logging::SharedLogger;
use crate::model::{ContextWindow, Ontology};
use crate::normalize::normalize_type;
use crate::storage::OntologyStore;

pub struct SearchEngine {
    store: Arc<dyn OntologyStore>,
    config: SearchConfig,
    logger: SharedLogger,
}

impl SearchEngine {
    pub fn new(store: Arc<dyn OntologyStore>, config: SearchConfig, logger: SharedLogger) -> Self {
        Self {
            store,
            config,
            logger,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Rank elements of every matching ontology against `query`.
    ///
    /// No match is an empty list, never an error. Results are ordered by
    /// relevance (descending), then element name, then ontology ID.
    pub async fn search(&self, query: &str, filters: &SearchFilters) -> Result<Vec<SearchResult>> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let targets: Vec<Arc<Ontology>> = self
            .store
            .list()
            .into_iter()
            .filter(|o| filters.ontology_id.as_deref().map_or(true, |id| o.id == id))
            .collect();
        let scanned = targets.len();

        let scorer = Arc::new(Scorer::new(query, filters, &self.config));
        let permits = Arc::new(Semaphore::new(self.config.worker_count().max(1)));
        let (tx, mut rx) = mpsc::unbounded_channel::<SearchResult>();

        let mut workers = JoinSet::new();
        for ontology in targets {
            let tx = tx.clone();
            let permits = Arc::clone(&permits);
            let scorer = Arc::clone(&scorer);
            workers.spawn(async move {
                let Ok(_permit) = permits.acquire_owned().await else {
                    return;
                };
                for row in scorer.score_ontology(&ontology) {
                    if tx.send(row).is_err() {
                        break;
                    }
                }
            });
        }

        let logger = Arc::clone(&self.logger);
        let supervisor = tokio::spawn(async move {
            let mut failed = 0usize;
            while let Some(joined) = workers.join_next().await {
                if let Err(err) = joined {
                    failed += 1;
                    logger.error(&format!("search worker failed: {}", err));
                }
            }
            drop(tx);
            failed
        });

        let mut results = Vec::new();
        while let Some(row) = rx.recv().await {
            results.push(row);
        }

        let failed = supervisor
            .await
            .map_err(|err| OntologyError::Internal(format!("search supervisor: {}", err)))?;
        if failed > 0 {
            return Err(OntologyError::Internal(format!(
                "{} search workers did not complete",
                failed
            )));
        }

        results.sort_by(compare_results);

        self.logger.debug(&format!(
            "search '{}' scanned {} ontologies, {} results",
            scorer.query,
            scanned,
            results.len()
        ));

        Ok(results)
    }
}

fn compare_results(a: &SearchResult, b: &SearchResult) -> Ordering {
    b.relevance
        .partial_cmp(&a.relevance)
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.element_name.cmp(&b.element_name))
        .then_with(|| a.ontology_id.cmp(&b.ontology_id))
}

/// Per-search scoring state shared by all workers
struct Scorer {
    query: String,
    type_key: Option<String>,
    file_id: Option<String>,
    preview_size: usize,
    config: SearchConfig,
}

impl Scorer {
    fn new(query: String, filters: &SearchFilters, config: &SearchConfig) -> Self {
        Self {
            query,
            type_key: filters.element_type.as_deref().map(normalize_type),
            file_id: filters.file_id.clone(),
            preview_size: filters
                .context_preview_size
                .unwrap_or(config.default_preview_size),
            config: config.clone(),
        }
    }

    fn score_ontology(&self, ontology: &Ontology) -> Vec<SearchResult> {
        let mut rows = Vec::new();

        for element in &ontology.elements {
            if let Some(key) = &self.type_key {
                if !element.type_tags().any(|tag| normalize_type(tag) == *key) {
                    continue;
                }
            }

            if let Some(file_id) = &self.file_id {
                if !element.contexts.iter().any(|c| &c.file_id == file_id) {
                    continue;
                }
            }

            let score = relevance(&self.query, element, &self.config);
            if score <= self.config.min_relevance {
                continue;
            }

            // Only emitted rows pay for a copy of their contexts
            let contexts: Vec<ContextWindow> = match &self.file_id {
                Some(file_id) => element
                    .contexts
                    .iter()
                    .filter(|c| &c.file_id == file_id)
                    .cloned()
                    .collect(),
                None => element.contexts.clone(),
            };

            rows.push(SearchResult {
                ontology_id: ontology.id.clone(),
                element_name: element.name.clone(),
                element_type: element.element_type.clone(),
                description: element.description.clone(),
                preview_context: contexts
                    .first()
                    .map(|c| c.preview(self.preview_size))
                    .unwrap_or_default(),
                position: element.first_position(),
                relevance: score,
                contexts,
                source_metadata: ontology.source.clone(),
            });
        }

        rows
    }
}
