//! OntologyLoader - raw records in, one stored ontology out
//!
//! A load reads context windows, merges raw elements, associates windows
//! and finally calls `store.add` once. Any failure before that call leaves
//! the store untouched.

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;

use crate::config::CoreConfig;
use crate::context::{AssociationReport, ContextAssociator};
use crate::error::{OntologyError, Result};
use crate::logging::SharedLogger;
use crate::merge::ElementMerger;
use crate::model::{OntologyBuilder, RawElement, Relation, SourceMetadata};
use crate::source::{ContextSource, RecordBatch, WindowBatch};
use crate::storage::OntologyStore;

static LOAD_SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Everything one load needs
pub struct LoadRequest {
    id: Option<String>,
    name: Option<String>,
    ontology_file: Option<String>,
    elements: Vec<RawElement>,
    relations: Vec<Relation>,
    skipped: Vec<OntologyError>,
    contexts: Option<Box<dyn ContextSource + Send + Sync>>,
    metadata: Option<SourceMetadata>,
}

impl LoadRequest {
    pub fn new(elements: Vec<RawElement>) -> Self {
        Self {
            id: None,
            name: None,
            ontology_file: None,
            elements,
            relations: Vec::new(),
            skipped: Vec::new(),
            contexts: None,
            metadata: None,
        }
    }

    /// Start from a parser batch, carrying its skipped records along
    pub fn from_records(batch: RecordBatch) -> Self {
        let mut request = Self::new(batch.elements);
        request.relations = batch.relations;
        request.skipped = batch.skipped;
        request
    }

    pub fn relations(mut self, relations: Vec<Relation>) -> Self {
        self.relations = relations;
        self
    }

    pub fn contexts(mut self, source: impl ContextSource + Send + Sync + 'static) -> Self {
        self.contexts = Some(Box::new(source));
        self
    }

    pub fn metadata(mut self, metadata: SourceMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Use a fixed ontology ID instead of a generated one
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Ontology file path; overrides `metadata.ontology_file`
    pub fn ontology_file(mut self, path: impl Into<String>) -> Self {
        self.ontology_file = Some(path.into());
        self
    }
}

/// Summary of a completed load
#[derive(Debug, Clone, PartialEq)]
pub struct LoadReport {
    pub ontology_id: String,
    /// Unique elements stored
    pub elements: usize,
    pub relations: usize,
    /// Records dropped by the parser, the merger or the context source
    pub skipped_records: Vec<OntologyError>,
    pub elements_with_contexts: usize,
    pub total_contexts: usize,
    pub association: AssociationReport,
}

pub struct OntologyLoader {
    store: Arc<dyn OntologyStore>,
    merger: ElementMerger,
    associator: ContextAssociator,
    logger: SharedLogger,
}

impl OntologyLoader {
    pub fn new(store: Arc<dyn OntologyStore>, config: &CoreConfig, logger: SharedLogger) -> Self {
        Self {
            store,
            merger: ElementMerger::new(Arc::clone(&logger)),
            associator: ContextAssociator::new(config.association.clone(), Arc::clone(&logger)),
            logger,
        }
    }

    /// Build an ontology from `request` and add it to the store.
    ///
    /// An unreadable context source is a `ParseFailure`; an ID collision is
    /// `Duplicate`. Malformed records and windows never fail the load.
    pub fn load(&self, request: LoadRequest) -> Result<LoadReport> {
        let LoadRequest {
            id,
            name,
            ontology_file,
            elements: raw,
            relations,
            skipped: mut skipped_records,
            contexts,
            metadata,
        } = request;

        let windows = match &contexts {
            Some(source) => source.read_windows().map_err(|err| {
                self.logger.error(&format!("context source unreadable: {}", err));
                err
            })?,
            None => WindowBatch::default(),
        };

        let mut merged = self.merger.merge(raw);
        skipped_records.append(&mut merged.skipped);
        skipped_records.extend(windows.skipped.iter().cloned());

        let association = self
            .associator
            .associate_batch(&mut merged.elements, windows);

        let id = id.unwrap_or_else(generate_id);
        let filename = ontology_file
            .or_else(|| metadata.as_ref().map(|m| m.ontology_file.clone()))
            .unwrap_or_default();
        let basename = file_basename(&filename);
        let name = name
            .or_else(|| (!basename.is_empty()).then(|| basename.clone()))
            .unwrap_or_else(|| id.clone());

        let mut builder = OntologyBuilder::new()
            .id(id.clone())
            .name(name)
            .filename(filename)
            .imported_at(
                metadata
                    .as_ref()
                    .and_then(|m| m.processing_date)
                    .unwrap_or_else(Utc::now),
            )
            .elements(merged.elements)
            .relations(relations);

        if let Some(metadata) = metadata {
            if let Some(hash) = metadata.hash_for(&basename) {
                builder = builder.sha256(hash);
            }
            builder = builder.source(metadata);
        }

        let ontology = builder.build();
        let report = LoadReport {
            ontology_id: id,
            elements: ontology.elements.len(),
            relations: ontology.relations.len(),
            skipped_records,
            elements_with_contexts: ontology.elements_with_contexts(),
            total_contexts: ontology.total_contexts(),
            association,
        };

        self.store.add(ontology)?;

        self.logger.info(&format!(
            "loaded ontology '{}': {} elements ({} with contexts, {} contexts), {} relations, {} skipped records",
            report.ontology_id,
            report.elements,
            report.elements_with_contexts,
            report.total_contexts,
            report.relations,
            report.skipped_records.len()
        ));

        Ok(report)
    }
}

/// `onto_<unix nanos>_<sequence>`
fn generate_id() -> String {
    let nanos = Utc::now().timestamp_nanos_opt().unwrap_or_default();
    let seq = LOAD_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("onto_{}_{}", nanos, seq)
}

fn file_basename(path: &str) -> String {
    Path::new(path)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string()
}
