//! ElementMerger - collapses raw elements into a unique-by-name set
//!
//! Raw elements are processed in a stable order (original name, then first
//! position) so the record that wins description or type-casing ties does not
//! depend on the order the parser produced them in.

use ahash::AHashMap;

use crate::error::OntologyError;
use crate::logging::SharedLogger;
use crate::model::{Element, RawElement};
use crate::normalize::{dedup_types, normalize_name};

/// Output of one merge pass
#[derive(Debug, Clone, Default)]
pub struct MergeOutcome {
    /// Unique by canonical name, ordered by name
    pub elements: Vec<Element>,
    /// Records dropped during the merge
    pub skipped: Vec<OntologyError>,
}

pub struct ElementMerger {
    logger: SharedLogger,
}

impl ElementMerger {
    pub fn new(logger: SharedLogger) -> Self {
        Self { logger }
    }

    /// Merge the raw elements of one ontology load
    pub fn merge(&self, mut raw: Vec<RawElement>) -> MergeOutcome {
        raw.sort_by(|a, b| {
            a.name
                .cmp(&b.name)
                .then_with(|| a.first_position().cmp(&b.first_position()))
        });

        let mut skipped = Vec::new();
        let mut index: AHashMap<String, usize> = AHashMap::with_capacity(raw.len());
        let mut elements: Vec<Element> = Vec::with_capacity(raw.len());

        for record in raw {
            let canonical = normalize_name(&record.name);
            if canonical.is_empty() {
                let err = OntologyError::skipped(
                    format!("element '{}'", record.name),
                    "name is empty after normalization",
                );
                self.logger.warning(&err.to_string());
                skipped.push(err);
                continue;
            }

            match index.get(&canonical).copied() {
                Some(idx) => {
                    let existing = &mut elements[idx];
                    existing.positions.extend_from_slice(&record.positions);
                    if record.description.chars().count() > existing.description.chars().count() {
                        existing.description = record.description;
                    }
                    let combined = format!("{}/{}", existing.element_type, record.element_type);
                    existing.element_type = dedup_types(&combined);
                    self.logger.debug(&format!(
                        "merged '{}' into '{}'",
                        record.name, existing.name
                    ));
                }
                None => {
                    index.insert(canonical.clone(), elements.len());
                    elements.push(Element {
                        name: canonical,
                        original_name: record.name,
                        element_type: dedup_types(&record.element_type),
                        description: record.description,
                        positions: record.positions,
                        contexts: Vec::new(),
                    });
                }
            }
        }

        elements.sort_by(|a, b| a.name.cmp(&b.name));

        self.logger.info(&format!(
            "merged into {} unique elements ({} skipped)",
            elements.len(),
            skipped.len()
        ));

        MergeOutcome { elements, skipped }
    }
}
