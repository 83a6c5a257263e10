//! Context association - attaches text-occurrence windows to merged elements
//!
//! Windows arrive from the context producer with a nominal `position`, a
//! file offset and surrounding tokens. Association runs in two steps:
//!
//! 1. [`prepare_windows`] sorts windows, derives their offset intervals and
//!    stitches same-file neighbors.
//! 2. For every element position, windows whose interval covers it and whose
//!    text mentions the element ([`element_in_context`]) are attached, each
//!    occurrence at most once.

mod matching;
mod stitch;

pub use matching::{element_in_context, element_in_text};
pub use stitch::{prepare_windows, stitch_pair, PrepareStats};

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::AssociationConfig;
use crate::error::Result;
use crate::logging::SharedLogger;
use crate::model::{ContextWindow, Element};
use crate::source::{ContextSource, WindowBatch};

/// Summary of one association pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssociationReport {
    /// Windows received from the source
    pub windows: usize,
    /// Windows the source could not decode
    #[serde(default)]
    pub skipped_windows: usize,
    /// Neighbor pairs changed by stitching
    pub stitched: usize,
    /// Windows whose missing file offset fell back to their position
    pub offset_fallbacks: usize,
    /// Windows attached across all elements
    pub associations: usize,
    pub elements_with_contexts: usize,
}

pub struct ContextAssociator {
    config: AssociationConfig,
    logger: SharedLogger,
}

impl ContextAssociator {
    pub fn new(config: AssociationConfig, logger: SharedLogger) -> Self {
        Self { config, logger }
    }

    /// Read windows from `source` and attach them to `elements`.
    ///
    /// Only a failing source is an error; individual windows never abort.
    pub fn associate(
        &self,
        elements: &mut [Element],
        source: &dyn ContextSource,
    ) -> Result<AssociationReport> {
        let batch = source.read_windows()?;
        Ok(self.associate_batch(elements, batch))
    }

    /// Attach the decoded windows of `batch`, logging the ones it skipped
    pub fn associate_batch(
        &self,
        elements: &mut [Element],
        batch: WindowBatch,
    ) -> AssociationReport {
        for skipped in &batch.skipped {
            self.logger.warning(&skipped.to_string());
        }
        let mut report = self.associate_windows(elements, batch.windows);
        report.skipped_windows = batch.skipped.len();
        report
    }

    /// Attach already-decoded windows to `elements`
    pub fn associate_windows(
        &self,
        elements: &mut [Element],
        mut windows: Vec<ContextWindow>,
    ) -> AssociationReport {
        let prepared = prepare_windows(
            &mut windows,
            self.config.stitch_neighbors,
            self.logger.as_ref(),
        );

        let mut report = AssociationReport {
            windows: windows.len(),
            stitched: prepared.stitched,
            offset_fallbacks: prepared.offset_fallbacks,
            ..Default::default()
        };

        if windows.is_empty() {
            self.logger.info("no context windows to associate");
            return report;
        }

        let texts: Vec<String> = windows.iter().map(ContextWindow::text).collect();

        for element in elements.iter_mut() {
            let accepted = self.match_element(element, &windows, &texts);
            if accepted.is_empty() {
                continue;
            }

            let mut attached = 0;
            for idx in accepted.into_values() {
                if element.attach_context(windows[idx].clone()) {
                    attached += 1;
                }
            }
            report.associations += attached;
            self.logger.debug(&format!(
                "'{}': {} contexts attached",
                element.name, attached
            ));
        }

        report.elements_with_contexts = elements.iter().filter(|e| !e.contexts.is_empty()).count();

        self.logger.info(&format!(
            "associated {} windows with {} of {} elements ({} stitched, {} offset fallbacks)",
            report.associations,
            report.elements_with_contexts,
            elements.len(),
            report.stitched,
            report.offset_fallbacks
        ));

        report
    }

    /// Window indices accepted for `element`, keyed by window position
    fn match_element(
        &self,
        element: &Element,
        windows: &[ContextWindow],
        texts: &[String],
    ) -> BTreeMap<i64, usize> {
        let mut accepted: BTreeMap<i64, usize> = BTreeMap::new();
        let mut verdicts: Vec<Option<bool>> = vec![None; windows.len()];

        for &position in &element.positions {
            for (idx, window) in windows.iter().enumerate() {
                if !window.covers(position)
                    || accepted.contains_key(&window.position)
                    || element.has_context(window.position)
                {
                    continue;
                }

                let mentions = *verdicts[idx]
                    .get_or_insert_with(|| element_in_text(&element.name, &texts[idx]));
                if mentions {
                    accepted.insert(window.position, idx);
                }
            }
        }

        accepted
    }
}
