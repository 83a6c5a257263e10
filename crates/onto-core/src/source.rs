//! Collaborator seams - where raw records and context windows come from
//!
//! Format parsers live outside this crate. They hand over raw element and
//! relation records through [`RecordSource`] and occurrence windows through
//! [`ContextSource`]. JSON adapters are provided for both.

use std::path::PathBuf;

use serde::Deserialize;

use crate::error::{OntologyError, Result};
use crate::logging::SharedLogger;
use crate::model::{ContextWindow, RawElement, Relation};

/// Raw records produced by one parse
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordBatch {
    pub elements: Vec<RawElement>,
    pub relations: Vec<Relation>,
    /// Records the parser dropped
    pub skipped: Vec<OntologyError>,
}

/// Supplies raw element and relation records
pub trait RecordSource {
    fn read_records(&self) -> Result<RecordBatch>;
}

/// Context windows produced by one read
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WindowBatch {
    pub windows: Vec<ContextWindow>,
    /// Windows that could not be decoded
    pub skipped: Vec<OntologyError>,
}

impl From<Vec<ContextWindow>> for WindowBatch {
    fn from(windows: Vec<ContextWindow>) -> Self {
        Self {
            windows,
            skipped: Vec::new(),
        }
    }
}

/// Supplies raw context windows
pub trait ContextSource {
    fn read_windows(&self) -> Result<WindowBatch>;
}

impl ContextSource for Vec<ContextWindow> {
    fn read_windows(&self) -> Result<WindowBatch> {
        Ok(WindowBatch::from(self.clone()))
    }
}

impl RecordSource for RecordBatch {
    fn read_records(&self) -> Result<RecordBatch> {
        Ok(self.clone())
    }
}

/// Where a JSON adapter reads its document from
#[derive(Debug, Clone)]
enum JsonInput {
    Text(String),
    Path(PathBuf),
}

impl JsonInput {
    fn load(&self) -> Result<String> {
        match self {
            Self::Text(text) => Ok(text.clone()),
            Self::Path(path) => std::fs::read_to_string(path).map_err(|err| {
                OntologyError::ParseFailure(format!("{}: {}", path.display(), err))
            }),
        }
    }
}

/// A JSON array of context windows.
///
/// A window that fails to decode is skipped and reported in
/// [`WindowBatch::skipped`]; only an unreadable source or a document that
/// is not an array is a `ParseFailure`.
#[derive(Debug, Clone)]
pub struct JsonContextSource {
    input: JsonInput,
}

impl JsonContextSource {
    pub fn from_json(text: impl Into<String>) -> Self {
        Self {
            input: JsonInput::Text(text.into()),
        }
    }

    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            input: JsonInput::Path(path.into()),
        }
    }
}

impl ContextSource for JsonContextSource {
    fn read_windows(&self) -> Result<WindowBatch> {
        let text = self.input.load()?;
        let values: Vec<serde_json::Value> = serde_json::from_str(&text)?;

        let mut batch = WindowBatch {
            windows: Vec::with_capacity(values.len()),
            skipped: Vec::new(),
        };
        for (index, value) in values.into_iter().enumerate() {
            match serde_json::from_value::<ContextWindow>(value) {
                Ok(window) => batch.windows.push(window),
                Err(err) => batch.skipped.push(OntologyError::skipped(
                    format!("context window #{}", index),
                    err.to_string(),
                )),
            }
        }
        Ok(batch)
    }
}

/// Positions as either a parser string (`"1, 2 3"`) or a JSON list
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PositionsField {
    Text(String),
    List(Vec<i64>),
}

impl Default for PositionsField {
    fn default() -> Self {
        Self::List(Vec::new())
    }
}

#[derive(Debug, Deserialize)]
struct ElementRecord {
    #[serde(default)]
    name: String,
    #[serde(rename = "type", default)]
    element_type: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    positions: PositionsField,
}

#[derive(Debug, Deserialize)]
struct RecordDocument {
    #[serde(default)]
    elements: Vec<serde_json::Value>,
    #[serde(default)]
    relations: Vec<Relation>,
}

/// `{"elements": [...], "relations": [...]}` as written by the parsers.
///
/// A malformed element record is skipped and reported; a malformed document
/// is a `ParseFailure`.
pub struct JsonRecordSource {
    input: JsonInput,
    logger: SharedLogger,
}

impl JsonRecordSource {
    pub fn from_json(text: impl Into<String>, logger: SharedLogger) -> Self {
        Self {
            input: JsonInput::Text(text.into()),
            logger,
        }
    }

    pub fn from_path(path: impl Into<PathBuf>, logger: SharedLogger) -> Self {
        Self {
            input: JsonInput::Path(path.into()),
            logger,
        }
    }

    fn decode_element(&self, index: usize, value: serde_json::Value) -> Result<RawElement> {
        let record: ElementRecord = serde_json::from_value(value)
            .map_err(|err| OntologyError::skipped(format!("element #{}", index), err.to_string()))?;

        match record.positions {
            PositionsField::Text(text) => RawElement::from_fields(
                &record.name,
                &record.element_type,
                &record.description,
                &text,
            ),
            PositionsField::List(positions) => Ok(RawElement::new(
                record.name.trim(),
                record.element_type.trim(),
                record.description.trim(),
                positions,
            )),
        }
    }
}

impl RecordSource for JsonRecordSource {
    fn read_records(&self) -> Result<RecordBatch> {
        let text = self.input.load()?;
        let document: RecordDocument = serde_json::from_str(&text)?;

        let mut batch = RecordBatch {
            elements: Vec::with_capacity(document.elements.len()),
            relations: document.relations,
            skipped: Vec::new(),
        };

        for (index, value) in document.elements.into_iter().enumerate() {
            match self.decode_element(index, value) {
                Ok(raw) => batch.elements.push(raw),
                Err(err) => {
                    self.logger.warning(&err.to_string());
                    batch.skipped.push(err);
                }
            }
        }

        self.logger.debug(&format!(
            "decoded {} elements, {} relations ({} skipped)",
            batch.elements.len(),
            batch.relations.len(),
            batch.skipped.len()
        ));

        Ok(batch)
    }
}
