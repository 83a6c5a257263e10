//! Error types shared by every onto-core component

use thiserror::Error;

/// Errors that can occur while loading, storing or querying ontologies
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OntologyError {
    /// Unknown ontology ID, element name, or element without relations
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    /// Ontology with this ID already exists
    #[error("ontology already exists: {0}")]
    Duplicate(String),

    /// Upstream source unreadable or malformed; aborts the whole load
    #[error("parse failure: {0}")]
    ParseFailure(String),

    /// A single raw record was dropped; the load continues
    #[error("record skipped ({record}): {reason}")]
    RecordSkipped { record: String, reason: String },

    /// A search worker could not be joined
    #[error("internal error: {0}")]
    Internal(String),
}

impl OntologyError {
    pub fn ontology_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            kind: "ontology",
            id: id.into(),
        }
    }

    pub fn element_not_found(name: impl Into<String>) -> Self {
        Self::NotFound {
            kind: "element",
            id: name.into(),
        }
    }

    pub fn relations_not_found(name: impl Into<String>) -> Self {
        Self::NotFound {
            kind: "relations for element",
            id: name.into(),
        }
    }

    pub fn skipped(record: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::RecordSkipped {
            record: record.into(),
            reason: reason.into(),
        }
    }

    /// True for errors a caller should surface as a client-side failure
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::Duplicate(_))
    }
}

impl From<serde_json::Error> for OntologyError {
    fn from(err: serde_json::Error) -> Self {
        Self::ParseFailure(err.to_string())
    }
}

/// Result type for onto-core operations
pub type Result<T> = std::result::Result<T, OntologyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = OntologyError::ontology_not_found("onto_1");
        assert_eq!(err.to_string(), "ontology not found: onto_1");

        let err = OntologyError::skipped("line 3", "bad position 'x'");
        assert_eq!(err.to_string(), "record skipped (line 3): bad position 'x'");
    }

    #[test]
    fn test_client_errors() {
        assert!(OntologyError::Duplicate("a".into()).is_client_error());
        assert!(OntologyError::element_not_found("a").is_client_error());
        assert!(!OntologyError::ParseFailure("eof".into()).is_client_error());
    }

    #[test]
    fn test_from_json_error() {
        let err: OntologyError = serde_json::from_str::<Vec<i64>>("[1,").unwrap_err().into();
        assert!(matches!(err, OntologyError::ParseFailure(_)));
    }
}
