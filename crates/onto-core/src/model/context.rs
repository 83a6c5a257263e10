//! Context window - one textual occurrence with its surrounding tokens

use serde::{Deserialize, Serialize};

/// A snippet of surrounding tokens plus the offset interval it covers.
///
/// `start_offset..=end_offset` is derived from `file_offset`, the token
/// counts and `length`; it is advisory and may be widened by stitching.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextWindow {
    /// Occurrence index assigned by the context producer
    pub position: i64,

    #[serde(default)]
    pub file_id: String,

    /// Position within the concrete source file; 0 when unknown
    #[serde(default, rename = "file_position", alias = "file_offset")]
    pub file_offset: i64,

    #[serde(default)]
    pub before: Vec<String>,

    #[serde(default)]
    pub after: Vec<String>,

    /// Occurrence label as seen by the context producer
    #[serde(default)]
    pub element: String,

    /// Token span of the occurrence
    #[serde(default)]
    pub length: i64,

    #[serde(default)]
    pub start_offset: i64,

    #[serde(default)]
    pub end_offset: i64,
}

impl ContextWindow {
    pub fn new(position: i64, file_id: impl Into<String>, element: impl Into<String>) -> Self {
        let mut window = Self {
            position,
            file_id: file_id.into(),
            element: element.into(),
            length: 1,
            ..Default::default()
        };
        window.derive_offsets();
        window
    }

    pub fn with_offset(mut self, file_offset: i64) -> Self {
        self.file_offset = file_offset;
        self.derive_offsets();
        self
    }

    pub fn with_length(mut self, length: i64) -> Self {
        self.length = length;
        self.derive_offsets();
        self
    }

    pub fn with_before<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.before = tokens.into_iter().map(Into::into).collect();
        self.derive_offsets();
        self
    }

    pub fn with_after<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.after = tokens.into_iter().map(Into::into).collect();
        self.derive_offsets();
        self
    }

    /// True when the producer gave no file offset for a non-empty occurrence
    pub fn needs_offset_fallback(&self) -> bool {
        self.file_offset == 0 && self.length > 0
    }

    /// Offset of the occurrence, falling back to `position` when missing
    pub fn effective_offset(&self) -> i64 {
        if self.needs_offset_fallback() {
            self.position
        } else {
            self.file_offset
        }
    }

    /// Recompute `start_offset` / `end_offset` from the token lists
    pub fn derive_offsets(&mut self) {
        let offset = self.effective_offset();
        self.start_offset = offset - self.before.len() as i64;
        self.end_offset = offset + self.length + self.after.len() as i64 - 1;
    }

    /// Last offset of the occurrence itself
    pub fn occurrence_end(&self) -> i64 {
        self.effective_offset() + self.length - 1
    }

    pub fn covers(&self, offset: i64) -> bool {
        self.start_offset <= offset && offset <= self.end_offset
    }

    /// Number of offsets in the covered interval
    pub fn span(&self) -> i64 {
        self.end_offset - self.start_offset + 1
    }

    /// Lowercased `before + [element] + after` joined by spaces
    pub fn text(&self) -> String {
        let mut parts: Vec<&str> = self.before.iter().map(String::as_str).collect();
        parts.push(&self.element);
        let head = parts.join(" ");
        format!("{} {}", head, self.after.join(" ")).to_lowercase()
    }

    /// Human-readable preview `before [element] after`.
    ///
    /// `max_tokens` limits the tokens kept on each side, closest to the
    /// occurrence first; 0 keeps everything.
    pub fn preview(&self, max_tokens: usize) -> String {
        let before = if max_tokens == 0 || self.before.len() <= max_tokens {
            &self.before[..]
        } else {
            &self.before[self.before.len() - max_tokens..]
        };
        let after = if max_tokens == 0 || self.after.len() <= max_tokens {
            &self.after[..]
        } else {
            &self.after[..max_tokens]
        };

        let label = format!("[{}]", self.element);
        let mut parts: Vec<&str> = Vec::with_capacity(before.len() + after.len() + 1);
        parts.extend(before.iter().map(String::as_str));
        parts.push(&label);
        parts.extend(after.iter().map(String::as_str));
        parts.join(" ")
    }
}
