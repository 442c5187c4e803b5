//! Label Studio task structures.
//!
//! A task file is a JSON array of [`Task`] objects, each carrying the document
//! text under `data.text` and zero or more model outputs under `predictions`.
//! Only the fields this crate acts on are modeled as typed fields; everything
//! else (`id`, `annotations`, `from_name`, ...) is preserved verbatim through
//! flattened maps so that rewritten files stay loadable by the review tool.
//!
//! Absent optional fields deserialize to empty defaults rather than failing:
//! a task without `predictions` simply has none to merge. Wrong-typed fields
//! are a decode error and abort the run before any output is written.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One annotated unit of text with its prediction sets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Task payload; `data.text` is the document text spans index into.
    #[serde(default)]
    pub data: TaskData,
    /// Prediction sets. Only the first is read or mutated.
    #[serde(default)]
    pub predictions: Vec<Prediction>,
    /// All other task fields, passed through unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Task {
    /// Whether the first prediction set has any result spans.
    #[must_use]
    pub fn has_spans(&self) -> bool {
        self.predictions.first().is_some_and(|p| !p.result.is_empty())
    }
}

/// The `data` object of a task.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskData {
    /// Raw document text. Character offsets in span values index into this.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Other data fields, passed through unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One model's output for a task: an ordered sequence of result spans.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Labeled spans produced by the model.
    #[serde(default)]
    pub result: Vec<SpanResult>,
    /// Other prediction fields (`model_version`, `score`, ...), passed through.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One labeled region in a prediction's result list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpanResult {
    /// The span itself: offsets, labels, optional score and surface text.
    pub value: SpanValue,
    /// Other result fields (`id`, `from_name`, `to_name`, `type`, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SpanResult {
    /// Create a result span with a single label and no score or text.
    ///
    /// Mostly useful in tests and small drivers.
    #[must_use]
    pub fn labeled(start: usize, end: usize, label: impl Into<String>) -> Self {
        SpanResult {
            value: SpanValue {
                start,
                end,
                labels: vec![label.into()],
                score: None,
                text: None,
                extra: Map::new(),
            },
            extra: Map::new(),
        }
    }

    /// The first label, if present and non-empty.
    ///
    /// Only the first label is meaningful to the merger; a span whose label
    /// list is empty (or whose first label is the empty string) is dropped.
    #[must_use]
    pub fn first_label(&self) -> Option<&str> {
        self.value
            .labels
            .first()
            .map(String::as_str)
            .filter(|l| !l.is_empty())
    }
}

/// The `value` object of a result span.
///
/// `start` and `end` are character offsets into the task text, start
/// inclusive and end exclusive, as Label Studio counts them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpanValue {
    /// Start offset (character index, inclusive).
    pub start: usize,
    /// End offset (character index, exclusive).
    pub end: usize,
    /// Label sequence; only the first entry is meaningful.
    #[serde(default)]
    pub labels: Vec<String>,
    /// Model confidence. Removed once the span absorbs a neighbor, since a
    /// merged span no longer has a single valid score.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    /// Materialized substring of the task text covered by `[start, end)`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Other value fields, passed through unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SpanValue {
    /// Span length in characters.
    #[must_use]
    pub fn char_len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }
}
