//! # spanmerge
//!
//! Merge adjacent same-label annotation spans in Label Studio task files.
//!
//! Prediction models fragment entities at token boundaries: `"Anna Hansen"`
//! comes back as two `PER` spans split by a space. This crate normalizes each
//! task's first prediction set so reviewers see whole entities, merging runs
//! of same-label spans separated by at most two characters (configurable) and
//! recomputing the merged surface text from the document.
//!
//! ## Quick Start
//!
//! ```rust
//! use spanmerge::{merge_tasks, MergeOptions, SpanResult, Task};
//!
//! let tasks: Vec<Task> = serde_json::from_str(r#"[{
//!     "data": { "text": "Anna Hansen" },
//!     "predictions": [{ "result": [
//!         { "value": { "start": 0, "end": 4, "labels": ["PER"] } },
//!         { "value": { "start": 5, "end": 11, "labels": ["PER"] } }
//!     ]}]
//! }]"#).unwrap();
//!
//! let merged = merge_tasks(tasks, &MergeOptions::new());
//! let span = &merged[0].predictions[0].result[0];
//! assert_eq!((span.value.start, span.value.end), (0, 11));
//! assert_eq!(span.value.text.as_deref(), Some("Anna Hansen"));
//! ```
//!
//! ## Policies
//!
//! One flag, [`MergeOptions::remove_empty`], distinguishes the two callers:
//!
//! | Caller | `remove_empty` | Why |
//! |--------|----------------|-----|
//! | Raw model output | `false` | Keep every task for downstream inspection |
//! | Review-tool import | `true` | Don't clutter reviewers with empty tasks |
//!
//! ## Design
//!
//! - Offsets are **character** indices (Label Studio convention); merged text
//!   is re-sliced through a per-document char-to-byte map ([`offset`]).
//! - Absent optional fields (`predictions`, `text`, `score`, `labels`) are
//!   default-empty, never errors; unknown JSON fields round-trip untouched.
//! - The pass is pure: no global state, tasks processed independently in
//!   input order.

#![warn(missing_docs)]

pub mod cli;
mod error;
pub mod merge;
pub mod offset;
pub mod task;

pub use error::{Error, Result};
pub use merge::{merge_spans, merge_task, merge_tasks, MergeOptions, DEFAULT_MAX_GAP};
pub use task::{Prediction, SpanResult, SpanValue, Task, TaskData};

pub mod prelude {
    //! Commonly used items, re-exported for convenience.
    //!
    //! ```rust
    //! use spanmerge::prelude::*;
    //!
    //! let opts = MergeOptions::new().with_remove_empty(true);
    //! let merged = merge_tasks(Vec::new(), &opts);
    //! assert!(merged.is_empty());
    //! ```
    pub use crate::error::{Error, Result};
    pub use crate::merge::{merge_tasks, MergeOptions, DEFAULT_MAX_GAP};
    pub use crate::task::{Prediction, SpanResult, SpanValue, Task, TaskData};
}
