//! Span merging: collapse runs of adjacent same-label spans.
//!
//! Prediction models emit entities fragmented by tokenization: `"Anna"` and
//! `"Hansen"` as two `PER` spans one character apart instead of one
//! `"Anna Hansen"`. The merger walks each task's first prediction set in
//! start-offset order and absorbs every span that continues the current one
//! (same first label, gap of at most [`MergeOptions::max_gap`] characters),
//! re-slicing the merged surface text from the document and discarding the
//! confidence score, which no longer describes a single model output.
//!
//! The pass is pure and single-threaded; each task is transformed
//! independently and input order is preserved.

use tracing::debug;

use crate::offset::CharMap;
use crate::task::{SpanResult, Task};

/// Default maximum character gap bridged by a merge.
pub const DEFAULT_MAX_GAP: usize = 2;

/// Policy knobs for a merge pass.
#[derive(Debug, Clone)]
pub struct MergeOptions {
    /// Drop tasks whose first prediction set has no spans after merging.
    ///
    /// Used when rewriting review-tool import files so reviewers are not
    /// handed empty tasks; raw model output keeps every task for inspection.
    pub remove_empty: bool,
    /// Largest gap (in characters) between two same-label spans that still
    /// merges them. The gap is `next.start - current.end`; overlapping spans
    /// (negative gap) never merge.
    pub max_gap: usize,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            remove_empty: false,
            max_gap: DEFAULT_MAX_GAP,
        }
    }
}

impl MergeOptions {
    /// Options with defaults: keep empty tasks, gap threshold of 2.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the empty-task removal policy.
    #[must_use]
    pub fn with_remove_empty(mut self, remove_empty: bool) -> Self {
        self.remove_empty = remove_empty;
        self
    }

    /// Set the gap threshold.
    #[must_use]
    pub fn with_max_gap(mut self, max_gap: usize) -> Self {
        self.max_gap = max_gap;
        self
    }
}

/// Merge spans in every task of a collection.
///
/// Tasks come back in input order. When `remove_empty` is set, tasks left
/// with no spans are dropped, so the output may be shorter than the input;
/// otherwise the lengths are equal.
#[must_use]
pub fn merge_tasks(tasks: Vec<Task>, opts: &MergeOptions) -> Vec<Task> {
    let before = tasks.len();
    let out: Vec<Task> = tasks
        .into_iter()
        .filter_map(|task| merge_task(task, opts))
        .collect();
    debug!(
        retained = out.len(),
        removed = before - out.len(),
        "merged task collection"
    );
    out
}

/// Merge spans in a single task.
///
/// Returns `None` when the task is dropped under `remove_empty`. A task with
/// no usable text is passed through unchanged regardless of policy: the
/// merged surface text cannot be recomputed without it, so merging is
/// skipped rather than guessed at.
pub fn merge_task(mut task: Task, opts: &MergeOptions) -> Option<Task> {
    if !task.has_spans() {
        return (!opts.remove_empty).then_some(task);
    }
    let Some(text) = task.data.text.clone().filter(|t| !t.is_empty()) else {
        return Some(task);
    };

    let spans = task
        .predictions
        .first_mut()
        .map(|p| std::mem::take(&mut p.result))
        .unwrap_or_default();
    let merged = merge_spans(spans, &text, opts.max_gap);

    if opts.remove_empty && merged.is_empty() {
        return None;
    }
    if let Some(prediction) = task.predictions.first_mut() {
        prediction.result = merged;
    }
    Some(task)
}

/// Merge one result sequence against its document text.
///
/// Spans are stably sorted by start offset (ties keep their input order),
/// then walked once. Unlabeled spans are dropped and do not take part in the
/// adjacency math: the spans flanking a dropped one merge only if their own
/// gap is within the threshold.
///
/// The current candidate is an owned value, so extending it is never
/// observable through spans already flushed to the output.
#[must_use]
pub fn merge_spans(mut spans: Vec<SpanResult>, text: &str, max_gap: usize) -> Vec<SpanResult> {
    spans.sort_by_key(|s| s.value.start);
    let map = CharMap::new(text);

    let before = spans.len();
    let mut merged: Vec<SpanResult> = Vec::with_capacity(spans.len());
    let mut current: Option<SpanResult> = None;

    for span in spans {
        if span.first_label().is_none() {
            continue;
        }
        current = Some(match current {
            None => span,
            Some(mut cur) => {
                if continues(&cur, &span, max_gap) {
                    cur.value.end = span.value.end;
                    cur.value.text =
                        Some(map.slice(text, cur.value.start, cur.value.end).to_owned());
                    cur.value.score = None;
                    cur
                } else {
                    merged.push(cur);
                    span
                }
            }
        });
    }
    if let Some(cur) = current {
        merged.push(cur);
    }

    debug!(before, after = merged.len(), "merged span sequence");
    merged
}

/// Whether `next` extends `cur`: same first label, gap within threshold.
fn continues(cur: &SpanResult, next: &SpanResult, max_gap: usize) -> bool {
    if cur.first_label() != next.first_label() {
        return false;
    }
    let gap = next.value.start as i64 - cur.value.end as i64;
    gap >= 0 && gap <= max_gap as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scored(start: usize, end: usize, label: &str, score: f64) -> SpanResult {
        let mut span = SpanResult::labeled(start, end, label);
        span.value.score = Some(score);
        span
    }

    fn unlabeled(start: usize, end: usize) -> SpanResult {
        let mut span = SpanResult::labeled(start, end, "X");
        span.value.labels.clear();
        span
    }

    #[test]
    fn gap_within_threshold_merges() {
        let spans = vec![
            SpanResult::labeled(0, 2, "X"),
            SpanResult::labeled(3, 5, "X"),
        ];
        let merged = merge_spans(spans, "ABCDEFGH", DEFAULT_MAX_GAP);

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].value.start, 0);
        assert_eq!(merged[0].value.end, 5);
        assert_eq!(merged[0].value.text.as_deref(), Some("ABCDE"));
    }

    #[test]
    fn gap_beyond_threshold_stays_split() {
        let spans = vec![
            SpanResult::labeled(0, 2, "X"),
            SpanResult::labeled(6, 8, "X"),
        ];
        let merged = merge_spans(spans, "ABCDEFGH", DEFAULT_MAX_GAP);

        assert_eq!(merged.len(), 2);
        assert_eq!((merged[0].value.start, merged[0].value.end), (0, 2));
        assert_eq!((merged[1].value.start, merged[1].value.end), (6, 8));
    }

    #[test]
    fn different_labels_never_merge() {
        let spans = vec![
            SpanResult::labeled(0, 2, "X"),
            SpanResult::labeled(2, 4, "Y"),
        ];
        let merged = merge_spans(spans, "ABCDEFGH", DEFAULT_MAX_GAP);
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn overlap_never_merges() {
        // Negative gap: same label but the candidate starts before the
        // current span ends.
        let spans = vec![
            SpanResult::labeled(0, 4, "X"),
            SpanResult::labeled(2, 6, "X"),
        ];
        let merged = merge_spans(spans, "ABCDEFGH", DEFAULT_MAX_GAP);
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn score_dropped_on_merge_only() {
        let spans = vec![
            scored(0, 2, "X", 0.9),
            scored(3, 5, "X", 0.8),
            scored(7, 8, "Y", 0.7),
        ];
        let merged = merge_spans(spans, "ABCDEFGH", DEFAULT_MAX_GAP);

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].value.score, None);
        assert_eq!(merged[1].value.score, Some(0.7));
    }

    #[test]
    fn unlabeled_span_is_dropped_not_bridged() {
        // The unlabeled span sits between two mergeable X spans; it must
        // vanish without contributing its own position to the gap math.
        let spans = vec![
            SpanResult::labeled(0, 2, "X"),
            unlabeled(2, 3),
            SpanResult::labeled(3, 5, "X"),
        ];
        let merged = merge_spans(spans, "ABCDEFGH", DEFAULT_MAX_GAP);

        assert_eq!(merged.len(), 1);
        assert_eq!((merged[0].value.start, merged[0].value.end), (0, 5));
    }

    #[test]
    fn unlabeled_span_does_not_fake_adjacency() {
        // Flanking spans are 4 apart; the dropped span in the middle must not
        // let them merge.
        let spans = vec![
            SpanResult::labeled(0, 2, "X"),
            unlabeled(3, 5),
            SpanResult::labeled(6, 8, "X"),
        ];
        let merged = merge_spans(spans, "ABCDEFGH", DEFAULT_MAX_GAP);
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn unsorted_input_is_sorted_first() {
        let spans = vec![
            SpanResult::labeled(3, 5, "X"),
            SpanResult::labeled(0, 2, "X"),
        ];
        let merged = merge_spans(spans, "ABCDEFGH", DEFAULT_MAX_GAP);

        assert_eq!(merged.len(), 1);
        assert_eq!((merged[0].value.start, merged[0].value.end), (0, 5));
    }

    #[test]
    fn chain_of_three_collapses() {
        let spans = vec![
            SpanResult::labeled(0, 2, "X"),
            SpanResult::labeled(2, 4, "X"),
            SpanResult::labeled(5, 8, "X"),
        ];
        let merged = merge_spans(spans, "ABCDEFGH", DEFAULT_MAX_GAP);

        assert_eq!(merged.len(), 1);
        assert_eq!((merged[0].value.start, merged[0].value.end), (0, 8));
        assert_eq!(merged[0].value.text.as_deref(), Some("ABCDEFGH"));
    }

    #[test]
    fn merged_text_respects_char_offsets() {
        // Multi-byte text: offsets are characters, not bytes.
        let text = "æøå bæredygtighedsrapport";
        let spans = vec![
            SpanResult::labeled(0, 3, "ORG"),
            SpanResult::labeled(4, 9, "ORG"),
        ];
        let merged = merge_spans(spans, text, DEFAULT_MAX_GAP);

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].value.text.as_deref(), Some("æøå bæred"));
    }

    #[test]
    fn zero_gap_custom_threshold() {
        let spans = vec![
            SpanResult::labeled(0, 2, "X"),
            SpanResult::labeled(3, 5, "X"),
        ];
        // gap of 1 exceeds a max_gap of 0
        let merged = merge_spans(spans, "ABCDEFGH", 0);
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn empty_input_empty_output() {
        let merged = merge_spans(Vec::new(), "ABCDEFGH", DEFAULT_MAX_GAP);
        assert!(merged.is_empty());
    }
}
