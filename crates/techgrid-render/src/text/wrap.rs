//! Greedy word wrapping into a bounded cell.
//!
//! Overflow is lossy: once the next line would start below the cell, the remaining
//! words are dropped whole (no ellipsis, no partial words).

use super::{TextMeasurer, TextStyle};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WrappedLine {
    pub text: String,
    /// Offset below the first line's baseline, in pixels.
    pub offset: f64,
}

/// Wraps `label` into lines no wider than `max_width_px`, stacked `line_step_px` apart, and
/// stops before a line whose offset would exceed `max_height_px`.
///
/// The first word of every line is placed even if it alone is wider than the cell. A label
/// with no words yields a single empty line.
pub fn wrap_label_to_cell(
    label: &str,
    measurer: &dyn TextMeasurer,
    style: &TextStyle,
    max_width_px: f64,
    max_height_px: f64,
    line_step_px: f64,
) -> Vec<WrappedLine> {
    let mut words: VecDeque<&str> = label.split_whitespace().collect();
    let mut out: Vec<WrappedLine> = Vec::new();
    let mut cur = String::new();

    while let Some(word) = words.pop_front() {
        if cur.is_empty() {
            cur.push_str(word);
            continue;
        }

        let candidate = format!("{cur} {word}");
        if measurer.measure_width(&candidate, style) <= max_width_px {
            cur = candidate;
            continue;
        }

        let offset = out.len() as f64 * line_step_px;
        out.push(WrappedLine {
            text: std::mem::take(&mut cur),
            offset,
        });
        let next_offset = out.len() as f64 * line_step_px;
        if next_offset > max_height_px {
            tracing::trace!(dropped = words.len() + 1, "label truncated at cell height");
            return out;
        }
        words.push_front(word);
    }

    let offset = out.len() as f64 * line_step_px;
    out.push(WrappedLine { text: cur, offset });
    out
}
