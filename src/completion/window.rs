//! Bounded context extraction around a document line.

use serde::{Deserialize, Serialize};

/// Extraction regime for a context window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowMode {
    /// Symmetric span with no markers, used when batch-scanning sites.
    Narrow { before: usize, after: usize },
    /// Large symmetric span with the target line wrapped in a sentinel
    /// token pair, so a generation step can locate the focus line inside
    /// a half-document-sized excerpt without character offsets.
    WideMarked {
        radius: usize,
        marker_prefix: String,
        marker_suffix: String,
    },
}

/// A bounded excerpt plus the absolute line range it was taken from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContextWindow {
    pub text: String,
    pub start_line: usize,
    pub end_line: usize,
}

/// Extract a context window centered on `anchor`. Spans shrink at the
/// document edges; out-of-range anchors clamp to the last line.
pub fn window(text: &str, anchor: usize, mode: &WindowMode) -> ContextWindow {
    let lines: Vec<&str> = text.lines().collect();
    window_lines(&lines, anchor, mode)
}

pub(crate) fn window_lines(lines: &[&str], anchor: usize, mode: &WindowMode) -> ContextWindow {
    if lines.is_empty() {
        return ContextWindow {
            text: String::new(),
            start_line: 0,
            end_line: 0,
        };
    }

    let anchor = anchor.min(lines.len() - 1);
    let (before, after) = match mode {
        WindowMode::Narrow { before, after } => (*before, *after),
        WindowMode::WideMarked { radius, .. } => (*radius, *radius),
    };

    let start = anchor.saturating_sub(before);
    let end = (anchor + after).min(lines.len() - 1);

    let mut out = Vec::with_capacity(end - start + 1);
    for (row, line) in lines.iter().enumerate().take(end + 1).skip(start) {
        if row == anchor {
            if let WindowMode::WideMarked {
                marker_prefix,
                marker_suffix,
                ..
            } = mode
            {
                out.push(format!("{}{}{}", marker_prefix, line, marker_suffix));
                continue;
            }
        }
        out.push((*line).to_string());
    }

    ContextWindow {
        text: out.join("\n"),
        start_line: start,
        end_line: end,
    }
}
