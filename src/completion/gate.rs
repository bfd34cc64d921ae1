//! Point-query completion gating.
//!
//! Unlike the classifier's inclusive enumeration, the gate is an exclusive
//! priority chain: the first matching rule wins. Cost is O(tree depth) via
//! a descendant lookup plus an upward parent walk; never a full scan.

use crate::completion::classifier::{
    body_is_empty, body_of, ends_with_assignment_operator, is_todo_line, node_text, PROMPT_MARKER,
};
use crate::syntax::languages;
use serde::{Deserialize, Serialize};
use tracing::trace;
use tree_sitter::{Point, Tree};

/// Statement types that read as already complete once terminated.
const COMPLETE_STATEMENT_TYPES: &[&str] = &[
    "expression_statement",
    "return_statement",
    "throw_statement",
    "break_statement",
    "continue_statement",
    "debugger_statement",
];

/// Variable and lexical declaration types checked for a bare trailing
/// assignment operator.
const DECLARATION_TYPES: &[&str] = &[
    "variable_declaration",
    "lexical_declaration",
    "let_declaration",
    "local_variable_declaration",
    "short_var_declaration",
    "var_declaration",
    "const_item",
    "static_item",
    "const_declaration",
];

/// Why the gate decided the way it did.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum GateReason {
    EmptyOutsideFunction,
    MidToken,
    CompleteStatement,
    InsideStringOrComment,
    InsideEmptyBody,
    Eligible,
}

/// The suggest/skip decision for one cursor position. Pure function of its
/// inputs; nothing is persisted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct GateDecision {
    pub should_suggest: bool,
    pub reason: GateReason,
}

impl GateDecision {
    fn suggest(reason: GateReason) -> Self {
        Self {
            should_suggest: true,
            reason,
        }
    }

    fn skip(reason: GateReason) -> Self {
        Self {
            should_suggest: false,
            reason,
        }
    }
}

/// Decide whether invoking the assistant at `position` is worthwhile.
///
/// Without a tree or binding every position is `Eligible`, including blank
/// lines: with no structural skip reasons computable, the degraded mode
/// stays optimistic.
pub fn decide(
    tree: Option<&Tree>,
    text: &str,
    position: Point,
    language_id: &str,
) -> GateDecision {
    let decision = decide_inner(tree, text, position, language_id);
    trace!(
        row = position.row,
        column = position.column,
        suggest = decision.should_suggest,
        reason = ?decision.reason,
        "gate decision"
    );
    decision
}

fn decide_inner(
    tree: Option<&Tree>,
    text: &str,
    position: Point,
    language_id: &str,
) -> GateDecision {
    let (Some(tree), Some(binding)) = (tree, languages::resolve(language_id)) else {
        return GateDecision::suggest(GateReason::Eligible);
    };

    let lines: Vec<&str> = text.lines().collect();
    let line = lines.get(position.row).copied().unwrap_or("");
    let mut col = position.column.min(line.len());
    while col > 0 && !line.is_char_boundary(col) {
        col -= 1;
    }
    let before_cursor = &line[..col];
    let after_cursor = &line[col..];

    // Rule 1: a blank line suggests intent only inside an empty function
    // body; stray blank lines elsewhere are skipped.
    if before_cursor.trim().is_empty() {
        let mut current = tree
            .root_node()
            .named_descendant_for_point_range(position, position);
        while let Some(node) = current {
            if binding.is_function_like(node.kind()) {
                if let Some(body) = body_of(node, binding) {
                    if body_is_empty(body, text, binding) {
                        return GateDecision::suggest(GateReason::InsideEmptyBody);
                    }
                }
                break;
            }
            current = node.parent();
        }
        return GateDecision::skip(GateReason::EmptyOutsideFunction);
    }

    // Rule 2: don't interrupt normal typing mid-token, unless the user is
    // writing an inline prompt.
    let is_word = |c: char| c.is_alphanumeric() || c == '_';
    if let (Some(prev), Some(next)) = (
        before_cursor.chars().next_back(),
        after_cursor.chars().next(),
    ) {
        if is_word(prev) && is_word(next) && !before_cursor.contains(PROMPT_MARKER) {
            return GateDecision::skip(GateReason::MidToken);
        }
    }

    if let Some(node) = tree
        .root_node()
        .named_descendant_for_point_range(position, position)
    {
        let kind = node.kind();
        let text_of_node = node_text(node, text);

        // Rule 3: already-complete constructs.
        if COMPLETE_STATEMENT_TYPES.contains(&kind)
            && (text_of_node.trim_end().ends_with(';')
                || cursor_at_or_after_trimmed_end(text_of_node, node.start_position(), position))
        {
            return GateDecision::skip(GateReason::CompleteStatement);
        }
        if binding.is_function_like(kind) {
            if let Some(body) = body_of(node, binding) {
                if !body_is_empty(body, text, binding) {
                    return GateDecision::skip(GateReason::CompleteStatement);
                }
            }
        }
        if DECLARATION_TYPES.contains(&kind) && !ends_with_assignment_operator(text_of_node) {
            return GateDecision::skip(GateReason::CompleteStatement);
        }

        // Rule 4: strings always skip; comments skip unless they carry a
        // TODO-style marker.
        if kind.contains("string") || (kind.contains("comment") && !is_todo_line(line)) {
            return GateDecision::skip(GateReason::InsideStringOrComment);
        }
    }

    GateDecision::suggest(GateReason::Eligible)
}

/// Whether the cursor sits at or past the last non-whitespace character of
/// a node's text.
fn cursor_at_or_after_trimmed_end(node_text: &str, node_start: Point, cursor: Point) -> bool {
    let trimmed = node_text.trim_end();
    if trimmed.is_empty() {
        return true;
    }
    let mut row = node_start.row;
    let mut column = node_start.column;
    for ch in trimmed.chars() {
        if ch == '\n' {
            row += 1;
            column = 0;
        } else {
            column += ch.len_utf8();
        }
    }
    cursor.row > row || (cursor.row == row && cursor.column >= column)
}
