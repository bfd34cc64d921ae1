//! Whole-document incompleteness classification.
//!
//! A single pre-order walk over the syntax tree evaluates every predicate
//! on every node. A node may contribute zero, one, or several sites, and
//! there is no early exit. When no grammar binding is available the
//! classifier degrades to a lexical line scan.

use crate::completion::window::{window_lines, WindowMode};
use crate::config;
use crate::syntax::languages::{self, LanguageBinding};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;
use tree_sitter::{Node, Tree};

/// Marker character that turns an inline trailing annotation into a
/// natural-language prompt.
pub(crate) const PROMPT_MARKER: char = '#';

static TODO_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(todo|fixme|implement)\b").expect("todo marker pattern"));

/// Node types checked by the dangling-assignment predicate.
const ASSIGNMENT_TYPES: &[&str] = &[
    "variable_declarator",
    "assignment_expression",
    "assignment",
    "augmented_assignment",
    "let_declaration",
];

/// What made a site look unfinished.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum IncompleteKind {
    NaturalLanguagePrompt,
    TodoComment,
    EmptyBody,
    DanglingControlFlow,
    DanglingAssignment,
    OpenBlockStart,
    EmptyAggregateBody,
}

/// A location judged likely to need generated content. Created fresh per
/// classification pass and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncompleteSite {
    pub line: usize,
    pub kind: IncompleteKind,
    pub raw_line: String,
    pub prompt_text: Option<String>,
    pub context_window: String,
}

/// Classify every incomplete site in a document, ordered by line.
///
/// Uses the default narrow window span for each site's context; call sites
/// with their own spans go through [`classify_with`].
pub fn classify(tree: Option<&Tree>, text: &str, language_id: &str) -> Vec<IncompleteSite> {
    classify_with(
        tree,
        text,
        language_id,
        config::DEFAULT_NARROW_BEFORE,
        config::DEFAULT_NARROW_AFTER,
    )
}

/// Classify with an explicit narrow window span for site context capture.
pub fn classify_with(
    tree: Option<&Tree>,
    text: &str,
    language_id: &str,
    narrow_before: usize,
    narrow_after: usize,
) -> Vec<IncompleteSite> {
    let lines: Vec<&str> = text.lines().collect();
    let narrow = WindowMode::Narrow {
        before: narrow_before,
        after: narrow_after,
    };
    let mut sites = Vec::new();

    // The prompt predicate is lexical in both strategies: an inline ask
    // appended after real code, as opposed to a full-line comment.
    for (row, line) in lines.iter().enumerate() {
        if let Some(prompt) = prompt_in_line(line) {
            push_site(
                &mut sites,
                &lines,
                row,
                IncompleteKind::NaturalLanguagePrompt,
                Some(prompt),
                &narrow,
            );
        }
    }

    match (tree, languages::resolve(language_id)) {
        (Some(tree), Some(binding)) => {
            visit(tree.root_node(), text, binding, &lines, &narrow, &mut sites);
        }
        _ => {
            scan_lines(&lines, &narrow, &mut sites);
        }
    }

    sites.sort_by_key(|site| site.line);
    let mut seen = HashSet::new();
    sites.retain(|site| seen.insert((site.line, site.kind)));

    debug!(
        language = language_id,
        sites = sites.len(),
        "classified incomplete sites"
    );
    sites
}

/// Pre-order traversal: evaluate all predicates on the node, then recurse
/// into each child in source order. Unrecognized node types match nothing;
/// error-recovery nodes are walked like any other.
fn visit(
    node: Node<'_>,
    src: &str,
    binding: &LanguageBinding,
    lines: &[&str],
    narrow: &WindowMode,
    sites: &mut Vec<IncompleteSite>,
) {
    check_todo_comment(node, src, lines, narrow, sites);
    check_empty_body(node, src, binding, lines, narrow, sites);
    check_dangling_control_flow(node, binding, lines, narrow, sites);
    check_dangling_assignment(node, src, lines, narrow, sites);
    check_empty_aggregate(node, lines, narrow, sites);

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        visit(child, src, binding, lines, narrow, sites);
    }
}

fn check_todo_comment(
    node: Node<'_>,
    src: &str,
    lines: &[&str],
    narrow: &WindowMode,
    sites: &mut Vec<IncompleteSite>,
) {
    if node.kind().contains("comment") && TODO_RE.is_match(node_text(node, src)) {
        push_site(
            sites,
            lines,
            node.start_position().row,
            IncompleteKind::TodoComment,
            None,
            narrow,
        );
    }
}

fn check_empty_body(
    node: Node<'_>,
    src: &str,
    binding: &LanguageBinding,
    lines: &[&str],
    narrow: &WindowMode,
    sites: &mut Vec<IncompleteSite>,
) {
    if !binding.is_function_like(node.kind()) {
        return;
    }
    let Some(body) = body_of(node, binding) else {
        return;
    };
    if !body_is_empty(body, src, binding) {
        return;
    }

    let start = body.start_position().row;
    let end = body.end_position().row;
    let first_blank =
        (start + 1..end).find(|&row| lines.get(row).is_some_and(|l| l.trim().is_empty()));

    if let Some(row) = first_blank {
        push_site(sites, lines, row, IncompleteKind::EmptyBody, None, narrow);
        return;
    }

    // No blank interior line: only the literal brace-pair / placeholder
    // body reports, at the body's own line.
    let trimmed = node_text(body, src).trim();
    if trimmed == "{}" || Some(trimmed) == binding.placeholder_body() {
        push_site(sites, lines, start, IncompleteKind::EmptyBody, None, narrow);
    }
}

fn check_dangling_control_flow(
    node: Node<'_>,
    binding: &LanguageBinding,
    lines: &[&str],
    narrow: &WindowMode,
    sites: &mut Vec<IncompleteSite>,
) {
    if !binding.is_control_flow(node.kind()) {
        return;
    }
    let has_body = node.child_by_field_name("body").is_some()
        || node.child_by_field_name("consequence").is_some()
        || {
            let mut cursor = node.walk();
            node.children(&mut cursor)
                .any(|child| binding.is_body_container(child.kind()))
        };
    if !has_body {
        push_site(
            sites,
            lines,
            node.start_position().row,
            IncompleteKind::DanglingControlFlow,
            None,
            narrow,
        );
    }
}

fn check_dangling_assignment(
    node: Node<'_>,
    src: &str,
    lines: &[&str],
    narrow: &WindowMode,
    sites: &mut Vec<IncompleteSite>,
) {
    if ASSIGNMENT_TYPES.contains(&node.kind())
        && ends_with_assignment_operator(node_text(node, src))
    {
        push_site(
            sites,
            lines,
            node.start_position().row,
            IncompleteKind::DanglingAssignment,
            None,
            narrow,
        );
    }
}

fn check_empty_aggregate(
    node: Node<'_>,
    lines: &[&str],
    narrow: &WindowMode,
    sites: &mut Vec<IncompleteSite>,
) {
    if !is_aggregate_declaration(node.kind()) {
        return;
    }
    let next = node.start_position().row + 1;
    if let Some(line) = lines.get(next) {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed == "}" {
            push_site(
                sites,
                lines,
                next,
                IncompleteKind::EmptyAggregateBody,
                None,
                narrow,
            );
        }
    }
}

/// Lexical fallback for languages with no grammar binding. Open block
/// starts are only reported here; the tree strategy covers those lines
/// structurally and must not double-report them.
fn scan_lines(lines: &[&str], narrow: &WindowMode, sites: &mut Vec<IncompleteSite>) {
    for (row, line) in lines.iter().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if TODO_RE.is_match(line) {
            push_site(sites, lines, row, IncompleteKind::TodoComment, None, narrow);
        }
        if trimmed.ends_with('{') || trimmed.ends_with('(') {
            push_site(
                sites,
                lines,
                row,
                IncompleteKind::OpenBlockStart,
                None,
                narrow,
            );
        }
        if ends_with_assignment_operator(line) {
            push_site(
                sites,
                lines,
                row,
                IncompleteKind::DanglingAssignment,
                None,
                narrow,
            );
        }
    }
}

fn push_site(
    sites: &mut Vec<IncompleteSite>,
    lines: &[&str],
    row: usize,
    kind: IncompleteKind,
    prompt_text: Option<String>,
    narrow: &WindowMode,
) {
    // Invariant: every reported line is a valid index into the document.
    let Some(raw_line) = lines.get(row) else {
        return;
    };
    let context = window_lines(lines, row, narrow);
    sites.push(IncompleteSite {
        line: row,
        kind,
        raw_line: (*raw_line).to_string(),
        prompt_text,
        context_window: context.text,
    });
}

/// An inline prompt: the marker present but not as the line's first
/// non-whitespace character, with non-empty text after it.
fn prompt_in_line(line: &str) -> Option<String> {
    let idx = line.find(PROMPT_MARKER)?;
    if line[..idx].trim().is_empty() {
        return None;
    }
    let rest = line[idx + PROMPT_MARKER.len_utf8()..].trim();
    if rest.is_empty() {
        return None;
    }
    Some(rest.to_string())
}

/// Locate a node's body: the explicit body field when the grammar exposes
/// one, otherwise the first child with a body-container type.
pub(crate) fn body_of<'a>(node: Node<'a>, binding: &LanguageBinding) -> Option<Node<'a>> {
    if let Some(body) = node.child_by_field_name("body") {
        return Some(body);
    }
    let mut cursor = node.walk();
    node.children(&mut cursor)
        .find(|child| binding.is_body_container(child.kind()))
}

/// A body is empty when its trimmed text is a bare brace pair, the
/// language's placeholder keyword, or it has no named non-comment children.
pub(crate) fn body_is_empty(body: Node<'_>, src: &str, binding: &LanguageBinding) -> bool {
    let trimmed = node_text(body, src).trim();
    if trimmed == "{}" {
        return true;
    }
    if let Some(placeholder) = binding.placeholder_body() {
        if trimmed == placeholder {
            return true;
        }
    }
    let mut cursor = body.walk();
    !body
        .named_children(&mut cursor)
        .any(|child| !child.kind().contains("comment"))
}

pub(crate) fn ends_with_assignment_operator(text: &str) -> bool {
    let trimmed = text.trim_end();
    trimmed.ends_with('=')
        && !trimmed.ends_with("==")
        && !trimmed.ends_with("!=")
        && !trimmed.ends_with(">=")
        && !trimmed.ends_with("<=")
}

pub(crate) fn is_todo_line(line: &str) -> bool {
    TODO_RE.is_match(line)
}

fn is_aggregate_declaration(kind: &str) -> bool {
    (kind.contains("class")
        || kind.contains("interface")
        || kind.contains("struct")
        || kind.contains("enum"))
        && (kind.contains("declaration") || kind.contains("definition") || kind.contains("item"))
}

pub(crate) fn node_text<'a>(node: Node<'_>, src: &'a str) -> &'a str {
    node.utf8_text(src.as_bytes()).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_requires_text_after_marker() {
        assert_eq!(prompt_in_line("x = 5 # sum the list"), Some("sum the list".to_string()));
        assert_eq!(prompt_in_line("x = 5 #   "), None);
    }

    #[test]
    fn full_line_comment_is_not_a_prompt() {
        assert_eq!(prompt_in_line("# just a comment"), None);
        assert_eq!(prompt_in_line("   # indented comment"), None);
    }

    #[test]
    fn assignment_operator_detection() {
        assert!(ends_with_assignment_operator("let x ="));
        assert!(ends_with_assignment_operator("total += "));
        assert!(!ends_with_assignment_operator("if a == "));
        assert!(!ends_with_assignment_operator("let x = 1;"));
        assert!(!ends_with_assignment_operator(""));
    }

    #[test]
    fn fallback_scan_reports_lexical_sites() {
        let text = "int main() {\nx = \n# full line comment\ny = compute()  # then print it\nTODO: cleanup\n";
        let sites = classify(None, text, "cobol");

        let kinds: Vec<(usize, IncompleteKind)> =
            sites.iter().map(|s| (s.line, s.kind)).collect();
        assert!(kinds.contains(&(0, IncompleteKind::OpenBlockStart)));
        assert!(kinds.contains(&(1, IncompleteKind::DanglingAssignment)));
        assert!(kinds.contains(&(3, IncompleteKind::NaturalLanguagePrompt)));
        assert!(kinds.contains(&(4, IncompleteKind::TodoComment)));
        assert!(!kinds.iter().any(|(line, _)| *line == 2));

        let prompt = sites
            .iter()
            .find(|s| s.kind == IncompleteKind::NaturalLanguagePrompt)
            .expect("prompt site");
        assert_eq!(prompt.prompt_text.as_deref(), Some("then print it"));
        assert_eq!(prompt.raw_line, "y = compute()  # then print it");
    }

    #[test]
    fn fallback_scan_dedupes_repeated_kinds_per_line() {
        // A TODO line that also ends with an open brace yields two distinct
        // kinds for one line, but never the same kind twice.
        let text = "// TODO: finish {\n";
        let sites = classify(None, text, "unknown-lang");
        let mut pairs: Vec<(usize, IncompleteKind)> =
            sites.iter().map(|s| (s.line, s.kind)).collect();
        let before = pairs.len();
        pairs.dedup();
        assert_eq!(before, pairs.len());
        assert!(pairs.contains(&(0, IncompleteKind::TodoComment)));
        assert!(pairs.contains(&(0, IncompleteKind::OpenBlockStart)));
    }

    #[test]
    fn empty_document_yields_no_sites() {
        assert!(classify(None, "", "typescript").is_empty());
        assert!(classify(None, "", "not-a-language").is_empty());
    }
}
