//! Cursor gating against real grammars.

use ghostwriter::{decide, GateReason, ParserPool};
use tree_sitter::Point;

fn gate(text: &str, language: &str, row: usize, column: usize) -> ghostwriter::GateDecision {
    let mut pool = ParserPool::new().expect("parser pool");
    let tree = pool.parse(text, language);
    decide(tree.as_ref(), text, Point::new(row, column), language)
}

#[test]
fn blank_line_inside_empty_function_is_eligible() {
    let decision = gate("function f() {\n\n}\n", "typescript", 1, 0);
    assert!(decision.should_suggest);
    assert_eq!(decision.reason, GateReason::InsideEmptyBody);
}

#[test]
fn blank_line_outside_any_function_is_skipped() {
    let decision = gate("const a = 1;\n\n", "typescript", 1, 0);
    assert!(!decision.should_suggest);
    assert_eq!(decision.reason, GateReason::EmptyOutsideFunction);
}

#[test]
fn blank_line_inside_non_empty_function_is_skipped() {
    let decision = gate(
        "function f() {\n    const x = 1;\n\n}\n",
        "typescript",
        2,
        0,
    );
    assert!(!decision.should_suggest);
    assert_eq!(decision.reason, GateReason::EmptyOutsideFunction);
}

#[test]
fn cursor_mid_token_is_skipped() {
    // "functio|n foo"
    let decision = gate("function foo", "typescript", 0, 7);
    assert!(!decision.should_suggest);
    assert_eq!(decision.reason, GateReason::MidToken);
}

#[test]
fn prompt_marker_before_cursor_disables_mid_token_skip() {
    // "x # ab|cd": the user is writing an inline prompt, not an identifier.
    let decision = gate("x # abcd", "typescript", 0, 6);
    assert!(decision.should_suggest);
}

#[test]
fn terminated_expression_statement_is_complete() {
    let decision = gate("foo();\n", "typescript", 0, 6);
    assert!(!decision.should_suggest);
    assert_eq!(decision.reason, GateReason::CompleteStatement);
}

#[test]
fn initialized_declaration_is_complete() {
    let decision = gate("let y = 1;\n", "typescript", 0, 10);
    assert!(!decision.should_suggest);
    assert_eq!(decision.reason, GateReason::CompleteStatement);
}

#[test]
fn cursor_inside_string_is_skipped() {
    let decision = gate("const s = \"hello world\";\n", "typescript", 0, 17);
    assert!(!decision.should_suggest);
    assert_eq!(decision.reason, GateReason::InsideStringOrComment);
}

#[test]
fn plain_comment_is_skipped_but_todo_comment_is_not() {
    let decision = gate("// just notes\n", "typescript", 0, 8);
    assert!(!decision.should_suggest);
    assert_eq!(decision.reason, GateReason::InsideStringOrComment);

    let decision = gate("// TODO: finish the parser\n", "typescript", 0, 9);
    assert!(decision.should_suggest);
}

#[test]
fn unsupported_language_stays_optimistic() {
    let decision = gate("x = 1\n", "cobol", 0, 5);
    assert!(decision.should_suggest);
    assert_eq!(decision.reason, GateReason::Eligible);

    // Even on a blank line: no enclosing-function check is possible, so the
    // degraded mode never skips.
    let decision = gate("x = 1\n\n", "cobol", 1, 0);
    assert!(decision.should_suggest);
    assert_eq!(decision.reason, GateReason::Eligible);
}

#[test]
fn decide_is_pure() {
    let mut pool = ParserPool::new().expect("parser pool");
    let text = "function f() {\n\n}\n";
    let tree = pool.parse(text, "typescript");
    let first = decide(tree.as_ref(), text, Point::new(1, 0), "typescript");
    let second = decide(tree.as_ref(), text, Point::new(1, 0), "typescript");
    assert_eq!(first, second);
}

#[test]
fn out_of_range_positions_do_not_panic() {
    let decision = gate("const a = 1;\n", "typescript", 99, 99);
    // Past the end of the document the line is blank and no function
    // encloses it.
    assert!(!decision.should_suggest);
    assert_eq!(decision.reason, GateReason::EmptyOutsideFunction);
}
