use crate::common::lower;
use rinto_parsing::parse_file;
use std::io::Write;
use tempfile::NamedTempFile;
use test_log::test;

mod common;

#[test]
fn lower_declaration_and_if() {
    let (backend, messages) = lower("float x = 1;\nif x > 0 {\n  x++;\n}\n");
    assert!(messages.is_empty(), "{messages:#?}");
    assert_eq!(
        backend.calls,
        [
            "var_dec_statement(x)",
            "assignment_statement(x, 1)",
            "compound_statement(var_dec_statement(x), assignment_statement(x, 1))",
            "enter_scope()",
            "inc_statement((++ x))",
            "leave_scope()",
            "if_statement((cond (> x 0)), [inc_statement((++ x))])",
        ]
    );
}

#[test]
fn lower_precedence() {
    let (backend, messages) = lower("float x = 1 + 2 * 3;");
    assert!(messages.is_empty(), "{messages:#?}");
    assert!(backend
        .calls
        .contains(&"assignment_statement(x, (+ 1 (* 2 3)))".to_string()));
}

#[test]
fn lower_parenthesized() {
    let (backend, messages) = lower("float x = (1 + 2) * 3;");
    assert!(messages.is_empty(), "{messages:#?}");
    assert!(backend
        .calls
        .contains(&"assignment_statement(x, (* (+ 1 2) 3))".to_string()));
}

#[test]
fn lower_empty_for() {
    let (backend, messages) = lower("for ; ; { }");
    assert!(messages.is_empty(), "{messages:#?}");
    assert_eq!(
        backend.calls,
        ["enter_scope()", "leave_scope()", "for_statement(_, _, _, [])"]
    );
}

#[test]
fn lower_for_loop() {
    let (backend, messages) = lower("for float i = 0; i < 3; i++ {\n}\n");
    assert!(messages.is_empty(), "{messages:#?}");
    assert_eq!(
        backend.calls,
        [
            "enter_scope()",
            "var_dec_statement(i)",
            "assignment_statement(i, 0)",
            "compound_statement(var_dec_statement(i), assignment_statement(i, 0))",
            "expression_statement((cond (< i 3)))",
            "inc_statement((++ i))",
            "leave_scope()",
            "for_statement(compound_statement(var_dec_statement(i), assignment_statement(i, 0)), \
             expression_statement((cond (< i 3))), inc_statement((++ i)), [])",
        ]
    );
}

#[test]
fn redefinition_lowers_nothing() {
    let (backend, messages) = lower("float x;\nfloat x;\n");
    assert_eq!(backend.calls, ["var_dec_statement(x)"]);
    assert_eq!(
        messages,
        [
            "error: main.rin:2:7: duplicate definition of 'x'",
            "inform: main.rin:1:7: previous definition of 'x' was here",
        ]
    );
}

#[test]
fn undefined_reference() {
    let (backend, messages) = lower("x = 1;");
    assert!(backend.calls.is_empty());
    assert_eq!(messages, ["error: main.rin:1:1: 'x' is undefined"]);
}

#[test]
fn unmatched_brace_reported_once() {
    let (backend, messages) = lower("float x\nif x > 1 {\n");
    assert_eq!(messages, ["error: main.rin:2:10: unmatched brace"]);
    assert_eq!(backend.calls.len(), 4);
}

#[test]
fn nested_unmatched_braces_are_innermost_first() {
    let (_, messages) = lower("if 1 {\n  if 2 {\n");
    assert_eq!(
        messages,
        [
            "error: main.rin:2:8: unmatched brace",
            "error: main.rin:1:6: unmatched brace",
        ]
    );
}

#[test]
fn invalid_initializer_halts_compound() {
    let (backend, messages) = lower("float x = $\n");
    assert_eq!(backend.calls, ["invalid_statement()"]);
    assert_eq!(messages, ["error: main.rin:1:11: unknown character '$'"]);
}

#[test]
fn independent_errors_are_all_reported() {
    let (backend, messages) = lower("a = 1\nfloat b\nb = c\nb = 2\n");
    assert_eq!(
        messages,
        [
            "error: main.rin:1:1: 'a' is undefined",
            "error: main.rin:3:5: 'c' is undefined",
        ]
    );
    assert_eq!(
        backend.calls,
        ["var_dec_statement(b)", "assignment_statement(b, 2)"]
    );
}

#[test]
fn parse_file_from_disk() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "float y = 2\ny--").unwrap();
    let mut parser = parse_file(file.path(), common::RecordingBackend::default()).unwrap();
    assert_eq!(parser.lower().len(), 2);
    let backend = parser.into_backend();
    assert_eq!(backend.calls.last().map(String::as_str), Some("dec_statement((-- y))"));
}
