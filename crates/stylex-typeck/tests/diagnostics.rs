//! Tests for rendered type error diagnostics.
//!
//! Each test triggers a specific type error through a signature check,
//! renders it through the ariadne pipeline, and checks that the report
//! carries the error code, the message, the label and the help line.

use stylex_typeck::diagnostics::{json_diagnostic, render_diagnostic};
use stylex_typeck::signature::Signature;
use stylex_typeck::{check_annotation, Type};

// ── Helpers ────────────────────────────────────────────────────────────

fn signature(json: &str) -> Signature {
    serde_json::from_str(json).expect("valid test signature")
}

/// Check a call and render its first error.
fn render_first_error(sig: &Signature, args: &[&str]) -> String {
    let (source, check) = sig.check_source(args);
    assert!(
        !check.errors.is_empty(),
        "expected at least one error for args: {:?}",
        args
    );
    render_diagnostic(&check.errors[0], &source)
}

fn assert_contains(output: &str, needles: &[&str]) {
    for needle in needles {
        assert!(
            output.contains(needle),
            "expected diagnostic to contain {:?}, got:\n{}",
            needle,
            output
        );
    }
}

// ── Diagnostic Tests ───────────────────────────────────────────────────

/// Argument kind mismatch points at the argument.
#[test]
fn test_diag_argument_mismatch() {
    let sig = signature(r#"{"name": "upcase", "params": {"fixed": ["string"]}, "result": "string"}"#);
    let output = render_first_error(&sig, &["number"]);
    assert_contains(
        &output,
        &[
            "E0001",
            "Expected string but found number instead.",
            "upcase(number)",
            "argument 1 expected string, found number",
        ],
    );
}

/// Array length mismatch explains the length.
#[test]
fn test_diag_length_mismatch() {
    let sig = signature(
        r#"{"name": "rgb", "params": {"fixed": ["array<number, 3>"]}, "result": "object"}"#,
    );
    let output = render_first_error(&sig, &["array<number, 4>"]);
    assert_contains(
        &output,
        &[
            "Expected array<number, 3> but found array<number, 4> instead.",
            "expected exactly 3 item(s), found 4",
        ],
    );
}

/// Nested item mismatch names the innermost item types.
#[test]
fn test_diag_nested_item_mismatch() {
    let sig = signature(
        r#"{"name": "flatten", "params": {"fixed": ["array<array<T>>"]}, "result": "array<T>"}"#,
    );
    let output = render_first_error(&sig, &["array<string>"]);
    assert_contains(
        &output,
        &[
            "(Expected array<T> but found string instead.)",
            "item type string does not match array<T>",
        ],
    );
}

/// Wrong argument count.
#[test]
fn test_diag_arity_mismatch() {
    let sig = signature(r#"{"name": "at", "params": {"fixed": ["number", "array<T>"]}, "result": "T"}"#);
    let output = render_first_error(&sig, &["number"]);
    assert_contains(
        &output,
        &[
            "E0002",
            "Expected 2 arguments, but found 1 instead.",
            "missing 1 argument(s)",
        ],
    );
}

/// Malformed argument annotation.
#[test]
fn test_diag_invalid_annotation() {
    let sig = signature(r#"{"name": "length", "params": {"fixed": ["array"]}, "result": "number"}"#);
    let output = render_first_error(&sig, &["array<number;"]);
    assert_contains(
        &output,
        &["E0003", "invalid type annotation: unexpected character: ';'"],
    );
}

/// Value union failure lists the members.
#[test]
fn test_diag_value_mismatch() {
    let err = check_annotation("value", &Type::typename("T")).unwrap_err();
    let output = render_diagnostic(&err, "value");
    assert_contains(
        &output,
        &[
            "Expected value but found T instead.",
            "expected value from annotation",
            "value accepts null, boolean, number, string, object or array<value>",
        ],
    );
}

/// JSON output carries the same information as the rendered report.
#[test]
fn test_diag_json() {
    let sig = signature(r#"{"name": "at", "params": {"fixed": ["number", "array<T>"]}, "result": "T"}"#);
    let (source, check) = sig.check_source(&["number", "object"]);
    let json = json_diagnostic(&check.errors[0], "at.json");
    assert_eq!(json["code"], "E0001");
    assert_eq!(json["file"], "at.json");
    insta::assert_snapshot!(
        json["message"].as_str().unwrap(),
        @"Expected array<T> but found object instead."
    );
    assert_eq!(json["spans"][0]["start"], 11);
    assert_eq!(json["spans"][0]["end"], 17);
    assert_eq!(json["spans"][0]["label"], "argument 2 expected array<T>, found object");
    assert!(json["fix"].is_null());
    assert_eq!(&source[11..17], "object");
}
