//! Ariadne-based diagnostic rendering for type errors.
//!
//! Renders `TypeError` values either as colorless, labeled reports (for
//! terminals and snapshot tests) or as one JSON object per error (for
//! tooling), mirroring each other field for field.

use std::ops::Range;

use ariadne::{Color, Config, Label, Report, ReportKind, Source};
use rowan::TextRange;
use serde_json::json;

use crate::error::{ConstraintOrigin, MismatchReason, TypeError, TypeMismatch};

/// How diagnostics should be presented.
#[derive(Clone, Copy, Debug, Default)]
pub struct DiagnosticOptions {
    pub color: bool,
}

// ── Error Codes ────────────────────────────────────────────────────────

/// Assign a unique error code to each TypeError variant.
pub fn error_code(err: &TypeError) -> &'static str {
    match err {
        TypeError::Mismatch { .. } => "E0001",
        TypeError::ArityMismatch { .. } => "E0002",
        TypeError::InvalidAnnotation { .. } => "E0003",
    }
}

// ── Span Helpers ───────────────────────────────────────────────────────

fn text_range_to_range(range: TextRange) -> Range<usize> {
    let start: usize = range.start().into();
    let end: usize = range.end().into();
    start..end
}

/// The source span an error points at, if it has one.
fn error_span(err: &TypeError) -> Option<TextRange> {
    match err {
        TypeError::Mismatch { origin, .. } | TypeError::ArityMismatch { origin, .. } => {
            match origin {
                ConstraintOrigin::FnArg { arg_span, .. } => Some(*arg_span),
                ConstraintOrigin::Call { call_site } => Some(*call_site),
                ConstraintOrigin::Annotation { annotation_span } => Some(*annotation_span),
                ConstraintOrigin::Builtin => None,
            }
        }
        TypeError::InvalidAnnotation { error } => Some(error.span),
    }
}

// ── Labels and Help ────────────────────────────────────────────────────

fn label_message(err: &TypeError) -> String {
    match err {
        TypeError::Mismatch { mismatch, origin } => match origin {
            ConstraintOrigin::FnArg { param_idx, .. } => format!(
                "argument {} expected {}, found {}",
                param_idx + 1,
                mismatch.expected,
                mismatch.found
            ),
            ConstraintOrigin::Annotation { .. } => {
                format!("expected {} from annotation", mismatch.expected)
            }
            ConstraintOrigin::Call { .. } | ConstraintOrigin::Builtin => {
                format!("expected {}, found {}", mismatch.expected, mismatch.found)
            }
        },
        TypeError::ArityMismatch { expected, .. } => {
            format!("expected {} argument(s)", expected)
        }
        TypeError::InvalidAnnotation { error } => error.kind.to_string(),
    }
}

/// A hint explaining the innermost reason for a mismatch.
pub fn fix_suggestion(err: &TypeError) -> Option<String> {
    match err {
        TypeError::Mismatch { mismatch, .. } => mismatch_help(mismatch),
        TypeError::ArityMismatch {
            expected, found, ..
        } => {
            if expected > found {
                Some(format!("missing {} argument(s)", expected - found))
            } else {
                Some(format!("{} extra argument(s)", found - expected))
            }
        }
        TypeError::InvalidAnnotation { .. } => {
            Some("types are written like `number`, `array<string, 2>` or `T`".to_string())
        }
    }
}

fn mismatch_help(mismatch: &TypeMismatch) -> Option<String> {
    let root = mismatch.root_cause();
    match &root.reason {
        MismatchReason::Length { expected, found } => Some(match found {
            Some(n) => format!("expected exactly {} item(s), found {}", expected, n),
            None => format!("expected exactly {} item(s), found an array of unknown length", expected),
        }),
        MismatchReason::NoUnionMember => Some(
            "value accepts null, boolean, number, string, object or array<value>".to_string(),
        ),
        MismatchReason::Kind if !std::ptr::eq(root, mismatch) => Some(format!(
            "item type {} does not match {}",
            root.found, root.expected
        )),
        MismatchReason::Kind | MismatchReason::Item(_) => None,
    }
}

// ── Main Rendering Functions ───────────────────────────────────────────

/// Render a type error into a formatted diagnostic string using ariadne.
///
/// The output is colorless for consistent test snapshots.
pub fn render_diagnostic(error: &TypeError, source: &str) -> String {
    render_diagnostic_with(error, source, DiagnosticOptions::default())
}

/// Render a type error with explicit presentation options.
pub fn render_diagnostic_with(
    error: &TypeError,
    source: &str,
    options: DiagnosticOptions,
) -> String {
    let config = Config::default().with_color(options.color);
    let source_len = source.len();

    // Ariadne needs a non-empty span inside the source.
    let clamp = |r: Range<usize>| -> Range<usize> {
        let s = r.start.min(source_len);
        let e = r.end.min(source_len).max(s);
        if s == e && e < source_len {
            s..e + 1
        } else if s == e {
            s.saturating_sub(1)..e
        } else {
            s..e
        }
    };

    let span = error_span(error)
        .map(text_range_to_range)
        .unwrap_or(0..source_len);
    let span = clamp(span);

    let mut builder = Report::build(ReportKind::Error, span.clone())
        .with_code(error_code(error))
        .with_message(error.to_string())
        .with_config(config)
        .with_label(
            Label::new(span)
                .with_message(label_message(error))
                .with_color(Color::Red),
        );
    if let Some(fix) = fix_suggestion(error) {
        builder.set_help(fix);
    }
    let report = builder.finish();

    let mut buf = Vec::new();
    report
        .write(Source::from(source), &mut buf)
        .expect("writing a diagnostic into memory cannot fail");
    String::from_utf8(buf).expect("diagnostic output should be valid UTF-8")
}

/// Render a type error as a JSON object.
pub fn json_diagnostic(error: &TypeError, filename: &str) -> serde_json::Value {
    let spans: Vec<serde_json::Value> = error_span(error)
        .map(|span| {
            let range = text_range_to_range(span);
            json!({
                "start": range.start,
                "end": range.end,
                "label": label_message(error),
            })
        })
        .into_iter()
        .collect();
    json!({
        "code": error_code(error),
        "severity": "error",
        "message": error.to_string(),
        "file": filename,
        "spans": spans,
        "fix": fix_suggestion(error),
    })
}
