//! The stylex type checker CLI.
//!
//! Provides the `stylexc` command with the following subcommands:
//!
//! - `stylexc match <expected> <actual>` - Match one type against a pattern
//! - `stylexc resolve <type> --bind T=number` - Substitute generic bindings
//! - `stylexc check <signature.json> <arg>...` - Check a call against a signature
//!
//! Options:
//! - `--json` - Output diagnostics as JSON (one object per line)
//! - `--no-color` - Disable colorized output

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};

use stylex_typeck::diagnostics::{json_diagnostic, render_diagnostic_with, DiagnosticOptions};
use stylex_typeck::error::{ConstraintOrigin, TypeError};
use stylex_typeck::signature::Signature;
use stylex_typeck::{match_type, parse_type, resolve_typenames_if_possible};
use stylex_typeck::{Bindings, Type, TypenameContext};

#[derive(Parser)]
#[command(name = "stylexc", version, about = "The stylex type checker")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output diagnostics as JSON (one object per line) instead of human-readable format
    #[arg(long, global = true)]
    json: bool,

    /// Disable colorized output
    #[arg(long = "no-color", global = true)]
    no_color: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Match an actual type against an expected pattern
    Match {
        /// The expected type pattern, e.g. `array<T>`
        expected: String,
        /// The actual type, e.g. `array<number, 3>`
        actual: String,
    },
    /// Substitute generic bindings into a type
    Resolve {
        /// The type to resolve, e.g. `array<T>`
        ty: String,
        /// A binding such as `T=number` (repeatable)
        #[arg(long = "bind", value_name = "NAME=TYPE")]
        bindings: Vec<String>,
    },
    /// Check a call's argument types against a signature file
    Check {
        /// Path to a JSON signature file
        signature: PathBuf,
        /// Argument types, in call order
        args: Vec<String>,
    },
}

/// How errors reach stderr.
#[derive(Clone, Copy)]
struct OutputOptions {
    json: bool,
    diagnostics: DiagnosticOptions,
}

fn main() {
    let cli = Cli::parse();
    let diag_opts = OutputOptions {
        json: cli.json,
        diagnostics: DiagnosticOptions {
            color: !cli.no_color && !cli.json,
        },
    };

    let outcome = match cli.command {
        Commands::Match { expected, actual } => run_match(&expected, &actual, &diag_opts),
        Commands::Resolve { ty, bindings } => run_resolve(&ty, &bindings),
        Commands::Check { signature, args } => run_check(&signature, &args, &diag_opts),
    };

    match outcome {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            if diag_opts.json {
                let msg = serde_json::json!({
                    "code": "C0001",
                    "severity": "error",
                    "message": e,
                    "file": "",
                    "spans": [],
                    "fix": null
                });
                eprintln!("{}", msg);
            } else {
                eprintln!("error: {}", e);
            }
            process::exit(1);
        }
    }
}

/// Match `actual` against `expected` with a fresh context.
///
/// Returns `Ok(false)` when either type is malformed or they do not match.
fn run_match(expected: &str, actual: &str, diag_opts: &OutputOptions) -> Result<bool, String> {
    let (Some(expected_ty), Some(actual_ty)) = (
        parse_arg(expected, diag_opts),
        parse_arg(actual, diag_opts),
    ) else {
        return Ok(false);
    };

    let mut context = TypenameContext::new();
    match match_type(&expected_ty, &actual_ty, &mut context) {
        Ok(()) => {
            println!("ok");
            print_bindings(&context);
            Ok(true)
        }
        Err(mismatch) => {
            let error = TypeError::Mismatch {
                mismatch,
                origin: ConstraintOrigin::Builtin,
            };
            let source = format!("{} <- {}", expected, actual);
            report(&[error], &source, "match", diag_opts);
            Ok(false)
        }
    }
}

/// Substitute `--bind` bindings into `ty` and print the result.
fn run_resolve(ty: &str, bindings: &[String]) -> Result<bool, String> {
    let ty: Type = ty.parse().map_err(|e| format!("invalid type `{}`: {}", ty, e))?;

    let mut map = Bindings::default();
    for binding in bindings {
        let (name, bound) = binding
            .split_once('=')
            .ok_or_else(|| format!("invalid binding `{}`, expected NAME=TYPE", binding))?;
        let bound: Type = bound
            .trim()
            .parse()
            .map_err(|e| format!("invalid type in binding `{}`: {}", binding, e))?;
        map.insert(name.trim().to_string(), bound);
    }

    let resolved = resolve_typenames_if_possible(&ty, &map);
    println!("{}", resolved);
    Ok(true)
}

/// Load a signature and check the given argument types against it.
fn run_check(path: &Path, args: &[String], diag_opts: &OutputOptions) -> Result<bool, String> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read '{}': {}", path.display(), e))?;
    let signature: Signature = serde_json::from_str(&text)
        .map_err(|e| format!("Invalid signature '{}': {}", path.display(), e))?;

    let arg_texts: Vec<&str> = args.iter().map(String::as_str).collect();
    let (source, check) = signature.check_source(&arg_texts);
    match check.result_type {
        Some(result) => {
            println!("{}", result);
            Ok(true)
        }
        None => {
            report(&check.errors, &source, &path.display().to_string(), diag_opts);
            Ok(false)
        }
    }
}

/// Parse one type argument. A malformed one is reported against its own
/// text and yields `None`.
fn parse_arg(text: &str, diag_opts: &OutputOptions) -> Option<Type> {
    match parse_type(text) {
        Ok(ty) => Some(ty),
        Err(e) => {
            report(&[TypeError::from(e)], text, "match", diag_opts);
            None
        }
    }
}

fn print_bindings(context: &TypenameContext) {
    let mut names: Vec<_> = context.expected.iter().collect();
    names.sort_by(|a, b| a.0.cmp(b.0));
    for (name, ty) in names {
        println!("{} = {}", name, ty);
    }
}

/// Write diagnostics to stderr, as JSON lines or ariadne reports.
fn report(errors: &[TypeError], source: &str, file_name: &str, diag_opts: &OutputOptions) {
    for error in errors {
        if diag_opts.json {
            eprintln!("{}", json_diagnostic(error, file_name));
        } else {
            eprint!("{}", render_diagnostic_with(error, source, diag_opts.diagnostics));
        }
    }
}
