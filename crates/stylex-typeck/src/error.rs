//! Type error types with provenance tracking.
//!
//! The matcher reports a single error kind, [`TypeMismatch`], whose
//! `Display` is the exact diagnostic text. Signature checking wraps it in a
//! [`TypeError`] that also records where the constraint came from.

use std::fmt;

use rowan::TextRange;

use crate::annotation::ParseTypeError;
use crate::ty::Type;

/// Why a match failed. Drives the help line of rendered diagnostics.
#[derive(Clone, Debug, PartialEq)]
pub enum MismatchReason {
    /// The actual type is a different kind.
    Kind,
    /// Array item types did not match; the item failure is the cause.
    Item(Box<TypeMismatch>),
    /// Array item types matched but the lengths differ.
    Length {
        expected: usize,
        found: Option<usize>,
    },
    /// No member of `value` accepts the actual type.
    NoUnionMember,
}

/// A failed match of `found` against the `expected` pattern.
#[derive(Clone, Debug, PartialEq)]
pub struct TypeMismatch {
    pub expected: Type,
    pub found: Type,
    pub reason: MismatchReason,
    /// "Expected {expected} but found {found} instead." as rendered at
    /// match time.
    message: String,
}

impl TypeMismatch {
    pub(crate) fn new(expected: &Type, found: &Type, reason: MismatchReason, message: String) -> Self {
        TypeMismatch {
            expected: expected.clone(),
            found: found.clone(),
            reason,
            message,
        }
    }

    /// The nested item failure, if any.
    pub fn cause(&self) -> Option<&TypeMismatch> {
        match &self.reason {
            MismatchReason::Item(cause) => Some(cause.as_ref()),
            MismatchReason::Kind | MismatchReason::Length { .. } | MismatchReason::NoUnionMember => None,
        }
    }

    /// The innermost failure in the cause chain.
    pub fn root_cause(&self) -> &TypeMismatch {
        let mut current = self;
        while let Some(cause) = current.cause() {
            current = cause;
        }
        current
    }
}

impl fmt::Display for TypeMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(cause) = self.cause() {
            write!(f, " ({})", cause)?;
        }
        Ok(())
    }
}

impl std::error::Error for TypeMismatch {}

/// Where a type constraint came from.
#[derive(Clone, Debug, PartialEq)]
pub enum ConstraintOrigin {
    /// From a call argument: argument `param_idx`, written at `arg_span`.
    FnArg {
        arg_span: TextRange,
        param_idx: usize,
    },
    /// From the call as a whole (argument count).
    Call { call_site: TextRange },
    /// From an explicit type annotation.
    Annotation { annotation_span: TextRange },
    /// Synthetic origin for checks with no source location.
    Builtin,
}

/// A type error encountered while checking an expression.
#[derive(Clone, Debug, PartialEq)]
pub enum TypeError {
    /// A type did not match its expected pattern.
    Mismatch {
        mismatch: TypeMismatch,
        origin: ConstraintOrigin,
    },
    /// A call supplied the wrong number of arguments.
    ArityMismatch {
        expected: usize,
        found: usize,
        origin: ConstraintOrigin,
    },
    /// A type annotation could not be parsed.
    InvalidAnnotation { error: ParseTypeError },
}

impl fmt::Display for TypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeError::Mismatch { mismatch, .. } => write!(f, "{}", mismatch),
            TypeError::ArityMismatch {
                expected, found, ..
            } => {
                write!(
                    f,
                    "Expected {} arguments, but found {} instead.",
                    expected, found
                )
            }
            TypeError::InvalidAnnotation { error } => {
                write!(f, "invalid type annotation: {}", error)
            }
        }
    }
}

impl std::error::Error for TypeError {}

impl From<ParseTypeError> for TypeError {
    fn from(error: ParseTypeError) -> Self {
        TypeError::InvalidAnnotation { error }
    }
}
