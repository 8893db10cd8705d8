//! Stylex type checker: structural type matching for style expressions.
//!
//! This crate decides whether a value of one type may be used where a
//! (possibly generic) type pattern is expected, explains mismatches, and
//! records the generic bindings discovered along the way so a signature's
//! result type can be made concrete.
//!
//! - One level of parametric polymorphism (`T`, `array<T>`)
//! - A fixed `value` union matched by trying each member in turn
//! - `null` accepted wherever a type is expected
//!
//! # Architecture
//!
//! - [`ty`]: Core type representation and rendering
//! - [`annotation`]: Parser for the textual type syntax
//! - [`generic`]: Placeholder detection and substitution
//! - [`context`]: Binding accumulator for one matching session
//! - [`unify`]: The structural matcher
//! - [`signature`]: Checking a call against one signature
//! - [`error`]: Type error types with provenance tracking
//! - [`diagnostics`]: Ariadne and JSON rendering of type errors

pub mod annotation;
pub mod context;
pub mod diagnostics;
pub mod error;
pub mod generic;
pub mod signature;
pub mod ty;
pub mod unify;

use rowan::TextRange;

use crate::annotation::text_size;
pub use crate::annotation::parse_type;
pub use crate::context::TypenameContext;
pub use crate::error::{ConstraintOrigin, TypeError, TypeMismatch};
pub use crate::generic::{is_generic, resolve_typenames_if_possible, Bindings};
pub use crate::ty::Type;
pub use crate::unify::{match_type, match_type_with};

/// Check `actual` against a written type annotation.
///
/// On success returns the annotation with its placeholders resolved from
/// `actual`. Spans in the error point into `annotation`.
pub fn check_annotation(annotation: &str, actual: &Type) -> Result<Type, TypeError> {
    let expected = parse_type(annotation)?;
    let mut context = TypenameContext::new();
    match match_type(&expected, actual, &mut context) {
        Ok(()) => Ok(context.resolve(&expected)),
        Err(mismatch) => Err(TypeError::Mismatch {
            mismatch,
            origin: ConstraintOrigin::Annotation {
                annotation_span: TextRange::up_to(text_size(annotation.len())),
            },
        }),
    }
}
