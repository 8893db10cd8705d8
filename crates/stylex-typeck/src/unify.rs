//! Structural matching of an actual type against an expected pattern.
//!
//! Matching is one-directional with a twist: placeholders in the expected
//! pattern are bound to the concrete actual type, and placeholders in the
//! actual type may be rebound to a generic expected pattern. Bindings land
//! in a caller-owned [`TypenameContext`] and are not rolled back when a
//! later part of the same match fails.

use crate::context::TypenameContext;
use crate::error::{MismatchReason, TypeMismatch};
use crate::generic::is_generic;
use crate::ty::{DefaultRender, RenderType, Type};

/// Match `actual` against `expected`, rendering mismatches with `Display`.
pub fn match_type(
    expected: &Type,
    actual: &Type,
    context: &mut TypenameContext,
) -> Result<(), TypeMismatch> {
    match_type_with(expected, actual, context, &DefaultRender)
}

/// Match `actual` against `expected`, rendering mismatches with `render`.
///
/// Rules, first applicable wins:
///
/// 1. A placeholder in `expected` accepts anything. It is bound to `actual`
///    unless `actual` is generic or null, or the name is already bound.
/// 2. A placeholder in `actual` against a generic `expected` is accepted and
///    rebinds the name in `context.actual` if it is already there.
/// 3. `null` matches every expected type.
/// 4. Arrays match item-wise, then by length when `expected` fixes one.
/// 5. `value` accepts the first member of its union that matches, each
///    member tried with a fresh context.
/// 6. Every other kind must be identical.
pub fn match_type_with<R: RenderType + ?Sized>(
    expected: &Type,
    actual: &Type,
    context: &mut TypenameContext,
    render: &R,
) -> Result<(), TypeMismatch> {
    if let Type::Typename(name) = expected {
        if !is_generic(actual) && *actual != Type::Null {
            context.bind_expected(name, actual.clone());
        }
        return Ok(());
    }

    if let Type::Typename(name) = actual {
        if is_generic(expected) {
            context.rebind_actual(name, expected.clone());
            return Ok(());
        }
    }

    if *actual == Type::Null {
        return Ok(());
    }

    match expected {
        Type::Array { item, len } => {
            let Type::Array {
                item: actual_item,
                len: actual_len,
            } = actual
            else {
                return Err(mismatch(expected, actual, MismatchReason::Kind, render));
            };
            if let Err(cause) = match_type_with(item, actual_item, context, render) {
                let reason = MismatchReason::Item(Box::new(cause));
                return Err(mismatch(expected, actual, reason, render));
            }
            match len {
                Some(n) if Some(*n) != *actual_len => {
                    let reason = MismatchReason::Length {
                        expected: *n,
                        found: *actual_len,
                    };
                    Err(mismatch(expected, actual, reason, render))
                }
                _ => Ok(()),
            }
        }
        Type::Value => {
            if *actual == Type::Value {
                return Ok(());
            }
            for member in Type::value_members() {
                let mut member_context = TypenameContext::new();
                if match_type_with(&member, actual, &mut member_context, render).is_ok() {
                    context.merge(member_context);
                    return Ok(());
                }
            }
            Err(mismatch(expected, actual, MismatchReason::NoUnionMember, render))
        }
        Type::Null | Type::Boolean | Type::Number | Type::String | Type::Object => {
            if same_kind(expected, actual) {
                Ok(())
            } else {
                Err(mismatch(expected, actual, MismatchReason::Kind, render))
            }
        }
        // Rule 1 already returned.
        Type::Typename(_) => Ok(()),
    }
}

/// Variant-tag identity for the atomic kinds.
fn same_kind(expected: &Type, actual: &Type) -> bool {
    matches!(
        (expected, actual),
        (Type::Null, Type::Null)
            | (Type::Boolean, Type::Boolean)
            | (Type::Number, Type::Number)
            | (Type::String, Type::String)
            | (Type::Object, Type::Object)
    )
}

fn mismatch<R: RenderType + ?Sized>(
    expected: &Type,
    actual: &Type,
    reason: MismatchReason,
    render: &R,
) -> TypeMismatch {
    let message = format!(
        "Expected {} but found {} instead.",
        render.render(expected),
        render.render(actual)
    );
    TypeMismatch::new(expected, actual, reason, message)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(expected: &Type, actual: &Type) -> Result<(), TypeMismatch> {
        let mut ctx = TypenameContext::new();
        match_type(expected, actual, &mut ctx)
    }

    #[test]
    fn identical_atomic_kinds_match() {
        for ty in [Type::Boolean, Type::Number, Type::String, Type::Object] {
            let mut ctx = TypenameContext::new();
            assert!(match_type(&ty, &ty, &mut ctx).is_ok());
            assert!(ctx.is_empty());
        }
    }

    #[test]
    fn different_atomic_kinds_mismatch() {
        let err = check(&Type::Number, &Type::String).unwrap_err();
        assert_eq!(err.to_string(), "Expected number but found string instead.");
        assert_eq!(err.reason, MismatchReason::Kind);
        assert_eq!(err.expected, Type::Number);
        assert_eq!(err.found, Type::String);
    }

    #[test]
    fn null_matches_everything() {
        for expected in [
            Type::Boolean,
            Type::Object,
            Type::Value,
            Type::array_n(Type::Number, 2),
            Type::typename("T"),
        ] {
            assert!(check(&expected, &Type::Null).is_ok(), "{}", expected);
        }
    }

    #[test]
    fn expected_null_rejects_other_kinds() {
        let err = check(&Type::Null, &Type::Number).unwrap_err();
        assert_eq!(err.to_string(), "Expected null but found number instead.");
    }

    #[test]
    fn placeholder_binds_concrete_actual() {
        let mut ctx = TypenameContext::new();
        assert!(match_type(&Type::typename("T"), &Type::array(Type::Number), &mut ctx).is_ok());
        assert_eq!(ctx.expected.get("T"), Some(&Type::array(Type::Number)));
    }

    #[test]
    fn placeholder_does_not_bind_null_or_generic() {
        let mut ctx = TypenameContext::new();
        assert!(match_type(&Type::typename("T"), &Type::Null, &mut ctx).is_ok());
        assert!(match_type(&Type::typename("T"), &Type::typename("U"), &mut ctx).is_ok());
        assert!(match_type(&Type::typename("T"), &Type::array(Type::typename("U")), &mut ctx).is_ok());
        assert!(ctx.expected.is_empty());
    }

    #[test]
    fn actual_placeholder_against_generic_pattern() {
        let mut ctx = TypenameContext::new();
        let pattern = Type::array(Type::typename("T"));

        // Unknown name: accepted, nothing recorded.
        assert!(match_type(&pattern, &Type::typename("U"), &mut ctx).is_ok());
        assert!(ctx.actual.is_empty());

        // Known name: rewritten to the expected pattern.
        ctx.seed_actual("U", Type::Number);
        assert!(match_type(&pattern, &Type::typename("U"), &mut ctx).is_ok());
        assert_eq!(ctx.actual.get("U"), Some(&pattern));
    }

    #[test]
    fn actual_placeholder_against_concrete_pattern_fails() {
        let err = check(&Type::Number, &Type::typename("T")).unwrap_err();
        assert_eq!(err.to_string(), "Expected number but found T instead.");
    }

    #[test]
    fn array_requires_array() {
        let err = check(&Type::array(Type::Number), &Type::Number).unwrap_err();
        assert_eq!(err.to_string(), "Expected array<number> but found number instead.");
        assert!(err.cause().is_none());
    }

    #[test]
    fn array_length_mismatch_has_no_cause() {
        let err = check(&Type::array_n(Type::Number, 3), &Type::array(Type::Number)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Expected array<number, 3> but found array<number> instead."
        );
        assert_eq!(
            err.reason,
            MismatchReason::Length {
                expected: 3,
                found: None
            }
        );
    }

    #[test]
    fn item_failure_is_reported_before_length() {
        let err = check(
            &Type::array_n(Type::Number, 3),
            &Type::array_n(Type::String, 5),
        )
        .unwrap_err();
        assert!(matches!(err.reason, MismatchReason::Item(_)));
    }

    #[test]
    fn value_accepts_union_members() {
        for actual in [
            Type::Boolean,
            Type::Number,
            Type::String,
            Type::Object,
            Type::Value,
            Type::array(Type::Value),
            Type::array_n(Type::array(Type::Number), 2),
        ] {
            assert!(check(&Type::Value, &actual).is_ok(), "{}", actual);
        }
    }

    #[test]
    fn value_rejects_placeholders() {
        let err = check(&Type::Value, &Type::typename("T")).unwrap_err();
        assert_eq!(err.to_string(), "Expected value but found T instead.");
        assert_eq!(err.reason, MismatchReason::NoUnionMember);
    }

    #[test]
    fn value_rejects_arrays_of_placeholders_without_binding() {
        let mut ctx = TypenameContext::new();
        let err = match_type(&Type::Value, &Type::array(Type::typename("T")), &mut ctx).unwrap_err();
        assert_eq!(err.to_string(), "Expected value but found array<T> instead.");
        assert!(ctx.is_empty());
    }

    #[test]
    fn custom_renderer_shapes_message() {
        let mut ctx = TypenameContext::new();
        let render = |ty: &Type| format!("<{}>", ty);
        let err = match_type_with(&Type::String, &Type::Boolean, &mut ctx, &render).unwrap_err();
        assert_eq!(err.to_string(), "Expected <string> but found <boolean> instead.");
    }
}
