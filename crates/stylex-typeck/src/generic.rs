//! Generic analysis: detecting and substituting type placeholders.

use std::borrow::Cow;

use rustc_hash::FxHashMap;

use crate::ty::Type;

/// Bindings from generic parameter name to the type inferred for it.
pub type Bindings = FxHashMap<String, Type>;

/// Whether `ty` is a `Typename` or an array whose item type is generic.
///
/// `value` is not generic: it is a fixed union, not a parameter.
pub fn is_generic(ty: &Type) -> bool {
    match ty {
        Type::Typename(_) => true,
        Type::Array { item, .. } => is_generic(item),
        Type::Null
        | Type::Boolean
        | Type::Number
        | Type::String
        | Type::Object
        | Type::Value => false,
    }
}

/// Substitute bound placeholders in `ty`.
///
/// Non-generic types come back borrowed. Placeholders with no binding are
/// left in place rather than reported; the caller decides whether an
/// unresolved result is an error.
pub fn resolve_typenames_if_possible<'a>(ty: &'a Type, bindings: &Bindings) -> Cow<'a, Type> {
    if !is_generic(ty) {
        return Cow::Borrowed(ty);
    }
    match ty {
        Type::Typename(name) => match bindings.get(name) {
            Some(bound) => Cow::Owned(bound.clone()),
            None => Cow::Borrowed(ty),
        },
        Type::Array { item, len } => Cow::Owned(Type::Array {
            item: Box::new(resolve_typenames_if_possible(item, bindings).into_owned()),
            len: *len,
        }),
        Type::Null
        | Type::Boolean
        | Type::Number
        | Type::String
        | Type::Object
        | Type::Value => Cow::Borrowed(ty),
    }
}
