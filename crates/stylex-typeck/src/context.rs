//! Binding accumulator for one matching session.
//!
//! A `TypenameContext` is created right before a match (or before the
//! sequence of matches for one signature), collects the generic bindings
//! discovered while matching, and is then read to resolve dependent types.
//! It is a plain value: dropping it is the teardown, cloning it is a
//! snapshot.

use crate::generic::{resolve_typenames_if_possible, Bindings};
use crate::ty::Type;

/// Generic bindings discovered while matching.
///
/// `expected` holds bindings for placeholders in the expected pattern;
/// `actual` holds bindings for placeholders in the actual type.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TypenameContext {
    pub expected: Bindings,
    pub actual: Bindings,
}

impl TypenameContext {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind an expected-direction placeholder. First binding wins.
    ///
    /// Returns `true` if the binding was recorded.
    pub fn bind_expected(&mut self, name: &str, ty: Type) -> bool {
        if self.expected.contains_key(name) {
            return false;
        }
        self.expected.insert(name.to_string(), ty);
        true
    }

    /// Rebind an actual-direction placeholder, only if it is already known.
    ///
    /// Returns `true` if an existing entry was overwritten.
    pub fn rebind_actual(&mut self, name: &str, ty: Type) -> bool {
        match self.actual.get_mut(name) {
            Some(slot) => {
                *slot = ty;
                true
            }
            None => false,
        }
    }

    /// Declare an actual-direction placeholder so later matches may rebind it.
    pub fn seed_actual(&mut self, name: impl Into<String>, ty: Type) {
        self.actual.insert(name.into(), ty);
    }

    /// Merge another context's bindings into this one.
    ///
    /// Entries already present here are kept.
    pub fn merge(&mut self, other: TypenameContext) {
        for (name, ty) in other.expected {
            self.expected.entry(name).or_insert(ty);
        }
        for (name, ty) in other.actual {
            self.actual.entry(name).or_insert(ty);
        }
    }

    /// Resolve `ty` against the expected-direction bindings.
    pub fn resolve(&self, ty: &Type) -> Type {
        resolve_typenames_if_possible(ty, &self.expected).into_owned()
    }

    /// Whether no binding has been recorded in either direction.
    pub fn is_empty(&self) -> bool {
        self.expected.is_empty() && self.actual.is_empty()
    }
}
