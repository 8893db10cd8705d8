//! Type representation for style expressions.
//!
//! Defines the closed `Type` enum used by the matcher. Every traversal over
//! `Type` (generic analysis, matching, rendering, parsing) matches on it
//! exhaustively, so adding a variant is a compile error until each of them
//! handles it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::annotation::{self, ParseTypeError};

/// A style expression type.
///
/// - `Null`: the absence of a value
/// - `Boolean`, `Number`, `String`, `Object`: atomic kinds
/// - `Value`: the union of every legal value type
/// - `Array`: a homogeneous array, optionally with a fixed length
/// - `Typename`: a generic parameter placeholder
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Type {
    Null,
    Boolean,
    Number,
    String,
    Object,
    /// Matches `null | boolean | number | string | object | array<value>`.
    Value,
    /// `len == None` accepts arrays of any length.
    Array { item: Box<Type>, len: Option<usize> },
    /// An unbound generic parameter, identified by name.
    Typename(String),
}

impl Type {
    /// Create an `array<item>` type of unconstrained length.
    pub fn array(item: Type) -> Type {
        Type::Array {
            item: Box::new(item),
            len: None,
        }
    }

    /// Create an `array<item, len>` type.
    pub fn array_n(item: Type, len: usize) -> Type {
        Type::Array {
            item: Box::new(item),
            len: Some(len),
        }
    }

    /// Create a generic placeholder.
    pub fn typename(name: impl Into<String>) -> Type {
        Type::Typename(name.into())
    }

    /// Whether this type mentions a generic placeholder anywhere.
    pub fn is_generic(&self) -> bool {
        crate::generic::is_generic(self)
    }

    /// The members tried, in order, when matching against `value`.
    pub fn value_members() -> [Type; 6] {
        [
            Type::Null,
            Type::Boolean,
            Type::Number,
            Type::String,
            Type::Object,
            Type::array(Type::Value),
        ]
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Null => write!(f, "null"),
            Type::Boolean => write!(f, "boolean"),
            Type::Number => write!(f, "number"),
            Type::String => write!(f, "string"),
            Type::Object => write!(f, "object"),
            Type::Value => write!(f, "value"),
            Type::Array { item, len } => match (item.as_ref(), len) {
                (item, Some(n)) => write!(f, "array<{}, {}>", item, n),
                (Type::Value, None) => write!(f, "array"),
                (item, None) => write!(f, "array<{}>", item),
            },
            Type::Typename(name) => write!(f, "{}", name),
        }
    }
}

impl FromStr for Type {
    type Err = ParseTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        annotation::parse_type(s)
    }
}

// Types travel through JSON in their annotation form ("array<number, 3>").

impl Serialize for Type {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Type {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

/// Renders a type for diagnostic messages.
///
/// The matcher never compares rendered text; a renderer only shapes what a
/// mismatch message says.
pub trait RenderType {
    fn render(&self, ty: &Type) -> String;
}

impl<F> RenderType for F
where
    F: Fn(&Type) -> String,
{
    fn render(&self, ty: &Type) -> String {
        self(ty)
    }
}

/// Renders types through their `Display` impl.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultRender;

impl RenderType for DefaultRender {
    fn render(&self, ty: &Type) -> String {
        ty.to_string()
    }
}
