//! Parser for the textual type annotation syntax.
//!
//! The accepted syntax is exactly what `Type`'s `Display` produces:
//!
//! ```text
//! type   := "null" | "boolean" | "number" | "string" | "object" | "value"
//!         | "array" [ "<" type [ "," length ] ">" ]
//!         | ident
//! ```
//!
//! Any identifier that is not a keyword is a generic placeholder.

use std::fmt;

use rowan::{TextRange, TextSize};

use crate::ty::Type;

/// An annotation parse error with location information.
#[derive(Clone, Debug, PartialEq)]
pub struct ParseTypeError {
    pub kind: ParseTypeErrorKind,
    pub span: TextRange,
}

impl ParseTypeError {
    pub fn new(kind: ParseTypeErrorKind, span: TextRange) -> Self {
        Self { kind, span }
    }
}

/// The specific kind of annotation parse error.
#[derive(Clone, Debug, PartialEq)]
pub enum ParseTypeErrorKind {
    /// A character that cannot start or continue a type here.
    UnexpectedCharacter(char),
    /// The input ended in the middle of a type.
    UnexpectedEnd,
    /// An array length that does not fit in `usize`.
    InvalidArrayLength(String),
    /// A complete type was followed by more input.
    TrailingInput,
    /// Arrays nested deeper than [`MAX_NESTING`].
    TooDeep,
    /// The input is too long for its offsets to fit in a `TextSize`.
    InputTooLarge,
}

impl fmt::Display for ParseTypeErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedCharacter(c) => write!(f, "unexpected character: {c:?}"),
            Self::UnexpectedEnd => write!(f, "unexpected end of input"),
            Self::InvalidArrayLength(s) => write!(f, "invalid array length: {s}"),
            Self::TrailingInput => write!(f, "unexpected input after type"),
            Self::TooDeep => write!(f, "arrays nested more than {MAX_NESTING} levels deep"),
            Self::InputTooLarge => write!(f, "annotation is too large"),
        }
    }
}

impl fmt::Display for ParseTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}

impl std::error::Error for ParseTypeError {}

/// Deepest `array<...>` nesting the parser accepts.
pub const MAX_NESTING: usize = 64;

/// Convert a byte offset into a `TextSize`, saturating at `u32::MAX`.
pub(crate) fn text_size(offset: usize) -> TextSize {
    TextSize::try_from(offset).unwrap_or(TextSize::from(u32::MAX))
}

/// Parse a type annotation such as `array<number, 3>`.
pub fn parse_type(src: &str) -> Result<Type, ParseTypeError> {
    if TextSize::try_from(src.len()).is_err() {
        let span = TextRange::empty(TextSize::from(0));
        return Err(ParseTypeError::new(ParseTypeErrorKind::InputTooLarge, span));
    }
    let mut parser = Parser {
        src,
        pos: 0,
        depth: 0,
    };
    let ty = parser.parse_type()?;
    parser.skip_whitespace();
    if parser.pos < src.len() {
        return Err(parser.error(ParseTypeErrorKind::TrailingInput, parser.pos, src.len()));
    }
    Ok(ty)
}

struct Parser<'a> {
    src: &'a str,
    /// Byte offset of the next unread character.
    pos: usize,
    /// Number of enclosing `array<`.
    depth: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if !c.is_whitespace() {
                break;
            }
            self.pos += c.len_utf8();
        }
    }

    fn eat(&mut self, expected: char) -> bool {
        self.skip_whitespace();
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), ParseTypeError> {
        if self.eat(expected) {
            Ok(())
        } else {
            Err(self.unexpected())
        }
    }

    /// Error for whatever sits at the current position.
    fn unexpected(&self) -> ParseTypeError {
        match self.peek() {
            Some(c) => self.error(
                ParseTypeErrorKind::UnexpectedCharacter(c),
                self.pos,
                self.pos + c.len_utf8(),
            ),
            None => self.error(ParseTypeErrorKind::UnexpectedEnd, self.pos, self.pos),
        }
    }

    fn error(&self, kind: ParseTypeErrorKind, start: usize, end: usize) -> ParseTypeError {
        ParseTypeError::new(kind, TextRange::new(text_size(start), text_size(end)))
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if !pred(c) {
                break;
            }
            self.pos += c.len_utf8();
        }
        &self.src[start..self.pos]
    }

    fn parse_type(&mut self) -> Result<Type, ParseTypeError> {
        self.skip_whitespace();
        match self.peek() {
            Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
            _ => return Err(self.unexpected()),
        }
        let ident = self.take_while(|c| c.is_ascii_alphanumeric() || c == '_');
        let ty = match ident {
            "null" => Type::Null,
            "boolean" => Type::Boolean,
            "number" => Type::Number,
            "string" => Type::String,
            "object" => Type::Object,
            "value" => Type::Value,
            "array" => return self.parse_array_params(),
            name => Type::typename(name),
        };
        Ok(ty)
    }

    /// Parses the optional `<item, len>` after `array`.
    fn parse_array_params(&mut self) -> Result<Type, ParseTypeError> {
        if !self.eat('<') {
            return Ok(Type::array(Type::Value));
        }
        if self.depth == MAX_NESTING {
            let start = self.pos - '<'.len_utf8();
            return Err(self.error(ParseTypeErrorKind::TooDeep, start, self.pos));
        }
        self.depth += 1;
        let item = self.parse_type()?;
        let len = if self.eat(',') {
            Some(self.parse_length()?)
        } else {
            None
        };
        self.expect('>')?;
        self.depth -= 1;
        Ok(Type::Array {
            item: Box::new(item),
            len,
        })
    }

    fn parse_length(&mut self) -> Result<usize, ParseTypeError> {
        self.skip_whitespace();
        let start = self.pos;
        let digits = self.take_while(|c| c.is_ascii_digit());
        if digits.is_empty() {
            return Err(self.unexpected());
        }
        digits.parse().map_err(|_| {
            let digits = digits.to_string();
            self.error(ParseTypeErrorKind::InvalidArrayLength(digits), start, self.pos)
        })
    }
}
