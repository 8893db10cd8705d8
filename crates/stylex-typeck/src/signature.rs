//! Checking a call against one function signature.
//!
//! All arguments of a call are matched with one shared
//! [`TypenameContext`], so every occurrence of a generic parameter agrees on
//! the type it was first bound to. The declared result type is then
//! resolved against those bindings.

use std::fmt;

use rowan::{TextRange, TextSize};
use serde::{Deserialize, Serialize};

use crate::annotation::{parse_type, text_size, ParseTypeError};
use crate::context::TypenameContext;
use crate::error::{ConstraintOrigin, TypeError};
use crate::ty::Type;
use crate::unify::match_type;

/// The parameter list of a signature.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Params {
    /// Exactly these parameters, in order.
    Fixed(Vec<Type>),
    /// Any number of arguments, each matching this type.
    Varargs(Type),
}

/// A function signature such as `at(number, array<T>) -> T`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Signature {
    pub name: String,
    pub params: Params,
    pub result: Type,
}

/// One call argument: its type and where it was written.
#[derive(Clone, Debug, PartialEq)]
pub struct Arg {
    pub ty: Type,
    pub span: TextRange,
}

/// The outcome of checking a call.
#[derive(Clone, Debug)]
pub struct CallCheck {
    /// The resolved result type; `None` if any error was found.
    pub result_type: Option<Type>,
    /// Bindings accumulated across all arguments.
    pub context: TypenameContext,
    /// One entry per failing argument, or a single arity error.
    pub errors: Vec<TypeError>,
}

impl CallCheck {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

impl Signature {
    pub fn new(name: impl Into<String>, params: Params, result: Type) -> Self {
        Signature {
            name: name.into(),
            params,
            result,
        }
    }

    /// Check typed arguments of a call written at `call_site`.
    pub fn check(&self, args: &[Arg], call_site: TextRange) -> CallCheck {
        let mut context = TypenameContext::new();
        let mut errors = Vec::new();

        match &self.params {
            Params::Fixed(params) if params.len() != args.len() => {
                errors.push(TypeError::ArityMismatch {
                    expected: params.len(),
                    found: args.len(),
                    origin: ConstraintOrigin::Call { call_site },
                });
            }
            Params::Fixed(params) => {
                for (idx, (param, arg)) in params.iter().zip(args).enumerate() {
                    check_arg(param, arg, idx, &mut context, &mut errors);
                }
            }
            Params::Varargs(param) => {
                for (idx, arg) in args.iter().enumerate() {
                    check_arg(param, arg, idx, &mut context, &mut errors);
                }
            }
        }

        let result_type = if errors.is_empty() {
            Some(context.resolve(&self.result))
        } else {
            None
        };
        CallCheck {
            result_type,
            context,
            errors,
        }
    }

    /// Check a call given its argument annotations as text.
    ///
    /// Returns the call rendered as source (`name(arg, ...)`), which every
    /// span in the result points into. Arguments that fail to parse are
    /// reported as annotation errors and skip matching.
    pub fn check_source(&self, arg_texts: &[&str]) -> (String, CallCheck) {
        let (source, spans) = call_source(&self.name, arg_texts);
        let call_site = text_range(0, source.len());

        let mut args = Vec::with_capacity(arg_texts.len());
        let mut parse_errors = Vec::new();
        for (text, span) in arg_texts.iter().zip(&spans) {
            match parse_type(text) {
                Ok(ty) => args.push(Arg { ty, span: *span }),
                Err(error) => parse_errors.push(TypeError::from(shift(error, span.start()))),
            }
        }

        if !parse_errors.is_empty() {
            let check = CallCheck {
                result_type: None,
                context: TypenameContext::new(),
                errors: parse_errors,
            };
            return (source, check);
        }
        (source, self.check(&args, call_site))
    }
}

fn check_arg(
    param: &Type,
    arg: &Arg,
    param_idx: usize,
    context: &mut TypenameContext,
    errors: &mut Vec<TypeError>,
) {
    if let Err(mismatch) = match_type(param, &arg.ty, context) {
        errors.push(TypeError::Mismatch {
            mismatch,
            origin: ConstraintOrigin::FnArg {
                arg_span: arg.span,
                param_idx,
            },
        });
    }
}

/// Lay out `name(a, b, ...)` and the span of each argument within it.
pub fn call_source(name: &str, arg_texts: &[&str]) -> (String, Vec<TextRange>) {
    let mut source = format!("{}(", name);
    let mut spans = Vec::with_capacity(arg_texts.len());
    for (i, text) in arg_texts.iter().enumerate() {
        if i > 0 {
            source.push_str(", ");
        }
        let start = source.len();
        source.push_str(text);
        spans.push(text_range(start, source.len()));
    }
    source.push(')');
    (source, spans)
}

fn text_range(start: usize, end: usize) -> TextRange {
    TextRange::new(text_size(start), text_size(end))
}

fn shift(error: ParseTypeError, offset: TextSize) -> ParseTypeError {
    let offset = usize::from(offset);
    let start = usize::from(error.span.start()) + offset;
    let end = usize::from(error.span.end()) + offset;
    let span = text_range(start, end);
    ParseTypeError::new(error.kind, span)
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        match &self.params {
            Params::Fixed(params) => {
                for (i, p) in params.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", p)?;
                }
            }
            Params::Varargs(param) => write!(f, "{}...", param)?,
        }
        write!(f, ") -> {}", self.result)
    }
}
