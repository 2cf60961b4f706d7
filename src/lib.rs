//! # lazex
//!
//! lazex is an embeddable expression language engine written in Rust.
//! It tokenizes, parses and lazily evaluates expressions with support for
//! variables, an extensible operator and function registry, short-circuiting
//! control flow, and host-supplied value types.
//!
//! Evaluation is deliberately lazy: parsing produces a tree of deferred
//! computations, and only the nodes the expression actually needs are ever
//! forced. That is what lets `if`, `&&` and friends skip their untaken
//! operands entirely, side effects included.
//!
//! ```
//! use lazex::evaluate;
//!
//! let value = evaluate("2 + 3 * 4").unwrap();
//! assert_eq!(value.to_string(), "14");
//!
//! // The right side would divide by zero, but it is never forced.
//! let value = evaluate("0 != 0 && (1 / 0 > 0)").unwrap();
//! assert_eq!(value.to_string(), "0");
//! ```

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
)]
#![allow(clippy::missing_errors_doc)]

/// The expression engine: tokenizer, parser, registry, evaluator, values.
///
/// This module ties together every phase of expression processing and
/// exposes the host-facing `Expression` type. Data flows text → tokens →
/// RPN → lazy tree → value; the registry and the shared context feed every
/// stage.
///
/// # Responsibilities
/// - Coordinates the tokenizer, parser, evaluator and value model.
/// - Provides the registry seeded with the standard library.
/// - Manages caching so each expression compiles exactly once.
pub mod engine;
/// Unified error types for every engine phase.
///
/// Lexical, syntactic and evaluation failures each have their own enum,
/// carrying character offsets where they exist, under one umbrella type.
///
/// # Responsibilities
/// - Defines error enums for all failure modes.
/// - Attaches source offsets and offending symbol names.
/// - Integrates with the standard error traits.
pub mod error;

pub use engine::registry;
pub use engine::{
    context::Context,
    expression::Expression,
    lazy::LazyValue,
    registry::{Arity, Registry},
    token::{Token, TokenKind},
    value::{
        core::{Value, ValueRepr},
        host::HostValue,
    },
};
pub use error::{EvalError, EvalResult, ExprError, LexError, SyntaxError};

/// Evaluates a source string in one shot, with default registry, precision
/// and an empty environment.
///
/// Equivalent to `Expression::new(source).eval()`. Use an
/// [`Expression`] directly to pre-bind variables, extend the registry,
/// capture log output, or evaluate repeatedly.
///
/// # Errors
/// Returns an error if tokenization, parsing or evaluation fails.
///
/// # Examples
/// ```
/// use lazex::{evaluate, Value};
///
/// assert_eq!(evaluate("(2 + 3) * 4").unwrap(), Value::from(20));
/// assert_eq!(evaluate("if(1 > 0, 10, 20)").unwrap(), Value::from(10));
/// assert_eq!(evaluate("0xFF").unwrap(), Value::from(255));
///
/// // Unknown functions are rejected by name.
/// assert!(evaluate("foo(1)").is_err());
/// ```
pub fn evaluate(source: &str) -> Result<Value, ExprError> {
    Expression::new(source).eval()
}
