/// Tokenization errors.
///
/// Defines the error type raised while scanning source text into tokens.
/// Lexical errors cover malformed numeric literals and unterminated string
/// literals, and carry the character offset at which scanning failed.
pub mod lex_error;
/// Structural errors.
///
/// Defines the error type raised while converting a token sequence into
/// Reverse Polish Notation, or while validating the resulting sequence.
/// Syntax errors cover mismatched parentheses, missing operands, unknown
/// operators and functions, and misplaced commas.
pub mod syntax_error;
/// Evaluation errors.
///
/// Defines the error type raised while forcing the lazy value tree. Runtime
/// errors cover type mismatches, assignment to unbound values, division by
/// zero, bad argument counts, and non-finite results from the floating-point
/// math library.
pub mod eval_error;

pub use eval_error::{EvalError, EvalResult};
pub use lex_error::LexError;
pub use syntax_error::SyntaxError;

#[derive(Debug)]
/// Any error an expression can produce.
///
/// The three phases of the engine fail with their own error types; this
/// umbrella carries whichever phase aborted the evaluation. No error is
/// recovered internally, so the first failure always surfaces here.
pub enum ExprError {
    /// The source text could not be tokenized.
    Lex(LexError),
    /// The token sequence was structurally invalid.
    Syntax(SyntaxError),
    /// Forcing the lazy value tree failed at runtime.
    Eval(EvalError),
}

impl std::fmt::Display for ExprError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lex(e) => write!(f, "{e}"),
            Self::Syntax(e) => write!(f, "{e}"),
            Self::Eval(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for ExprError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Lex(e) => Some(e),
            Self::Syntax(e) => Some(e),
            Self::Eval(e) => Some(e),
        }
    }
}

impl From<LexError> for ExprError {
    fn from(e: LexError) -> Self {
        Self::Lex(e)
    }
}

impl From<SyntaxError> for ExprError {
    fn from(e: SyntaxError) -> Self {
        Self::Syntax(e)
    }
}

impl From<EvalError> for ExprError {
    fn from(e: EvalError) -> Self {
        Self::Eval(e)
    }
}
