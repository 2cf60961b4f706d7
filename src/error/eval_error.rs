/// Result type used throughout evaluation.
///
/// All forcing paths return either a value of type `T` or an [`EvalError`]
/// describing the failure.
pub type EvalResult<T> = Result<T, EvalError>;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur while forcing the lazy value tree.
pub enum EvalError {
    /// A numeric value was expected, but not found.
    ExpectedNumber {
        /// What required the number, e.g. an operator or function name.
        context: String,
    },
    /// A list value was expected, but not found.
    ExpectedList {
        /// The function that required the list.
        function: String,
    },
    /// The left side of an assignment-like operator carries no variable name.
    UnboundAssignment {
        /// The operator symbol.
        op: String,
    },
    /// Attempted division or remainder by zero.
    DivisionByZero {
        /// The operator symbol.
        op: String,
    },
    /// A floating-point computation produced an unrepresentable result.
    NonFiniteResult {
        /// The function or operator that produced it.
        function: String,
    },
    /// An argument was outside the domain of a function.
    InvalidArgument {
        /// The function or operator name.
        function: String,
        /// Details about why the argument is invalid.
        details:  String,
    },
    /// A variadic function that needs at least one argument received none.
    MissingArguments {
        /// The function name.
        function: String,
    },
    /// A variadic function received an argument count it cannot accept.
    WrongArgumentCount {
        /// The function name.
        function: String,
        /// The argument count found.
        found:    usize,
    },
    /// An operator symbol vanished from the registry between parse and build.
    UnknownOperator {
        /// The operator symbol.
        op: String,
    },
    /// A function name vanished from the registry between parse and build.
    UnknownFunction {
        /// The function name.
        name: String,
    },
    /// An operator or function node found too few operands on the stack.
    MissingOperands {
        /// The operator or function name.
        op: String,
    },
    /// A literal survived tokenization but could not be read back.
    MalformedLiteral {
        /// The literal text.
        literal: String,
    },
    /// A token kind that cannot appear in Reverse Polish Notation did.
    UnexpectedToken {
        /// The token text.
        surface: String,
    },
}

impl std::fmt::Display for EvalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ExpectedNumber { context } => {
                write!(f, "Expected a numeric value for {context}.")
            },
            Self::ExpectedList { function } => {
                write!(f, "Function '{function}' expected a list.")
            },
            Self::UnboundAssignment { op } => {
                write!(f, "Left side of '{op}' needs to be a variable.")
            },
            Self::DivisionByZero { op } => write!(f, "Division by zero in '{op}'."),
            Self::NonFiniteResult { function } => {
                write!(f, "'{function}' produced a value that is not a finite number.")
            },
            Self::InvalidArgument { function, details } => {
                write!(f, "Invalid argument to '{function}': {details}.")
            },
            Self::MissingArguments { function } => {
                write!(f, "Function '{function}' requires at least one argument.")
            },
            Self::WrongArgumentCount { function, found } => {
                write!(f, "Function '{function}' cannot accept {found} argument(s).")
            },
            Self::UnknownOperator { op } => write!(f, "Unknown operator '{op}'."),
            Self::UnknownFunction { name } => write!(f, "Unknown function '{name}'."),
            Self::MissingOperands { op } => {
                write!(f, "Missing operand(s) for '{op}'.")
            },
            Self::MalformedLiteral { literal } => {
                write!(f, "Literal '{literal}' is not a valid number.")
            },
            Self::UnexpectedToken { surface } => {
                write!(f, "Unexpected token '{surface}' in evaluation order.")
            },
        }
    }
}

impl std::error::Error for EvalError {}
