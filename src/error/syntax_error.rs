#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur while converting tokens to Reverse
/// Polish Notation or while validating the result.
pub enum SyntaxError {
    /// Two operand tokens were adjacent with no operator between them.
    MissingOperator {
        /// The character offset of the second operand.
        offset: usize,
    },
    /// An operator did not have enough operands.
    MissingOperands {
        /// The operator symbol.
        op:     String,
        /// The character offset of the operator.
        offset: usize,
    },
    /// An operator symbol is not present in the registry.
    UnknownOperator {
        /// The operator symbol as written.
        op:     String,
        /// The character offset of the operator.
        offset: usize,
    },
    /// A function name is not present in the registry.
    UnknownFunction {
        /// The function name as written.
        name:   String,
        /// The character offset of the call.
        offset: usize,
    },
    /// A unary operator appeared where a binary operator is required.
    InvalidUnaryPosition {
        /// The operator symbol.
        op:     String,
        /// The character offset of the operator.
        offset: usize,
    },
    /// A comma appeared outside a function argument list.
    MisplacedComma {
        /// The character offset of the comma.
        offset: usize,
    },
    /// Parentheses did not pair up.
    MismatchedParens {
        /// The character offset of the unmatched parenthesis.
        offset: usize,
    },
    /// A fixed-arity function was called with the wrong argument count.
    FunctionArity {
        /// The function name.
        name:     String,
        /// The declared arity.
        expected: usize,
        /// The argument count found.
        found:    usize,
    },
    /// A function argument list was never closed off against its call.
    DanglingParameterList,
    /// The expression leaves more than one value on the stack.
    TooManyValues,
    /// The expression produces no value at all.
    EmptyExpression,
}

impl std::fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingOperator { offset } => {
                write!(f, "Missing operator at position {offset}.")
            },
            Self::MissingOperands { op, offset } => {
                write!(f, "Missing operand(s) for operator '{op}' at position {offset}.")
            },
            Self::UnknownOperator { op, offset } => {
                write!(f, "Unknown operator '{op}' at position {offset}.")
            },
            Self::UnknownFunction { name, offset } => {
                write!(f, "Unknown function '{name}' at position {offset}.")
            },
            Self::InvalidUnaryPosition { op, offset } => {
                write!(f, "Invalid position for unary operator '{op}' at position {offset}.")
            },
            Self::MisplacedComma { offset } => {
                write!(f, "Comma outside a function argument list at position {offset}.")
            },
            Self::MismatchedParens { offset } => {
                write!(f, "Mismatched parentheses at position {offset}.")
            },
            Self::FunctionArity { name, expected, found } => {
                write!(f, "Function '{name}' expected {expected} argument(s), got {found}.")
            },
            Self::DanglingParameterList => {
                write!(f, "Function argument list was never closed.")
            },
            Self::TooManyValues => write!(f, "Too many values: the expression is not a single computation."),
            Self::EmptyExpression => write!(f, "Empty expression."),
        }
    }
}

impl std::error::Error for SyntaxError {}
