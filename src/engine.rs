/// The shared evaluation context.
///
/// Holds the variable environment, the log sink and the numeric precision
/// for one expression instance, plus the scoped shadow-binding helper the
/// iteration constructs rely on.
///
/// # Responsibilities
/// - Stores and defaults variables (`name -> LazyValue`).
/// - Carries the log sink for `;` and `print`.
/// - Restores shadowed loop bindings on exit, including on error.
pub mod context;
/// The lazy tree builder.
///
/// Walks a validated RPN sequence once, producing a tree of deferred
/// computations whose root the expression forces on every evaluation.
///
/// # Responsibilities
/// - Builds ready leaves for literals and read-thunks for variables.
/// - Captures operand lazy values into operator and function nodes.
/// - Defers every side effect until the root is forced.
pub mod evaluator;
/// The host-facing expression instance.
///
/// Ties tokenizer, parser, evaluator, registry and context together, caching
/// each compilation stage so repeated evaluation replays the built tree.
///
/// # Responsibilities
/// - Owns the registry, the environment and the compilation caches.
/// - Exposes variable pre-binding, read-back, and the log sink.
/// - Compiles on first evaluation, replays afterwards.
pub mod expression;
/// Deferred computations.
///
/// Defines the `LazyValue` thunk type the evaluator builds and the lazy
/// operators and control-flow functions consume.
pub mod lazy;
/// The tokenizer.
///
/// Scans raw lexical shapes with `logos`, then cooks them against the live
/// registry: operator runs split by longest registered prefix, prefix
/// positions tag unary, adjacent string literals merge, identifiers split
/// into variables and function calls.
///
/// # Responsibilities
/// - Converts source text into typed tokens with character offsets.
/// - Resolves operator symbols against the registry, not a fixed charset.
/// - Reports malformed literals and unterminated strings.
pub mod lexer;
/// The shunting-yard parser.
///
/// Converts the token sequence to Reverse Polish Notation using the
/// registry's precedences, inserts implicit multiplications, marks function
/// argument scopes, and validates the result before anything is built.
///
/// # Responsibilities
/// - Orders operators by precedence and associativity.
/// - Rejects structurally invalid sequences with source offsets.
/// - Validates arity and stack balance per function scope.
pub mod parser;
/// The operator and function registry.
///
/// Maps symbols and names to precedence, associativity, arity and eager or
/// lazy behavior. Hosts extend it before the first evaluation; the standard
/// library is seeded at construction.
pub mod registry;
/// The seeded standard library.
///
/// Arithmetic, comparisons, boolean logic, sequencing and assignment, the
/// floating-point math library, list helpers and the control-flow functions.
pub mod stdlib;
/// Token types shared by the tokenizer, parser and evaluator.
pub mod token;
/// Runtime values.
///
/// The `Value` type and its variants, the cross-type total order, canonical
/// text forms, and the `HostValue` extension seam.
pub mod value;
