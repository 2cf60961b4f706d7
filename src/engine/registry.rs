use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::{
    engine::{context::Context, lazy::LazyValue, stdlib, value::core::Value},
    error::EvalResult,
};

/// Sequencing operator precedence: `;`
pub const PRECEDENCE_SEQUENCE: i32 = 1;
/// Assignment operator precedence: `=`
pub const PRECEDENCE_ASSIGN: i32 = 2;
/// Or operator precedence: `||`
pub const PRECEDENCE_OR: i32 = 3;
/// And operator precedence: `&&`
pub const PRECEDENCE_AND: i32 = 4;
/// Equality operators precedence: `==`, `!=`, `<>`
pub const PRECEDENCE_EQUALITY: i32 = 7;
/// Comparison operators precedence: `<`, `>`, `<=`, `>=`
pub const PRECEDENCE_COMPARISON: i32 = 10;
/// Additive operators precedence: `+`, `-`
pub const PRECEDENCE_ADDITIVE: i32 = 20;
/// Multiplicative operators precedence: `*`, `/`, `%`
pub const PRECEDENCE_MULTIPLICATIVE: i32 = 30;
/// Power operator precedence: `^`
pub const PRECEDENCE_POWER: i32 = 40;
/// Unary prefix operators precedence.
pub const PRECEDENCE_UNARY: i32 = 60;

/// An eager binary operator body: both operands arrive forced.
pub type EagerBinaryFn = dyn Fn(&mut Context, Value, Value) -> EvalResult<Value>;
/// A lazy binary operator body: the operands arrive unforced and the body
/// decides what to force.
pub type LazyBinaryFn = dyn Fn(&mut Context, &LazyValue, &LazyValue) -> EvalResult<Value>;
/// A unary operator body: the single operand arrives forced.
pub type UnaryFn = dyn Fn(&mut Context, Value) -> EvalResult<Value>;
/// An eager function body: all arguments arrive forced, in call order.
pub type EagerFn = dyn Fn(&mut Context, Vec<Value>) -> EvalResult<Value>;
/// A lazy function body: the arguments arrive unforced.
pub type LazyFn = dyn Fn(&mut Context, &[LazyValue]) -> EvalResult<Value>;

/// How an operator evaluates its operands.
#[derive(Clone)]
pub enum OperatorBehavior {
    /// Force both operands left to right, then combine.
    Eager(Rc<EagerBinaryFn>),
    /// Receive both operands unforced; force selectively.
    Lazy(Rc<LazyBinaryFn>),
    /// A prefix operator over one forced operand.
    Unary(Rc<UnaryFn>),
}

/// A registered operator.
#[derive(Clone)]
pub struct Operator {
    /// Binding strength; higher binds tighter.
    pub precedence: i32,
    /// Whether equal-precedence neighbors group to the left.
    pub left_assoc: bool,
    /// The evaluation strategy and body.
    pub behavior:   OperatorBehavior,
}

/// How many arguments a function accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Exactly this many, checked during validation.
    Fixed(usize),
    /// Any number; the body enforces its own rules.
    Variadic,
}

/// How a function evaluates its arguments.
#[derive(Clone)]
pub enum FunctionBehavior {
    /// Force every argument in call order, then apply.
    Eager(Rc<EagerFn>),
    /// Receive the arguments unforced; force selectively.
    Lazy(Rc<LazyFn>),
}

/// A registered function.
#[derive(Clone)]
pub struct Function {
    /// The accepted argument count.
    pub arity:    Arity,
    /// The evaluation strategy and body.
    pub behavior: FunctionBehavior,
}

/// The table of operators and functions one expression resolves against.
///
/// Hosts may extend or replace entries before the expression is first
/// evaluated; re-registering a symbol or name replaces the previous entry.
/// Unary operators are stored under their symbol suffixed with `u`, matching
/// the tokenizer's tagging of prefix positions, and always bind with
/// [`PRECEDENCE_UNARY`].
///
/// # Example
/// ```
/// use lazex::{Expression, Value};
///
/// let mut expression = Expression::new("3 <=> 4");
/// expression.registry_mut()
///           .register_operator("<=>", lazex::registry::PRECEDENCE_COMPARISON, false,
///                              |_context, left, right| {
///                                  Ok(Value::from(i64::from(left.total_cmp(&right) as i8)))
///                              });
/// assert_eq!(expression.eval().unwrap(), Value::from(-1));
/// ```
pub struct Registry {
    operators: FxHashMap<String, Operator>,
    functions: FxHashMap<String, Function>,
}

impl Registry {
    /// An empty registry with no operators or functions at all.
    #[must_use]
    pub fn empty() -> Self {
        Self { operators: FxHashMap::default(),
               functions: FxHashMap::default(), }
    }

    /// A registry seeded with the standard library.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        stdlib::install(&mut registry);
        registry
    }

    /// Registers an eager binary operator.
    pub fn register_operator(&mut self,
                             symbol: &str,
                             precedence: i32,
                             left_assoc: bool,
                             body: impl Fn(&mut Context, Value, Value) -> EvalResult<Value> + 'static) {
        self.operators.insert(symbol.to_owned(),
                              Operator { precedence,
                                         left_assoc,
                                         behavior: OperatorBehavior::Eager(Rc::new(body)), });
    }

    /// Registers a lazy binary operator.
    pub fn register_lazy_operator(&mut self,
                                  symbol: &str,
                                  precedence: i32,
                                  left_assoc: bool,
                                  body: impl Fn(&mut Context, &LazyValue, &LazyValue) -> EvalResult<Value>
                                      + 'static) {
        self.operators.insert(symbol.to_owned(),
                              Operator { precedence,
                                         left_assoc,
                                         behavior: OperatorBehavior::Lazy(Rc::new(body)), });
    }

    /// Registers a unary prefix operator under `symbol` + `u`.
    pub fn register_unary(&mut self,
                          symbol: &str,
                          body: impl Fn(&mut Context, Value) -> EvalResult<Value> + 'static) {
        self.operators.insert(format!("{symbol}u"),
                              Operator { precedence: PRECEDENCE_UNARY,
                                         left_assoc: false,
                                         behavior:   OperatorBehavior::Unary(Rc::new(body)), });
    }

    /// Registers an eager function. Names are stored lower-cased.
    pub fn register_function(&mut self,
                             name: &str,
                             arity: Arity,
                             body: impl Fn(&mut Context, Vec<Value>) -> EvalResult<Value> + 'static) {
        self.functions.insert(name.to_lowercase(),
                              Function { arity,
                                         behavior: FunctionBehavior::Eager(Rc::new(body)), });
    }

    /// Registers a lazy function. Names are stored lower-cased.
    pub fn register_lazy_function(&mut self,
                                  name: &str,
                                  arity: Arity,
                                  body: impl Fn(&mut Context, &[LazyValue]) -> EvalResult<Value> + 'static) {
        self.functions.insert(name.to_lowercase(),
                              Function { arity,
                                         behavior: FunctionBehavior::Lazy(Rc::new(body)), });
    }

    /// Looks up an operator by its registry key (`-`, `<=`, `-u`, ...).
    #[must_use]
    pub fn operator(&self, key: &str) -> Option<&Operator> {
        self.operators.get(key)
    }

    /// Looks up a function by name, case-insensitively.
    #[must_use]
    pub fn function(&self, name: &str) -> Option<&Function> {
        self.functions.get(&name.to_lowercase())
    }

    /// Whether `symbol` is a registered operator surface. Used by the
    /// tokenizer for longest-match scanning of operator runs.
    #[must_use]
    pub fn is_operator_symbol(&self, symbol: &str) -> bool {
        self.operators.contains_key(symbol)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
         .field("operators", &self.operators.len())
         .field("functions", &self.functions.len())
         .finish()
    }
}
