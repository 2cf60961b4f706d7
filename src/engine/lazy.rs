use std::rc::Rc;

use crate::{
    engine::{context::Context, value::core::Value},
    error::EvalResult,
};

/// The signature of a deferred computation.
///
/// A thunk receives the shared evaluation context because forcing may read or
/// mutate variables and may emit log lines.
pub type ThunkFn = dyn Fn(&mut Context) -> EvalResult<Value>;

/// A deferred computation producing a [`Value`] when forced.
///
/// Forcing may have side effects (mutating the variable environment, emitting
/// a log line) and is not idempotent in general: forcing twice may observe
/// different variable state. The evaluator therefore forces each node at most
/// once per evaluation pass; only explicit iteration constructs force a node
/// repeatedly.
///
/// The two shapes make the laziness testable: a [`Ready`](LazyValue::Ready)
/// value compares by its payload, while two [`Thunk`](LazyValue::Thunk)s are
/// equal only when they are the same deferred computation.
///
/// # Example
/// ```
/// use lazex::{Context, LazyValue, Value};
///
/// let mut context = Context::new();
///
/// let ready = LazyValue::of(Value::from(3));
/// assert_eq!(ready.force(&mut context).unwrap(), Value::from(3));
///
/// let thunk = LazyValue::thunk(|_context| Ok(Value::from(4)));
/// assert_eq!(thunk.force(&mut context).unwrap(), Value::from(4));
/// assert_eq!(thunk, thunk.clone());
/// assert_ne!(thunk, LazyValue::thunk(|_context| Ok(Value::from(4))));
/// ```
#[derive(Clone)]
pub enum LazyValue {
    /// A value that needs no computation.
    Ready(Value),
    /// A deferred computation.
    Thunk(Rc<ThunkFn>),
}

impl LazyValue {
    /// Wraps an already-computed value.
    #[must_use]
    pub const fn of(value: Value) -> Self {
        Self::Ready(value)
    }

    /// Wraps a deferred computation.
    pub fn thunk(f: impl Fn(&mut Context) -> EvalResult<Value> + 'static) -> Self {
        Self::Thunk(Rc::new(f))
    }

    /// Numeric zero, ready-made.
    #[must_use]
    pub fn zero() -> Self {
        Self::Ready(Value::zero())
    }

    /// Runs the computation, or clones the ready value.
    pub fn force(&self, context: &mut Context) -> EvalResult<Value> {
        match self {
            Self::Ready(value) => Ok(value.clone()),
            Self::Thunk(thunk) => thunk(context),
        }
    }

    /// Whether this lazy value is already computed.
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }
}

impl PartialEq for LazyValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Ready(a), Self::Ready(b)) => a == b,
            (Self::Thunk(a), Self::Thunk(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl std::fmt::Debug for LazyValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ready(value) => f.debug_tuple("Ready").field(value).finish(),
            Self::Thunk(_) => f.write_str("Thunk(..)"),
        }
    }
}
