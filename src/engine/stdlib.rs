use bigdecimal::BigDecimal;
use num_traits::{FromPrimitive, ToPrimitive};

use crate::{
    engine::{context::Context, registry::Registry, value::core::Value},
    error::{EvalError, EvalResult},
};

/// Arithmetic operators: `+ - * / % ^` and the unary prefixes.
pub mod arithmetic;
/// Sequencing, assignment and swap: `; = <>`.
pub mod binding;
/// Comparison operators over the total value order: `> >= < <= == !=`.
pub mod comparison;
/// Control-flow functions operating on the shared environment:
/// `if loop map for while reduce case`.
pub mod control;
/// List construction and the `print` passthrough.
pub mod lists;
/// Boolean operators and negation: `&& ||` and `not`.
pub mod logic;
/// Floating-point math library: trigonometry, logarithms, rounding.
pub mod math;
/// Variadic extremum reducers: `min` and `max`.
pub mod min_max;

/// Seeds a registry with the whole standard library.
pub(crate) fn install(registry: &mut Registry) {
    arithmetic::install(registry);
    comparison::install(registry);
    logic::install(registry);
    binding::install(registry);
    math::install(registry);
    min_max::install(registry);
    lists::install(registry);
    control::install(registry);
}

/// Converts a value to `f64` for the floating-point math library.
pub(crate) fn as_f64(value: &Value, function: &str) -> EvalResult<f64> {
    value.as_numeric(function)?
         .to_f64()
         .ok_or_else(|| EvalError::NonFiniteResult { function: function.to_owned() })
}

/// Re-enters a floating-point result into the decimal world, rounded to the
/// context precision. Non-finite results are evaluation errors.
pub(crate) fn decimal_result(context: &Context, function: &str, result: f64) -> EvalResult<Value> {
    if !result.is_finite() {
        return Err(EvalError::NonFiniteResult { function: function.to_owned() });
    }
    BigDecimal::from_f64(result)
        .map(|n| Value::from(n.with_prec(context.precision())))
        .ok_or_else(|| EvalError::NonFiniteResult { function: function.to_owned() })
}

/// Converts a value to an `i64`, for iteration bounds and integer arguments.
/// Fractional values truncate toward zero, as the decimal conversion does.
pub(crate) fn as_i64(value: &Value, function: &str) -> EvalResult<i64> {
    value.as_numeric(function)?
         .to_i64()
         .ok_or_else(|| EvalError::InvalidArgument { function: function.to_owned(),
                                                     details:  "value is out of range".to_owned(), })
}
