use bigdecimal::{BigDecimal, One, Zero};
use num_bigint::Sign;
use num_traits::{FromPrimitive, ToPrimitive};

use crate::{
    engine::{
        context::Context,
        registry::{Registry, PRECEDENCE_ADDITIVE, PRECEDENCE_MULTIPLICATIVE, PRECEDENCE_POWER},
        value::core::{Value, ValueRepr},
    },
    error::{EvalError, EvalResult},
};

pub(crate) fn install(registry: &mut Registry) {
    registry.register_operator("+", PRECEDENCE_ADDITIVE, true, add);
    registry.register_operator("-", PRECEDENCE_ADDITIVE, true, subtract);
    registry.register_operator("*", PRECEDENCE_MULTIPLICATIVE, true, multiply);
    registry.register_operator("/", PRECEDENCE_MULTIPLICATIVE, true, divide);
    registry.register_operator("%", PRECEDENCE_MULTIPLICATIVE, true, remainder);
    registry.register_operator("^", PRECEDENCE_POWER, false, power);

    registry.register_unary("-", |_context, value| {
                Ok(Value::from(-value.as_numeric("unary '-'")?))
            });
    registry.register_unary("+", |_context, value| {
                value.as_numeric("unary '+'")?;
                Ok(value)
            });
}

/// Addition doubles as concatenation: text on either side concatenates the
/// canonical forms, two lists append, numerics add.
fn add(_context: &mut Context, left: Value, right: Value) -> EvalResult<Value> {
    match (left.repr(), right.repr()) {
        (ValueRepr::Text(_), _) | (_, ValueRepr::Text(_)) => {
            Ok(Value::from(format!("{}{}", left.text(), right.text())))
        },
        (ValueRepr::List(a), ValueRepr::List(b)) => {
            let mut joined = (**a).clone();
            joined.extend(b.iter().cloned());
            Ok(Value::from(joined))
        },
        _ => {
            let a = left.as_numeric("left operand of '+'")?;
            let b = right.as_numeric("right operand of '+'")?;
            Ok(Value::from(a + b))
        },
    }
}

fn subtract(_context: &mut Context, left: Value, right: Value) -> EvalResult<Value> {
    let a = left.as_numeric("left operand of '-'")?;
    let b = right.as_numeric("right operand of '-'")?;
    Ok(Value::from(a - b))
}

fn multiply(_context: &mut Context, left: Value, right: Value) -> EvalResult<Value> {
    let a = left.as_numeric("left operand of '*'")?;
    let b = right.as_numeric("right operand of '*'")?;
    Ok(Value::from(a * b))
}

fn divide(context: &mut Context, left: Value, right: Value) -> EvalResult<Value> {
    let a = left.as_numeric("left operand of '/'")?;
    let b = right.as_numeric("right operand of '/'")?;
    if b.is_zero() {
        return Err(EvalError::DivisionByZero { op: "/".to_owned() });
    }
    Ok(Value::from((a / b).with_prec(context.precision())))
}

fn remainder(context: &mut Context, left: Value, right: Value) -> EvalResult<Value> {
    let a = left.as_numeric("left operand of '%'")?;
    let b = right.as_numeric("right operand of '%'")?;
    if b.is_zero() {
        return Err(EvalError::DivisionByZero { op: "%".to_owned() });
    }
    Ok(Value::from((a % b).with_prec(context.precision())))
}

/// Real-exponent power by integer/fraction decomposition.
///
/// The integer part of the exponent is applied exactly by squaring; the
/// fractional part drops to `f64::powf` and multiplies back in; a negative
/// exponent takes the reciprocal of the whole result. Each rounding step
/// honors the context precision.
fn power(context: &mut Context, left: Value, right: Value) -> EvalResult<Value> {
    let base = left.as_numeric("left operand of '^'")?.clone();
    let exponent = right.as_numeric("right operand of '^'")?.clone();
    let precision = context.precision();

    let negative = exponent.sign() == Sign::Minus;
    let magnitude = exponent.abs();
    let integer_part = magnitude.with_scale(0);
    let fraction_part = &magnitude - &integer_part;

    let integer_exponent =
        integer_part.to_u64()
                    .ok_or_else(|| EvalError::InvalidArgument { function: "^".to_owned(),
                                                                details:  "exponent is out of range"
                                                                          .to_owned(), })?;
    let mut result = integer_power(&base, integer_exponent, precision);

    if !fraction_part.is_zero() {
        let base_f = base.to_f64()
                         .ok_or_else(|| EvalError::NonFiniteResult { function: "^".to_owned() })?;
        let fraction_f = fraction_part.to_f64()
                                      .ok_or_else(|| EvalError::NonFiniteResult { function: "^".to_owned() })?;
        let scaled = base_f.powf(fraction_f);
        if !scaled.is_finite() {
            return Err(EvalError::NonFiniteResult { function: "^".to_owned() });
        }
        let fraction_power =
            BigDecimal::from_f64(scaled)
                .ok_or_else(|| EvalError::NonFiniteResult { function: "^".to_owned() })?;
        result = (result * fraction_power).with_prec(precision);
    }

    if negative {
        if result.is_zero() {
            return Err(EvalError::DivisionByZero { op: "^".to_owned() });
        }
        result = (BigDecimal::one() / result).with_prec(precision);
    }

    Ok(Value::from(result))
}

/// Exponentiation by squaring, rounding each step to `precision` digits.
fn integer_power(base: &BigDecimal, mut exponent: u64, precision: u64) -> BigDecimal {
    let mut result = BigDecimal::one();
    let mut factor = base.clone();
    while exponent > 0 {
        if exponent & 1 == 1 {
            result = (&result * &factor).with_prec(precision);
        }
        exponent >>= 1;
        if exponent > 0 {
            factor = (&factor * &factor).with_prec(precision);
        }
    }
    result
}
