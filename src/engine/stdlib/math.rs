use bigdecimal::{BigDecimal, One, RoundingMode};

use crate::{
    engine::{
        registry::{Arity, Registry},
        stdlib::{as_f64, as_i64, decimal_result},
        value::core::Value,
    },
    error::EvalError,
};

pub(crate) fn install(registry: &mut Registry) {
    // Trigonometry works in degrees, matching the engine's scripting roots.
    math_fn(registry, "sin", |d| d.to_radians().sin());
    math_fn(registry, "cos", |d| d.to_radians().cos());
    math_fn(registry, "tan", |d| d.to_radians().tan());
    math_fn(registry, "asin", |d| d.asin().to_degrees());
    math_fn(registry, "acos", |d| d.acos().to_degrees());
    math_fn(registry, "atan", |d| d.atan().to_degrees());
    math_fn2(registry, "atan2", |a, b| a.atan2(b).to_degrees());
    math_fn(registry, "sinh", f64::sinh);
    math_fn(registry, "cosh", f64::cosh);
    math_fn(registry, "tanh", f64::tanh);
    math_fn(registry, "sec", |d| 1.0 / d.to_radians().cos());
    math_fn(registry, "csc", |d| 1.0 / d.to_radians().sin());
    math_fn(registry, "sech", |d| 1.0 / d.cosh());
    math_fn(registry, "csch", |d| 1.0 / d.sinh());
    math_fn(registry, "cot", |d| 1.0 / d.to_radians().tan());
    math_fn(registry, "acot", |d| (1.0 / d).atan().to_degrees());
    math_fn(registry, "coth", |d| 1.0 / d.tanh());
    math_fn(registry, "asinh", |d| (d + (d * d + 1.0).sqrt()).ln());
    math_fn(registry, "acosh", |d| (d + (d * d - 1.0).sqrt()).ln());
    math_fn(registry, "rad", f64::to_radians);
    math_fn(registry, "deg", f64::to_degrees);
    math_fn(registry, "log", f64::ln);
    math_fn(registry, "log10", f64::log10);
    math_fn(registry, "log1p", f64::ln_1p);
    math_fn(registry, "sqrt", f64::sqrt);
    math_fn(registry, "rand", |d| d * rand::random::<f64>());

    // atanh has poles at the interval edges; report the domain instead of a
    // non-finite result.
    registry.register_function("atanh", Arity::Fixed(1), |context, args| {
                let x = as_f64(&args[0], "atanh")?;
                if x.abs() >= 1.0 {
                    return Err(EvalError::InvalidArgument { function: "atanh".to_owned(),
                                                            details:  "|x| must be below 1"
                                                                      .to_owned(), });
                }
                decimal_result(context, "atanh", 0.5 * ((1.0 + x) / (1.0 - x)).ln())
            });

    registry.register_function("fact", Arity::Fixed(1), |_context, args| {
                let n = as_i64(&args[0], "fact")?;
                let mut product = BigDecimal::one();
                for i in 1..=n {
                    product = product * BigDecimal::from(i);
                }
                Ok(Value::from(product))
            });

    registry.register_function("abs", Arity::Fixed(1), |_context, args| {
                Ok(Value::from(args[0].as_numeric("abs")?.abs()))
            });

    registry.register_function("round", Arity::Fixed(2), |_context, args| {
                let digits = as_i64(&args[1], "round")?;
                let n = args[0].as_numeric("round")?;
                Ok(Value::from(n.with_scale_round(digits, RoundingMode::HalfEven)))
            });

    registry.register_function("floor", Arity::Fixed(1), |_context, args| {
                let n = args[0].as_numeric("floor")?;
                Ok(Value::from(n.with_scale_round(0, RoundingMode::Floor)))
            });

    registry.register_function("ceil", Arity::Fixed(1), |_context, args| {
                let n = args[0].as_numeric("ceil")?;
                Ok(Value::from(n.with_scale_round(0, RoundingMode::Ceiling)))
            });

    registry.register_function("relu", Arity::Fixed(1), |_context, args| {
                if args[0].as_numeric("relu")?.sign() == num_bigint::Sign::Minus {
                    return Ok(Value::zero());
                }
                Ok(args[0].clone())
            });
}

/// Registers a one-argument function computed in `f64`.
fn math_fn(registry: &mut Registry, name: &'static str, body: impl Fn(f64) -> f64 + 'static) {
    registry.register_function(name, Arity::Fixed(1), move |context, args| {
                let x = as_f64(&args[0], name)?;
                decimal_result(context, name, body(x))
            });
}

/// Registers a two-argument function computed in `f64`.
fn math_fn2(registry: &mut Registry,
            name: &'static str,
            body: impl Fn(f64, f64) -> f64 + 'static) {
    registry.register_function(name, Arity::Fixed(2), move |context, args| {
                let a = as_f64(&args[0], name)?;
                let b = as_f64(&args[1], name)?;
                decimal_result(context, name, body(a, b))
            });
}
