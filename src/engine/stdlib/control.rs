use crate::{
    engine::{
        context::Context,
        lazy::LazyValue,
        registry::{Arity, Registry},
        value::core::Value,
    },
    error::{EvalError, EvalResult},
};

/// Control flow lives in lazy functions: each receives its arguments
/// unforced and decides, per its own semantics, which to force and how
/// often. Iteration constructs shadow their loop names (`_`, `acc`) via
/// [`Context::with_shadowed`], so the previous bindings come back whether the
/// loop completes or aborts on an error.
pub(crate) fn install(registry: &mut Registry) {
    // The untaken branch is never forced; this is the primitive that makes
    // short-circuiting control flow possible.
    registry.register_lazy_function("if", Arity::Fixed(3), |context, args| {
                if args[0].force(context)?.truthy() {
                    args[1].force(context)
                } else {
                    args[2].force(context)
                }
            });

    // loop(expr, n): force expr n times with `_` bound to the iteration
    // index; yield the last value, or zero when n <= 0.
    registry.register_lazy_function("loop", Arity::Fixed(2), |context, args| {
                let count = iteration_bound(context, &args[1], "loop")?;
                context.with_shadowed(&["_"], |context| {
                           let mut last = Value::zero();
                           for i in 0..count {
                               context.bind("_", Value::from(i));
                               last = args[0].force(context)?;
                           }
                           Ok(last)
                       })
            });

    // map(expr, list): force expr once per element with `_` bound to it;
    // collect the results in input order.
    registry.register_lazy_function("map", Arity::Fixed(2), |context, args| {
                let items = forced_list(context, &args[1], "map")?;
                context.with_shadowed(&["_"], |context| {
                           let mut results = Vec::with_capacity(items.len());
                           for item in items {
                               context.bind("_", item);
                               results.push(args[0].force(context)?);
                           }
                           Ok(Value::from(results))
                       })
            });

    // for(expr, list): like map, but yields how many results were true.
    registry.register_lazy_function("for", Arity::Fixed(2), |context, args| {
                let items = forced_list(context, &args[1], "for")?;
                context.with_shadowed(&["_"], |context| {
                           let mut hits: i64 = 0;
                           for item in items {
                               context.bind("_", item);
                               if args[0].force(context)?.truthy() {
                                   hits += 1;
                               }
                           }
                           Ok(Value::from(hits))
                       })
            });

    // while(cond, limit, expr): `_` is the 0-based iteration index, rebound
    // before each test; yields the last body value, or zero when no
    // iteration ran.
    registry.register_lazy_function("while", Arity::Fixed(3), |context, args| {
                let limit = iteration_bound(context, &args[1], "while")?;
                context.with_shadowed(&["_"], |context| {
                           let mut last = Value::zero();
                           let mut index: i64 = 0;
                           context.bind("_", Value::from(index));
                           while index < limit && args[0].force(context)?.truthy() {
                               last = args[2].force(context)?;
                               index += 1;
                               context.bind("_", Value::from(index));
                           }
                           Ok(last)
                       })
            });

    // reduce(expr, list, initial): `acc` carries the accumulator, `_` the
    // element; the forced expr becomes the next accumulator. An empty list
    // yields the initial value untouched.
    registry.register_lazy_function("reduce", Arity::Fixed(3), |context, args| {
                let items = forced_list(context, &args[1], "reduce")?;
                let initial = args[2].force(context)?;
                if items.is_empty() {
                    return Ok(initial);
                }
                context.with_shadowed(&["acc", "_"], |context| {
                           let mut accumulator = initial;
                           for item in items {
                               context.bind("acc", accumulator.clone());
                               context.bind("_", item);
                               accumulator = args[0].force(context)?;
                           }
                           Ok(accumulator)
                       })
            });

    // case(c1, e1, c2, e2, ..., default): conditions force in order, only to
    // decide whether their paired expression forces; the trailing default
    // catches everything else.
    registry.register_lazy_function("case", Arity::Variadic, |context, args| {
                if args.len() % 2 == 0 || args.len() < 3 {
                    return Err(EvalError::WrongArgumentCount { function: "case".to_owned(),
                                                               found:    args.len(), });
                }
                for pair in args[..args.len() - 1].chunks(2) {
                    if pair[0].force(context)?.truthy() {
                        return pair[1].force(context);
                    }
                }
                args[args.len() - 1].force(context)
            });
}

/// Forces an iteration bound once and converts it to an integer.
fn iteration_bound(context: &mut Context, bound: &LazyValue, function: &str) -> EvalResult<i64> {
    crate::engine::stdlib::as_i64(&bound.force(context)?, function)
}

/// Forces a list argument, accepting anything with a list view.
fn forced_list(context: &mut Context,
               list: &LazyValue,
               function: &str)
               -> EvalResult<Vec<Value>> {
    list.force(context)?
        .as_items()
        .ok_or_else(|| EvalError::ExpectedList { function: function.to_owned() })
}
