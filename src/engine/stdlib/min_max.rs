use std::cmp::Ordering;

use crate::{
    engine::{
        registry::{Arity, Registry},
        value::core::Value,
    },
    error::{EvalError, EvalResult},
};

pub(crate) fn install(registry: &mut Registry) {
    registry.register_function("min", Arity::Variadic, |_context, args| {
                extremum("min", args, Ordering::Less)
            });
    registry.register_function("max", Arity::Variadic, |_context, args| {
                extremum("max", args, Ordering::Greater)
            });
}

/// Reduces the arguments to the one that wins `keep` under the total value
/// order. At least one argument is required.
fn extremum(name: &str, args: Vec<Value>, keep: Ordering) -> EvalResult<Value> {
    let mut iter = args.into_iter();
    let Some(mut best) = iter.next() else {
        return Err(EvalError::MissingArguments { function: name.to_owned() });
    };
    for candidate in iter {
        if candidate.total_cmp(&best) == keep {
            best = candidate;
        }
    }
    Ok(best)
}
