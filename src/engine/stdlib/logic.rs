use crate::engine::{
    registry::{Arity, Registry, PRECEDENCE_AND, PRECEDENCE_OR},
    value::core::Value,
};

pub(crate) fn install(registry: &mut Registry) {
    // Short-circuit: the right operand is only forced when the left side
    // does not already decide the answer.
    registry.register_lazy_operator("&&", PRECEDENCE_AND, false, |context, left, right| {
                if !left.force(context)?.truthy() {
                    return Ok(Value::from(false));
                }
                Ok(Value::from(right.force(context)?.truthy()))
            });

    registry.register_lazy_operator("||", PRECEDENCE_OR, false, |context, left, right| {
                if left.force(context)?.truthy() {
                    return Ok(Value::from(true));
                }
                Ok(Value::from(right.force(context)?.truthy()))
            });

    registry.register_function("not", Arity::Fixed(1), |_context, args| {
                Ok(Value::from(!args[0].truthy()))
            });
}
