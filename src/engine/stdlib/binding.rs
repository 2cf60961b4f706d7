use crate::{
    engine::{
        lazy::LazyValue,
        registry::{Registry, PRECEDENCE_ASSIGN, PRECEDENCE_EQUALITY, PRECEDENCE_SEQUENCE},
    },
    error::EvalError,
};

pub(crate) fn install(registry: &mut Registry) {
    // Sequencing: evaluate the left side, report it to the log sink, yield
    // the right side.
    registry.register_lazy_operator(";", PRECEDENCE_SEQUENCE, true, |context, left, right| {
                let first = left.force(context)?;
                if context.has_log_sink() {
                    let line = first.text();
                    context.emit_log(&line);
                }
                right.force(context)
            });

    // Assignment recovers its lvalue from the binding name the left operand
    // carries; reading a variable always attaches one.
    registry.register_operator("=", PRECEDENCE_ASSIGN, false, |context, left, right| {
                let name = left.binding()
                               .ok_or_else(|| EvalError::UnboundAssignment { op: "=".to_owned() })?
                               .to_owned();
                let bound = right.bound_to(&name);
                context.bind_lazy(&name, LazyValue::of(bound.clone()));
                Ok(bound)
            });

    // Swap: both sides must be variables; their entries exchange within this
    // evaluation.
    registry.register_operator("<>", PRECEDENCE_EQUALITY, false, |context, left, right| {
                let (Some(left_name), Some(right_name)) = (left.binding(), right.binding()) else {
                    return Err(EvalError::UnboundAssignment { op: "<>".to_owned() });
                };
                let left_name = left_name.to_owned();
                let right_name = right_name.to_owned();
                let new_left = right.bound_to(&left_name);
                let new_right = left.bound_to(&right_name);
                context.bind_lazy(&left_name, LazyValue::of(new_left.clone()));
                context.bind_lazy(&right_name, LazyValue::of(new_right));
                Ok(new_left)
            });
}
