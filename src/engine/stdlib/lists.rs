use crate::engine::registry::{Arity, Registry};

pub(crate) fn install(registry: &mut Registry) {
    registry.register_function("list", Arity::Variadic, |_context, args| {
                Ok(args.into())
            });

    // Side-effecting passthrough: the value's text goes to the log sink and
    // the value itself, binding included, flows on.
    registry.register_function("print", Arity::Fixed(1), |context, mut args| {
                let value = args.remove(0);
                let line = value.text();
                context.emit_log(&line);
                Ok(value)
            });
}
