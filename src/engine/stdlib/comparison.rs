use std::cmp::Ordering;

use crate::engine::{
    registry::{Registry, PRECEDENCE_COMPARISON, PRECEDENCE_EQUALITY},
    value::core::Value,
};

pub(crate) fn install(registry: &mut Registry) {
    registry.register_operator(">", PRECEDENCE_COMPARISON, false, |_context, left, right| {
                Ok(Value::from(left.total_cmp(&right) == Ordering::Greater))
            });
    registry.register_operator(">=", PRECEDENCE_COMPARISON, false, |_context, left, right| {
                Ok(Value::from(left.total_cmp(&right) != Ordering::Less))
            });
    registry.register_operator("<", PRECEDENCE_COMPARISON, false, |_context, left, right| {
                Ok(Value::from(left.total_cmp(&right) == Ordering::Less))
            });
    registry.register_operator("<=", PRECEDENCE_COMPARISON, false, |_context, left, right| {
                Ok(Value::from(left.total_cmp(&right) != Ordering::Greater))
            });
    registry.register_operator("==", PRECEDENCE_EQUALITY, false, |_context, left, right| {
                Ok(Value::from(left.total_cmp(&right) == Ordering::Equal))
            });
    registry.register_operator("!=", PRECEDENCE_EQUALITY, false, |_context, left, right| {
                Ok(Value::from(left.total_cmp(&right) != Ordering::Equal))
            });
}

impl Registry {
    /// Restores the historical behavior where `!=` evaluates the same
    /// comparison as `==`.
    ///
    /// The engine this design descends from shipped an inequality operator
    /// that answered equality. The default registry gives `!=` its intended
    /// meaning; hosts that depend on scripts written against the historical
    /// behavior can opt back into it here.
    pub fn use_legacy_inequality(&mut self) {
        self.register_operator("!=", PRECEDENCE_EQUALITY, false, |_context, left, right| {
                Ok(Value::from(left.total_cmp(&right) == Ordering::Equal))
            });
    }
}
