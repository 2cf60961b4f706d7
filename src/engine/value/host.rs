use crate::engine::value::core::Value;

/// A domain-specific value variant supplied by the embedding application.
///
/// The engine never inspects host values structurally. It only needs three
/// capabilities from them: a canonical text form (for logging, `print` and
/// string concatenation), a truth value (for conditions and the boolean
/// operators), and an optional list view (so iteration constructs such as
/// `map` can walk host collections).
///
/// Host values sort after every built-in variant, ordered among themselves by
/// their canonical text. See [`Value::total_cmp`].
///
/// # Example
/// ```
/// use std::rc::Rc;
///
/// use lazex::{HostValue, Value};
///
/// #[derive(Debug)]
/// struct Position {
///     x: i64,
///     y: i64,
/// }
///
/// impl HostValue for Position {
///     fn text(&self) -> String {
///         format!("{} {}", self.x, self.y)
///     }
/// }
///
/// let value = Value::host(Rc::new(Position { x: 1, y: 2 }));
/// assert_eq!(value.text(), "1 2");
/// assert!(value.truthy());
/// ```
pub trait HostValue: std::fmt::Debug {
    /// The canonical text form of this value.
    fn text(&self) -> String;

    /// The boolean interpretation of this value. Defaults to `true`.
    fn truthy(&self) -> bool {
        true
    }

    /// A list view of this value, if it has one. Defaults to `None`.
    fn items(&self) -> Option<Vec<Value>> {
        None
    }
}
