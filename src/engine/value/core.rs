use std::{cmp::Ordering, rc::Rc, str::FromStr};

use bigdecimal::{BigDecimal, Zero};

use crate::{
    engine::value::host::HostValue,
    error::{EvalError, EvalResult},
};

/// The payload of a runtime value.
///
/// This enum models the closed set of variants the engine itself knows,
/// plus the [`Host`](ValueRepr::Host) variant through which embedding
/// applications supply their own types.
#[derive(Debug, Clone)]
pub enum ValueRepr {
    /// An arbitrary-precision decimal number. Booleans are numerics by
    /// convention: comparisons yield `1` or `0`.
    Numeric(BigDecimal),
    /// A piece of text.
    Text(Rc<str>),
    /// An ordered sequence of values.
    List(Rc<Vec<Value>>),
    /// The null value. Prints as the empty string and is never true.
    Null,
    /// A host-supplied value variant.
    Host(Rc<dyn HostValue>),
}

/// A runtime value, optionally carrying the name of the variable it was last
/// read from or assigned to.
///
/// The binding name exists solely so that assignment-like operators can
/// recover an lvalue; it takes no part in equality or ordering. Values are
/// immutable: "mutating" a variable replaces its environment entry with a new
/// value, never the value itself.
#[derive(Debug, Clone)]
pub struct Value {
    repr:    ValueRepr,
    binding: Option<Rc<str>>,
}

impl Value {
    /// The null value.
    #[must_use]
    pub const fn null() -> Self {
        Self { repr:    ValueRepr::Null,
               binding: None, }
    }

    /// Numeric zero, the default for unset variables.
    #[must_use]
    pub fn zero() -> Self {
        Self::from(BigDecimal::zero())
    }

    /// Wraps a host-supplied value.
    #[must_use]
    pub fn host(host: Rc<dyn HostValue>) -> Self {
        Self { repr:    ValueRepr::Host(host),
               binding: None, }
    }

    /// The payload of this value.
    #[must_use]
    pub const fn repr(&self) -> &ValueRepr {
        &self.repr
    }

    /// The variable name this value is bound to, if any.
    #[must_use]
    pub fn binding(&self) -> Option<&str> {
        self.binding.as_deref()
    }

    /// Whether this value carries a binding name.
    #[must_use]
    pub const fn is_bound(&self) -> bool {
        self.binding.is_some()
    }

    /// Returns a copy of this value bound to `name`.
    #[must_use]
    pub fn bound_to(&self, name: &str) -> Self {
        Self { repr:    self.repr.clone(),
               binding: Some(Rc::from(name)), }
    }

    /// The boolean interpretation of this value.
    ///
    /// Null is false; numerics are true when nonzero; text and lists are true
    /// when nonempty; host values decide for themselves.
    ///
    /// # Example
    /// ```
    /// use lazex::Value;
    ///
    /// assert!(Value::from(3).truthy());
    /// assert!(!Value::zero().truthy());
    /// assert!(!Value::null().truthy());
    /// assert!(Value::from("x").truthy());
    /// ```
    #[must_use]
    pub fn truthy(&self) -> bool {
        match &self.repr {
            ValueRepr::Null => false,
            ValueRepr::Numeric(n) => !n.is_zero(),
            ValueRepr::Text(t) => !t.is_empty(),
            ValueRepr::List(items) => !items.is_empty(),
            ValueRepr::Host(h) => h.truthy(),
        }
    }

    /// The canonical text form of this value.
    ///
    /// Numerics print their digits (integers without a decimal point), text
    /// prints its contents, lists print their elements bracketed, null prints
    /// as the empty string.
    #[must_use]
    pub fn text(&self) -> String {
        match &self.repr {
            ValueRepr::Null => String::new(),
            ValueRepr::Numeric(n) => format_numeric(n),
            ValueRepr::Text(t) => t.to_string(),
            ValueRepr::List(items) => {
                let mut out = String::from("[");
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        out.push_str(", ");
                    }
                    out.push_str(&item.text());
                }
                out.push(']');
                out
            },
            ValueRepr::Host(h) => h.text(),
        }
    }

    /// Borrows the numeric payload, or fails with `ExpectedNumber` naming
    /// `context` as the operation that required it.
    pub fn as_numeric(&self, context: &str) -> EvalResult<&BigDecimal> {
        match &self.repr {
            ValueRepr::Numeric(n) => Ok(n),
            _ => Err(EvalError::ExpectedNumber { context: context.to_owned() }),
        }
    }

    /// A list view of this value: the elements of a list, or whatever list
    /// view a host value offers. `None` for everything else.
    #[must_use]
    pub fn as_items(&self) -> Option<Vec<Self>> {
        match &self.repr {
            ValueRepr::List(items) => Some((**items).clone()),
            ValueRepr::Host(h) => h.items(),
            _ => None,
        }
    }

    /// Compares two values under the engine's total order.
    ///
    /// Variants rank `Null < Numeric < Text < List < Host`. Within a variant:
    /// numerics compare by value, text lexicographically, lists elementwise
    /// (shorter lists first on a tie), host values by their canonical text.
    /// Binding names never participate.
    ///
    /// # Example
    /// ```
    /// use std::cmp::Ordering;
    ///
    /// use lazex::Value;
    ///
    /// assert_eq!(Value::from(2).total_cmp(&Value::from(10)), Ordering::Less);
    /// assert_eq!(Value::from(1).total_cmp(&Value::from("a")), Ordering::Less);
    /// assert_eq!(Value::null().total_cmp(&Value::zero()), Ordering::Less);
    /// ```
    #[must_use]
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        match (&self.repr, &other.repr) {
            (ValueRepr::Null, ValueRepr::Null) => Ordering::Equal,
            (ValueRepr::Numeric(a), ValueRepr::Numeric(b)) => a.cmp(b),
            (ValueRepr::Text(a), ValueRepr::Text(b)) => a.cmp(b),
            (ValueRepr::List(a), ValueRepr::List(b)) => {
                for (x, y) in a.iter().zip(b.iter()) {
                    let ordering = x.total_cmp(y);
                    if ordering != Ordering::Equal {
                        return ordering;
                    }
                }
                a.len().cmp(&b.len())
            },
            (ValueRepr::Host(a), ValueRepr::Host(b)) => a.text().cmp(&b.text()),
            (a, b) => variant_rank(a).cmp(&variant_rank(b)),
        }
    }
}

/// Rank of a variant in the cross-type total order.
const fn variant_rank(repr: &ValueRepr) -> u8 {
    match repr {
        ValueRepr::Null => 0,
        ValueRepr::Numeric(_) => 1,
        ValueRepr::Text(_) => 2,
        ValueRepr::List(_) => 3,
        ValueRepr::Host(_) => 4,
    }
}

/// Prints a decimal without a trailing fractional part when it is integral,
/// and with trailing zeros stripped otherwise.
fn format_numeric(n: &BigDecimal) -> String {
    if n.is_integer() {
        n.with_scale(0).to_string()
    } else {
        n.normalized().to_string()
    }
}

/// Parses a numeric literal into a decimal, accepting the surface forms the
/// tokenizer produces (`2`, `2.`, `.5`, `2.5e-3`). Returns `None` when the
/// text is not a number.
pub(crate) fn parse_decimal(text: &str) -> Option<BigDecimal> {
    let mut cleaned = text.replace(".e", "e").replace(".E", "E");
    if cleaned.ends_with('.') {
        cleaned.pop();
    }
    if cleaned.starts_with('.') {
        cleaned.insert(0, '0');
    }
    BigDecimal::from_str(&cleaned).ok()
}

impl From<BigDecimal> for Value {
    fn from(n: BigDecimal) -> Self {
        Self { repr:    ValueRepr::Numeric(n),
               binding: None, }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::from(BigDecimal::from(n))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::from(BigDecimal::from(i64::from(b)))
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Self { repr:    ValueRepr::Text(Rc::from(text)),
               binding: None, }
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Self::from(text.as_str())
    }
}

impl From<Vec<Self>> for Value {
    fn from(items: Vec<Self>) -> Self {
        Self { repr:    ValueRepr::List(Rc::new(items)),
               binding: None, }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.total_cmp(other) == Ordering::Equal
    }
}

impl Eq for Value {}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.total_cmp(other))
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        self.total_cmp(other)
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text())
    }
}
