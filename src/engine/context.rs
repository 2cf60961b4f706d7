use std::str::FromStr;

use bigdecimal::BigDecimal;
use rustc_hash::FxHashMap;

use crate::{
    engine::{lazy::LazyValue, value::core::Value},
    error::EvalResult,
};

/// Default number of significant digits for inexact numeric operations.
pub const DEFAULT_PRECISION: u64 = 34;

/// First hundred-odd digits of pi, seeded as the `PI` constant.
const PI_DIGITS: &str = "3.1415926535897932384626433832795028841971693993751058209749445923078164062862089986280348253421170679";
/// Euler's number, seeded as the `e` constant.
const E_DIGITS: &str = "2.71828182845904523536028747135266249775724709369995957496696762772407663";

/// The shared, mutable state of one expression instance.
///
/// Holds the variable environment (one flat `name -> LazyValue` table, shared
/// across the whole lifetime of the expression), the optional log sink, and
/// the numeric precision used by inexact operations. There is exactly one
/// context per expression and no locking: the engine is single-threaded by
/// contract.
///
/// Unset variables default to numeric zero, bound to their own name, on first
/// read. Constants seeded at construction (`PI`, `e`, `TRUE`, `FALSE`,
/// `NULL`) are deliberately left unbound so that assigning to them fails.
pub struct Context {
    variables: FxHashMap<String, LazyValue>,
    log_sink:  Option<Box<dyn FnMut(&str)>>,
    precision: u64,
}

impl Context {
    /// Creates a context with the default precision and the seeded constants.
    #[must_use]
    pub fn new() -> Self {
        let mut variables = FxHashMap::default();
        let pi = BigDecimal::from_str(PI_DIGITS).expect("pi constant parses");
        let e = BigDecimal::from_str(E_DIGITS).expect("e constant parses");
        variables.insert("PI".to_owned(), LazyValue::of(Value::from(pi)));
        variables.insert("e".to_owned(), LazyValue::of(Value::from(e)));
        variables.insert("TRUE".to_owned(), LazyValue::of(Value::from(true)));
        variables.insert("FALSE".to_owned(), LazyValue::of(Value::from(false)));
        variables.insert("NULL".to_owned(), LazyValue::of(Value::null()));

        Self { variables,
               log_sink: None,
               precision: DEFAULT_PRECISION }
    }

    /// The number of significant digits for inexact numeric operations.
    #[must_use]
    pub const fn precision(&self) -> u64 {
        self.precision
    }

    /// Changes the number of significant digits for inexact operations.
    pub fn set_precision(&mut self, digits: u64) {
        self.precision = digits.max(1);
    }

    /// Binds `name` to a ready value carrying `name` as its binding.
    pub fn bind(&mut self, name: &str, value: Value) {
        self.variables
            .insert(name.to_owned(), LazyValue::of(value.bound_to(name)));
    }

    /// Binds `name` to a lazy value as-is, without attaching a binding name.
    ///
    /// Used for seeding constants and for host-supplied deferred variables.
    pub fn bind_lazy(&mut self, name: &str, value: LazyValue) {
        self.variables.insert(name.to_owned(), value);
    }

    /// Looks up the environment entry for `name` without forcing it.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&LazyValue> {
        self.variables.get(name)
    }

    /// Reads a variable, installing and returning a zero bound to `name` when
    /// the variable has never been set.
    pub fn read_or_default(&mut self, name: &str) -> EvalResult<Value> {
        if let Some(existing) = self.variables.get(name).cloned() {
            return existing.force(self);
        }
        let value = Value::zero().bound_to(name);
        self.variables
            .insert(name.to_owned(), LazyValue::of(value.clone()));
        Ok(value)
    }

    /// Installs the sink that receives `;` and `print` output lines.
    pub fn set_log_sink(&mut self, sink: impl FnMut(&str) + 'static) {
        self.log_sink = Some(Box::new(sink));
    }

    /// Whether a log sink is installed.
    #[must_use]
    pub const fn has_log_sink(&self) -> bool {
        self.log_sink.is_some()
    }

    /// Sends one line to the log sink, if any is installed.
    pub fn emit_log(&mut self, line: &str) {
        if let Some(sink) = &mut self.log_sink {
            sink(line);
        }
    }

    /// Runs `body` with the given names shadowed, restoring their previous
    /// entries afterwards.
    ///
    /// The restore happens whether `body` succeeds or fails, so iteration
    /// constructs can never leak their loop bindings (`_`, `acc`) out of the
    /// call, not even when an error aborts the loop halfway through. Names
    /// that had no previous entry are removed again.
    pub fn with_shadowed<R>(&mut self,
                            names: &[&str],
                            body: impl FnOnce(&mut Self) -> R)
                            -> R {
        let saved: Vec<(String, Option<LazyValue>)> =
            names.iter()
                 .map(|name| ((*name).to_owned(), self.variables.get(*name).cloned()))
                 .collect();

        let result = body(self);

        for (name, previous) in saved {
            match previous {
                Some(entry) => {
                    self.variables.insert(name, entry);
                },
                None => {
                    self.variables.remove(&name);
                },
            }
        }

        result
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
         .field("variables", &self.variables.len())
         .field("log_sink", &self.log_sink.is_some())
         .field("precision", &self.precision)
         .finish()
    }
}
