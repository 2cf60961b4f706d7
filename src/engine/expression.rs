use tracing::debug;

use crate::{
    engine::{
        context::Context,
        evaluator, lexer,
        lazy::LazyValue,
        parser,
        registry::Registry,
        token::Token,
        value::core::{parse_decimal, Value},
    },
    error::{EvalResult, ExprError},
};

/// One expression instance: source text, its registry, its variable
/// environment, and the compilation caches.
///
/// The lifecycle is: construct from source, optionally extend the registry
/// and pre-bind variables, then evaluate. The first evaluation tokenizes,
/// parses to RPN, validates, and builds the lazy value tree; all of it is
/// cached, so later evaluations replay the tree directly — re-executing its
/// side effects and re-reading any variables that changed — without ever
/// touching the text again.
///
/// An instance is single-threaded by contract: nothing here is `Send`, and
/// the same instance must not be evaluated concurrently.
///
/// # Example
/// ```
/// use lazex::{Expression, Value};
///
/// let mut expression = Expression::new("x = 5; x * 2");
/// assert_eq!(expression.eval().unwrap(), Value::from(10));
/// assert_eq!(expression.variable("x").unwrap(), Some(Value::from(5)));
/// ```
pub struct Expression {
    source:   String,
    registry: Registry,
    context:  Context,
    tokens:   Option<Vec<Token>>,
    rpn:      Option<Vec<Token>>,
    root:     Option<LazyValue>,
}

impl Expression {
    /// Creates an expression over `source` with a default registry and a
    /// fresh environment.
    #[must_use]
    pub fn new(source: impl Into<String>) -> Self {
        Self { source:   source.into(),
               registry: Registry::with_defaults(),
               context:  Context::new(),
               tokens:   None,
               rpn:      None,
               root:     None, }
    }

    /// Sets the numeric precision for inexact operations.
    #[must_use]
    pub fn with_precision(mut self, digits: u64) -> Self {
        self.context.set_precision(digits);
        self
    }

    /// The registry this expression resolves against. Extend it before the
    /// first evaluation; later changes do not affect the cached tree.
    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    /// The shared evaluation context.
    #[must_use]
    pub const fn context(&self) -> &Context {
        &self.context
    }

    /// The shared evaluation context, mutably.
    pub fn context_mut(&mut self) -> &mut Context {
        &mut self.context
    }

    /// Pre-binds a variable to a typed value.
    pub fn set_variable(&mut self, name: &str, value: Value) -> &mut Self {
        self.context.bind(name, value);
        self
    }

    /// Pre-binds a variable from text: numeric-looking text becomes a
    /// numeric, `null` becomes the null value, anything else becomes text.
    pub fn set_variable_text(&mut self, name: &str, text: &str) -> &mut Self {
        if let Some(number) = parse_decimal(text) {
            self.context.bind(name, Value::from(number));
        } else if text.eq_ignore_ascii_case("null") {
            self.context.bind(name, Value::null());
        } else {
            self.context.bind(name, Value::from(text));
        }
        self
    }

    /// Pre-binds a variable to a deferred computation, forced anew on every
    /// read.
    pub fn set_lazy_variable(&mut self, name: &str, value: LazyValue) -> &mut Self {
        self.context.bind_lazy(name, value);
        self
    }

    /// Installs the sink receiving every `;` left operand and `print` call.
    pub fn set_log_output(&mut self, sink: impl FnMut(&str) + 'static) -> &mut Self {
        self.context.set_log_sink(sink);
        self
    }

    /// Reads a variable back from the environment, forcing its entry.
    /// `None` when the name was never set.
    pub fn variable(&mut self, name: &str) -> EvalResult<Option<Value>> {
        match self.context.lookup(name).cloned() {
            Some(entry) => Ok(Some(entry.force(&mut self.context)?)),
            None => Ok(None),
        }
    }

    /// The cached token sequence, present after the first evaluation.
    #[must_use]
    pub fn tokens(&self) -> Option<&[Token]> {
        self.tokens.as_deref()
    }

    /// The cached RPN sequence, present after the first evaluation.
    #[must_use]
    pub fn rpn(&self) -> Option<&[Token]> {
        self.rpn.as_deref()
    }

    /// Evaluates the expression, compiling it on the first call.
    ///
    /// # Errors
    /// Any of the three phase errors, under the [`ExprError`] umbrella.
    pub fn eval(&mut self) -> Result<Value, ExprError> {
        let root = match &self.root {
            Some(root) => root.clone(),
            None => self.compile()?,
        };
        Ok(root.force(&mut self.context)?)
    }

    /// Tokenizes, parses, validates and builds the lazy tree, caching every
    /// stage.
    fn compile(&mut self) -> Result<LazyValue, ExprError> {
        let tokens = lexer::tokenize(&self.source, &self.registry)?;
        let rpn = parser::shunting_yard(&tokens, &self.registry)?;
        parser::validate(&rpn, &self.registry)?;
        let root = evaluator::build(&rpn, &self.registry)?;
        debug!(tokens = tokens.len(), rpn = rpn.len(), "expression compiled");
        self.tokens = Some(tokens);
        self.rpn = Some(rpn);
        self.root = Some(root.clone());
        Ok(root)
    }
}

impl std::fmt::Debug for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Expression")
         .field("source", &self.source)
         .field("compiled", &self.root.is_some())
         .finish()
    }
}
