use std::rc::Rc;

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use tracing::trace;

use crate::{
    engine::{
        lazy::LazyValue,
        registry::{FunctionBehavior, OperatorBehavior, Registry},
        token::{Token, TokenKind},
        value::core::{parse_decimal, Value},
    },
    error::{EvalError, EvalResult},
};

/// A stack slot while building the lazy tree: either a built node, or the
/// mark a function call's open paren left to delimit its arguments.
enum Slot {
    ParamsStart,
    Node(LazyValue),
}

/// Builds the lazy value tree from a validated RPN sequence.
///
/// One left-to-right pass. Literals become ready leaves; variable references
/// become thunks that read (or default to zero) at force time; operator and
/// function nodes capture their operands' lazy values and the registered
/// behavior without forcing anything. Side effects are all deferred to the
/// moment the returned root is forced.
///
/// # Errors
/// `EvalError` for symbols missing from the registry and for structural
/// problems the validation pass did not rule out.
pub fn build(rpn: &[Token], registry: &Registry) -> EvalResult<LazyValue> {
    let mut stack: Vec<Slot> = Vec::with_capacity(rpn.len());

    for token in rpn {
        match token.kind {
            TokenKind::Operator | TokenKind::UnaryOperator => {
                let operator = registry.operator(&token.registry_key())
                                       .ok_or_else(|| EvalError::UnknownOperator { op: token.surface
                                                                                            .clone(), })?;
                let node = match &operator.behavior {
                    OperatorBehavior::Unary(body) => {
                        let body = Rc::clone(body);
                        let operand = pop_node(&mut stack, &token.surface)?;
                        LazyValue::thunk(move |context| {
                            let value = operand.force(context)?;
                            body(context, value)
                        })
                    },
                    OperatorBehavior::Eager(body) => {
                        let body = Rc::clone(body);
                        let right = pop_node(&mut stack, &token.surface)?;
                        let left = pop_node(&mut stack, &token.surface)?;
                        LazyValue::thunk(move |context| {
                            let a = left.force(context)?;
                            let b = right.force(context)?;
                            body(context, a, b)
                        })
                    },
                    OperatorBehavior::Lazy(body) => {
                        let body = Rc::clone(body);
                        let right = pop_node(&mut stack, &token.surface)?;
                        let left = pop_node(&mut stack, &token.surface)?;
                        LazyValue::thunk(move |context| body(context, &left, &right))
                    },
                };
                stack.push(Slot::Node(node));
            },

            TokenKind::Variable => {
                let name: Rc<str> = Rc::from(token.surface.as_str());
                stack.push(Slot::Node(LazyValue::thunk(move |context| {
                               context.read_or_default(&name)
                           })));
            },

            TokenKind::FunctionCall => {
                let function = registry.function(&token.surface)
                                       .ok_or_else(|| EvalError::UnknownFunction { name: token.surface
                                                                                             .clone(), })?;
                let mut arguments = Vec::new();
                loop {
                    match stack.pop() {
                        Some(Slot::Node(node)) => arguments.push(node),
                        Some(Slot::ParamsStart) => break,
                        None => {
                            return Err(EvalError::MissingOperands { op: token.surface.clone() });
                        },
                    }
                }
                arguments.reverse();

                let node = match &function.behavior {
                    FunctionBehavior::Eager(body) => {
                        let body = Rc::clone(body);
                        LazyValue::thunk(move |context| {
                            let mut values = Vec::with_capacity(arguments.len());
                            for argument in &arguments {
                                values.push(argument.force(context)?);
                            }
                            body(context, values)
                        })
                    },
                    FunctionBehavior::Lazy(body) => {
                        let body = Rc::clone(body);
                        LazyValue::thunk(move |context| body(context, &arguments))
                    },
                };
                stack.push(Slot::Node(node));
            },

            TokenKind::OpenParen => stack.push(Slot::ParamsStart),

            TokenKind::Literal => {
                let number = parse_decimal(&token.surface)
                    .ok_or_else(|| EvalError::MalformedLiteral { literal: token.surface.clone() })?;
                stack.push(Slot::Node(LazyValue::of(Value::from(number))));
            },

            TokenKind::HexLiteral => {
                let digits = token.surface.get(2..).unwrap_or("");
                let number = BigInt::parse_bytes(digits.as_bytes(), 16)
                    .map(BigDecimal::from)
                    .ok_or_else(|| EvalError::MalformedLiteral { literal: token.surface.clone() })?;
                stack.push(Slot::Node(LazyValue::of(Value::from(number))));
            },

            TokenKind::StringLiteral => {
                stack.push(Slot::Node(LazyValue::of(Value::from(token.surface.as_str()))));
            },

            TokenKind::CloseParen | TokenKind::Comma => {
                return Err(EvalError::UnexpectedToken { surface: token.surface.clone() });
            },
        }
    }

    trace!(nodes = rpn.len(), "lazy tree built");

    match (stack.pop(), stack.is_empty()) {
        (Some(Slot::Node(root)), true) => Ok(root),
        _ => Err(EvalError::UnexpectedToken { surface: String::new() }),
    }
}

/// Pops a built node, rejecting a parameter-list mark or an empty stack.
fn pop_node(stack: &mut Vec<Slot>, op: &str) -> EvalResult<LazyValue> {
    match stack.pop() {
        Some(Slot::Node(node)) => Ok(node),
        _ => Err(EvalError::MissingOperands { op: op.to_owned() }),
    }
}
