use crate::{
    engine::{
        registry::{Arity, Operator, Registry},
        token::{Token, TokenKind},
    },
    error::SyntaxError,
};

/// Converts an infix token sequence into Reverse Polish Notation.
///
/// Classic shunting-yard over the registry's precedences and
/// associativities, extended with two behaviors the evaluator depends on:
///
/// - implicit multiplication: a literal, hex literal, variable or close paren
///   directly followed by an open paren, a variable or a literal multiplies
///   (`2(3+4)`, `(a+b)(a-b)`, `2x`). Two adjacent literal-kind tokens are a
///   missing operator instead, reported at the second token;
/// - a function call's open paren is emitted into the output as well as
///   pushed, marking where that call's arguments begin so the evaluator can
///   find each call's parameter boundary.
///
/// # Errors
/// `SyntaxError` with the offending character offset.
pub fn shunting_yard(tokens: &[Token], registry: &Registry) -> Result<Vec<Token>, SyntaxError> {
    let mut output: Vec<Token> = Vec::with_capacity(tokens.len());
    let mut stack: Vec<Token> = Vec::new();
    let mut previous: Option<&Token> = None;

    for token in tokens {
        if let Some(prev) = previous {
            if token.kind.is_literal() && prev.kind.is_literal() {
                return Err(SyntaxError::MissingOperator { offset: token.offset });
            }
            if implies_multiplication(prev.kind, token.kind) {
                let star = Token::new("*", TokenKind::Operator, token.offset);
                let op = registry.operator("*")
                                 .ok_or_else(|| SyntaxError::UnknownOperator { op:     "*".to_owned(),
                                                                               offset: token.offset, })?;
                shunt_operators(&mut output, &mut stack, op, registry);
                stack.push(star);
            }
        }

        match token.kind {
            TokenKind::Literal
            | TokenKind::HexLiteral
            | TokenKind::StringLiteral
            | TokenKind::Variable => output.push(token.clone()),

            TokenKind::FunctionCall => stack.push(token.clone()),

            TokenKind::Comma => {
                if let Some(prev) = previous {
                    if prev.kind == TokenKind::Operator {
                        return Err(SyntaxError::MissingOperands { op:     prev.surface.clone(),
                                                                  offset: prev.offset, });
                    }
                }
                while stack.last().is_some_and(|top| top.kind != TokenKind::OpenParen) {
                    if let Some(top) = stack.pop() {
                        output.push(top);
                    }
                }
                if stack.is_empty() {
                    return Err(SyntaxError::MisplacedComma { offset: token.offset });
                }
            },

            TokenKind::Operator => {
                if let Some(prev) = previous {
                    if matches!(prev.kind, TokenKind::Comma | TokenKind::OpenParen) {
                        return Err(SyntaxError::MissingOperands { op:     token.surface.clone(),
                                                                  offset: token.offset, });
                    }
                }
                let op = registry.operator(&token.surface)
                                 .ok_or_else(|| SyntaxError::UnknownOperator { op:     token.surface
                                                                                            .clone(),
                                                                               offset: token.offset, })?;
                shunt_operators(&mut output, &mut stack, op, registry);
                stack.push(token.clone());
            },

            TokenKind::UnaryOperator => {
                if let Some(prev) = previous {
                    if !matches!(prev.kind,
                                 TokenKind::Operator
                                 | TokenKind::UnaryOperator
                                 | TokenKind::Comma
                                 | TokenKind::OpenParen)
                    {
                        return Err(SyntaxError::InvalidUnaryPosition { op:     token.surface.clone(),
                                                                       offset: token.offset, });
                    }
                }
                let op = registry.operator(&token.registry_key())
                                 .ok_or_else(|| SyntaxError::UnknownOperator { op:     token.surface
                                                                                            .clone(),
                                                                               offset: token.offset, })?;
                shunt_operators(&mut output, &mut stack, op, registry);
                stack.push(token.clone());
            },

            TokenKind::OpenParen => {
                if let Some(prev) = previous {
                    // A paren after a function call starts that call's
                    // argument scope in the output.
                    if prev.kind == TokenKind::FunctionCall {
                        output.push(token.clone());
                    }
                }
                stack.push(token.clone());
            },

            TokenKind::CloseParen => {
                if let Some(prev) = previous {
                    if prev.kind == TokenKind::Operator {
                        return Err(SyntaxError::MissingOperands { op:     prev.surface.clone(),
                                                                  offset: prev.offset, });
                    }
                }
                loop {
                    match stack.pop() {
                        Some(top) if top.kind == TokenKind::OpenParen => break,
                        Some(top) => output.push(top),
                        None => {
                            return Err(SyntaxError::MismatchedParens { offset: token.offset });
                        },
                    }
                }
                let finishes_call =
                    matches!(stack.last(), Some(top) if top.kind == TokenKind::FunctionCall);
                if finishes_call {
                    if let Some(function) = stack.pop() {
                        output.push(function);
                    }
                }
            },
        }

        previous = Some(token);
    }

    while let Some(top) = stack.pop() {
        if matches!(top.kind, TokenKind::OpenParen | TokenKind::CloseParen) {
            return Err(SyntaxError::MismatchedParens { offset: top.offset });
        }
        output.push(top);
    }

    Ok(output)
}

/// Whether two adjacent token kinds imply an inserted multiplication.
const fn implies_multiplication(previous: TokenKind, current: TokenKind) -> bool {
    let operand_before = matches!(previous,
                                  TokenKind::Literal
                                  | TokenKind::HexLiteral
                                  | TokenKind::Variable
                                  | TokenKind::CloseParen);
    let operand_after = matches!(current,
                                 TokenKind::OpenParen
                                 | TokenKind::Variable
                                 | TokenKind::Literal
                                 | TokenKind::HexLiteral);
    operand_before && operand_after
}

/// Pops operators that bind at least as tightly as `incoming` into the
/// output, honoring associativity.
fn shunt_operators(output: &mut Vec<Token>,
                   stack: &mut Vec<Token>,
                   incoming: &Operator,
                   registry: &Registry) {
    loop {
        let pops = match stack.last() {
            Some(top) if matches!(top.kind, TokenKind::Operator | TokenKind::UnaryOperator) => {
                registry.operator(&top.registry_key())
                        .is_some_and(|resting| {
                            (incoming.left_assoc && incoming.precedence <= resting.precedence)
                            || incoming.precedence < resting.precedence
                        })
            },
            _ => false,
        };
        if !pops {
            return;
        }
        if let Some(top) = stack.pop() {
            output.push(top);
        }
    }
}

/// Checks that the RPN sequence has enough operands for every operator and
/// function, that every fixed-arity call receives its declared count, and
/// that exactly one result remains.
///
/// Runs once, before the lazy tree is built, so malformed sequences are
/// rejected deterministically with parse-time errors rather than surfacing
/// halfway through an evaluation.
///
/// # Errors
/// `SyntaxError` mirroring the parser's taxonomy.
pub fn validate(rpn: &[Token], registry: &Registry) -> Result<(), SyntaxError> {
    // Each entry is one function argument scope; the value is how many
    // results are currently available inside it.
    let mut scopes: Vec<usize> = vec![0];

    for token in rpn {
        match token.kind {
            TokenKind::UnaryOperator => {
                if scopes.last().is_none_or(|count| *count < 1) {
                    return Err(SyntaxError::MissingOperands { op:     token.surface.clone(),
                                                              offset: token.offset, });
                }
            },
            TokenKind::Operator => {
                match scopes.last_mut() {
                    Some(count) if *count >= 2 => *count -= 1,
                    _ => {
                        return Err(SyntaxError::MissingOperands { op:     token.surface.clone(),
                                                                  offset: token.offset, });
                    },
                }
            },
            TokenKind::FunctionCall => {
                let function = registry.function(&token.surface)
                                       .ok_or_else(|| SyntaxError::UnknownFunction { name:   token.surface
                                                                                                  .clone(),
                                                                                     offset: token.offset, })?;
                let Some(found) = scopes.pop() else {
                    return Err(SyntaxError::DanglingParameterList);
                };
                if let Arity::Fixed(expected) = function.arity {
                    if found != expected {
                        return Err(SyntaxError::FunctionArity { name: token.surface.clone(),
                                                                expected,
                                                                found });
                    }
                }
                match scopes.last_mut() {
                    Some(count) => *count += 1,
                    None => return Err(SyntaxError::DanglingParameterList),
                }
            },
            TokenKind::OpenParen => scopes.push(0),
            _ => {
                if let Some(count) = scopes.last_mut() {
                    *count += 1;
                }
            },
        }
    }

    if scopes.len() > 1 {
        return Err(SyntaxError::DanglingParameterList);
    }
    match scopes.first() {
        Some(0) | None => Err(SyntaxError::EmptyExpression),
        Some(1) => Ok(()),
        Some(_) => Err(SyntaxError::TooManyValues),
    }
}
