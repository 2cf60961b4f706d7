use logos::Logos;

use crate::{
    engine::{
        registry::Registry,
        token::{Token, TokenKind},
        value::core::parse_decimal,
    },
    error::LexError,
};

/// Raw lexical shapes, before the registry-aware cooking pass.
///
/// The raw scan is registry-blind: it can only gather a maximal run of
/// operator characters. Splitting a run into registered symbols, tagging
/// prefix positions, merging adjacent string literals and telling function
/// calls from variables all need context, so they happen in [`tokenize`].
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n\f]+")]
enum RawToken {
    /// Numeric literal: digits, one optional decimal point, optional signed
    /// exponent.
    #[regex(r"[0-9]+\.?[0-9]*([eE][+-]?[0-9]+)?")]
    #[regex(r"\.[0-9]+([eE][+-]?[0-9]+)?")]
    Number,
    /// Hexadecimal literal.
    #[regex(r"0[xX][0-9a-fA-F]+")]
    Hex,
    /// Single-quoted string literal, no escape processing.
    #[regex(r"'[^']*'")]
    Str,
    /// Identifier: letters, digits and underscores, not starting with a digit.
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Ident,
    /// `(`
    #[token("(")]
    OpenParen,
    /// `)`
    #[token(")")]
    CloseParen,
    /// `,`
    #[token(",")]
    Comma,
    /// A maximal run of operator characters.
    #[regex(r"[^A-Za-z0-9_ \t\r\n\f(),']+")]
    Symbols,
}

/// Converts source text into a token sequence, resolving operator symbols
/// against the live registry.
///
/// Rules beyond the raw shapes:
/// - a quoted literal directly following another string literal continues it:
///   the contents concatenate into one `StringLiteral` token;
/// - an identifier is a `FunctionCall` when the next token is an open paren,
///   a `Variable` otherwise;
/// - an operator run is split by longest registered prefix, repeatedly; a run
///   with no registered prefix is kept whole for the parser to reject;
/// - a matched symbol after nothing, an operator, an open paren or a comma is
///   tagged `UnaryOperator`.
///
/// # Errors
/// `LexError` for an unterminated string literal or a malformed numeric
/// literal, carrying the character offset.
pub fn tokenize(source: &str, registry: &Registry) -> Result<Vec<Token>, LexError> {
    let mut raw = Vec::new();
    let mut lexer = RawToken::lexer(source);
    while let Some(scanned) = lexer.next() {
        let span = lexer.span();
        match scanned {
            Ok(kind) => raw.push((kind, span)),
            // The only character no raw shape covers is a quote that never
            // closes.
            Err(()) => return Err(LexError::UnterminatedString { offset: span.start }),
        }
    }

    let mut tokens: Vec<Token> = Vec::with_capacity(raw.len());

    for (index, (kind, span)) in raw.iter().enumerate() {
        let slice = &source[span.clone()];
        match kind {
            RawToken::Number => {
                if is_dangling_hex_prefix(source, &raw, index) {
                    return Err(LexError::MalformedNumber { offset: span.start });
                }
                if parse_decimal(slice).is_none() {
                    return Err(LexError::MalformedNumber { offset: span.start });
                }
                tokens.push(Token::new(slice, TokenKind::Literal, span.start));
            },
            RawToken::Hex => {
                tokens.push(Token::new(slice, TokenKind::HexLiteral, span.start));
            },
            RawToken::Str => {
                let contents = &slice[1..slice.len() - 1];
                let continues =
                    matches!(tokens.last(), Some(previous) if previous.kind == TokenKind::StringLiteral);
                if continues {
                    if let Some(previous) = tokens.last_mut() {
                        previous.surface.push_str(contents);
                    }
                } else {
                    tokens.push(Token::new(contents, TokenKind::StringLiteral, span.start));
                }
            },
            RawToken::Ident => {
                let called = matches!(raw.get(index + 1), Some((RawToken::OpenParen, _)));
                let kind = if called {
                    TokenKind::FunctionCall
                } else {
                    TokenKind::Variable
                };
                tokens.push(Token::new(slice, kind, span.start));
            },
            RawToken::OpenParen => {
                tokens.push(Token::new("(", TokenKind::OpenParen, span.start));
            },
            RawToken::CloseParen => {
                tokens.push(Token::new(")", TokenKind::CloseParen, span.start));
            },
            RawToken::Comma => {
                tokens.push(Token::new(",", TokenKind::Comma, span.start));
            },
            RawToken::Symbols => cook_symbol_run(slice, span.start, registry, &mut tokens),
        }
    }

    Ok(tokens)
}

/// Splits a run of operator characters into registered symbols.
///
/// Each step takes the longest prefix of the remaining run that is a
/// registered operator surface; when none is, the whole remainder becomes a
/// single token and the parser reports it as unknown. Prefix position (after
/// nothing, an operator, an open paren or a comma) tags the symbol as unary.
fn cook_symbol_run(run: &str, offset: usize, registry: &Registry, tokens: &mut Vec<Token>) {
    let mut rest = run;
    let mut at = offset;

    while !rest.is_empty() {
        let mut matched = 0;
        for (index, ch) in rest.char_indices() {
            let end = index + ch.len_utf8();
            if registry.is_operator_symbol(&rest[..end]) {
                matched = end;
            }
        }
        let take = if matched > 0 { matched } else { rest.len() };

        let unary = match tokens.last() {
            None => true,
            Some(previous) => matches!(previous.kind,
                                       TokenKind::Operator
                                       | TokenKind::UnaryOperator
                                       | TokenKind::OpenParen
                                       | TokenKind::Comma),
        };
        let kind = if unary {
            TokenKind::UnaryOperator
        } else {
            TokenKind::Operator
        };

        tokens.push(Token::new(&rest[..take], kind, at));
        at += take;
        rest = &rest[take..];
    }
}

/// Detects a `0x` prefix that the raw scan split apart because no hex digits
/// followed it, e.g. `0x` or `0xzz`.
fn is_dangling_hex_prefix(source: &str,
                          raw: &[(RawToken, std::ops::Range<usize>)],
                          index: usize)
                          -> bool {
    let (_, span) = &raw[index];
    if &source[span.clone()] != "0" {
        return false;
    }
    match raw.get(index + 1) {
        Some((RawToken::Ident, next)) if next.start == span.end => {
            source[next.clone()].starts_with(['x', 'X'])
        },
        _ => false,
    }
}
