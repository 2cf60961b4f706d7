/// Classification of a token.
///
/// Identifiers are split by the tokenizer into variable references and
/// function calls (an identifier directly followed by an open paren).
/// Operators in prefix position are tagged [`UnaryOperator`](TokenKind::UnaryOperator)
/// and resolved in the registry under the symbol suffixed with `u`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// A numeric literal such as `42` or `2.5e-3`.
    Literal,
    /// A hexadecimal literal such as `0xFF`, consumed as a big integer.
    HexLiteral,
    /// A single-quoted string literal; the surface holds the contents.
    StringLiteral,
    /// An identifier read as a variable reference.
    Variable,
    /// An identifier read as a function call.
    FunctionCall,
    /// A binary operator symbol.
    Operator,
    /// An operator symbol in prefix position.
    UnaryOperator,
    /// `(`
    OpenParen,
    /// `)`
    CloseParen,
    /// `,`
    Comma,
}

impl TokenKind {
    /// Whether this kind is a literal of some sort (numeric, hex or string).
    #[must_use]
    pub const fn is_literal(self) -> bool {
        matches!(self, Self::Literal | Self::HexLiteral | Self::StringLiteral)
    }
}

/// One token of an expression. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The token text. For string literals, the contents between the quotes.
    pub surface: String,
    /// What the token is.
    pub kind:    TokenKind,
    /// Character offset of the token in the source text.
    pub offset:  usize,
}

impl Token {
    /// Creates a token.
    #[must_use]
    pub fn new(surface: &str, kind: TokenKind, offset: usize) -> Self {
        Self { surface: surface.to_owned(),
               kind,
               offset }
    }

    /// The registry key this token resolves under: the surface itself, or the
    /// surface suffixed with `u` for unary operators.
    #[must_use]
    pub fn registry_key(&self) -> String {
        match self.kind {
            TokenKind::UnaryOperator => format!("{}u", self.surface),
            _ => self.surface.clone(),
        }
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.surface)
    }
}
