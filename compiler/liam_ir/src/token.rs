//! Token model shared by the lexer and parser.
//!
//! Tokens carry only a kind and a span. Identifier text and literal values
//! are recovered from the source buffer through the span, so the token
//! buffer stays a flat array of 12-byte records.

use std::fmt;

use crate::Span;

/// Kind of a lexed token.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[repr(u8)]
pub enum TokenKind {
    // Literals
    Number,
    True,
    False,
    Ident,

    // Keywords
    Let,
    Fn,
    Struct,
    If,
    Return,

    // Punctuation
    Semicolon,
    Colon,
    Eq,
    LParen,
    RParen,
    LBrace,
    RBrace,

    // Operators
    Plus,
    Minus,
    Star,
    Slash,

    /// End of input. Always the last token in a [`TokenList`].
    Eof,
}

impl TokenKind {
    /// Map a word to its keyword kind, if it is one.
    pub fn keyword(word: &str) -> Option<TokenKind> {
        match word {
            "let" => Some(TokenKind::Let),
            "fn" => Some(TokenKind::Fn),
            "struct" => Some(TokenKind::Struct),
            "if" => Some(TokenKind::If),
            "return" => Some(TokenKind::Return),
            "true" => Some(TokenKind::True),
            "false" => Some(TokenKind::False),
            _ => None,
        }
    }

    /// Human-readable description used in parse errors.
    pub const fn display_name(self) -> &'static str {
        match self {
            TokenKind::Number => "number literal",
            TokenKind::True => "`true`",
            TokenKind::False => "`false`",
            TokenKind::Ident => "identifier",
            TokenKind::Let => "`let`",
            TokenKind::Fn => "`fn`",
            TokenKind::Struct => "`struct`",
            TokenKind::If => "`if`",
            TokenKind::Return => "`return`",
            TokenKind::Semicolon => "`;`",
            TokenKind::Colon => "`:`",
            TokenKind::Eq => "`=`",
            TokenKind::LParen => "`(`",
            TokenKind::RParen => "`)`",
            TokenKind::LBrace => "`{`",
            TokenKind::RBrace => "`}`",
            TokenKind::Plus => "`+`",
            TokenKind::Minus => "`-`",
            TokenKind::Star => "`*`",
            TokenKind::Slash => "`/`",
            TokenKind::Eof => "end of input",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A lexed token: kind plus source span.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    #[inline]
    pub const fn new(kind: TokenKind, span: Span) -> Self {
        Token { kind, span }
    }
}

/// Immutable-after-lexing token buffer.
///
/// Tokens are referenced by index for the lifetime of compilation.
#[derive(Clone, Default, Eq, PartialEq, Debug)]
pub struct TokenList {
    tokens: Vec<Token>,
}

impl TokenList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a token.
    #[inline]
    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    /// Token at `index`, if in bounds.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }
}

impl<'a> IntoIterator for &'a TokenList {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}
