//! Lexer: source text to [`TokenList`].
//!
//! Single forward pass over the source. Whitespace and `//` line comments
//! are skipped; every other character must start a token. The returned
//! list always ends with a [`TokenKind::Eof`] token.

use liam_ir::{Span, Token, TokenKind, TokenList};

/// Lexing failure. The first one aborts the whole pass.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum LexError {
    #[error("unexpected character `{ch}`")]
    UnexpectedChar { ch: char, span: Span },

    #[error("number literal `{text}` does not fit in 64 bits")]
    NumberOverflow { text: String, span: Span },

    #[error("source is too large to address with 32-bit spans")]
    SourceTooLarge,
}

impl LexError {
    /// Source location of the error, if it has one.
    pub fn span(&self) -> Option<Span> {
        match self {
            LexError::UnexpectedChar { span, .. } | LexError::NumberOverflow { span, .. } => {
                Some(*span)
            }
            LexError::SourceTooLarge => None,
        }
    }
}

/// Lex `source` into a token buffer.
#[tracing::instrument(level = "debug", skip_all, fields(len = source.len()))]
pub fn lex(source: &str) -> Result<TokenList, LexError> {
    if u32::try_from(source.len()).is_err() {
        return Err(LexError::SourceTooLarge);
    }

    let mut lexer = Lexer {
        source,
        bytes: source.as_bytes(),
        pos: 0,
        tokens: TokenList::new(),
    };
    lexer.run()?;

    tracing::debug!(tokens = lexer.tokens.len(), "lexing complete");
    Ok(lexer.tokens)
}

struct Lexer<'a> {
    source: &'a str,
    bytes: &'a [u8],
    pos: usize,
    tokens: TokenList,
}

impl Lexer<'_> {
    fn run(&mut self) -> Result<(), LexError> {
        while let Some(&byte) = self.bytes.get(self.pos) {
            let start = self.pos;
            match byte {
                b' ' | b'\t' | b'\r' | b'\n' => self.pos += 1,
                b'/' if self.bytes.get(start + 1) == Some(&b'/') => self.skip_line_comment(),
                b'0'..=b'9' => self.number(start)?,
                b'a'..=b'z' | b'A'..=b'Z' | b'_' => self.word(start),
                _ => {
                    let kind = self.punct(start)?;
                    self.pos += 1;
                    self.push(kind, start);
                }
            }
        }

        self.push(TokenKind::Eof, self.pos);
        Ok(())
    }

    fn skip_line_comment(&mut self) {
        while let Some(&byte) = self.bytes.get(self.pos) {
            if byte == b'\n' {
                break;
            }
            self.pos += 1;
        }
    }

    fn number(&mut self, start: usize) -> Result<(), LexError> {
        self.eat_while(|b| b.is_ascii_digit());
        let text = &self.source[start..self.pos];
        if text.parse::<u64>().is_err() {
            return Err(LexError::NumberOverflow {
                text: text.to_owned(),
                span: self.span(start),
            });
        }
        self.push(TokenKind::Number, start);
        Ok(())
    }

    fn word(&mut self, start: usize) {
        self.eat_while(|b| b.is_ascii_alphanumeric() || b == b'_');
        let kind = TokenKind::keyword(&self.source[start..self.pos]).unwrap_or(TokenKind::Ident);
        self.push(kind, start);
    }

    fn punct(&self, start: usize) -> Result<TokenKind, LexError> {
        let kind = match self.bytes[start] {
            b';' => TokenKind::Semicolon,
            b':' => TokenKind::Colon,
            b'=' => TokenKind::Eq,
            b'(' => TokenKind::LParen,
            b')' => TokenKind::RParen,
            b'{' => TokenKind::LBrace,
            b'}' => TokenKind::RBrace,
            b'+' => TokenKind::Plus,
            b'-' => TokenKind::Minus,
            b'*' => TokenKind::Star,
            b'/' => TokenKind::Slash,
            _ => {
                let ch = self.source[start..].chars().next().unwrap_or('\u{FFFD}');
                let end = start + ch.len_utf8();
                return Err(LexError::UnexpectedChar {
                    ch,
                    span: Span::new(offset(start), offset(end)),
                });
            }
        };
        Ok(kind)
    }

    fn eat_while(&mut self, pred: impl Fn(u8) -> bool) {
        while self.bytes.get(self.pos).is_some_and(|&b| pred(b)) {
            self.pos += 1;
        }
    }

    /// Span from `start` to the current position.
    fn span(&self, start: usize) -> Span {
        Span::new(offset(start), offset(self.pos))
    }

    fn push(&mut self, kind: TokenKind, start: usize) {
        let span = self.span(start);
        tracing::trace!(?kind, ?span, "token");
        self.tokens.push(Token::new(kind, span));
    }
}

/// Byte offset as a span bound. Only valid for offsets into a source that
/// passed the length check in [`lex`].
#[expect(
    clippy::cast_possible_truncation,
    reason = "lex rejects sources longer than u32::MAX bytes"
)]
#[inline]
fn offset(pos: usize) -> u32 {
    debug_assert!(u32::try_from(pos).is_ok());
    pos as u32
}
