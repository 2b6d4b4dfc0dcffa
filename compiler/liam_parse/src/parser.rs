//! Recursive-descent parser: [`TokenList`] to flat AST.
//!
//! # Grammar
//!
//! ```text
//! module    = stmt* EOF
//! stmt      = "return" expr ";"
//!           | "{" stmt* "}"
//!           | "if" expr "{" stmt* "}"
//!           | "let" IDENT ":" type "=" expr ";"
//!           | "fn" IDENT "(" ")" type "{" stmt* "}"
//!           | "struct" IDENT "{" "}"
//!           | expr ";"
//! type      = IDENT
//! expr      = term
//! term      = factor (("+" | "-") factor)*
//! factor    = postfix (("*" | "/") postfix)*
//! postfix   = primary ("(" ")")*
//! primary   = NUMBER | IDENT | "true" | "false" | "(" expr ")"
//! ```
//!
//! The parser accepts any statement at the top level; deciding which
//! statements are legal where is left to the type checker.

use liam_ir::{
    BinaryOp, Expr, ExprArena, ExprId, ExprKind, Module, Name, Span, Stmt, StmtId, StmtKind,
    StringInterner, Token, TokenKind, TokenList, TypeExpr, TypeExprId, TypeExprKind,
};
use liam_stack::ensure_sufficient_stack;

/// Parsing failure. The first one aborts the whole pass.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error("expected {expected}, found {found}")]
    UnexpectedToken {
        expected: &'static str,
        found: TokenKind,
        span: Span,
    },

    #[error("expected an expression, found {found}")]
    ExpectedExpression { found: TokenKind, span: Span },

    #[error("invalid number literal")]
    InvalidNumber { span: Span },
}

impl ParseError {
    pub fn span(&self) -> Span {
        match self {
            ParseError::UnexpectedToken { span, .. }
            | ParseError::ExpectedExpression { span, .. }
            | ParseError::InvalidNumber { span } => *span,
        }
    }
}

/// Parsed source unit.
#[derive(Clone, Debug, Default)]
pub struct ParseOutput {
    pub module: Module,
    pub arena: ExprArena,
}

/// Parse a token buffer lexed from `source`.
///
/// `source` must be the text `tokens` was produced from; identifier and
/// number text is read back through token spans.
#[tracing::instrument(level = "debug", skip_all, fields(tokens = tokens.len()))]
pub fn parse(
    tokens: &TokenList,
    source: &str,
    interner: &StringInterner,
) -> Result<ParseOutput, ParseError> {
    let mut parser = Parser {
        tokens,
        source,
        interner,
        pos: 0,
        arena: ExprArena::new(),
    };

    let mut module = Module::new();
    while !parser.at(TokenKind::Eof) {
        module.items.push(parser.statement()?);
    }

    tracing::debug!(
        items = module.items.len(),
        stmts = parser.arena.stmt_count(),
        exprs = parser.arena.expr_count(),
        "parsing complete"
    );
    Ok(ParseOutput {
        module,
        arena: parser.arena,
    })
}

struct Parser<'a> {
    tokens: &'a TokenList,
    source: &'a str,
    interner: &'a StringInterner,
    pos: usize,
    arena: ExprArena,
}

impl Parser<'_> {
    // ===== Cursor =====

    /// Current token. Past the end, keeps returning a synthesized EOF.
    fn current(&self) -> Token {
        match self.tokens.get(self.pos) {
            Some(token) => *token,
            None => {
                let end = self.tokens.iter().last().map_or(0, |t| t.span.end);
                Token::new(TokenKind::Eof, Span::point(end))
            }
        }
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.current().kind == kind
    }

    fn advance(&mut self) -> Token {
        let token = self.current();
        if token.kind != TokenKind::Eof {
            self.pos += 1;
        }
        token
    }

    fn expect(&mut self, kind: TokenKind, expected: &'static str) -> Result<Token, ParseError> {
        let token = self.current();
        if token.kind != kind {
            return Err(ParseError::UnexpectedToken {
                expected,
                found: token.kind,
                span: token.span,
            });
        }
        Ok(self.advance())
    }

    fn expect_ident(&mut self, expected: &'static str) -> Result<(Name, Span), ParseError> {
        let token = self.expect(TokenKind::Ident, expected)?;
        let name = self.interner.intern(token.span.text(self.source));
        Ok((name, token.span))
    }

    // ===== Statements =====

    /// Blocks and `if` bodies nest through here.
    fn statement(&mut self) -> Result<StmtId, ParseError> {
        ensure_sufficient_stack(|| self.statement_inner())
    }

    fn statement_inner(&mut self) -> Result<StmtId, ParseError> {
        let start = self.current().span;
        let kind = match self.current().kind {
            TokenKind::Return => {
                self.advance();
                let expr = self.expression()?;
                self.expect(TokenKind::Semicolon, "`;` after return value")?;
                StmtKind::Return(expr)
            }
            TokenKind::LBrace => StmtKind::Scope(self.block()?),
            TokenKind::If => {
                self.advance();
                let cond = self.expression()?;
                let scope = self.block()?;
                StmtKind::If { cond, scope }
            }
            TokenKind::Let => {
                self.advance();
                let (name, _) = self.expect_ident("local name after `let`")?;
                self.expect(TokenKind::Colon, "`:` before the local's type")?;
                let ty = self.type_expr()?;
                self.expect(TokenKind::Eq, "`=` before the initializer")?;
                let init = self.expression()?;
                self.expect(TokenKind::Semicolon, "`;` after let statement")?;
                StmtKind::Let { name, ty, init }
            }
            TokenKind::Fn => {
                self.advance();
                let (name, _) = self.expect_ident("function name after `fn`")?;
                self.expect(TokenKind::LParen, "`(` after function name")?;
                self.expect(TokenKind::RParen, "`)` (parameters are not supported)")?;
                let ret = self.type_expr()?;
                let body = self.block()?;
                StmtKind::Fn { name, ret, body }
            }
            TokenKind::Struct => {
                self.advance();
                let (name, _) = self.expect_ident("struct name after `struct`")?;
                self.expect(TokenKind::LBrace, "`{` after struct name")?;
                self.expect(TokenKind::RBrace, "`}` (struct fields are not supported)")?;
                StmtKind::Struct { name }
            }
            _ => {
                let expr = self.expression()?;
                self.expect(TokenKind::Semicolon, "`;` after expression")?;
                StmtKind::Expr(expr)
            }
        };

        let span = start.merge(self.previous_span());
        Ok(self.arena.alloc_stmt(Stmt::new(kind, span)))
    }

    /// `{ stmt* }`
    fn block(&mut self) -> Result<Vec<StmtId>, ParseError> {
        self.expect(TokenKind::LBrace, "`{`")?;
        let mut stmts = Vec::new();
        while !self.at(TokenKind::RBrace) {
            if self.at(TokenKind::Eof) {
                let eof = self.current();
                return Err(ParseError::UnexpectedToken {
                    expected: "`}`",
                    found: eof.kind,
                    span: eof.span,
                });
            }
            stmts.push(self.statement()?);
        }
        self.advance();
        Ok(stmts)
    }

    fn type_expr(&mut self) -> Result<TypeExprId, ParseError> {
        let (name, span) = self.expect_ident("type name")?;
        Ok(self
            .arena
            .alloc_type_expr(TypeExpr::new(TypeExprKind::Ident(name), span)))
    }

    // ===== Expressions =====

    /// Groups nest through here.
    fn expression(&mut self) -> Result<ExprId, ParseError> {
        ensure_sufficient_stack(|| self.term())
    }

    fn term(&mut self) -> Result<ExprId, ParseError> {
        let mut lhs = self.factor()?;
        loop {
            let op = match self.current().kind {
                TokenKind::Plus => BinaryOp::Add,
                TokenKind::Minus => BinaryOp::Sub,
                _ => return Ok(lhs),
            };
            self.advance();
            let rhs = self.factor()?;
            lhs = self.binary(op, lhs, rhs);
        }
    }

    fn factor(&mut self) -> Result<ExprId, ParseError> {
        let mut lhs = self.postfix()?;
        loop {
            let op = match self.current().kind {
                TokenKind::Star => BinaryOp::Mul,
                TokenKind::Slash => BinaryOp::Div,
                _ => return Ok(lhs),
            };
            self.advance();
            let rhs = self.postfix()?;
            lhs = self.binary(op, lhs, rhs);
        }
    }

    fn binary(&mut self, op: BinaryOp, lhs: ExprId, rhs: ExprId) -> ExprId {
        let span = self
            .arena
            .get_expr(lhs)
            .span
            .merge(self.arena.get_expr(rhs).span);
        self.arena
            .alloc_expr(Expr::new(ExprKind::Binary { op, lhs, rhs }, span))
    }

    fn postfix(&mut self) -> Result<ExprId, ParseError> {
        let mut expr = self.primary()?;
        while self.at(TokenKind::LParen) {
            self.advance();
            let close = self.expect(TokenKind::RParen, "`)` (arguments are not supported)")?;
            let span = self.arena.get_expr(expr).span.merge(close.span);
            expr = self
                .arena
                .alloc_expr(Expr::new(ExprKind::Call { callee: expr }, span));
        }
        Ok(expr)
    }

    fn primary(&mut self) -> Result<ExprId, ParseError> {
        let token = self.current();
        let kind = match token.kind {
            TokenKind::Number => {
                self.advance();
                let value = token
                    .span
                    .text(self.source)
                    .parse::<u64>()
                    .map_err(|_| ParseError::InvalidNumber { span: token.span })?;
                ExprKind::Number(value)
            }
            TokenKind::True => {
                self.advance();
                ExprKind::Bool(true)
            }
            TokenKind::False => {
                self.advance();
                ExprKind::Bool(false)
            }
            TokenKind::Ident => {
                let (name, _) = self.expect_ident("identifier")?;
                ExprKind::Ident(name)
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.expression()?;
                let close = self.expect(TokenKind::RParen, "`)` to close group")?;
                let span = token.span.merge(close.span);
                return Ok(self.arena.alloc_expr(Expr::new(ExprKind::Group(inner), span)));
            }
            found => {
                return Err(ParseError::ExpectedExpression {
                    found,
                    span: token.span,
                })
            }
        };
        Ok(self.arena.alloc_expr(Expr::new(kind, token.span)))
    }

    /// Span of the most recently consumed token.
    fn previous_span(&self) -> Span {
        self.pos
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .map_or(Span::DUMMY, |t| t.span)
    }
}
