//! Shared data model for the Liam compiler.
//!
//! Everything downstream of the lexer speaks in terms of these types:
//!
//! - [`Span`]: byte range into the immutable source buffer
//! - [`Name`] / [`StringInterner`]: interned identifier text
//! - [`Token`] / [`TokenList`]: the lexer's output, addressed by index
//! - [`ExprArena`] / [`Module`]: the flat AST produced by the parser
//!
//! AST nodes never carry resolved types. The type checker records them in
//! side tables keyed by [`ExprId`] and [`TypeExprId`].

mod ast;
mod interner;
mod name;
mod span;
mod token;

pub use ast::{
    BinaryOp, Expr, ExprArena, ExprId, ExprKind, Module, Stmt, StmtId, StmtKind, TypeExpr,
    TypeExprId, TypeExprKind,
};
pub use interner::{InternError, StringInterner};
pub use name::Name;
pub use span::{LineCol, Span};
pub use token::{Token, TokenKind, TokenList};

/// Compile-time size assertion.
///
/// Keeps hot AST and token types from silently growing.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::{ExprId, Name, Span, Token};
    crate::static_assert_size!(Span, 8);
    crate::static_assert_size!(Name, 4);
    crate::static_assert_size!(ExprId, 4);
    crate::static_assert_size!(Token, 12);
}
