//! Flat AST.
//!
//! Statements, expressions and type expressions are stored in an
//! [`ExprArena`] and refer to each other by index. Nodes are closed enums
//! matched exhaustively by every consumer.
//!
//! Nodes carry no type annotation. Resolved types live in the checker's
//! side tables, keyed by [`ExprId`] and [`TypeExprId`].

mod arena;

pub use arena::ExprArena;

use std::fmt;

use crate::{Name, Span};

macro_rules! arena_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
        #[repr(transparent)]
        pub struct $name(u32);

        impl $name {
            #[inline]
            pub const fn new(index: u32) -> Self {
                $name(index)
            }

            /// Get the index into the arena.
            #[inline]
            pub const fn index(self) -> usize {
                self.0 as usize
            }

            #[inline]
            pub const fn raw(self) -> u32 {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.0)
            }
        }
    };
}

arena_id!(
    /// Index into the arena's expression table.
    ExprId
);
arena_id!(
    /// Index into the arena's statement table.
    StmtId
);
arena_id!(
    /// Index into the arena's type-expression table.
    TypeExprId
);

/// Binary operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOp {
    /// Source-level symbol, for error messages.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_symbol())
    }
}

/// Expression node.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }
}

/// Expression kinds.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum ExprKind {
    /// `true` / `false`
    Bool(bool),
    /// Decimal integer literal.
    Number(u64),
    /// Reference to a local or a function.
    Ident(Name),
    /// `lhs op rhs`
    Binary {
        op: BinaryOp,
        lhs: ExprId,
        rhs: ExprId,
    },
    /// `( inner )`
    Group(ExprId),
    /// `callee()`
    Call { callee: ExprId },
}

/// Type expression node.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct TypeExpr {
    pub kind: TypeExprKind,
    pub span: Span,
}

impl TypeExpr {
    pub fn new(kind: TypeExprKind, span: Span) -> Self {
        TypeExpr { kind, span }
    }
}

/// Type expression kinds.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum TypeExprKind {
    /// A named type: `int`, `bool`, or a declared struct.
    Ident(Name),
}

/// Statement node.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Stmt { kind, span }
    }
}

/// Statement kinds.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum StmtKind {
    /// `expr;`
    Expr(ExprId),
    /// `{ stmts }`
    Scope(Vec<StmtId>),
    /// `return expr;`
    Return(ExprId),
    /// `if cond { stmts }`
    If { cond: ExprId, scope: Vec<StmtId> },
    /// `let name: ty = init;`
    Let {
        name: Name,
        ty: TypeExprId,
        init: ExprId,
    },
    /// `fn name() ret { body }`
    Fn {
        name: Name,
        ret: TypeExprId,
        body: Vec<StmtId>,
    },
    /// `struct Name {}`
    Struct { name: Name },
}

impl StmtKind {
    /// Short description, used by "unsupported construct" diagnostics.
    pub const fn describe(&self) -> &'static str {
        match self {
            StmtKind::Expr(_) => "expression statement",
            StmtKind::Scope(_) => "scope",
            StmtKind::Return(_) => "return statement",
            StmtKind::If { .. } => "if statement",
            StmtKind::Let { .. } => "let statement",
            StmtKind::Fn { .. } => "fn declaration",
            StmtKind::Struct { .. } => "struct declaration",
        }
    }
}

/// A parsed source unit: top-level statements in source order.
#[derive(Clone, Default, Eq, PartialEq, Debug)]
pub struct Module {
    pub items: Vec<StmtId>,
}

impl Module {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests;
