//! Arena allocation for the flat AST.
//!
//! - Contiguous storage for all nodes of one source unit
//! - Child references use `ExprId` / `StmtId` / `TypeExprId` indices
//! - Ids are assigned in allocation order and never reused

use super::{Expr, ExprId, Stmt, StmtId, TypeExpr, TypeExprId};

/// Contiguous storage for all AST nodes in a module.
#[derive(Clone, Default, Eq, PartialEq, Debug)]
pub struct ExprArena {
    exprs: Vec<Expr>,
    stmts: Vec<Stmt>,
    type_exprs: Vec<TypeExpr>,
}

/// Convert an arena length to a u32 id.
///
/// A single source unit cannot come close to `u32::MAX` nodes: spans are
/// 32-bit and every node covers at least one byte.
#[inline]
fn next_id(len: usize) -> u32 {
    u32::try_from(len).unwrap_or_else(|_| panic!("AST arena exceeded u32::MAX nodes"))
}

impl ExprArena {
    /// Create a new empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    // ===== Expressions =====

    /// Allocate expression, return ID.
    #[inline]
    pub fn alloc_expr(&mut self, expr: Expr) -> ExprId {
        let id = ExprId::new(next_id(self.exprs.len()));
        self.exprs.push(expr);
        id
    }

    /// Get expression by ID.
    ///
    /// # Panics
    /// Panics if `id` is out of bounds.
    #[inline]
    #[track_caller]
    pub fn get_expr(&self, id: ExprId) -> &Expr {
        &self.exprs[id.index()]
    }

    #[inline]
    pub fn expr_count(&self) -> usize {
        self.exprs.len()
    }

    // ===== Statements =====

    /// Allocate statement, return ID.
    #[inline]
    pub fn alloc_stmt(&mut self, stmt: Stmt) -> StmtId {
        let id = StmtId::new(next_id(self.stmts.len()));
        self.stmts.push(stmt);
        id
    }

    /// Get statement by ID.
    ///
    /// # Panics
    /// Panics if `id` is out of bounds.
    #[inline]
    #[track_caller]
    pub fn get_stmt(&self, id: StmtId) -> &Stmt {
        &self.stmts[id.index()]
    }

    #[inline]
    pub fn stmt_count(&self) -> usize {
        self.stmts.len()
    }

    // ===== Type expressions =====

    /// Allocate type expression, return ID.
    #[inline]
    pub fn alloc_type_expr(&mut self, ty: TypeExpr) -> TypeExprId {
        let id = TypeExprId::new(next_id(self.type_exprs.len()));
        self.type_exprs.push(ty);
        id
    }

    /// Get type expression by ID.
    ///
    /// # Panics
    /// Panics if `id` is out of bounds.
    #[inline]
    #[track_caller]
    pub fn get_type_expr(&self, id: TypeExprId) -> &TypeExpr {
        &self.type_exprs[id.index()]
    }

    #[inline]
    pub fn type_expr_count(&self) -> usize {
        self.type_exprs.len()
    }
}
