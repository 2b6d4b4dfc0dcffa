//! Pass C: function body checking.
//!
//! Each body gets a fresh [`SymbolTable`]. Nested blocks share the table of
//! their function, so a local is visible from its declaration to the end of
//! the body and can never be redeclared.

use liam_ir::{ExprId, ExprKind, StmtId, StmtKind};
use liam_stack::ensure_sufficient_stack;

use super::ModuleChecker;
use crate::{equal_types, CheckedFunction, FnIdx, SymbolTable, Type, TypeCheckError, TypeIdx};

/// Checking state for the body currently being walked.
struct FnScope {
    return_type: Type,
    symbols: SymbolTable,
}

#[tracing::instrument(level = "debug", skip_all)]
pub(super) fn check_function_bodies(checker: &mut ModuleChecker<'_>) -> Result<(), TypeCheckError> {
    // Collected up front: the walk below needs `checker` mutably.
    let work: Vec<(FnIdx, StmtId, Type)> = checker
        .signatures
        .iter()
        .map(|(idx, sig)| (idx, sig.decl, sig.return_type))
        .collect();

    for (idx, decl, return_type) in work {
        let arena = checker.arena;
        let StmtKind::Fn { ref body, .. } = arena.get_stmt(decl).kind else {
            continue;
        };

        let mut scope = FnScope {
            return_type,
            symbols: SymbolTable::new(),
        };
        for &stmt in body {
            checker.check_stmt(&mut scope, stmt)?;
        }

        tracing::trace!(index = idx.raw(), locals = scope.symbols.len(), "checked body");
        checker.functions.push(CheckedFunction {
            idx,
            decl,
            symbols: scope.symbols,
        });
    }
    Ok(())
}

impl ModuleChecker<'_> {
    fn check_stmt(&mut self, scope: &mut FnScope, id: StmtId) -> Result<(), TypeCheckError> {
        ensure_sufficient_stack(|| self.check_stmt_inner(scope, id))
    }

    fn check_stmt_inner(&mut self, scope: &mut FnScope, id: StmtId) -> Result<(), TypeCheckError> {
        let arena = self.arena;
        let stmt = arena.get_stmt(id);
        match stmt.kind {
            StmtKind::Expr(expr) => {
                self.check_expr(scope, expr)?;
            }
            StmtKind::Scope(ref stmts) => {
                for &inner in stmts {
                    self.check_stmt(scope, inner)?;
                }
            }
            StmtKind::Return(expr) => {
                let found = self.check_expr(scope, expr)?;
                if !equal_types(scope.return_type, found) {
                    return Err(self.mismatch(
                        "return value",
                        scope.return_type,
                        found,
                        arena.get_expr(expr).span,
                    ));
                }
            }
            StmtKind::If {
                cond,
                scope: ref stmts,
            } => {
                let cond_ty = self.check_expr(scope, cond)?;
                if cond_ty != Type::Bool {
                    return Err(TypeCheckError::NonBooleanCondition {
                        found: self.render(cond_ty),
                        span: arena.get_expr(cond).span,
                    });
                }
                for &inner in stmts {
                    self.check_stmt(scope, inner)?;
                }
            }
            StmtKind::Let { name, ty, init } => {
                let declared = self.resolve_type_expr(ty)?;
                let found = self.check_expr(scope, init)?;
                if !equal_types(declared, found) {
                    return Err(self.mismatch(
                        "let binding",
                        declared,
                        found,
                        arena.get_expr(init).span,
                    ));
                }
                if scope.symbols.insert(name, declared).is_err() {
                    return Err(TypeCheckError::DuplicateLocal {
                        name: self.name_text(name),
                        span: stmt.span,
                    });
                }
            }
            StmtKind::Fn { .. } | StmtKind::Struct { .. } => {
                return Err(TypeCheckError::UnsupportedConstruct {
                    construct: stmt.kind.describe(),
                    span: stmt.span,
                });
            }
        }
        Ok(())
    }

    /// Check an expression and record its type.
    fn check_expr(&mut self, scope: &FnScope, id: ExprId) -> Result<Type, TypeCheckError> {
        ensure_sufficient_stack(|| self.check_expr_inner(scope, id))
    }

    fn check_expr_inner(&mut self, scope: &FnScope, id: ExprId) -> Result<Type, TypeCheckError> {
        let arena = self.arena;
        let expr = arena.get_expr(id);
        let ty = match expr.kind {
            // Literal types come straight from the fixed built-in indices.
            ExprKind::Bool(_) => self.builtin(TypeIdx::BOOL),
            ExprKind::Number(_) => self.builtin(TypeIdx::INT),
            ExprKind::Ident(name) => {
                if let Some(local) = scope.symbols.get(name) {
                    local.ty
                } else if let Some(idx) = self.signatures.lookup(name) {
                    Type::Fn(idx)
                } else {
                    return Err(TypeCheckError::UnknownIdentifier {
                        name: self.name_text(name),
                        span: expr.span,
                    });
                }
            }
            ExprKind::Binary { lhs, rhs, .. } => {
                let left = self.check_expr(scope, lhs)?;
                let right = self.check_expr(scope, rhs)?;
                if !equal_types(left, right) {
                    return Err(self.mismatch("binary expression", left, right, expr.span));
                }
                if left != Type::Int {
                    return Err(self.mismatch("arithmetic operand", Type::Int, left, expr.span));
                }
                left
            }
            ExprKind::Group(inner) => self.check_expr(scope, inner)?,
            ExprKind::Call { callee } => {
                let callee_ty = self.check_expr(scope, callee)?;
                let ret = match callee_ty {
                    Type::Fn(idx) => self.signatures.get(idx).map(|sig| sig.return_type),
                    _ => None,
                };
                ret.ok_or_else(|| TypeCheckError::NotCallable {
                    found: self.render(callee_ty),
                    span: arena.get_expr(callee).span,
                })?
            }
        };
        self.expr_types.record(id, ty);
        Ok(ty)
    }
}
