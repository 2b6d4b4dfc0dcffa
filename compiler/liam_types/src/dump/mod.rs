//! Indented AST dump, optionally annotated with checker results.
//!
//! One node per line. Nesting is shown by two spaces per level; child
//! nodes are marked `- ` and the labelled parts of a node `| `:
//!
//! ```text
//! <fn> add : fn add() int
//!   | return type
//!     - <type> int : int
//!   | body
//!     - <return>
//!       - <binary> + : int
//!         - <int> 1 : int
//!         - <int> 2 : int
//! ```
//!
//! The ` : type` suffixes appear only when a [`TypedModule`] is supplied
//! and the checker recorded a type for that node.

use std::fmt::Write as _;

use liam_ir::{
    ExprArena, ExprId, ExprKind, Module, StmtId, StmtKind, StringInterner, TypeExprId,
    TypeExprKind,
};
use liam_stack::ensure_sufficient_stack;

use crate::{Type, TypedModule};

/// Render `module` as an indented tree.
pub fn dump_module(
    module: &Module,
    arena: &ExprArena,
    interner: &StringInterner,
    typed: Option<&TypedModule>,
) -> String {
    let mut printer = AstPrinter {
        arena,
        interner,
        typed,
        out: String::new(),
    };
    for &item in &module.items {
        printer.stmt(0, item);
    }
    printer.out
}

struct AstPrinter<'a> {
    arena: &'a ExprArena,
    interner: &'a StringInterner,
    typed: Option<&'a TypedModule>,
    out: String,
}

impl AstPrinter<'_> {
    fn indent(&mut self, depth: usize) {
        for _ in 0..depth {
            self.out.push_str("  ");
        }
    }

    /// A node line. Top-level items carry no marker.
    fn node(&mut self, depth: usize, text: &str, ty: Option<Type>) {
        self.indent(depth);
        if depth > 0 {
            self.out.push_str("- ");
        }
        self.out.push_str(text);
        if let (Some(ty), Some(typed)) = (ty, self.typed) {
            let _ = write!(self.out, " : {}", ty.display(self.interner, &typed.signatures));
        }
        self.out.push('\n');
    }

    fn label(&mut self, depth: usize, text: &str) {
        self.indent(depth);
        self.out.push_str("| ");
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn stmt(&mut self, depth: usize, id: StmtId) {
        ensure_sufficient_stack(|| self.stmt_inner(depth, id));
    }

    fn stmt_inner(&mut self, depth: usize, id: StmtId) {
        let arena = self.arena;
        match arena.get_stmt(id).kind {
            StmtKind::Expr(expr) => {
                self.node(depth, "<expr>", None);
                self.expr(depth + 1, expr);
            }
            StmtKind::Scope(ref stmts) => {
                self.node(depth, "<scope>", None);
                for &inner in stmts {
                    self.stmt(depth + 1, inner);
                }
            }
            StmtKind::Return(expr) => {
                self.node(depth, "<return>", None);
                self.expr(depth + 1, expr);
            }
            StmtKind::If {
                cond,
                scope: ref stmts,
            } => {
                self.node(depth, "<if>", None);
                self.label(depth + 1, "condition");
                self.expr(depth + 2, cond);
                self.label(depth + 1, "body");
                for &inner in stmts {
                    self.stmt(depth + 2, inner);
                }
            }
            StmtKind::Let { name, ty, init } => {
                let text = format!("<let> {}", self.interner.lookup(name));
                self.node(depth, &text, None);
                self.label(depth + 1, "type");
                self.type_expr(depth + 2, ty);
                self.label(depth + 1, "value");
                self.expr(depth + 2, init);
            }
            StmtKind::Fn { name, ret, ref body } => {
                let fn_ty = self.typed.and_then(|t| t.fn_index(id)).map(Type::Fn);
                let text = format!("<fn> {}", self.interner.lookup(name));
                self.node(depth, &text, fn_ty);
                self.label(depth + 1, "return type");
                self.type_expr(depth + 2, ret);
                self.label(depth + 1, "body");
                for &inner in body {
                    self.stmt(depth + 2, inner);
                }
            }
            StmtKind::Struct { name } => {
                let text = format!("<struct> {}", self.interner.lookup(name));
                self.node(depth, &text, None);
            }
        }
    }

    fn type_expr(&mut self, depth: usize, id: TypeExprId) {
        let ty = self.typed.and_then(|t| t.type_expr_type(id));
        let TypeExprKind::Ident(name) = self.arena.get_type_expr(id).kind;
        let text = format!("<type> {}", self.interner.lookup(name));
        self.node(depth, &text, ty);
    }

    fn expr(&mut self, depth: usize, id: ExprId) {
        ensure_sufficient_stack(|| self.expr_inner(depth, id));
    }

    fn expr_inner(&mut self, depth: usize, id: ExprId) {
        let arena = self.arena;
        let ty = self.typed.and_then(|t| t.expr_type(id));
        match arena.get_expr(id).kind {
            ExprKind::Bool(value) => self.node(depth, &format!("<bool> {value}"), ty),
            ExprKind::Number(value) => self.node(depth, &format!("<int> {value}"), ty),
            ExprKind::Ident(name) => {
                let text = format!("<identifier> {}", self.interner.lookup(name));
                self.node(depth, &text, ty);
            }
            ExprKind::Binary { op, lhs, rhs } => {
                self.node(depth, &format!("<binary> {op}"), ty);
                self.expr(depth + 1, lhs);
                self.expr(depth + 1, rhs);
            }
            ExprKind::Group(inner) => {
                self.node(depth, "<group>", ty);
                self.expr(depth + 1, inner);
            }
            ExprKind::Call { callee } => {
                self.node(depth, "<call>", ty);
                self.expr(depth + 1, callee);
            }
        }
    }
}
