//! Module-level type checker.
//!
//! Checking runs three passes, strictly in this order:
//!
//! ```text
//! Pass A: Registration
//!   - Register every struct name in the type registry
//!   - Reject anything at top level that is not an item
//!
//! Pass B: Function Signatures
//!   - Resolve every declared return type
//!   - Assign each function its permanent signature index
//!   - Must finish for all functions before any body is checked, so
//!     bodies can call functions declared later (or themselves)
//!
//! Pass C: Function Bodies
//!   - Fresh symbol table per function
//!   - Resolve identifiers and record the type of every expression
//! ```
//!
//! The first error aborts checking; no partial output is returned.

use liam_ir::{ExprArena, Name, Span, StringInterner, TypeExprId, TypeExprKind};

use crate::{
    CheckedFunction, ExprTypes, SignatureTable, Type, TypeCheckError, TypeExprTypes, TypeIdx,
    TypeRegistry, TypedModule,
};

pub use api::check_module;

mod api;
mod bodies;
mod registration;
mod signatures;


/// State shared by all checker passes for one module.
///
/// ```text
/// ModuleChecker
/// ├── arena, interner      (read-only input)
/// ├── types                (Pass A)
/// ├── signatures           (Pass B)
/// ├── functions            (Pass C)
/// └── expr_types, type_expr_types
/// ```
pub struct ModuleChecker<'a> {
    arena: &'a ExprArena,
    interner: &'a StringInterner,
    types: TypeRegistry,
    signatures: SignatureTable,
    functions: Vec<CheckedFunction>,
    expr_types: ExprTypes,
    type_expr_types: TypeExprTypes,
}

impl<'a> ModuleChecker<'a> {
    pub fn new(arena: &'a ExprArena, interner: &'a StringInterner) -> Self {
        ModuleChecker {
            arena,
            interner,
            types: TypeRegistry::new(interner),
            signatures: SignatureTable::new(),
            functions: Vec::new(),
            expr_types: ExprTypes::with_len(arena.expr_count()),
            type_expr_types: TypeExprTypes::with_len(arena.type_expr_count()),
        }
    }

    /// Consume the checker and produce the typed module.
    pub fn finish(self) -> TypedModule {
        TypedModule {
            types: self.types,
            signatures: self.signatures,
            functions: self.functions,
            expr_types: self.expr_types,
            type_expr_types: self.type_expr_types,
        }
    }

    /// Resolve a type expression against the registry and record the result.
    fn resolve_type_expr(&mut self, id: TypeExprId) -> Result<Type, TypeCheckError> {
        let type_expr = self.arena.get_type_expr(id);
        let TypeExprKind::Ident(name) = type_expr.kind;
        let idx = self
            .types
            .lookup(name)
            .ok_or_else(|| TypeCheckError::UndeclaredType {
                name: self.name_text(name),
                span: type_expr.span,
            })?;
        let ty = self.types.resolve(idx);
        self.type_expr_types.record(id, ty);
        Ok(ty)
    }

    /// The built-in type at a fixed registry index.
    fn builtin(&self, idx: TypeIdx) -> Type {
        debug_assert!(idx.is_builtin());
        self.types.resolve(idx)
    }

    fn name_text(&self, name: Name) -> String {
        self.interner.lookup(name).to_owned()
    }

    fn render(&self, ty: Type) -> String {
        ty.display(self.interner, &self.signatures)
    }

    fn mismatch(
        &self,
        context: &'static str,
        expected: Type,
        found: Type,
        span: Span,
    ) -> TypeCheckError {
        TypeCheckError::TypeMismatch {
            context,
            expected: self.render(expected),
            found: self.render(found),
            span,
        }
    }
}
