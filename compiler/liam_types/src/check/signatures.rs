//! Pass B: function signature collection.
//!
//! Runs to completion before any body is checked, which is what lets a
//! body call a function declared later in the file, or itself.

use liam_ir::{Module, StmtKind};

use super::ModuleChecker;
use crate::{FunctionSig, TypeCheckError};

#[tracing::instrument(level = "debug", skip_all)]
pub(super) fn collect_signatures(
    checker: &mut ModuleChecker<'_>,
    module: &Module,
) -> Result<(), TypeCheckError> {
    let arena = checker.arena;
    for &item in &module.items {
        let stmt = arena.get_stmt(item);
        let StmtKind::Fn { name, ret, .. } = stmt.kind else {
            continue;
        };

        let return_type = checker.resolve_type_expr(ret)?;
        let sig = FunctionSig {
            name,
            return_type,
            decl: item,
            span: stmt.span,
        };
        let idx = checker
            .signatures
            .register(sig)
            .map_err(|_| TypeCheckError::DuplicateItem {
                name: checker.name_text(name),
                span: stmt.span,
            })?;
        tracing::trace!(
            name = checker.interner.lookup(name),
            index = idx.raw(),
            "collected signature"
        );
    }
    Ok(())
}
