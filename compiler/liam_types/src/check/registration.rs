//! Pass A: struct registration.
//!
//! Makes every struct name resolvable as a type before any signature is
//! collected, regardless of where the struct appears in the source.

use liam_ir::{Module, StmtKind};

use super::ModuleChecker;
use crate::TypeCheckError;

#[tracing::instrument(level = "debug", skip_all)]
pub(super) fn register_structs(
    checker: &mut ModuleChecker<'_>,
    module: &Module,
) -> Result<(), TypeCheckError> {
    let arena = checker.arena;
    for &item in &module.items {
        let stmt = arena.get_stmt(item);
        match stmt.kind {
            StmtKind::Struct { name } => {
                if checker.types.register_struct(name).is_err() {
                    return Err(TypeCheckError::DuplicateItem {
                        name: checker.name_text(name),
                        span: stmt.span,
                    });
                }
                tracing::trace!(name = checker.interner.lookup(name), "registered struct");
            }
            StmtKind::Fn { .. } => {}
            ref other => {
                return Err(TypeCheckError::UnsupportedConstruct {
                    construct: other.describe(),
                    span: stmt.span,
                });
            }
        }
    }
    Ok(())
}
