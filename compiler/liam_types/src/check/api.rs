//! Public entry point for module-level type checking.

use liam_ir::{ExprArena, Module, StringInterner};

use super::bodies::check_function_bodies;
use super::registration::register_structs;
use super::signatures::collect_signatures;
use super::ModuleChecker;
use crate::{TypeCheckError, TypedModule};

/// Type check a parsed module.
///
/// # Example
///
/// ```ignore
/// let output = liam_parse::parse(&tokens, source, &interner)?;
/// let typed = check_module(&output.module, &output.arena, &interner)?;
/// let ty = typed.expr_type(expr_id);
/// ```
#[tracing::instrument(level = "debug", skip_all, fields(items = module.items.len()))]
pub fn check_module(
    module: &Module,
    arena: &ExprArena,
    interner: &StringInterner,
) -> Result<TypedModule, TypeCheckError> {
    let mut checker = ModuleChecker::new(arena, interner);

    // Pass A: struct names
    register_structs(&mut checker, module)?;
    tracing::debug!(types = checker.types.len(), "registration complete");

    // Pass B: every signature, before any body
    collect_signatures(&mut checker, module)?;
    tracing::debug!(
        functions = checker.signatures.len(),
        "signature collection complete"
    );

    // Pass C: bodies
    check_function_bodies(&mut checker)?;
    tracing::debug!(
        exprs = checker.expr_types.resolved_count(),
        "body checking complete"
    );

    Ok(checker.finish())
}
