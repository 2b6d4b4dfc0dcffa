//! Type checking for the Liam compiler.
//!
//! Turns a parsed [`Module`](liam_ir::Module) into a [`TypedModule`]:
//!
//! - [`TypeRegistry`]: built-in and struct types, indexed by [`TypeIdx`]
//! - [`SignatureTable`]: function signatures, indexed by [`FnIdx`]
//! - [`SymbolTable`]: the locals of one function body
//! - [`ExprTypes`] / [`TypeExprTypes`]: resolved type per AST node
//!
//! Entry point is [`check_module`]. It stops at the first error.
//! [`dump_module`] renders the AST, annotated with the checker's results
//! when they are available.

mod check;
mod dump;
mod error;
mod idx;
mod output;
mod registry;
mod symbols;
mod ty;

pub use check::{check_module, ModuleChecker};
pub use dump::dump_module;
pub use error::TypeCheckError;
pub use idx::{FnIdx, TypeIdx};
pub use output::{CheckedFunction, ExprTypes, NodeId, SideTable, TypeExprTypes, TypedModule};
pub use registry::{FunctionSig, SignatureTable, TypeRegistry};
pub use symbols::{Local, SymbolTable};
pub use ty::{equal_types, Type};
