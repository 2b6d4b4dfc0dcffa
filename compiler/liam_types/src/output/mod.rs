//! Type checker output.
//!
//! - [`SideTable`]: resolved type per AST node, keyed by arena id
//! - [`CheckedFunction`]: a checked body and the symbol table it produced
//! - [`TypedModule`]: everything the IR builder and tooling consume
//!
//! The AST itself is never modified. A node's type can only be read back
//! after the checker recorded it; earlier lookups return `None`.

use std::fmt;
use std::marker::PhantomData;

use liam_ir::{ExprId, StmtId, TypeExprId};

use crate::{FnIdx, SignatureTable, SymbolTable, Type, TypeRegistry};

/// An arena id usable as a side-table key.
pub trait NodeId: Copy {
    fn index(self) -> usize;
}

impl NodeId for ExprId {
    #[inline]
    fn index(self) -> usize {
        ExprId::index(self)
    }
}

impl NodeId for TypeExprId {
    #[inline]
    fn index(self) -> usize {
        TypeExprId::index(self)
    }
}

/// Resolved type per node, indexed by the node's arena id.
pub struct SideTable<I> {
    slots: Vec<Option<Type>>,
    _id: PhantomData<I>,
}

/// Resolved type of every checked expression.
pub type ExprTypes = SideTable<ExprId>;

/// Resolved type of every checked type expression.
pub type TypeExprTypes = SideTable<TypeExprId>;

impl<I: NodeId> SideTable<I> {
    pub fn new() -> Self {
        SideTable {
            slots: Vec::new(),
            _id: PhantomData,
        }
    }

    /// Create a table sized for an arena holding `len` nodes.
    pub fn with_len(len: usize) -> Self {
        SideTable {
            slots: vec![None; len],
            _id: PhantomData,
        }
    }

    /// Record the resolved type of `id`.
    pub fn record(&mut self, id: I, ty: Type) {
        let index = id.index();
        if index >= self.slots.len() {
            self.slots.resize(index + 1, None);
        }
        self.slots[index] = Some(ty);
    }

    /// The resolved type of `id`, if it has been recorded.
    pub fn get(&self, id: I) -> Option<Type> {
        self.slots.get(id.index()).copied().flatten()
    }

    /// Number of nodes with a recorded type.
    pub fn resolved_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }
}

impl<I: NodeId> Default for SideTable<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I> Clone for SideTable<I> {
    fn clone(&self) -> Self {
        SideTable {
            slots: self.slots.clone(),
            _id: PhantomData,
        }
    }
}

impl<I> PartialEq for SideTable<I> {
    fn eq(&self, other: &Self) -> bool {
        self.slots == other.slots
    }
}

impl<I> Eq for SideTable<I> {}

impl<I> fmt::Debug for SideTable<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SideTable")
            .field("slots", &self.slots)
            .finish()
    }
}

/// A function whose body passed checking.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CheckedFunction {
    pub idx: FnIdx,
    /// The `fn` statement.
    pub decl: StmtId,
    /// Locals declared in the body.
    pub symbols: SymbolTable,
}

/// A fully checked module.
///
/// Only produced when every pass succeeded, so every expression reachable
/// from a function body has a recorded type.
#[derive(Clone, Debug)]
pub struct TypedModule {
    pub types: TypeRegistry,
    pub signatures: SignatureTable,
    /// Checked functions, in signature-table order.
    pub functions: Vec<CheckedFunction>,
    pub expr_types: ExprTypes,
    pub type_expr_types: TypeExprTypes,
}

impl TypedModule {
    pub fn expr_type(&self, id: ExprId) -> Option<Type> {
        self.expr_types.get(id)
    }

    pub fn type_expr_type(&self, id: TypeExprId) -> Option<Type> {
        self.type_expr_types.get(id)
    }

    pub fn function(&self, idx: FnIdx) -> Option<&CheckedFunction> {
        self.functions.get(idx.index())
    }

    /// Signature index of the function declared by `decl`.
    pub fn fn_index(&self, decl: StmtId) -> Option<FnIdx> {
        self.functions
            .iter()
            .find(|func| func.decl == decl)
            .map(|func| func.idx)
    }
}

#[cfg(test)]
mod tests;
