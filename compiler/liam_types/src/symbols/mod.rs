//! Per-function symbol table.
//!
//! One table is created fresh for every function body and shared by all
//! nested blocks of that body. Names are never shadowed or redeclared.

use liam_ir::Name;
use rustc_hash::FxHashMap;

use crate::Type;

/// A local binding.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Local {
    pub ty: Type,
    /// Declaration-order index of the local within its function.
    pub slot: u32,
}

/// Locals declared in one function body.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SymbolTable {
    locals: FxHashMap<Name, Local>,
    order: Vec<Name>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare `name` with type `ty`.
    ///
    /// Returns the new local, or the existing one as the error if `name`
    /// is already declared in this table.
    pub fn insert(&mut self, name: Name, ty: Type) -> Result<Local, Local> {
        if let Some(&existing) = self.locals.get(&name) {
            return Err(existing);
        }
        let slot = u32::try_from(self.order.len()).unwrap_or(u32::MAX);
        let local = Local { ty, slot };
        self.locals.insert(name, local);
        self.order.push(name);
        Ok(local)
    }

    pub fn get(&self, name: Name) -> Option<Local> {
        self.locals.get(&name).copied()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Locals in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (Name, Local)> + '_ {
        self.order
            .iter()
            .filter_map(|name| self.locals.get(name).map(|local| (*name, *local)))
    }
}
