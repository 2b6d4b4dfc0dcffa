//! Global registries built by the first two checker passes.
//!
//! Both registries are append-only and ordered. Handles handed out at
//! registration stay valid for the rest of compilation.
//!
//! ```text
//! TypeRegistry                      SignatureTable
//! ┌─────┬────────────┐              ┌─────┬──────────────────────┐
//! │ 0   │ bool       │ built-in     │ 0   │ add  -> int          │
//! │ 1   │ int        │ built-in     │ 1   │ main -> bool         │
//! │ 2.. │ structs... │ source order │ ..  │ source order         │
//! └─────┴────────────┘              └─────┴──────────────────────┘
//! ```

use liam_ir::{Name, Span, StmtId, StringInterner};
use rustc_hash::FxHashMap;

use crate::idx::next_raw;
use crate::{FnIdx, Type, TypeIdx};

/// Ordered registry of every named type: built-ins first, then declared
/// structs in declaration order.
#[derive(Clone, Debug)]
pub struct TypeRegistry {
    types: Vec<Type>,
    names: Vec<Name>,
    by_name: FxHashMap<Name, TypeIdx>,
}

impl TypeRegistry {
    /// Create a registry seeded with the built-in types at their fixed indices.
    pub fn new(interner: &StringInterner) -> Self {
        let mut registry = TypeRegistry {
            types: Vec::new(),
            names: Vec::new(),
            by_name: FxHashMap::default(),
        };
        // Order must match `TypeIdx::BOOL` / `TypeIdx::INT`.
        registry.push(interner.intern("bool"), Type::Bool);
        registry.push(interner.intern("int"), Type::Int);
        debug_assert_eq!(registry.len(), TypeIdx::BUILTIN_COUNT as usize);
        registry
    }

    fn push(&mut self, name: Name, ty: Type) -> TypeIdx {
        let idx = TypeIdx::from_raw(next_raw(self.types.len()));
        self.types.push(ty);
        self.names.push(name);
        self.by_name.insert(name, idx);
        idx
    }

    /// Register a struct type named `name`.
    ///
    /// Returns the existing index as the error if the name is already
    /// taken, by a built-in or an earlier struct.
    pub fn register_struct(&mut self, name: Name) -> Result<TypeIdx, TypeIdx> {
        if let Some(&existing) = self.by_name.get(&name) {
            return Err(existing);
        }
        Ok(self.push(name, Type::Struct(name)))
    }

    /// Look up a type by name.
    pub fn lookup(&self, name: Name) -> Option<TypeIdx> {
        self.by_name.get(&name).copied()
    }

    /// Resolve a handle to its type.
    ///
    /// # Panics
    /// Panics if `idx` was not produced by this registry.
    #[track_caller]
    pub fn resolve(&self, idx: TypeIdx) -> Type {
        self.types[idx.index()]
    }

    /// Resolve a handle to its type, if it belongs to this registry.
    pub fn get(&self, idx: TypeIdx) -> Option<Type> {
        self.types.get(idx.index()).copied()
    }

    /// Declared name of a registered type.
    pub fn name(&self, idx: TypeIdx) -> Option<Name> {
        self.names.get(idx.index()).copied()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Registered types in index order.
    pub fn iter(&self) -> impl Iterator<Item = (TypeIdx, Type)> + '_ {
        self.types
            .iter()
            .enumerate()
            .map(|(i, &ty)| (TypeIdx::from_raw(next_raw(i)), ty))
    }
}

/// A collected function signature.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct FunctionSig {
    /// Declared function name.
    pub name: Name,
    /// Resolved declared return type.
    pub return_type: Type,
    /// The `fn` statement this signature was collected from.
    pub decl: StmtId,
    /// Span of the whole declaration.
    pub span: Span,
}

/// Ordered table of function signatures.
///
/// The index assigned at registration is the function's permanent
/// reference: identifier resolution, `Type::Fn` and the IR call
/// instruction all use it.
#[derive(Clone, Debug, Default)]
pub struct SignatureTable {
    sigs: Vec<FunctionSig>,
    by_name: FxHashMap<Name, FnIdx>,
}

impl SignatureTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a signature and return its index.
    ///
    /// Returns the existing index as the error if a function with the
    /// same name was already registered.
    pub fn register(&mut self, sig: FunctionSig) -> Result<FnIdx, FnIdx> {
        if let Some(&existing) = self.by_name.get(&sig.name) {
            return Err(existing);
        }
        let idx = FnIdx::from_raw(next_raw(self.sigs.len()));
        self.by_name.insert(sig.name, idx);
        self.sigs.push(sig);
        Ok(idx)
    }

    /// Look up a function by name.
    pub fn lookup(&self, name: Name) -> Option<FnIdx> {
        self.by_name.get(&name).copied()
    }

    pub fn get(&self, idx: FnIdx) -> Option<&FunctionSig> {
        self.sigs.get(idx.index())
    }

    pub fn len(&self) -> usize {
        self.sigs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sigs.is_empty()
    }

    /// Signatures in registration order, with their indices.
    pub fn iter(&self) -> impl Iterator<Item = (FnIdx, &FunctionSig)> + '_ {
        self.sigs
            .iter()
            .enumerate()
            .map(|(i, sig)| (FnIdx::from_raw(next_raw(i)), sig))
    }
}
