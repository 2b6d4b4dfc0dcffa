//! Resolved types.

use liam_ir::{Name, StringInterner};

use crate::{FnIdx, SignatureTable};

/// A resolved type.
///
/// Equality is structural-by-declaration:
/// - `Bool` and `Int` are singletons
/// - `Struct` types are equal iff they have the same name
/// - `Fn` types are equal iff they refer to the same declaration
///
/// The derived `PartialEq` implements exactly these rules.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Type {
    Bool,
    Int,
    Struct(Name),
    /// A declared function, by its signature-table index.
    Fn(FnIdx),
}

impl Type {
    /// Render for diagnostics: `bool`, `int`, `Person`, `fn add() int`.
    pub fn display(self, interner: &StringInterner, signatures: &SignatureTable) -> String {
        match self {
            Type::Bool => "bool".to_owned(),
            Type::Int => "int".to_owned(),
            Type::Struct(name) => interner.lookup(name).to_owned(),
            Type::Fn(idx) => match signatures.get(idx) {
                Some(sig) => format!(
                    "fn {}() {}",
                    interner.lookup(sig.name),
                    sig.return_type.display(interner, signatures)
                ),
                None => format!("fn#{}", idx.raw()),
            },
        }
    }
}

/// Whether two resolved types are compatible.
#[inline]
pub fn equal_types(left: Type, right: Type) -> bool {
    left == right
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtins_are_singletons() {
        assert!(equal_types(Type::Bool, Type::Bool));
        assert!(equal_types(Type::Int, Type::Int));
        assert!(!equal_types(Type::Bool, Type::Int));
    }

    #[test]
    fn structs_compare_by_name() {
        let a = Name::from_raw(1);
        let b = Name::from_raw(2);
        assert!(equal_types(Type::Struct(a), Type::Struct(a)));
        assert!(!equal_types(Type::Struct(a), Type::Struct(b)));
    }

    #[test]
    fn fns_compare_by_declaration() {
        let first = FnIdx::from_raw(0);
        let second = FnIdx::from_raw(1);
        assert!(equal_types(Type::Fn(first), Type::Fn(first)));
        assert!(!equal_types(Type::Fn(first), Type::Fn(second)));
        assert!(!equal_types(Type::Fn(first), Type::Int));
    }
}
