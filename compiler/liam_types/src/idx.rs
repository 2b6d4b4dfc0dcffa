//! Registry handles.
//!
//! - [`TypeIdx`]: index into the [`TypeRegistry`](crate::TypeRegistry).
//!   Built-ins have fixed indices, assigned before anything else is registered.
//! - [`FnIdx`]: index into the [`SignatureTable`](crate::SignatureTable).
//!   Assigned once during signature collection and never renumbered; call
//!   instructions refer to functions by this index.

use std::fmt;

/// A 32-bit index into the type registry.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct TypeIdx(u32);

impl TypeIdx {
    // === Built-in Types ===
    // Seeded by `TypeRegistry::new()` in this order. Literal checking
    // refers to these indices directly, so the order is fixed.

    /// The `bool` type.
    pub const BOOL: Self = Self(0);
    /// The `int` type.
    pub const INT: Self = Self(1);

    /// Number of built-in types.
    pub const BUILTIN_COUNT: u32 = 2;

    /// Create an index from a raw u32 value.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Check if this is one of the seeded built-in types.
    #[inline]
    pub const fn is_builtin(self) -> bool {
        self.0 < Self::BUILTIN_COUNT
    }
}

impl fmt::Debug for TypeIdx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::BOOL => write!(f, "TypeIdx::BOOL"),
            Self::INT => write!(f, "TypeIdx::INT"),
            Self(raw) => write!(f, "TypeIdx({raw})"),
        }
    }
}

/// A 32-bit index into the function signature table.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct FnIdx(u32);

impl FnIdx {
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for FnIdx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FnIdx({})", self.0)
    }
}

/// Convert a table length to the next 32-bit handle.
///
/// # Panics
/// Panics if a table grows past `u32::MAX` entries, which cannot happen for
/// a source unit addressable with 32-bit spans.
#[inline]
pub(crate) fn next_raw(len: usize) -> u32 {
    u32::try_from(len).unwrap_or_else(|_| panic!("registry exceeded u32::MAX entries"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn builtin_indices_are_fixed() {
        assert_eq!(TypeIdx::BOOL.raw(), 0);
        assert_eq!(TypeIdx::INT.raw(), 1);
        assert!(TypeIdx::BOOL.is_builtin());
        assert!(TypeIdx::INT.is_builtin());
        assert!(!TypeIdx::from_raw(2).is_builtin());
    }

    #[test]
    fn debug_names_builtins() {
        assert_eq!(format!("{:?}", TypeIdx::BOOL), "TypeIdx::BOOL");
        assert_eq!(format!("{:?}", TypeIdx::from_raw(5)), "TypeIdx(5)");
        assert_eq!(format!("{:?}", FnIdx::from_raw(3)), "FnIdx(3)");
    }
}
