//! Opaque runtime type handle.

use std::fmt;

/// Opaque handle for a runtime type.
///
/// # Layout
/// A plain 32-bit index. The meaning of the index belongs to whoever minted
/// it (usually a [`TypeHierarchy`](crate::TypeHierarchy)); the engine only
/// compares handles and hands them to a [`TypeOracle`](crate::TypeOracle).
///
/// Ordering follows the raw index so that collections of handles iterate
/// deterministically.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct TypeId(u32);

impl TypeId {
    /// Create a handle from a raw index.
    #[inline]
    pub const fn new(raw: u32) -> Self {
        TypeId(raw)
    }

    /// Get the raw u32 value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Get the raw value as a `usize`, for indexing side tables.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeId({})", self.0)
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
