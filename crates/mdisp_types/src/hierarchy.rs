//! A small nominal type hierarchy usable as a [`TypeOracle`].
//!
//! Hosts with their own object model implement `TypeOracle` directly. Hosts
//! without one (tests, embedders, the base operation book) build a
//! `TypeHierarchy` instead:
//!
//! - **Fundamental** types are roots at depth 1 (`int`, `double`, `Object`)
//! - **Class** types have exactly one parent and sit one level below it
//! - **Interface** types are roots that classes opt into with
//!   [`TypeHierarchy::implement`]; implementing is inherited by subclasses
//!
//! Value conversions that are not subtyping (`int` into `double`) are
//! declared with [`TypeHierarchy::allow_transform`].
//!
//! # Design
//!
//! - Dense storage: `TypeId` is the index into `entries`
//! - Name index: `FxHashMap` for O(1) lookup by name
//! - Entries are append-only, so handles never dangle

use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;

use crate::{TypeId, TypeOracle};

/// Error raised while building a [`TypeHierarchy`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HierarchyError {
    #[error("type `{name}` is already registered")]
    DuplicateName { name: String },

    #[error("unknown type {ty}")]
    UnknownType { ty: TypeId },

    #[error("type `{name}` is not an interface")]
    NotAnInterface { name: String },

    #[error("interface `{name}` cannot be used as a parent class")]
    InterfaceParent { name: String },

    #[error("type hierarchy is full ({count} types)")]
    TooManyTypes { count: usize },
}

/// The kind of a registered type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// A root type with no parent.
    Fundamental,

    /// A derived type with exactly one parent.
    Class,

    /// A root type that other types implement.
    Interface,
}

/// A registered type definition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeEntry {
    /// The type name.
    pub name: Box<str>,

    /// The kind of type.
    pub kind: TypeKind,

    /// Parent class, `None` for roots.
    pub parent: Option<TypeId>,

    /// Interfaces implemented directly (not through the parent).
    pub interfaces: SmallVec<[TypeId; 2]>,

    /// Distance from the root, roots are at depth 1.
    pub depth: u32,
}

/// Registry of nominal types with single inheritance and interfaces.
#[derive(Clone, Debug, Default)]
pub struct TypeHierarchy {
    /// Entries indexed by `TypeId`.
    entries: Vec<TypeEntry>,

    /// Types indexed by name.
    by_name: FxHashMap<Box<str>, TypeId>,

    /// Declared `(from, to)` value conversions.
    transforms: FxHashSet<(TypeId, TypeId)>,
}

impl TypeHierarchy {
    /// Create a new empty hierarchy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a root type.
    pub fn register_fundamental(&mut self, name: &str) -> Result<TypeId, HierarchyError> {
        self.push_entry(name, TypeKind::Fundamental, None, 1)
    }

    /// Register an interface. Interfaces are roots at depth 1.
    pub fn register_interface(&mut self, name: &str) -> Result<TypeId, HierarchyError> {
        self.push_entry(name, TypeKind::Interface, None, 1)
    }

    /// Register a class deriving from `parent`.
    pub fn register_class(&mut self, name: &str, parent: TypeId) -> Result<TypeId, HierarchyError> {
        let parent_entry = self.entry_or_err(parent)?;
        if parent_entry.kind == TypeKind::Interface {
            return Err(HierarchyError::InterfaceParent {
                name: parent_entry.name.to_string(),
            });
        }
        let depth = parent_entry.depth + 1;
        self.push_entry(name, TypeKind::Class, Some(parent), depth)
    }

    /// Declare that `ty` (and every subclass of it) implements `interface`.
    pub fn implement(&mut self, ty: TypeId, interface: TypeId) -> Result<(), HierarchyError> {
        self.entry_or_err(ty)?;
        let iface = self.entry_or_err(interface)?;
        if iface.kind != TypeKind::Interface {
            return Err(HierarchyError::NotAnInterface {
                name: iface.name.to_string(),
            });
        }

        let entry = &mut self.entries[ty.index()];
        if !entry.interfaces.contains(&interface) {
            entry.interfaces.push(interface);
        }
        Ok(())
    }

    /// Declare that values of `from` can be converted into `to` slots.
    pub fn allow_transform(&mut self, from: TypeId, to: TypeId) -> Result<(), HierarchyError> {
        self.entry_or_err(from)?;
        self.entry_or_err(to)?;
        self.transforms.insert((from, to));
        Ok(())
    }

    /// Look up a type by name.
    pub fn lookup(&self, name: &str) -> Option<TypeId> {
        self.by_name.get(name).copied()
    }

    /// Get the entry for a type.
    pub fn entry(&self, ty: TypeId) -> Option<&TypeEntry> {
        self.entries.get(ty.index())
    }

    /// Get the name of a type.
    pub fn name(&self, ty: TypeId) -> Option<&str> {
        self.entry(ty).map(|entry| &*entry.name)
    }

    /// Get the parent class of a type.
    pub fn parent(&self, ty: TypeId) -> Option<TypeId> {
        self.entry(ty).and_then(|entry| entry.parent)
    }

    /// Iterate `ty` and its parent chain, most specific first.
    pub fn ancestors(&self, ty: TypeId) -> Ancestors<'_> {
        Ancestors {
            hierarchy: self,
            next: self.entry(ty).map(|_| ty),
        }
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no types are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `sub` is `sup`, derives from it, or implements it.
    pub fn is_a(&self, sub: TypeId, sup: TypeId) -> bool {
        if sub == sup {
            return self.entry(sub).is_some();
        }
        let Some(target) = self.entry(sup) else {
            return false;
        };

        match target.kind {
            TypeKind::Interface => self
                .ancestors(sub)
                .any(|ty| self.entries[ty.index()].interfaces.contains(&sup)),
            TypeKind::Fundamental | TypeKind::Class => self.ancestors(sub).any(|ty| ty == sup),
        }
    }

    fn entry_or_err(&self, ty: TypeId) -> Result<&TypeEntry, HierarchyError> {
        self.entry(ty).ok_or(HierarchyError::UnknownType { ty })
    }

    fn push_entry(
        &mut self,
        name: &str,
        kind: TypeKind,
        parent: Option<TypeId>,
        depth: u32,
    ) -> Result<TypeId, HierarchyError> {
        if self.by_name.contains_key(name) {
            return Err(HierarchyError::DuplicateName {
                name: name.to_owned(),
            });
        }
        let raw = u32::try_from(self.entries.len()).map_err(|_| HierarchyError::TooManyTypes {
            count: self.entries.len(),
        })?;
        let ty = TypeId::new(raw);

        self.entries.push(TypeEntry {
            name: name.into(),
            kind,
            parent,
            interfaces: SmallVec::new(),
            depth,
        });
        self.by_name.insert(name.into(), ty);
        Ok(ty)
    }
}

impl TypeOracle for TypeHierarchy {
    fn is_subtype(&self, sub: TypeId, sup: TypeId) -> bool {
        self.is_a(sub, sup)
    }

    fn depth(&self, ty: TypeId) -> u32 {
        self.entry(ty).map_or(0, |entry| entry.depth)
    }

    fn type_name(&self, ty: TypeId) -> Option<&str> {
        self.name(ty)
    }

    fn is_transformable(&self, from: TypeId, to: TypeId) -> bool {
        self.is_a(from, to)
            || self
                .ancestors(from)
                .any(|ty| self.transforms.contains(&(ty, to)))
    }
}

/// Iterator over a type and its parent chain.
pub struct Ancestors<'a> {
    hierarchy: &'a TypeHierarchy,
    next: Option<TypeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = TypeId;

    fn next(&mut self) -> Option<TypeId> {
        let current = self.next?;
        self.next = self.hierarchy.parent(current);
        Some(current)
    }
}

#[cfg(test)]
mod tests;
