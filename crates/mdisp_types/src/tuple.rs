//! Ordered type tuples, the dispatch key.

use std::fmt;
use std::ops::Index;

use smallvec::SmallVec;

use crate::{TypeId, TypeOracle};

/// Immutable ordered sequence of [`TypeId`].
///
/// Two tuples are equal iff they have the same arity and identical elements.
/// Most operations dispatch on one to four arguments, so up to four handles
/// are stored inline.
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeTuple(SmallVec<[TypeId; 4]>);

impl TypeTuple {
    /// Create a tuple by copying a slice of handles.
    pub fn from_slice(types: &[TypeId]) -> Self {
        TypeTuple(SmallVec::from_slice(types))
    }

    /// Number of elements.
    #[inline]
    pub fn arity(&self) -> usize {
        self.0.len()
    }

    /// Whether the tuple has no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Element at `index`, or `None` past the end.
    #[inline]
    pub fn get(&self, index: usize) -> Option<TypeId> {
        self.0.get(index).copied()
    }

    #[inline]
    pub fn as_slice(&self) -> &[TypeId] {
        &self.0
    }

    /// Iterate over the elements by value.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = TypeId> + '_ {
        self.0.iter().copied()
    }

    /// Whether `self` is-a `other`: same arity and every element of `self`
    /// is a subtype of the corresponding element of `other`.
    ///
    /// Reflexive, so a tuple is a subtuple of itself.
    pub fn is_subtuple_of<O: TypeOracle + ?Sized>(&self, other: &TypeTuple, oracle: &O) -> bool {
        self.arity() == other.arity()
            && self
                .iter()
                .zip(other.iter())
                .all(|(sub, sup)| oracle.is_subtype(sub, sup))
    }

    /// Sum of element depths. Higher means more specific.
    pub fn specificity<O: TypeOracle + ?Sized>(&self, oracle: &O) -> u32 {
        self.iter()
            .fold(0u32, |acc, ty| acc.saturating_add(oracle.depth(ty)))
    }

    /// Format the tuple with names resolved through `oracle`.
    #[inline]
    pub fn display<'a, O: TypeOracle + ?Sized>(&'a self, oracle: &'a O) -> TupleDisplay<'a, O> {
        TupleDisplay {
            tuple: self,
            oracle,
        }
    }
}

impl Index<usize> for TypeTuple {
    type Output = TypeId;

    fn index(&self, index: usize) -> &TypeId {
        &self.0[index]
    }
}

impl FromIterator<TypeId> for TypeTuple {
    fn from_iter<I: IntoIterator<Item = TypeId>>(iter: I) -> Self {
        TypeTuple(iter.into_iter().collect())
    }
}

impl From<&[TypeId]> for TypeTuple {
    fn from(types: &[TypeId]) -> Self {
        TypeTuple::from_slice(types)
    }
}

impl<const N: usize> From<[TypeId; N]> for TypeTuple {
    fn from(types: [TypeId; N]) -> Self {
        TypeTuple::from_slice(&types)
    }
}

impl From<Vec<TypeId>> for TypeTuple {
    fn from(types: Vec<TypeId>) -> Self {
        TypeTuple(SmallVec::from_vec(types))
    }
}

impl<'a> IntoIterator for &'a TypeTuple {
    type Item = TypeId;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, TypeId>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter().copied()
    }
}

impl fmt::Debug for TypeTuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for TypeTuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, ty) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{ty}")?;
        }
        f.write_str(")")
    }
}

/// Helper for displaying a `TypeTuple` with resolved names.
///
/// Types the oracle cannot name fall back to their `#index` form.
pub struct TupleDisplay<'a, O: ?Sized> {
    tuple: &'a TypeTuple,
    oracle: &'a O,
}

impl<O: TypeOracle + ?Sized> fmt::Display for TupleDisplay<'_, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, ty) in self.tuple.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            match self.oracle.type_name(ty) {
                Some(name) => f.write_str(name)?,
                None => write!(f, "{ty}")?,
            }
        }
        f.write_str(")")
    }
}

#[cfg(test)]
mod tests;
