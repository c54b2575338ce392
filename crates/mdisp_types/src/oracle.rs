//! The subtype predicate provider.

use std::sync::Arc;

use crate::TypeId;

/// Supplies subtyping and specificity for a `TypeId` domain.
///
/// The dispatch engine treats this as an opaque collaborator. Answers must be
/// stable for as long as any graph built against the oracle is alive:
/// nodes cache their specificity at insertion time and the graph shape
/// encodes `is_subtype` results.
///
/// `is_subtype` is expected to be reflexive and transitive, and `depth` to
/// grow strictly along proper subtypes. Lookups stay total when an oracle
/// breaks these rules, but "most specific" loses its meaning.
pub trait TypeOracle: Send + Sync {
    /// Whether `sub` is `sup` or one of its descendants.
    fn is_subtype(&self, sub: TypeId, sup: TypeId) -> bool;

    /// Distance of `ty` from its hierarchy root. Higher is more specific.
    fn depth(&self, ty: TypeId) -> u32;

    /// Human-readable name, used only for display and logging.
    fn type_name(&self, _ty: TypeId) -> Option<&str> {
        None
    }

    /// Whether a value of type `from` can be converted into a `to` slot.
    ///
    /// Defaults to plain subtyping. Oracles with value conversions (say
    /// `int` into `double`) widen this; argument matching with
    /// `arg_match_transformable` consults it, dispatch lookups never do.
    fn is_transformable(&self, from: TypeId, to: TypeId) -> bool {
        self.is_subtype(from, to)
    }
}

/// Oracle shared between a graph, its holder, and any number of readers.
pub type SharedOracle = Arc<dyn TypeOracle>;

impl<T: TypeOracle + ?Sized> TypeOracle for Arc<T> {
    fn is_subtype(&self, sub: TypeId, sup: TypeId) -> bool {
        (**self).is_subtype(sub, sup)
    }

    fn depth(&self, ty: TypeId) -> u32 {
        (**self).depth(ty)
    }

    fn type_name(&self, ty: TypeId) -> Option<&str> {
        (**self).type_name(ty)
    }

    fn is_transformable(&self, from: TypeId, to: TypeId) -> bool {
        (**self).is_transformable(from, to)
    }
}
