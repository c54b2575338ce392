//! Arena node storage for the type graph.

use mdisp_types::TypeTuple;
use smallvec::SmallVec;

/// Index of a node in the graph arena.
///
/// Only meaningful for the graph that minted it. Slots are reused after
/// removal, so ids are never handed out of the crate.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub(crate) struct NodeId(u32);

impl NodeId {
    #[inline]
    pub(crate) fn from_index(index: usize) -> Self {
        match u32::try_from(index) {
            Ok(raw) => NodeId(raw),
            Err(_) => panic!("type graph exceeded {} nodes", u32::MAX),
        }
    }

    #[inline]
    pub(crate) const fn index(self) -> usize {
        self.0 as usize
    }
}

/// A registered tuple and its edges.
pub(crate) struct Node<P> {
    pub(crate) key: TypeTuple,
    pub(crate) value: P,

    /// Cached `key.specificity(oracle)`.
    pub(crate) specificity: u32,

    /// Registration order, used to break specificity ties.
    pub(crate) serial: u64,

    /// Minimal proper supertuples (back references).
    pub(crate) parents: SmallVec<[NodeId; 2]>,

    /// Maximal proper subtuples (owning direction).
    pub(crate) children: SmallVec<[NodeId; 4]>,
}

/// Registered nodes of one arity.
#[derive(Default)]
pub(crate) struct RootSet {
    /// Maximal tuples of this arity.
    pub(crate) roots: Vec<NodeId>,

    /// Count of every node of this arity, roots or not.
    pub(crate) len: usize,
}
