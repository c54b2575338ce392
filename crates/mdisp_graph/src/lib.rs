//! Type graph: values indexed by type tuples, resolved by specificity.
//!
//! A [`TypeGraph`] keeps one forest per arity. Each node holds a registered
//! [`TypeTuple`](mdisp_types::TypeTuple) and its payload; edges run from a
//! tuple to its *maximal proper subtuples*, so the graph is the Hasse diagram
//! of the registered tuples under the element-wise subtype order.
//!
//! ```text
//! arity 2 roots:   (Number, Number)          (Text, Text)
//!                   /              \
//!       (Integer, Number)    (Number, Integer)
//!                   \              /
//!                 (Integer, Integer)
//! ```
//!
//! A lookup for `(Integer, Integer)` walks every root whose tuple it is a
//! subtuple of, descends while children still match, and keeps the deepest
//! match along each path. The most specific of those wins.
//!
//! # Ownership
//!
//! Nodes live in an arena owned by the graph. Edges are plain indices:
//! `children` are the owning direction, `parents` are back references used
//! for re-linking on removal.

mod graph;
mod node;
mod stack;

pub use graph::{Match, TieBreak, TypeGraph};
