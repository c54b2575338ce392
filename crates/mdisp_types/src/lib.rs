//! Type handles and type tuples for the mdisp dispatch engine.
//!
//! The engine never defines a type system of its own. Subtyping and
//! specificity come from a [`TypeOracle`] supplied by the host; this crate
//! only provides the vocabulary every other crate speaks:
//!
//! - [`TypeId`]: opaque, `Copy` handle for a runtime type
//! - [`TypeTuple`]: fixed-arity ordered sequence of `TypeId`, the dispatch key
//! - [`TypeOracle`]: `is_subtype` / `depth` predicates over `TypeId`
//! - [`TypeHierarchy`]: a ready-made oracle for hosts without a type system
//!
//! # Tuple ordering
//!
//! ```text
//!    Number
//!     ├── Integer
//!     └── Real
//!          └── Double
//! ```
//!
//! With the hierarchy above, `(Integer, Double)` is a subtuple of
//! `(Number, Real)`, while `(Integer)` is never a subtuple of `(Number, Number)`
//! because arities differ.

mod hierarchy;
mod oracle;
mod tuple;
mod type_id;

pub use hierarchy::{Ancestors, HierarchyError, TypeEntry, TypeHierarchy, TypeKind};
pub use oracle::{SharedOracle, TypeOracle};
pub use tuple::{TupleDisplay, TypeTuple};
pub use type_id::TypeId;
