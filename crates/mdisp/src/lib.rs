//! Multiple dispatch on runtime type tuples.
//!
//! Register implementations of an operation under parameter-type tuples,
//! then call it with values; the most specific registration accepting the
//! values' runtime types runs.
//!
//! ```text
//! TypeOracle ──> TypeGraph<P> ──> Holder<V> ──> Book<V>
//! (subtyping)    (tuple DAG)      (one op)      (op family)
//! ```
//!
//! - [`TypeId`], [`TypeTuple`], [`TypeOracle`], [`TypeHierarchy`]: the type vocabulary
//! - [`TypeGraph`]: values indexed by type tuples, resolved by specificity
//! - [`Signature`], [`Callable`], [`Holder`], [`Book`]: dispatch and invocation
//! - [`base`]: arithmetic and comparisons over primitive values
//!
//! # Logging
//!
//! Every crate logs through `tracing`. Binaries and tests that want output
//! call [`init_tracing`] once.

use std::sync::Once;

pub use mdisp_base as base;
pub use mdisp_dispatch::errors;
pub use mdisp_dispatch::{
    Binding, Book, CallError, CallErrorKind, Callable, DispatchValue, Holder, HolderConfig,
    HolderKey, InvokeError, SharedHolder, Signature, SignatureDisplay,
};
pub use mdisp_graph::{Match, TieBreak, TypeGraph};
pub use mdisp_types::{
    Ancestors, HierarchyError, SharedOracle, TupleDisplay, TypeEntry, TypeHierarchy, TypeId,
    TypeKind, TypeOracle, TypeTuple,
};

static TRACING_INIT: Once = Once::new();

/// Install a global `tracing` subscriber.
///
/// Does nothing unless `RUST_LOG` is set, which also supplies the filter.
/// With `MDISP_LOG_TREE` set, spans render as an indented tree instead of
/// flat lines. Safe to call repeatedly; only the first call has an effect,
/// and a subscriber installed elsewhere is left alone.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_err() {
            return;
        }

        let tree = std::env::var_os("MDISP_LOG_TREE").is_some();
        let flat_layer = (!tree).then(|| fmt::layer().with_target(true).with_level(true));
        let tree_layer = tree.then(|| {
            tracing_tree::HierarchicalLayer::new(2)
                .with_targets(true)
                .with_bracketed_fields(true)
        });

        let installed = tracing_subscriber::registry()
            .with(flat_layer)
            .with(tree_layer)
            .with(EnvFilter::from_default_env())
            .try_init();

        // The host's subscriber stays in place and receives this event.
        if let Err(err) = installed {
            tracing::debug!(%err, "keeping existing tracing subscriber");
        }
    });
}
