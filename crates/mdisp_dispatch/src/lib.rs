//! Multiple dispatch over a [`TypeGraph`](mdisp_graph::TypeGraph).
//!
//! A [`Holder`] is one named operation (say `add`). It binds
//! [`Signature`]s to [`Callable`]s and, at call time, resolves the runtime
//! types of the arguments to the most specific registered signature.
//! A [`Book`] groups related holders and addresses them by index or name.
//!
//! ```text
//! Book "base"
//!   [0] add ── (Number, Number) -> Number
//!   │          (Integer, Integer) -> Integer
//!   [1] eq  ── (Number, Number) -> Bool
//! ```
//!
//! Values flowing through the engine implement [`DispatchValue`], which
//! reports the *dynamic* type of a value. A variable declared as `Animal`
//! that holds a `Dog` dispatches as `Dog`.

mod book;
mod callable;
mod config;
pub mod errors;
mod holder;
mod signature;

#[cfg(test)]
mod test_helpers;

pub use book::{Book, HolderKey, SharedHolder};
pub use callable::{Callable, DispatchValue};
pub use config::HolderConfig;
pub use errors::{CallError, CallErrorKind, InvokeError};
pub use holder::{Binding, Holder};
pub use signature::{Signature, SignatureDisplay};
