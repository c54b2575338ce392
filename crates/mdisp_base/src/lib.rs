//! The base operation book.
//!
//! Fourteen holders over primitive values, at fixed indices:
//!
//! | index | op | types |
//! |-------|----|-------|
//! | 0-3 | `add` `sub` `mul` `div` | char, int, long, int64, float, double |
//! | 4 | `neg` | char, int, long, int64, float, double |
//! | 5-6 | `inc` `dec` | char, int, long, int64 |
//! | 7-8 | `lshift` `rshift` | char, int, long, int64, amount is uint |
//! | 9-13 | `less` `leq` `eq` `geq` `greater` | char, int, long, int64, float, double |
//!
//! Integer arithmetic wraps. Integer division by zero fails with
//! [`CallErrorKind::DivisionByZero`](mdisp_dispatch::CallErrorKind).
//!
//! # Process-wide book
//!
//! Nothing is built on first use. The host constructs a [`BaseBook`] and
//! hands it to [`install`]; code that wants the shared book asks
//! [`installed`] and handles `None`.

mod book;
mod global;
mod ops;
pub mod types;
mod value;

pub use book::BaseBook;
pub use global::{install, install_default, installed, InstallError};
pub use ops::BaseOp;
pub use value::Value;
