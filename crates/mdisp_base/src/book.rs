//! The assembled base book.

use std::fmt;
use std::sync::Arc;

use mdisp_dispatch::{Book, InvokeError};
use mdisp_types::{HierarchyError, SharedOracle};

use crate::{ops, types, BaseOp, Value};

/// Holders for every [`BaseOp`], placed at their fixed indices.
pub struct BaseBook {
    book: Book<Value>,
    oracle: SharedOracle,
}

macro_rules! binary_helpers {
    ($($(#[$meta:meta])* $name:ident => $op:ident;)*) => {
        $(
            $(#[$meta])*
            pub fn $name(&self, a: Value, b: Value) -> Result<Value, InvokeError> {
                self.apply(BaseOp::$op, &[a, b])
            }
        )*
    };
}

macro_rules! unary_helpers {
    ($($(#[$meta:meta])* $name:ident => $op:ident;)*) => {
        $(
            $(#[$meta])*
            pub fn $name(&self, a: Value) -> Result<Value, InvokeError> {
                self.apply(BaseOp::$op, &[a])
            }
        )*
    };
}

macro_rules! predicate_helpers {
    ($($name:ident => $op:ident;)*) => {
        $(
            /// Comparison as a plain `bool`, `false` when no implementation
            /// matches the operand types.
            pub fn $name(&self, a: Value, b: Value) -> bool {
                self.test(BaseOp::$op, a, b)
            }
        )*
    };
}

impl BaseBook {
    /// Build the primitive hierarchy and every base holder.
    pub fn new() -> Result<Self, HierarchyError> {
        let oracle: SharedOracle = Arc::new(types::hierarchy()?);
        let mut book = Book::new("base");
        for (index, holder) in ops::build(&oracle).into_inner().into_iter().enumerate() {
            book.set(index, holder);
        }
        Ok(Self { book, oracle })
    }

    /// The underlying book, for invoking by name or extending holders.
    pub fn book(&self) -> &Book<Value> {
        &self.book
    }

    pub fn oracle(&self) -> &SharedOracle {
        &self.oracle
    }

    /// Invoke `op` and return a freshly initialized result.
    pub fn apply(&self, op: BaseOp, args: &[Value]) -> Result<Value, InvokeError> {
        self.book.invoke_overwrite(op.index(), args)
    }

    /// Invoke `op`, writing into `ret`, which must already hold the result
    /// type.
    pub fn apply_into(&self, op: BaseOp, args: &[Value], ret: &mut Value) -> Result<(), InvokeError> {
        self.book.invoke(op.index(), args, ret)
    }

    binary_helpers! {
        add => Add;
        sub => Sub;
        mul => Mul;
        div => Div;
        /// `a << amount`; `amount` must be a `uint` value.
        lshift => LShift;
        /// `a >> amount`; `amount` must be a `uint` value.
        rshift => RShift;
        less => Less;
        leq => Leq;
        eq => Eq;
        geq => Geq;
        greater => Greater;
    }

    unary_helpers! {
        neg => Neg;
        inc => Inc;
        dec => Dec;
    }

    predicate_helpers! {
        std_less => Less;
        std_leq => Leq;
        std_eq => Eq;
        std_geq => Geq;
        std_greater => Greater;
    }

    /// Shift left by a native amount.
    pub fn std_lshift(&self, a: Value, amount: u32) -> Result<Value, InvokeError> {
        self.lshift(a, Value::UInt(amount))
    }

    /// Shift right by a native amount.
    pub fn std_rshift(&self, a: Value, amount: u32) -> Result<Value, InvokeError> {
        self.rshift(a, Value::UInt(amount))
    }

    fn test(&self, op: BaseOp, a: Value, b: Value) -> bool {
        self.apply(op, &[a, b])
            .ok()
            .and_then(|value| value.as_bool())
            .unwrap_or(false)
    }
}

impl fmt::Debug for BaseBook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BaseBook").field("book", &self.book).finish_non_exhaustive()
    }
}
