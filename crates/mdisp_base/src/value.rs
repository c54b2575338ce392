//! Primitive values flowing through the base book.

use std::fmt;

use mdisp_dispatch::DispatchValue;
use mdisp_types::TypeId;

use crate::types::{self, BOOL, CHAR, DOUBLE, FLOAT, INT, INT64, LONG, UINT};

/// A primitive value tagged with its runtime type.
///
/// `long` and `int64` share a representation but stay distinct types, so
/// they dispatch separately.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Value {
    Char(i8),
    Int(i32),
    Long(i64),
    Int64(i64),
    UInt(u32),
    Float(f32),
    Double(f64),
    Bool(bool),

    /// Storage initialized for a type with no primitive representation.
    Empty(TypeId),
}

impl Value {
    /// The runtime type of this value.
    pub fn type_id(&self) -> TypeId {
        match self {
            Value::Char(_) => CHAR,
            Value::Int(_) => INT,
            Value::Long(_) => LONG,
            Value::Int64(_) => INT64,
            Value::UInt(_) => UINT,
            Value::Float(_) => FLOAT,
            Value::Double(_) => DOUBLE,
            Value::Bool(_) => BOOL,
            Value::Empty(ty) => *ty,
        }
    }

    /// Human-readable name of the runtime type.
    pub fn type_name(&self) -> String {
        let ty = self.type_id();
        types::name(ty).map_or_else(|| ty.to_string(), str::to_owned)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl DispatchValue for Value {
    fn runtime_type(&self) -> TypeId {
        self.type_id()
    }

    fn initialized(ty: TypeId) -> Self {
        match ty {
            CHAR => Value::Char(0),
            INT => Value::Int(0),
            LONG => Value::Long(0),
            INT64 => Value::Int64(0),
            UINT => Value::UInt(0),
            FLOAT => Value::Float(0.0),
            DOUBLE => Value::Double(0.0),
            BOOL => Value::Bool(false),
            other => Value::Empty(other),
        }
    }
}

impl From<i8> for Value {
    fn from(v: i8) -> Self {
        Value::Char(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::UInt(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Double(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Char(v) => write!(f, "{v}"),
            Value::Int(v) => write!(f, "{v}"),
            Value::Long(v) | Value::Int64(v) => write!(f, "{v}"),
            Value::UInt(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Double(v) => write!(f, "{v}"),
            Value::Bool(v) => write!(f, "{v}"),
            Value::Empty(ty) => write!(f, "<empty {ty}>"),
        }
    }
}
