//! Shared fixtures for holder and book tests.

use std::sync::Arc;

use mdisp_types::{SharedOracle, TypeHierarchy, TypeId};

use crate::DispatchValue;

pub(crate) const NUMBER: TypeId = TypeId::new(0);
pub(crate) const INTEGER: TypeId = TypeId::new(1);
pub(crate) const REAL: TypeId = TypeId::new(2);
pub(crate) const TEXT: TypeId = TypeId::new(3);
pub(crate) const ANIMAL: TypeId = TypeId::new(4);
pub(crate) const DOG: TypeId = TypeId::new(5);
pub(crate) const BOOL: TypeId = TypeId::new(6);

/// `Number > {Integer, Real}`, `Animal > Dog`, plus unrelated `Text` and
/// `Bool`. Integers convert into reals.
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
pub(crate) fn oracle() -> SharedOracle {
    let mut h = TypeHierarchy::new();
    let number = h.register_fundamental("Number").unwrap();
    let integer = h.register_class("Integer", number).unwrap();
    let real = h.register_class("Real", number).unwrap();
    let text = h.register_fundamental("Text").unwrap();
    let animal = h.register_fundamental("Animal").unwrap();
    let dog = h.register_class("Dog", animal).unwrap();
    let boolean = h.register_fundamental("Bool").unwrap();
    h.allow_transform(integer, real).unwrap();

    assert_eq!(
        [number, integer, real, text, animal, dog, boolean],
        [NUMBER, INTEGER, REAL, TEXT, ANIMAL, DOG, BOOL]
    );
    Arc::new(h)
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Val {
    Int(i64),
    Real(f64),
    Text(String),
    Bool(bool),
    Dog(String),
    Empty(TypeId),
}

impl DispatchValue for Val {
    fn runtime_type(&self) -> TypeId {
        match self {
            Val::Int(_) => INTEGER,
            Val::Real(_) => REAL,
            Val::Text(_) => TEXT,
            Val::Bool(_) => BOOL,
            Val::Dog(_) => DOG,
            Val::Empty(ty) => *ty,
        }
    }

    fn initialized(ty: TypeId) -> Self {
        match ty {
            INTEGER => Val::Int(0),
            REAL => Val::Real(0.0),
            TEXT => Val::Text(String::new()),
            BOOL => Val::Bool(false),
            other => Val::Empty(other),
        }
    }
}
