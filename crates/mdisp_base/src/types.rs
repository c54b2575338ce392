//! Primitive types known to the base book.
//!
//! Every primitive is a root (no subtyping between them). Numeric types
//! convert into each other, which `arg_match_transformable` honors and
//! dispatch lookups ignore.

use mdisp_types::{HierarchyError, TypeHierarchy, TypeId};

pub const CHAR: TypeId = TypeId::new(0);
pub const INT: TypeId = TypeId::new(1);
pub const LONG: TypeId = TypeId::new(2);
pub const INT64: TypeId = TypeId::new(3);
pub const UINT: TypeId = TypeId::new(4);
pub const FLOAT: TypeId = TypeId::new(5);
pub const DOUBLE: TypeId = TypeId::new(6);
pub const BOOL: TypeId = TypeId::new(7);

/// Names in registration order; index equals `TypeId`.
const NAMES: [&str; 8] = ["char", "int", "long", "int64", "uint", "float", "double", "bool"];

/// Types with arithmetic.
pub const NUMERIC: [TypeId; 6] = [CHAR, INT, LONG, INT64, FLOAT, DOUBLE];

/// Types with increment, decrement and shifts.
pub const INTEGRAL: [TypeId; 4] = [CHAR, INT, LONG, INT64];

/// Name of a primitive, `None` for anything else.
pub fn name(ty: TypeId) -> Option<&'static str> {
    NAMES.get(ty.index()).copied()
}

/// Build the primitive hierarchy.
///
/// Registration order fixes the ids, so the constants above line up with
/// the returned hierarchy.
pub fn hierarchy() -> Result<TypeHierarchy, HierarchyError> {
    let mut h = TypeHierarchy::new();
    for name in NAMES {
        h.register_fundamental(name)?;
    }

    let convertible = [CHAR, INT, LONG, INT64, UINT, FLOAT, DOUBLE];
    for from in convertible {
        for to in convertible {
            if from != to {
                h.allow_transform(from, to)?;
            }
        }
    }
    Ok(h)
}

#[cfg(test)]
mod tests {
    #![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

    use mdisp_types::TypeOracle;

    use super::*;

    #[test]
    fn test_ids_match_registration() {
        let h = hierarchy().unwrap();
        for (i, name) in NAMES.iter().enumerate() {
            let ty = h.lookup(name).unwrap();
            assert_eq!(ty.index(), i);
            assert_eq!(super::name(ty), Some(*name));
        }
        assert_eq!(h.lookup("double"), Some(DOUBLE));
        assert_eq!(name(TypeId::new(30)), None);
    }

    #[test]
    fn test_primitives_are_unrelated() {
        let h = hierarchy().unwrap();
        assert!(!h.is_subtype(INT, LONG));
        assert!(!h.is_subtype(CHAR, INT));
        assert!(h.is_subtype(INT, INT));
        assert_eq!(h.depth(FLOAT), 1);
    }

    #[test]
    fn test_numbers_convert() {
        let h = hierarchy().unwrap();
        assert!(h.is_transformable(INT, DOUBLE));
        assert!(h.is_transformable(UINT, CHAR));
        assert!(!h.is_transformable(BOOL, INT));
        assert!(!h.is_transformable(INT, BOOL));
    }
}
