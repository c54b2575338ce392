use super::*;
use crate::TypeHierarchy;

struct Numbers {
    hierarchy: TypeHierarchy,
    number: TypeId,
    integer: TypeId,
    real: TypeId,
    double: TypeId,
}

#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
fn numbers() -> Numbers {
    let mut hierarchy = TypeHierarchy::new();
    let number = hierarchy.register_fundamental("Number").unwrap();
    let integer = hierarchy.register_class("Integer", number).unwrap();
    let real = hierarchy.register_class("Real", number).unwrap();
    let double = hierarchy.register_class("Double", real).unwrap();
    Numbers {
        hierarchy,
        number,
        integer,
        real,
        double,
    }
}

#[test]
fn test_equality_is_structural() {
    let a = TypeTuple::from([TypeId::new(1), TypeId::new(2)]);
    let b = TypeTuple::from_slice(&[TypeId::new(1), TypeId::new(2)]);
    let c = TypeTuple::from([TypeId::new(2), TypeId::new(1)]);

    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_ne!(a, TypeTuple::from([TypeId::new(1)]));
}

#[test]
fn test_accessors() {
    let tuple: TypeTuple = [TypeId::new(4), TypeId::new(9)].into_iter().collect();

    assert_eq!(tuple.arity(), 2);
    assert!(!tuple.is_empty());
    assert_eq!(tuple.get(1), Some(TypeId::new(9)));
    assert_eq!(tuple.get(2), None);
    assert_eq!(tuple[0], TypeId::new(4));
    assert!(TypeTuple::default().is_empty());
}

#[test]
fn test_subtuple_elementwise() {
    let n = numbers();
    let broad = TypeTuple::from([n.number, n.real]);
    let narrow = TypeTuple::from([n.integer, n.double]);
    let crossed = TypeTuple::from([n.real, n.integer]);

    assert!(narrow.is_subtuple_of(&broad, &n.hierarchy));
    assert!(broad.is_subtuple_of(&broad, &n.hierarchy));
    assert!(!broad.is_subtuple_of(&narrow, &n.hierarchy));
    assert!(!crossed.is_subtuple_of(&broad, &n.hierarchy));
}

#[test]
fn test_subtuple_requires_same_arity() {
    let n = numbers();
    let single = TypeTuple::from([n.integer]);
    let pair = TypeTuple::from([n.number, n.number]);

    assert!(!single.is_subtuple_of(&pair, &n.hierarchy));
    assert!(!pair.is_subtuple_of(&single, &n.hierarchy));
}

#[test]
fn test_specificity_sums_depths() {
    let n = numbers();

    assert_eq!(TypeTuple::from([n.number, n.number]).specificity(&n.hierarchy), 2);
    assert_eq!(TypeTuple::from([n.integer, n.double]).specificity(&n.hierarchy), 5);
}

#[test]
fn test_display_uses_oracle_names() {
    let n = numbers();
    let tuple = TypeTuple::from([n.integer, TypeId::new(99)]);

    assert_eq!(tuple.display(&n.hierarchy).to_string(), "(Integer, #99)");
    assert_eq!(tuple.to_string(), "(#1, #99)");
}
