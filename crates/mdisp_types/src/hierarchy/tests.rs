#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use pretty_assertions::assert_eq;

use super::*;

#[test]
fn test_depths_follow_parent_chain() {
    let mut h = TypeHierarchy::new();
    let object = h.register_fundamental("Object").unwrap();
    let shape = h.register_class("Shape", object).unwrap();
    let circle = h.register_class("Circle", shape).unwrap();

    assert_eq!(h.depth(object), 1);
    assert_eq!(h.depth(shape), 2);
    assert_eq!(h.depth(circle), 3);
    assert_eq!(h.depth(TypeId::new(77)), 0);
}

#[test]
fn test_is_a_walks_ancestors() {
    let mut h = TypeHierarchy::new();
    let animal = h.register_fundamental("Animal").unwrap();
    let dog = h.register_class("Dog", animal).unwrap();
    let plant = h.register_fundamental("Plant").unwrap();

    assert!(h.is_subtype(dog, animal));
    assert!(h.is_subtype(dog, dog));
    assert!(!h.is_subtype(animal, dog));
    assert!(!h.is_subtype(plant, animal));
    assert!(!h.is_subtype(TypeId::new(50), TypeId::new(50)));
}

#[test]
fn test_interfaces_are_inherited() {
    let mut h = TypeHierarchy::new();
    let object = h.register_fundamental("Object").unwrap();
    let printable = h.register_interface("Printable").unwrap();
    let shape = h.register_class("Shape", object).unwrap();
    let circle = h.register_class("Circle", shape).unwrap();
    h.implement(shape, printable).unwrap();

    assert!(h.is_subtype(circle, printable));
    assert!(h.is_subtype(shape, printable));
    assert!(!h.is_subtype(object, printable));
}

#[test]
fn test_ancestors_most_specific_first() {
    let mut h = TypeHierarchy::new();
    let a = h.register_fundamental("A").unwrap();
    let b = h.register_class("B", a).unwrap();
    let c = h.register_class("C", b).unwrap();

    assert_eq!(h.ancestors(c).collect::<Vec<_>>(), vec![c, b, a]);
    assert_eq!(h.ancestors(TypeId::new(9)).count(), 0);
}

#[test]
fn test_lookup_by_name() {
    let mut h = TypeHierarchy::new();
    let int = h.register_fundamental("int").unwrap();

    assert_eq!(h.lookup("int"), Some(int));
    assert_eq!(h.lookup("float"), None);
    assert_eq!(h.name(int), Some("int"));
    assert_eq!(h.len(), 1);
    assert!(!h.is_empty());
}

#[test]
fn test_registration_errors() {
    let mut h = TypeHierarchy::new();
    let object = h.register_fundamental("Object").unwrap();
    let iface = h.register_interface("Comparable").unwrap();

    assert_eq!(
        h.register_fundamental("Object"),
        Err(HierarchyError::DuplicateName {
            name: "Object".to_string()
        })
    );
    assert_eq!(
        h.register_class("Orphan", TypeId::new(40)),
        Err(HierarchyError::UnknownType {
            ty: TypeId::new(40)
        })
    );
    assert_eq!(
        h.register_class("Impl", iface),
        Err(HierarchyError::InterfaceParent {
            name: "Comparable".to_string()
        })
    );
    assert_eq!(
        h.implement(iface, object),
        Err(HierarchyError::NotAnInterface {
            name: "Object".to_string()
        })
    );
}

#[test]
fn test_transforms_extend_subtyping() {
    let mut h = TypeHierarchy::new();
    let int = h.register_fundamental("int").unwrap();
    let double = h.register_fundamental("double").unwrap();
    let string = h.register_fundamental("string").unwrap();
    h.allow_transform(int, double).unwrap();

    assert!(h.is_transformable(int, double));
    assert!(h.is_transformable(int, int));
    assert!(!h.is_transformable(double, int));
    assert!(!h.is_transformable(string, double));
    assert!(!h.is_subtype(int, double));
}

#[test]
fn test_shared_oracle_delegates() {
    let mut h = TypeHierarchy::new();
    let a = h.register_fundamental("A").unwrap();
    let b = h.register_class("B", a).unwrap();
    let shared: crate::SharedOracle = std::sync::Arc::new(h);

    assert!(shared.is_subtype(b, a));
    assert_eq!(shared.depth(b), 2);
    assert_eq!(shared.type_name(a), Some("A"));
}
