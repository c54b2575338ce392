#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use mdisp_types::TypeId;
use pretty_assertions::assert_eq;

use super::*;
use crate::errors::type_mismatch;
use crate::test_helpers::{oracle, Val, BOOL, INTEGER};
use crate::{Callable, Signature};

fn int_binary(name: &str, op: fn(i64, i64) -> Val, ret: TypeId) -> Holder<Val> {
    let mut holder = Holder::new(name, oracle());
    holder.set(
        Signature::new(ret, [INTEGER, INTEGER]),
        Callable::new(move |args: &[Val], slot: &mut Val| match args {
            [Val::Int(a), Val::Int(b)] => {
                *slot = op(*a, *b);
                Ok(())
            }
            _ => Err(type_mismatch("Integer", "other")),
        }),
    );
    holder
}

fn add() -> Holder<Val> {
    int_binary("add", |a, b| Val::Int(a + b), INTEGER)
}

fn eq() -> Holder<Val> {
    int_binary("eq", |a, b| Val::Bool(a == b), BOOL)
}

#[test]
fn test_invoke_by_name_and_index() {
    let mut book = Book::new("base");
    book.set(0, add());
    book.set(1, eq());

    assert_eq!(
        book.invoke_overwrite("add", &[Val::Int(3), Val::Int(4)]).unwrap(),
        Val::Int(7)
    );
    assert_eq!(
        book.invoke_overwrite(1_usize, &[Val::Int(3), Val::Int(4)]).unwrap(),
        Val::Bool(false)
    );

    let mut ret = Val::Int(0);
    book.invoke("add", &[Val::Int(10), Val::Int(5)], &mut ret).unwrap();
    assert_eq!(ret, Val::Int(15));
}

#[test]
fn test_missing_holder_has_no_side_effects() {
    let mut book = Book::new("base");
    book.set(0, add());

    let mut ret = Val::Int(42);
    let err = book.invoke("mul", &[Val::Int(3), Val::Int(4)], &mut ret).unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "book `base` has no holder `mul`");
    assert_eq!(ret, Val::Int(42));

    let err = book.invoke_overwrite(7_usize, &[Val::Int(1)]).unwrap_err();
    assert_eq!(err.to_string(), "book `base` has no holder at index 7");
}

#[test]
fn test_set_replaces_slot() {
    let mut book = Book::new("base");
    book.set(0, add());

    let previous = book.set(0, eq()).unwrap();
    assert_eq!(previous.read().name(), "add");
    assert!(book.get_by_name("add").is_none());
    assert_eq!(book.index_of("eq"), Some(0));
    assert_eq!(book.len(), 1);
}

#[test]
fn test_duplicate_name_evicts_older_slot() {
    let mut book = Book::new("base");
    book.set(0, add());
    book.set(3, add());

    assert!(book.get(0).is_none());
    assert!(book.get(3).is_some());
    assert_eq!(book.index_of("add"), Some(3));
    assert_eq!(book.len(), 1);
}

#[test]
fn test_names_in_index_order() {
    let mut book = Book::new("base");
    book.set(5, eq());
    book.set(2, add());

    assert_eq!(book.names(), vec!["add", "eq"]);
    assert!(book.get(9).is_none());
    assert_eq!(book.name(), "base");
}

#[test]
fn test_take_empties_slot() {
    let mut book = Book::new("base");
    book.set(1, add());

    assert_eq!(book.take(1).unwrap().read().name(), "add");
    assert!(book.take(1).is_none());
    assert!(book.take(40).is_none());
    assert!(book.is_empty());
}

#[test]
fn test_shared_holder_extended_in_place() {
    let mut book = Book::new("base");
    let shared = Arc::new(RwLock::new(Holder::new("not", oracle())));
    book.set_shared(0, Arc::clone(&shared));

    assert!(book.invoke_overwrite("not", &[Val::Bool(true)]).unwrap_err().is_not_found());

    shared.write().set(
        Signature::new(BOOL, [BOOL]),
        Callable::new(|args: &[Val], ret: &mut Val| match args {
            [Val::Bool(b)] => {
                *ret = Val::Bool(!b);
                Ok(())
            }
            _ => Err(type_mismatch("Bool", "other")),
        }),
    );

    assert_eq!(
        book.invoke_overwrite("not", &[Val::Bool(true)]).unwrap(),
        Val::Bool(false)
    );
}

#[test]
fn test_callable_may_extend_its_own_holder() {
    let mut book = Book::new("base");
    let shared = Arc::new(RwLock::new(Holder::new("learn", oracle())));
    book.set_shared(0, Arc::clone(&shared));

    let this = Arc::downgrade(&shared);
    shared.write().set(
        Signature::new(INTEGER, [INTEGER]),
        Callable::new(move |args: &[Val], ret: &mut Val| {
            if let Some(holder) = this.upgrade() {
                holder.write().set(
                    Signature::new(BOOL, [BOOL]),
                    Callable::new(|_: &[Val], ret: &mut Val| {
                        *ret = Val::Bool(true);
                        Ok(())
                    }),
                );
            }
            *ret = args[0].clone();
            Ok(())
        }),
    );

    let mut ret = Val::Int(0);
    book.invoke("learn", &[Val::Int(9)], &mut ret).unwrap();
    assert_eq!(ret, Val::Int(9));
    assert_eq!(
        book.invoke_overwrite(0_usize, &[Val::Bool(false)]).unwrap(),
        Val::Bool(true)
    );
    assert_eq!(shared.read().len(), 2);
}

#[test]
fn test_callable_may_reenter_the_book() {
    let mut book = Book::new("base");
    book.set(0, add());
    let book = Arc::new(RwLock::new(book));

    let outer = Arc::downgrade(&book);
    let mut twice = Holder::new("twice", oracle());
    twice.set(
        Signature::new(INTEGER, [INTEGER]),
        Callable::new(move |args: &[Val], ret: &mut Val| {
            let Some(book) = outer.upgrade() else {
                return Err(crate::CallError::new("book dropped"));
            };
            let book = book.read();
            *ret = book
                .invoke_overwrite("add", &[args[0].clone(), args[0].clone()])
                .map_err(|err| crate::CallError::new(err.to_string()))?;
            Ok(())
        }),
    );
    book.write().set(1, twice);

    let result = book.read().invoke_overwrite("twice", &[Val::Int(21)]).unwrap();
    assert_eq!(result, Val::Int(42));
}
