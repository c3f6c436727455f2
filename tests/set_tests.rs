mod common;

use common::{ints, person};
use pretty_assertions::assert_eq;
use sovran_collections::{
    ArrayInterface, Collection, CollectionError, CollectionInterface, Set, Sort, Value,
};

#[test]
fn test_duplicates_are_dropped_on_construction() {
    let set = Set::from_values("int", [1, 1, 2]).unwrap();
    assert_eq!(set.count(), 2);
    assert_eq!(ints(set.iter()), vec![1, 2]);
}

#[test]
fn test_add_duplicate_returns_false() {
    let mut set = Set::new("string");
    assert!(set.add("a").unwrap());
    assert!(!set.add("a").unwrap());
    assert_eq!(set.count(), 1);
}

#[test]
fn test_uniqueness_is_strict() {
    let mut set = Set::new("scalar");
    set.add(1).unwrap();
    assert!(set.add("1").unwrap());
    assert!(set.add(1.0).unwrap());
    assert_eq!(set.count(), 3);
}

#[test]
fn test_push_and_set_skip_duplicates() {
    let mut set = Set::new("int");
    set.push(1).unwrap();
    set.push(1).unwrap();
    set.set(5, 1).unwrap();
    assert_eq!(set.count(), 1);
}

#[test]
fn test_wrong_type_is_rejected() {
    let mut set = Set::new("int");
    let err = set.add("x").unwrap_err();
    assert_eq!(
        err,
        CollectionError::InvalidArgument("Value must be of type int; value is x".to_string())
    );
    assert!(set.is_empty());
}

#[test]
fn test_objects_are_unique_by_identity() {
    let ada = person("Ada", 36);
    let mut set = Set::new("Person");

    assert!(set.add(ada.clone()).unwrap());
    assert!(!set.add(ada).unwrap());
    assert!(set.add(person("Ada", 36)).unwrap());
    assert_eq!(set.count(), 2);
}

#[test]
fn test_derived_sets_stay_sets() {
    let a = Set::from_values("int", [3, 1, 2]).unwrap();
    let b = Set::from_values("int", [2, 5]).unwrap();

    let sorted = a.sort(None, Sort::Ascending).unwrap();
    assert_eq!(sorted.kind(), "Set");
    assert_eq!(ints(sorted.iter()), vec![1, 2, 3]);

    let merged = a.merge(&[&b]).unwrap();
    assert_eq!(ints(merged.iter()), vec![3, 1, 2, 5]);

    let common = a.intersect(&b).unwrap();
    assert_eq!(ints(common.iter()), vec![2]);
}

#[test]
fn test_set_and_collection_do_not_mix() {
    let set = Set::from_values("int", [1]).unwrap();
    let list = Collection::from_values("int", [1]).unwrap();

    let err = set.diff(&list).unwrap_err();
    assert_eq!(
        err,
        CollectionError::CollectionMismatch("Collection must be of type Set".to_string())
    );
}

#[test]
fn test_contains() {
    let set = Set::from_values("int", [1, 2]).unwrap();
    assert!(set.contains(&Value::Int(2), true));
    assert!(!set.contains(&Value::Int(3), true));
}
