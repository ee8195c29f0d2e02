//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use yanggen_runtime::{
    FieldValue, build_empty_tree, init_container, prune_empty_branches,
};

use super::{child, device, device_with_child, entry, mode};

#[test]
fn test_build_empty_tree() {
    let mut ystruct = device();
    build_empty_tree(&mut ystruct);

    assert!(ystruct.get("child").unwrap().is_container());
    assert_eq!(
        ystruct.get("entry").unwrap(),
        &FieldValue::KeyedList(Default::default())
    );
    assert_eq!(ystruct.get("hop").unwrap(), &FieldValue::List(vec![]));
    assert!(ystruct.is_empty());
}

#[test]
fn test_build_empty_tree_keeps_values() {
    let mut ystruct = device_with_child(child().with("one", "x").unwrap());
    ystruct.append("entry", entry("eth0", 1500)).unwrap();
    let entries = ystruct.get("entry").unwrap().clone();

    build_empty_tree(&mut ystruct);
    assert_eq!(ystruct.get("entry").unwrap(), &entries);
    let child = ystruct.get("child").unwrap().as_container().unwrap();
    assert_eq!(
        child.get("one").unwrap(),
        &FieldValue::Leaf("x".into())
    );
}

#[test]
fn test_prune_empty_tree() {
    let original = device();
    let mut ystruct = original.clone();
    build_empty_tree(&mut ystruct);
    assert_ne!(ystruct, original);

    prune_empty_branches(&mut ystruct);
    assert_eq!(ystruct, original);
}

#[test]
fn test_prune_keeps_populated_branches() {
    let mut ystruct = device_with_child(child().with("two", 7u64).unwrap());
    build_empty_tree(&mut ystruct);
    let expected = device_with_child(child().with("two", 7u64).unwrap());

    prune_empty_branches(&mut ystruct);
    assert_eq!(ystruct, expected);
}

#[test]
fn test_prune_unset_enum() {
    let mut ystruct = device_with_child(child().with("mode", mode(0)).unwrap());
    prune_empty_branches(&mut ystruct);
    assert!(ystruct.get("child").unwrap().is_unset());

    let mut ystruct = device_with_child(child().with("mode", mode(2)).unwrap());
    prune_empty_branches(&mut ystruct);
    assert!(ystruct.get("child").unwrap().is_container());
}

#[test]
fn test_prune_list_entries() {
    let mut ystruct = device();
    ystruct
        .append("entry", entry("eth0", 1500).with("child", child()).unwrap())
        .unwrap();

    prune_empty_branches(&mut ystruct);
    let entries = ystruct.get("entry").unwrap().as_keyed_list().unwrap();
    assert_eq!(entries["eth0"], entry("eth0", 1500));
}

#[test]
fn test_init_container() {
    let mut ystruct = device();
    init_container(&mut ystruct, "child").unwrap();
    assert!(ystruct.get("child").unwrap().is_container());

    // An existing container is left alone.
    let mut ystruct = device_with_child(child().with("one", "x").unwrap());
    let expected = ystruct.clone();
    init_container(&mut ystruct, "child").unwrap();
    assert_eq!(ystruct, expected);
}

#[test]
fn test_init_container_errors() {
    let mut ystruct = device();
    assert_eq!(
        init_container(&mut ystruct, "missing").unwrap_err().to_string(),
        "field missing not found in struct Device"
    );
    assert_eq!(
        init_container(&mut ystruct, "entry").unwrap_err().to_string(),
        "field entry of struct Device is not a container"
    );
}
