//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use yanggen_runtime::{
    FieldValue, MergeOptions, Value, YangStruct, deep_copy, merge_struct_into,
    merge_structs,
};

use super::{
    OTHER, afi, child, device, device_with_child, entry, hop, mode, tags,
};

const OVERWRITE: MergeOptions = MergeOptions {
    overwrite_existing_fields: true,
};

fn merge_error(a: &YangStruct, b: &YangStruct) -> String {
    merge_structs(a, b, MergeOptions::default())
        .unwrap_err()
        .to_string()
}

#[test]
fn test_deep_copy() {
    let mut original = device_with_child(child().with("one", "anchor-steam").unwrap());
    original.append("entry", entry("eth0", 1500)).unwrap();

    let mut copy = deep_copy(&original).unwrap();
    assert_eq!(copy, original);

    // The copy shares nothing with the original.
    copy.get_mut("child")
        .and_then(FieldValue::as_container_mut)
        .unwrap()
        .set("one", "bira")
        .unwrap();
    assert_ne!(copy, original);
}

#[test]
fn test_deep_copy_invalid_shape() {
    let mut original = device();
    *original.get_mut("child").unwrap() = FieldValue::Leaf(Value::from("x"));

    let error = deep_copy(&original).unwrap_err();
    assert_eq!(
        error.to_string(),
        "invalid value for field child of struct Device, expected container Device_Child"
    );
}

#[test]
fn test_merge_disjoint_fields() {
    let a = device_with_child(child().with("one", "x").unwrap());
    let b = device_with_child(child().with("two", 42u64).unwrap());

    let merged = merge_structs(&a, &b, MergeOptions::default()).unwrap();
    let expected = device_with_child(
        child().with("one", "x").unwrap().with("two", 42u64).unwrap(),
    );
    assert_eq!(merged, expected);
}

#[test]
fn test_merge_leaf_conflict() {
    let a = device_with_child(child().with("one", "x").unwrap());
    let b = device_with_child(child().with("one", "y").unwrap());
    assert_eq!(
        merge_error(&a, &b),
        "destination value was set, but was not equal to source value when merging ptr field"
    );

    let merged = merge_structs(&a, &b, OVERWRITE).unwrap();
    assert_eq!(merged, b);

    // Equal values never conflict.
    let merged = merge_structs(&a, &a, MergeOptions::default()).unwrap();
    assert_eq!(merged, a);
}

#[test]
fn test_merge_enum() {
    let unset = device_with_child(child().with("mode", mode(0)).unwrap());
    let up = device_with_child(child().with("mode", mode(1)).unwrap());
    let down = device_with_child(child().with("mode", mode(2)).unwrap());

    assert_eq!(merge_structs(&up, &unset, Default::default()).unwrap(), up);
    assert_eq!(merge_structs(&unset, &up, Default::default()).unwrap(), up);
    assert_eq!(merge_structs(&up, &up, Default::default()).unwrap(), up);
    assert_eq!(
        merge_error(&up, &down),
        "destination and source values were set when merging enum field"
    );
    assert_eq!(merge_structs(&up, &down, OVERWRITE).unwrap(), down);
}

#[test]
fn test_merge_union() {
    let string = device_with_child(child().with("value", "auto").unwrap());
    let number = device_with_child(child().with("value", 10u64).unwrap());
    let other = device_with_child(child().with("value", "manual").unwrap());

    assert_eq!(
        merge_error(&string, &other),
        "interface field was set in both src and dst and was not equal"
    );
    assert_eq!(
        merge_error(&string, &number),
        "interface field was set in both src and dst and was not equal"
    );
    assert_eq!(merge_structs(&string, &number, OVERWRITE).unwrap(), number);
    assert_eq!(
        merge_structs(&string, &string, Default::default()).unwrap(),
        string
    );

    let enumerated = device_with_child(child().with("value", mode(1)).unwrap());
    assert_eq!(
        merge_error(&enumerated, &string),
        "interface field was set in both src and dst and was not equal"
    );
}

#[test]
fn test_merge_binary() {
    let a = device_with_child(
        child().with("data", Value::Binary(vec![1, 2])).unwrap(),
    );
    let b = device_with_child(
        child().with("data", Value::Binary(vec![3])).unwrap(),
    );
    assert!(merge_structs(&a, &b, Default::default()).is_err());
    assert_eq!(merge_structs(&a, &a, Default::default()).unwrap(), a);
}

#[test]
fn test_merge_leaf_lists() {
    let a = device_with_child(child().with("tags", tags(&["a", "b"])).unwrap());
    let b = device_with_child(child().with("tags", tags(&["c"])).unwrap());
    let merged = merge_structs(&a, &b, Default::default()).unwrap();
    assert_eq!(
        merged,
        device_with_child(child().with("tags", tags(&["a", "b", "c"])).unwrap())
    );

    // Identical lists merge into themselves.
    let merged = merge_structs(&a, &a, Default::default()).unwrap();
    assert_eq!(merged, a);

    let c = device_with_child(child().with("tags", tags(&["b", "c"])).unwrap());
    assert_eq!(
        merge_error(&a, &c),
        "source and destination lists must be unique"
    );
    assert_eq!(
        merge_error(&c, &a),
        "source and destination lists must be unique"
    );

    let merged = merge_structs(&a, &c, OVERWRITE).unwrap();
    assert_eq!(
        merged,
        device_with_child(child().with("tags", tags(&["a", "b", "c"])).unwrap())
    );
}

#[test]
fn test_merge_unkeyed_lists() {
    let mut a = device();
    a.append("hop", hop("10.0.0.1")).unwrap();
    let mut b = device();
    b.append("hop", hop("10.0.0.2")).unwrap();

    let merged = merge_structs(&a, &b, Default::default()).unwrap();
    let hops = merged.get("hop").unwrap().as_list().unwrap();
    assert_eq!(hops, &vec![hop("10.0.0.1"), hop("10.0.0.2")]);

    b.append("hop", hop("10.0.0.1")).unwrap();
    assert_eq!(
        merge_error(&a, &b),
        "source and destination lists must be unique"
    );
}

#[test]
fn test_merge_keyed_lists() {
    let mut a = device();
    a.append("entry", entry("eth0", 1500)).unwrap();
    let mut b = device();
    b.append("entry", entry("eth1", 9000)).unwrap();
    b.append(
        "entry",
        YangStruct::new(&super::ENTRY)
            .with("name", "eth0")
            .unwrap()
            .with("child", child().with("one", "x").unwrap())
            .unwrap(),
    )
    .unwrap();

    let merged = merge_structs(&a, &b, Default::default()).unwrap();
    let entries = merged.get("entry").unwrap().as_keyed_list().unwrap();
    assert_eq!(
        entries.keys().map(String::as_str).collect::<Vec<_>>(),
        vec!["eth0", "eth1"]
    );
    assert_eq!(
        entries["eth0"],
        entry("eth0", 1500)
            .with("child", child().with("one", "x").unwrap())
            .unwrap()
    );

    // Entries present in both are merged field by field.
    let mut c = device();
    c.append("entry", entry("eth0", 9000)).unwrap();
    assert_eq!(
        merge_error(&a, &c),
        "destination value was set, but was not equal to source value when merging ptr field"
    );
    let merged = merge_structs(&a, &c, OVERWRITE).unwrap();
    assert_eq!(
        merged.get("entry").unwrap().as_keyed_list().unwrap()["eth0"],
        entry("eth0", 9000)
    );
}

#[test]
fn test_merge_into_empty() {
    let mut dst = device();
    let src = device_with_child(child());
    merge_struct_into(&mut dst, &src, Default::default()).unwrap();
    assert_eq!(dst, src);

    // Unset source fields never clear the destination.
    let mut dst = device_with_child(child().with("afi", afi(2)).unwrap());
    let expected = dst.clone();
    merge_struct_into(&mut dst, &device(), Default::default()).unwrap();
    assert_eq!(dst, expected);
}

#[test]
fn test_merge_inputs_untouched() {
    let a = device_with_child(child().with("one", "x").unwrap());
    let b = device_with_child(child().with("two", 1u64).unwrap());
    let (a_before, b_before) = (a.clone(), b.clone());

    merge_structs(&a, &b, Default::default()).unwrap();
    assert_eq!(a, a_before);
    assert_eq!(b, b_before);
}

#[test]
fn test_merge_mismatched_types() {
    let a = device();
    let b = YangStruct::new(&OTHER);
    assert_eq!(
        merge_error(&a, &b),
        "cannot merge structs that are not of matching types, Device != Other"
    );

    let mut dst = device();
    assert!(merge_struct_into(&mut dst, &b, Default::default()).is_err());
}

#[test]
fn test_merge_invalid_source() {
    let a = device();
    let mut b = device();
    *b.get_mut("child").unwrap() = FieldValue::Leaf(Value::Bool(true));
    assert!(merge_structs(&a, &b, Default::default()).is_err());

    let error = merge_error(&b, &a);
    assert!(error.starts_with("cannot DeepCopy struct: invalid value"));
}
