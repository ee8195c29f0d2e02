//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::collections::BTreeMap;

use serde_json::json;
use yanggen_codegen::directory::DirectoryEntry;
use yanggen_codegen::fakeroot::{root_level_nodes, synthesize_root};
use yanggen_codegen::{CompressBehaviour, IrOptions};

use super::{generate_go, list_schema, load_tree, simple_schema, string_leaf};

fn two_modules(second_top: &str) -> serde_json::Value {
    json!({
        "modules": [
            {
                "name": "alpha",
                "children": [
                    { "name": "top", "kind": "container", "children": [string_leaf("a")] },
                    string_leaf("hostname")
                ]
            },
            {
                "name": "beta",
                "children": [
                    { "name": second_top, "kind": "container", "children": [string_leaf("b")] }
                ]
            }
        ]
    })
}

#[test]
fn test_fake_root_fields() {
    let tree = load_tree(two_modules("other"));
    let opts = IrOptions {
        generate_fake_root: true,
        ..IrOptions::compressed(CompressBehaviour::PreferIntendedConfig)
    };
    let ir = generate_go(&tree, &opts).unwrap();

    let root = ir.fake_root().unwrap();
    assert_eq!(root.name, "Device");
    assert_eq!(root.path, "/device");
    assert!(root.is_fake_root);
    assert_eq!(
        root.fields.keys().map(String::as_str).collect::<Vec<_>>(),
        vec!["hostname", "other", "top"]
    );
    assert_eq!(root.fields["hostname"].path_tag(), "hostname");
    assert_eq!(root.fields["top"].target_directory.as_deref(), Some("Top"));
}

#[test]
fn test_fake_root_custom_name() {
    let tree = load_tree(simple_schema());
    let opts = IrOptions {
        generate_fake_root: true,
        fake_root_name: "network-instance-root".to_owned(),
        ..IrOptions::default()
    };
    let ir = generate_go(&tree, &opts).unwrap();

    let root = ir.fake_root().unwrap();
    assert_eq!(root.name, "NetworkInstanceRoot");
    assert_eq!(
        root.fields["parent"].target_directory.as_deref(),
        Some("OpenconfigSimple_Parent")
    );
}

#[test]
fn test_fake_root_duplicate_child() {
    let tree = load_tree(two_modules("top"));
    let opts = IrOptions {
        generate_fake_root: true,
        ..IrOptions::default()
    };

    let errors = generate_go(&tree, &opts).unwrap_err();
    assert_eq!(
        errors.to_string(),
        "duplicate entry top at the root: new: /beta/top, existing: /alpha/top"
    );
}

#[test]
fn test_fake_root_compressed_list() {
    let tree = load_tree(list_schema(json!({ "kind": "string" })));
    let modules = ["openconfig-list"];
    let nodes = root_level_nodes(&tree, &modules);
    let entry = super::find(&tree, "/openconfig-list/entries/entry");

    // The full scan and the directory set agree on the elided container.
    let mut directories = BTreeMap::new();
    directories.insert(entry.schema_path(), DirectoryEntry::Node(entry.id()));
    synthesize_root(
        &tree,
        &mut directories,
        &nodes,
        "device",
        CompressBehaviour::PreferIntendedConfig,
    )
    .unwrap();

    let Some(DirectoryEntry::FakeRoot(root)) = directories.get("/device") else {
        panic!("fake root not created");
    };
    assert_eq!(
        root.children.keys().map(String::as_str).collect::<Vec<_>>(),
        vec!["entry"]
    );
}

#[test]
fn test_fake_root_clash() {
    let tree = load_tree(simple_schema());
    let parent = super::find(&tree, "/openconfig-simple/parent");
    let mut directories = BTreeMap::new();
    directories.insert("/device".to_owned(), DirectoryEntry::Node(parent.id()));

    let error = synthesize_root(
        &tree,
        &mut directories,
        &[],
        "device",
        CompressBehaviour::Uncompressed,
    )
    .unwrap_err();
    assert_eq!(
        error.to_string(),
        "fake root path /device clashes with an existing directory"
    );
}
