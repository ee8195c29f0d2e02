//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use serde_json::json;
use yanggen_codegen::{CompressBehaviour, EnumeratedKind, IrOptions};

use super::{enum_leaf, find, generate_go, load_tree};

// Two containers using the same grouping leaf, a typedef enumeration and an
// identityref.
fn enum_schema() -> serde_json::Value {
    let grouping_leaf = |name: &str| {
        let mut leaf = enum_leaf(name, &["UP", "DOWN"]);
        leaf["defining_module"] = json!("openconfig-types");
        leaf["definition"] = json!("/openconfig-types/status-grouping/status");
        leaf
    };
    json!({
        "modules": [
            {
                "name": "openconfig-types",
                "identities": [
                    { "name": "address-family" },
                    { "name": "ipv6", "base": "address-family" },
                    { "name": "ipv4", "base": "address-family" }
                ]
            },
            {
                "name": "openconfig-enums",
                "prefix": "oc-enums",
                "children": [
                    {
                        "name": "a",
                        "kind": "container",
                        "children": [
                            grouping_leaf("status"),
                            {
                                "name": "family",
                                "kind": "leaf",
                                "type": {
                                    "kind": "identityref",
                                    "name": "identityref",
                                    "base": "openconfig-types:address-family"
                                }
                            }
                        ]
                    },
                    {
                        "name": "b",
                        "kind": "container",
                        "children": [
                            grouping_leaf("status"),
                            {
                                "name": "level",
                                "kind": "leaf",
                                "type": {
                                    "kind": "enumeration",
                                    "name": "level-type",
                                    "typedef_module": "openconfig-types",
                                    "enum": [
                                        { "name": "LOW", "value": 0 },
                                        { "name": "HIGH", "value": 1 }
                                    ]
                                }
                            },
                            {
                                "name": "mode",
                                "kind": "leaf",
                                "type": {
                                    "kind": "union",
                                    "union": [
                                        { "kind": "enumeration", "enum": [{ "name": "AUTO", "value": 0 }] },
                                        { "kind": "enumeration", "enum": [{ "name": "MANUAL", "value": 0 }] },
                                        { "kind": "uint8" }
                                    ]
                                }
                            }
                        ]
                    }
                ]
            }
        ]
    })
}

#[test]
fn test_dedup_shared_definition() {
    let tree = load_tree(enum_schema());
    let opts = IrOptions::compressed(CompressBehaviour::PreferIntendedConfig);
    let ir = generate_go(&tree, &opts).unwrap();

    let a = ir.directory_by_name("A").unwrap();
    let b = ir.directory_by_name("B").unwrap();
    let a_status = a.fields["status"].lang_type.as_ref().unwrap();
    let b_status = b.fields["status"].lang_type.as_ref().unwrap();
    assert_eq!(a_status.native_type, b_status.native_type);
    assert_eq!(
        a_status.enumerated_yang_type_key,
        b_status.enumerated_yang_type_key
    );
    assert_eq!(a_status.native_type, "E_OpenconfigTypes_A_Status");

    let etype = &ir.enums["OpenconfigTypes_A_Status"];
    assert_eq!(etype.kind, EnumeratedKind::SimpleEnumeration);
    assert_eq!(etype.values.len(), 2);
}

#[test]
fn test_skip_dedup() {
    let tree = load_tree(enum_schema());
    let opts = IrOptions {
        skip_enum_deduplication: true,
        ..IrOptions::compressed(CompressBehaviour::PreferIntendedConfig)
    };
    let ir = generate_go(&tree, &opts).unwrap();

    let a = ir.directory_by_name("A").unwrap();
    let b = ir.directory_by_name("B").unwrap();
    assert_eq!(
        a.fields["status"].lang_type.as_ref().unwrap().native_type,
        "E_OpenconfigTypes_A_Status"
    );
    assert_eq!(
        b.fields["status"].lang_type.as_ref().unwrap().native_type,
        "E_OpenconfigTypes_B_Status"
    );
}

#[test]
fn test_typedef_and_identity() {
    let tree = load_tree(enum_schema());
    let opts = IrOptions::compressed(CompressBehaviour::PreferIntendedConfig);
    let ir = generate_go(&tree, &opts).unwrap();

    let b = ir.directory_by_name("B").unwrap();
    let level = b.fields["level"].lang_type.as_ref().unwrap();
    assert_eq!(level.native_type, "E_OpenconfigEnums_LevelType");
    assert_eq!(
        level.enumerated_yang_type_key.as_deref(),
        Some("openconfig-enums/openconfig-types:level-type")
    );

    let a = ir.directory_by_name("A").unwrap();
    let family = a.fields["family"].lang_type.as_ref().unwrap();
    assert_eq!(family.native_type, "E_OpenconfigTypes_AddressFamily");

    // Derived identities are sorted by name, 0 is left for the unset value.
    let etype = &ir.enums["OpenconfigTypes_AddressFamily"];
    assert_eq!(etype.kind, EnumeratedKind::Identity);
    assert_eq!(
        etype
            .values
            .iter()
            .map(|value| (value.name.as_str(), value.value))
            .collect::<Vec<_>>(),
        vec![("ipv4", 1), ("ipv6", 2)]
    );
}

#[test]
fn test_typedef_defining_module_naming() {
    let tree = load_tree(enum_schema());
    let opts = IrOptions {
        use_defining_module_for_typedef_enum_names: true,
        enum_org_prefixes_to_trim: vec!["openconfig".to_owned()],
        ..IrOptions::compressed(CompressBehaviour::PreferIntendedConfig)
    };
    let ir = generate_go(&tree, &opts).unwrap();

    let b = ir.directory_by_name("B").unwrap();
    assert_eq!(
        b.fields["level"].lang_type.as_ref().unwrap().native_type,
        "E_Types_LevelType"
    );
}

#[test]
fn test_union_enumerations() {
    let tree = load_tree(enum_schema());
    let opts = IrOptions::compressed(CompressBehaviour::PreferIntendedConfig);
    let ir = generate_go(&tree, &opts).unwrap();

    let b = ir.directory_by_name("B").unwrap();
    let mode = b.fields["mode"].lang_type.as_ref().unwrap();
    assert_eq!(mode.native_type, "B_Mode_Union");
    assert_eq!(
        mode.union_types
            .iter()
            .map(|(name, subtype)| (name.as_str(), subtype.index))
            .collect::<Vec<_>>(),
        vec![
            ("E_OpenconfigEnums_B_Mode_Union", 0),
            ("E_OpenconfigEnums_B_Mode_Union2", 1),
            ("uint8", 2),
        ]
    );
    assert_eq!(
        ir.enums["OpenconfigEnums_B_Mode_Union"].kind,
        EnumeratedKind::UnionEnumeration
    );
}

#[test]
fn test_no_underscores_and_shortened() {
    let tree = load_tree(enum_schema());
    let opts = IrOptions {
        enumerations_use_underscores: false,
        shorten_enum_leaf_names: true,
        ..IrOptions::compressed(CompressBehaviour::PreferIntendedConfig)
    };
    let ir = generate_go(&tree, &opts).unwrap();

    assert!(ir.enums.contains_key("OpenconfigTypesStatus"));
    assert!(ir.enums.contains_key("OpenconfigEnumsModeUnion"));
}

#[test]
fn test_unresolvable_identity_base() {
    let tree = load_tree(json!({
        "modules": [{
            "name": "m",
            "children": [{
                "name": "family",
                "kind": "leaf",
                "type": { "kind": "identityref", "base": "missing" }
            }]
        }]
    }));

    let errors = generate_go(&tree, &IrOptions::default()).unwrap_err();
    assert!(errors.to_string().contains("does not have a registrable base"));
    let snode = find(&tree, "/m/family");
    assert!(errors.to_string().contains(&snode.schema_path()));
}
