//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use serde_json::{Map, Value as JsonValue, json};
use yanggen_runtime::{
    EmitJsonConfig, JsonFormat, Rfc7951Config, Value, YangStruct, emit_json,
    merge_json, merge_struct_json,
};

use super::{INVALID, NO_PATH, afi, child, device, device_with_child, entry, mode};

fn object(value: JsonValue) -> Map<String, JsonValue> {
    match value {
        JsonValue::Object(object) => object,
        _ => panic!("not a JSON object"),
    }
}

fn emit(ystruct: &YangStruct, config: &EmitJsonConfig) -> JsonValue {
    let json = emit_json(ystruct, config).unwrap();
    serde_json::from_str(&json).unwrap()
}

fn rfc7951(rfc7951: Rfc7951Config) -> EmitJsonConfig {
    EmitJsonConfig {
        format: JsonFormat::Rfc7951,
        rfc7951,
        ..Default::default()
    }
}

fn simple_device() -> YangStruct {
    device_with_child(
        child()
            .with("one", "abc -> def")
            .unwrap()
            .with("two", 42u64)
            .unwrap(),
    )
}

#[test]
fn test_emit_internal() {
    let json = emit_json(&simple_device(), &Default::default()).unwrap();
    assert_eq!(
        json,
        r#"{
  "child": {
    "config": {
      "one": "abc -> def",
      "two": 42
    }
  }
}"#
    );
}

#[test]
fn test_emit_compact_html_safe() {
    let config = EmitJsonConfig {
        indent: String::new(),
        escape_html: true,
        ..Default::default()
    };
    let json = emit_json(&simple_device(), &config).unwrap();
    assert_eq!(
        json,
        r#"{"child":{"config":{"one":"abc -\u003e def","two":42}}}"#
    );
}

#[test]
fn test_emit_internal_list() {
    let mut ystruct = device();
    ystruct.append("entry", entry("eth0", 1500)).unwrap();
    ystruct.append("entry", entry("eth1", 9000)).unwrap();

    assert_eq!(
        emit(&ystruct, &Default::default()),
        json!({
            "entries": {
                "entry": {
                    "eth0": { "config": { "name": "eth0", "mtu": 1500 }, "name": "eth0" },
                    "eth1": { "config": { "name": "eth1", "mtu": 9000 }, "name": "eth1" }
                }
            }
        })
    );
}

#[test]
fn test_emit_internal_values() {
    let ystruct = device_with_child(
        child()
            .with("mode", mode(2))
            .unwrap()
            .with("afi", afi(1))
            .unwrap()
            .with("data", Value::Binary(vec![1, 2, 3]))
            .unwrap()
            .with("enabled", Value::Empty)
            .unwrap()
            .with("tags", vec![Value::from("a"), Value::from("b")])
            .unwrap()
            .with("value", 7u64)
            .unwrap(),
    );

    assert_eq!(
        emit(&ystruct, &Default::default()),
        json!({
            "child": {
                "config": {
                    "mode": "DOWN",
                    "afi": "IPV4",
                    "data": "AQID",
                    "enabled": true,
                    "tags": ["a", "b"],
                    "value": 7
                }
            }
        })
    );
}

#[test]
fn test_emit_shadow_path() {
    let config = EmitJsonConfig {
        prefer_shadow_path: true,
        ..Default::default()
    };
    assert_eq!(
        emit(&simple_device(), &config),
        json!({
            "child": {
                "config": { "two": 42 },
                "state": { "one": "abc -> def" }
            }
        })
    );
}

#[test]
fn test_emit_rfc7951() {
    let ystruct = device_with_child(
        child()
            .with("one", "bar")
            .unwrap()
            .with("two", 84u64)
            .unwrap()
            .with("three", 42u64)
            .unwrap()
            .with("enabled", Value::Empty)
            .unwrap(),
    );
    let config = rfc7951(Rfc7951Config {
        append_module_name: true,
        ..Default::default()
    });

    assert_eq!(
        emit(&ystruct, &config),
        json!({
            "test:child": {
                "config": { "one": "bar", "two": 84, "enabled": [null] },
                "test-ext:config": { "three": "42" }
            }
        })
    );
}

#[test]
fn test_emit_rfc7951_list_and_enums() {
    let mut ystruct = device_with_child(
        child()
            .with("mode", mode(1))
            .unwrap()
            .with("afi", afi(2))
            .unwrap(),
    );
    ystruct.append("entry", entry("eth1", 9000)).unwrap();
    ystruct.append("entry", entry("eth0", 1500)).unwrap();

    let config = rfc7951(Rfc7951Config {
        append_module_name: true,
        ..Default::default()
    });
    assert_eq!(
        emit(&ystruct, &config),
        json!({
            "test:child": {
                "config": { "mode": "test:UP", "afi": "test-types:IPV6" }
            },
            "test:entries": {
                "entry": [
                    { "config": { "name": "eth0", "mtu": 1500 }, "name": "eth0" },
                    { "config": { "name": "eth1", "mtu": 9000 }, "name": "eth1" }
                ]
            }
        })
    );

    // Only identityref values are qualified.
    let config = rfc7951(Rfc7951Config {
        prepend_module_name_identityref: true,
        ..Default::default()
    });
    let json = emit(&ystruct, &config);
    assert_eq!(
        json["test:child"]["config"],
        json!({ "mode": "UP", "afi": "test-types:IPV6" })
    );
}

#[test]
fn test_emit_empty() {
    let json = emit_json(&device_with_child(child()), &Default::default());
    assert_eq!(json.unwrap(), "{}");
}

#[test]
fn test_emit_validation() {
    let ystruct = YangStruct::new(&INVALID).with("name", "aardvark").unwrap();
    let error = emit_json(&ystruct, &Default::default()).unwrap_err();
    assert_eq!(error.to_string(), "validation err: invalid");

    let config = EmitJsonConfig {
        skip_validation: true,
        ..Default::default()
    };
    assert_eq!(emit(&ystruct, &config), json!({ "name": "aardvark" }));
}

#[test]
fn test_emit_missing_path() {
    let ystruct = YangStruct::new(&NO_PATH)
        .with("Name", "honey badger")
        .unwrap();

    let error = emit_json(&ystruct, &Default::default()).unwrap_err();
    assert_eq!(
        error.to_string(),
        "ConstructInternalJSON error: Name: field did not specify a path"
    );

    let error = emit_json(&ystruct, &rfc7951(Default::default())).unwrap_err();
    assert_eq!(
        error.to_string(),
        "ConstructIETFJSON error: Name: field did not specify a path"
    );
}

#[test]
fn test_merge_json() {
    let cases = [
        (json!({ "a": 1 }), json!({ "b": 2 }), json!({ "a": 1, "b": 2 })),
        (
            json!({ "a": { "b": "c" } }),
            json!({ "a": { "c": "d" } }),
            json!({ "a": { "b": "c", "c": "d" } }),
        ),
        (
            json!({ "a": [{ "a": "a" }] }),
            json!({ "a": [{ "b": "b" }] }),
            json!({ "a": [{ "a": "a" }, { "b": "b" }] }),
        ),
        (
            json!({ "a": { "a1": { "a2": { "a3": 42 } } }, "b": { "a1": 42 } }),
            json!({ "a": { "b1": true }, "b": { "b2": { "b3": 84 } } }),
            json!({
                "a": { "a1": { "a2": { "a3": 42 } }, "b1": true },
                "b": { "a1": 42, "b2": { "b3": 84 } }
            }),
        ),
        (json!({ "a": "x" }), json!({ "a": "x" }), json!({ "a": "x" })),
    ];

    for (a, b, expected) in cases {
        let merged = merge_json(&object(a), &object(b)).unwrap();
        assert_eq!(JsonValue::Object(merged), expected);
    }
}

#[test]
fn test_merge_json_conflict() {
    let error = merge_json(&object(json!({ "a": "a" })), &object(json!({ "a": "b" })))
        .unwrap_err();
    assert_eq!(
        error.to_string(),
        "cannot merge JSON, key a is set to different values"
    );

    assert!(
        merge_json(&object(json!({ "a": [1] })), &object(json!({ "a": { "b": 1 } })))
            .is_err()
    );
}

#[test]
fn test_merge_struct_json() {
    let existing = object(json!({
        "entries": { "entry": { "eth1": { "name": "eth1" } } },
        "other": 1
    }));
    let mut ystruct = device();
    ystruct.append("entry", entry("eth0", 1500)).unwrap();

    let merged =
        merge_struct_json(&ystruct, &existing, &Default::default()).unwrap();
    assert_eq!(
        JsonValue::Object(merged),
        json!({
            "entries": {
                "entry": {
                    "eth0": { "config": { "name": "eth0", "mtu": 1500 }, "name": "eth0" },
                    "eth1": { "name": "eth1" }
                }
            },
            "other": 1
        })
    );
}

#[test]
fn test_emit_merge_round_trip() {
    let mut ystruct = simple_device();
    ystruct.append("entry", entry("eth0", 1500)).unwrap();

    let json = emit(&ystruct, &Default::default());
    let merged = merge_json(&Map::new(), &object(json.clone())).unwrap();
    assert_eq!(JsonValue::Object(merged), json);
}
