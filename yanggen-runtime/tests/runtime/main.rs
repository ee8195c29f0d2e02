//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

mod copy;
mod enums;
mod json;
mod tree;

use std::sync::LazyLock as Lazy;

use yanggen_runtime::{
    EnumDef, EnumEntry, EnumValue, FieldKind, FieldSchema, ScalarKind,
    StructSchema, Value, YangStruct,
};

static MODE: EnumDef = EnumDef {
    name: "Test_Mode",
    identityref: false,
    values: &[
        EnumEntry {
            value: 1,
            name: "UP",
            module: "test",
        },
        EnumEntry {
            value: 2,
            name: "DOWN",
            module: "test",
        },
    ],
};

static AFI: EnumDef = EnumDef {
    name: "TestTypes_Afi",
    identityref: true,
    values: &[
        EnumEntry {
            value: 1,
            name: "IPV4",
            module: "test-types",
        },
        EnumEntry {
            value: 2,
            name: "IPV6",
            module: "test-types",
        },
    ],
};

static VALUE_ENUMS: [&EnumDef; 1] = [&MODE];

static CHILD: Lazy<StructSchema> = Lazy::new(|| {
    StructSchema::new(
        "Device_Child",
        vec![
            FieldSchema::new(
                "one",
                "config/one",
                FieldKind::Leaf(ScalarKind::String),
            )
            .shadow("state/one", None),
            FieldSchema::new(
                "two",
                "config/two",
                FieldKind::Leaf(ScalarKind::Uint32),
            ),
            FieldSchema::new(
                "three",
                "config/three",
                FieldKind::Leaf(ScalarKind::Uint64),
            )
            .module("test-ext/test-ext"),
            FieldSchema::new("mode", "config/mode", FieldKind::Enum(&MODE)),
            FieldSchema::new("afi", "config/afi", FieldKind::Enum(&AFI)),
            FieldSchema::new(
                "data",
                "config/data",
                FieldKind::Leaf(ScalarKind::Binary),
            ),
            FieldSchema::new(
                "tags",
                "config/tags",
                FieldKind::LeafList(ScalarKind::String),
            ),
            FieldSchema::new(
                "value",
                "config/value",
                FieldKind::Union(&VALUE_ENUMS),
            ),
            FieldSchema::new(
                "enabled",
                "config/enabled",
                FieldKind::Leaf(ScalarKind::Empty),
            ),
        ],
    )
    .module("test")
});

static ENTRY: Lazy<StructSchema> = Lazy::new(|| {
    StructSchema::new(
        "Device_Entry",
        vec![
            FieldSchema::new(
                "name",
                "config/name|name",
                FieldKind::Leaf(ScalarKind::String),
            ),
            FieldSchema::new(
                "mtu",
                "config/mtu",
                FieldKind::Leaf(ScalarKind::Uint16),
            ),
            FieldSchema::new("child", "child", FieldKind::Container(&CHILD)),
        ],
    )
    .module("test")
    .keys(&["name"])
});

static HOP: Lazy<StructSchema> = Lazy::new(|| {
    StructSchema::new(
        "Device_Hop",
        vec![FieldSchema::new(
            "address",
            "address",
            FieldKind::Leaf(ScalarKind::String),
        )],
    )
});

static DEVICE: Lazy<StructSchema> = Lazy::new(|| {
    StructSchema::new(
        "Device",
        vec![
            FieldSchema::new("child", "child", FieldKind::Container(&CHILD))
                .module("test"),
            FieldSchema::new(
                "entry",
                "entries/entry",
                FieldKind::KeyedList(&ENTRY),
            )
            .module("test/test"),
            FieldSchema::new("hop", "hops/hop", FieldKind::List(&HOP))
                .module("test/test"),
        ],
    )
});

static OTHER: Lazy<StructSchema> = Lazy::new(|| {
    StructSchema::new(
        "Other",
        vec![FieldSchema::new(
            "one",
            "one",
            FieldKind::Leaf(ScalarKind::String),
        )],
    )
});

static INVALID: Lazy<StructSchema> = Lazy::new(|| {
    StructSchema::new(
        "Invalid",
        vec![FieldSchema::new(
            "name",
            "name",
            FieldKind::Leaf(ScalarKind::String),
        )],
    )
    .validator(|_| Err("invalid".to_owned()))
});

static NO_PATH: Lazy<StructSchema> = Lazy::new(|| {
    StructSchema::new(
        "NoPath",
        vec![FieldSchema::new(
            "Name",
            "",
            FieldKind::Leaf(ScalarKind::String),
        )],
    )
});

//
// Helper functions.
//

fn mode(value: i64) -> EnumValue {
    EnumValue { def: &MODE, value }
}

fn afi(value: i64) -> EnumValue {
    EnumValue { def: &AFI, value }
}

fn child() -> YangStruct {
    YangStruct::new(&CHILD)
}

fn device() -> YangStruct {
    YangStruct::new(&DEVICE)
}

fn device_with_child(child: YangStruct) -> YangStruct {
    device().with("child", child).unwrap()
}

fn entry(name: &str, mtu: u64) -> YangStruct {
    YangStruct::new(&ENTRY)
        .with("name", name)
        .unwrap()
        .with("mtu", mtu)
        .unwrap()
}

fn hop(address: &str) -> YangStruct {
    YangStruct::new(&HOP).with("address", address).unwrap()
}

fn tags(tags: &[&str]) -> Vec<Value> {
    tags.iter().map(|tag| Value::from(*tag)).collect()
}
