//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

mod identity;

use serde_json::json;
use yanggen_schema::{SchemaDocument, SchemaTree};

//
// Helper functions.
//

fn load_tree(document: serde_json::Value) -> SchemaTree {
    let document: SchemaDocument = serde_json::from_value(document).unwrap();
    SchemaTree::from_document(&document).unwrap()
}

fn interfaces_schema() -> serde_json::Value {
    json!({
        "modules": [{
            "name": "openconfig-interfaces",
            "prefix": "oc-if",
            "children": [{
                "name": "interfaces",
                "kind": "container",
                "children": [{
                    "name": "interface",
                    "kind": "list",
                    "key": "name",
                    "children": [
                        {
                            "name": "name",
                            "kind": "leaf",
                            "type": { "kind": "leafref", "path": "../config/name" }
                        },
                        {
                            "name": "config",
                            "kind": "container",
                            "children": [
                                { "name": "name", "kind": "leaf", "type": { "kind": "string" } },
                                {
                                    "name": "parent",
                                    "kind": "leaf",
                                    "type": {
                                        "kind": "leafref",
                                        "path": "/oc-if:interfaces/oc-if:interface[oc-if:name = current()/../name]/oc-if:name"
                                    }
                                }
                            ]
                        },
                        {
                            "name": "state",
                            "kind": "container",
                            "config": false,
                            "children": [
                                { "name": "name", "kind": "leaf", "type": { "kind": "string" } },
                                {
                                    "name": "mode",
                                    "kind": "choice",
                                    "children": [{
                                        "name": "fast",
                                        "kind": "case",
                                        "children": [{
                                            "name": "speed",
                                            "kind": "leaf",
                                            "type": { "kind": "uint32" }
                                        }]
                                    }]
                                }
                            ]
                        }
                    ]
                }]
            }]
        }]
    })
}
