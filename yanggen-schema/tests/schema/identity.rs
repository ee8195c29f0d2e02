//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use maplit::btreeset;
use serde_json::json;

use super::load_tree;

#[test]
fn test_derived_identities() {
    let tree = load_tree(json!({
        "modules": [
            {
                "name": "base-mod",
                "prefix": "bm",
                "identities": [
                    { "name": "BASE" },
                    { "name": "CHILD_A", "base": "BASE" },
                    { "name": "UNRELATED" }
                ]
            },
            {
                "name": "other-mod",
                "identities": [
                    { "name": "CHILD_B", "base": "bm:BASE" },
                    { "name": "GRANDCHILD", "base": "CHILD_B" }
                ]
            }
        ]
    }));

    let base = tree.find_identity("BASE", "base-mod").unwrap();
    let derived = tree
        .derived_identities(base)
        .into_iter()
        .map(|identity| identity.qualified_name())
        .collect::<std::collections::BTreeSet<_>>();
    assert_eq!(
        derived,
        btreeset! {
            "base-mod:CHILD_A".to_owned(),
            "other-mod:CHILD_B".to_owned(),
            "other-mod:GRANDCHILD".to_owned(),
        }
    );

    assert!(tree.find_identity("bm:UNRELATED", "other-mod").is_some());
    assert!(tree.find_identity("UNRELATED", "other-mod").is_none());
}
