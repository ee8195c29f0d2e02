//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::collections::BTreeMap;

use serde::Serialize;

// Native type a YANG leaf is mapped to.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct MappedType {
    // Name of the native type. Empty for protobuf unions with more than one
    // subtype, which are rendered as a oneof.
    pub native_type: String,
    // Subtypes of a union, keyed by native type name.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub union_types: BTreeMap<String, MappedUnionSubtype>,
    pub is_enumerated_value: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enumerated_yang_type_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zero_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
}

// Union subtype.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct MappedUnionSubtype {
    // Discriminant of the subtype within the union.
    pub index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enumerated_yang_type_key: Option<String>,
}

// ===== impl MappedType =====

impl MappedType {
    pub fn new(native_type: &str) -> MappedType {
        MappedType {
            native_type: native_type.to_owned(),
            ..Default::default()
        }
    }

    pub fn with_zero(mut self, zero_value: &str) -> MappedType {
        self.zero_value = Some(zero_value.to_owned());
        self
    }

    pub fn enumerated(native_type: String, key: String) -> MappedType {
        MappedType {
            native_type,
            is_enumerated_value: true,
            enumerated_yang_type_key: Some(key),
            ..Default::default()
        }
    }

    pub fn is_union(&self) -> bool {
        !self.union_types.is_empty()
    }

    // Builds the mapped type of a union from its resolved member types.
    //
    // Members are deduplicated by native type. A union whose members all
    // resolve to the same native type collapses into that type. Otherwise
    // subtypes are assigned discriminants following the sorted order of
    // their names.
    pub fn union(
        native_type: String,
        members: impl IntoIterator<Item = MappedType>,
    ) -> MappedType {
        let mut distinct = BTreeMap::new();
        for member in members {
            distinct.entry(member.native_type.clone()).or_insert(member);
        }

        if distinct.len() == 1
            && let Some((_, member)) = distinct.pop_first()
        {
            return member;
        }

        let union_types = distinct
            .into_values()
            .enumerate()
            .map(|(index, member)| {
                (
                    member.native_type,
                    MappedUnionSubtype {
                        index,
                        enumerated_yang_type_key: member
                            .enumerated_yang_type_key,
                    },
                )
            })
            .collect();
        MappedType {
            native_type,
            union_types,
            ..Default::default()
        }
    }
}

// ===== unit tests =====
