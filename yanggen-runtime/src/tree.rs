//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use crate::debug::Debug;
use crate::error::Error;
use crate::schema::FieldKind;
use crate::value::{FieldValue, YangStruct};

// ===== global functions =====

// Initializes every unset container and list below the given struct.
//
// Populated fields are left untouched, though existing containers are
// descended into.
pub fn build_empty_tree(ystruct: &mut YangStruct) {
    for (field, value) in ystruct.fields_mut() {
        match field.kind {
            FieldKind::Container(schema) => {
                if value.is_unset() {
                    let child = YangStruct::new(schema);
                    *value = FieldValue::Container(Box::new(child));
                }
                if let FieldValue::Container(child) = value {
                    build_empty_tree(child);
                }
            }
            FieldKind::List(_) if value.is_unset() => {
                *value = FieldValue::List(Default::default());
            }
            FieldKind::KeyedList(_) if value.is_unset() => {
                *value = FieldValue::KeyedList(Default::default());
            }
            _ => (),
        }
    }
}

// Unsets every branch below the given struct that holds no data.
//
// A single populated leaf keeps all of its ancestors. List entries are
// kept, since they're identified by their keys, but their own empty
// branches are pruned.
pub fn prune_empty_branches(ystruct: &mut YangStruct) {
    let name = ystruct.name();
    for (field, value) in ystruct.fields_mut() {
        match value {
            FieldValue::Container(child) => prune_empty_branches(child),
            FieldValue::List(entries) => {
                entries.iter_mut().for_each(prune_empty_branches);
            }
            FieldValue::KeyedList(entries) => {
                entries.values_mut().for_each(prune_empty_branches);
            }
            _ => (),
        }

        if !value.is_unset() && value.is_empty() {
            if value.is_container() {
                Debug::BranchPruned(name, field.name).log();
            }
            *value = FieldValue::Unset;
        }
    }
}

// Initializes the named container field of a struct, unless it's already
// set.
pub fn init_container(ystruct: &mut YangStruct, name: &str) -> Result<(), Error> {
    let struct_name = ystruct.name();
    let (field, value) = ystruct.field_mut(name)?;
    let FieldKind::Container(schema) = field.kind else {
        return Err(Error::NotContainer(
            struct_name.to_owned(),
            name.to_owned(),
        ));
    };

    if value.is_unset() {
        Debug::ContainerInitialized(struct_name, name).log();
        *value = FieldValue::Container(Box::new(YangStruct::new(schema)));
    }
    Ok(())
}
