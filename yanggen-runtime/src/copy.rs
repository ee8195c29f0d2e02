//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::collections::btree_map;

use crate::debug::Debug;
use crate::error::Error;
use crate::schema::{FieldKind, FieldSchema};
use crate::value::{FieldValue, YangStruct};

#[derive(Clone, Copy, Debug, Default)]
pub struct MergeOptions {
    // Let source values replace conflicting destination values.
    pub overwrite_existing_fields: bool,
}

// ===== global functions =====

// Returns an independent copy of the given struct tree.
//
// Fails if any field holds a value that doesn't match its kind.
pub fn deep_copy(ystruct: &YangStruct) -> Result<YangStruct, Error> {
    ystruct.check()?;
    Ok(ystruct.clone())
}

// Merges two structs of the same type into a new one, leaving both inputs
// untouched.
pub fn merge_structs(
    a: &YangStruct,
    b: &YangStruct,
    opts: MergeOptions,
) -> Result<YangStruct, Error> {
    if a.name() != b.name() {
        return Err(Error::MismatchedTypes(
            a.name().to_owned(),
            b.name().to_owned(),
        ));
    }

    let mut merged =
        deep_copy(a).map_err(|error| Error::DeepCopy(Box::new(error)))?;
    merge_struct_into(&mut merged, b, opts)?;
    Ok(merged)
}

// Merges `src` into `dst` in place.
pub fn merge_struct_into(
    dst: &mut YangStruct,
    src: &YangStruct,
    opts: MergeOptions,
) -> Result<(), Error> {
    if dst.name() != src.name() {
        return Err(Error::MismatchedTypes(
            dst.name().to_owned(),
            src.name().to_owned(),
        ));
    }
    src.check()?;
    merge_fields(dst, src, opts)
}

// Whether no element of `a` is also an element of `b`.
pub fn unique_slices<T: PartialEq>(a: &[T], b: &[T]) -> bool {
    a.iter().all(|value| !b.contains(value))
}

// Checks that a list holds no duplicate elements.
pub fn validate_slices<T: PartialEq>(values: &[T]) -> Result<(), Error> {
    for (i, value) in values.iter().enumerate() {
        if values[..i].contains(value) {
            return Err(Error::NonUniqueList);
        }
    }
    Ok(())
}

// ===== helper functions =====

fn merge_fields(
    dst: &mut YangStruct,
    src: &YangStruct,
    opts: MergeOptions,
) -> Result<(), Error> {
    let name = dst.name();
    for ((field, dst_value), (_, src_value)) in dst.fields_mut().zip(src.fields())
    {
        merge_field(name, field, dst_value, src_value, opts)?;
    }
    Ok(())
}

fn merge_field(
    name: &str,
    field: &FieldSchema,
    dst: &mut FieldValue,
    src: &FieldValue,
    opts: MergeOptions,
) -> Result<(), Error> {
    if src.is_unset() {
        return Ok(());
    }
    if dst.is_unset() {
        *dst = src.clone();
        return Ok(());
    }

    match (dst, src) {
        (FieldValue::Leaf(dst_value), FieldValue::Leaf(src_value)) => {
            if !src_value.is_set() || dst_value == src_value {
                return Ok(());
            }
            if !dst_value.is_set() {
                *dst_value = src_value.clone();
                return Ok(());
            }
            if opts.overwrite_existing_fields {
                Debug::FieldOverwritten(name, field.name).log();
                *dst_value = src_value.clone();
                return Ok(());
            }
            let error = match field.kind {
                FieldKind::Enum(_) => Error::EnumConflict,
                FieldKind::Union(_) => Error::UnionConflict,
                _ => Error::LeafConflict,
            };
            Err(error)
        }
        (FieldValue::LeafList(dst_values), FieldValue::LeafList(src_values)) => {
            merge_slices(dst_values, src_values, opts)
        }
        (FieldValue::List(dst_entries), FieldValue::List(src_entries)) => {
            merge_slices(dst_entries, src_entries, opts)
        }
        (FieldValue::Container(dst_child), FieldValue::Container(src_child)) => {
            merge_fields(dst_child, src_child, opts)
        }
        (FieldValue::KeyedList(dst_entries), FieldValue::KeyedList(src_entries)) => {
            for (key, src_entry) in src_entries {
                match dst_entries.entry(key.clone()) {
                    btree_map::Entry::Occupied(mut dst_entry) => {
                        merge_fields(dst_entry.get_mut(), src_entry, opts)?;
                    }
                    btree_map::Entry::Vacant(dst_entry) => {
                        Debug::ListEntryAdded(name, field.name).log();
                        dst_entry.insert(src_entry.clone());
                    }
                }
            }
            Ok(())
        }
        _ => Err(Error::InvalidValue(
            name.to_owned(),
            field.name.to_owned(),
            field.kind.to_string(),
        )),
    }
}

// Concatenates two lists, provided the result holds no duplicates.
//
// Identical lists merge into themselves. With overwrite enabled, only the
// source elements missing from the destination are appended.
fn merge_slices<T: Clone + PartialEq>(
    dst: &mut Vec<T>,
    src: &[T],
    opts: MergeOptions,
) -> Result<(), Error> {
    if dst.as_slice() == src {
        return Ok(());
    }
    if unique_slices(dst, src) {
        dst.extend_from_slice(src);
        return Ok(());
    }
    if !opts.overwrite_existing_fields {
        return Err(Error::NonUniqueList);
    }

    let missing = src
        .iter()
        .filter(|value| !dst.contains(value))
        .cloned()
        .collect::<Vec<_>>();
    dst.extend(missing);
    Ok(())
}

// ===== unit tests =====
