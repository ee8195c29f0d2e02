//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use yanggen_schema::{LeafType, SchemaNode, TypeKind};

use crate::error::Error;
use crate::options::CompressBehaviour;

// Returns whether the node is a "config" or "state" container.
pub fn is_config_state(snode: &SchemaNode<'_>) -> bool {
    snode.is_container() && matches!(snode.name(), "config" | "state")
}

// Returns whether the node is a container whose only child is a list.
pub fn is_surrounding_container(snode: &SchemaNode<'_>) -> bool {
    if !snode.is_container() {
        return false;
    }
    let mut children = snode.children();
    matches!(
        (children.next(), children.next()),
        (Some(child), None) if child.is_list()
    )
}

// Returns whether the node is removed from the generated type hierarchy.
pub fn is_compressed_out(
    snode: &SchemaNode<'_>,
    compress: CompressBehaviour,
) -> bool {
    snode.is_choice_or_case()
        || (compress.compress_enabled()
            && (is_config_state(snode) || is_surrounding_container(snode)))
}

// Returns whether the node is dropped because derived state is excluded.
pub fn is_excluded_state(
    snode: &SchemaNode<'_>,
    compress: CompressBehaviour,
) -> bool {
    compress.state_excluded() && !snode.is_config()
}

// Returns the closest ancestor that is mapped to a directory, or `None` when
// the node is at the root of the generated hierarchy.
pub fn directory_parent<'a>(
    snode: &SchemaNode<'a>,
    compress: CompressBehaviour,
) -> Option<SchemaNode<'a>> {
    snode
        .ancestors()
        .take_while(|ancestor| !ancestor.is_module())
        .find(|ancestor| ancestor.is_dir() && !is_compressed_out(ancestor, compress))
}

// Returns the data nodes between `from` (exclusive) and `snode` (inclusive).
// When `from` is `None`, the path starts right below the module.
pub fn relative_data_path<'a>(
    from: Option<&SchemaNode<'a>>,
    snode: &SchemaNode<'a>,
) -> Vec<SchemaNode<'a>> {
    let mut path = snode
        .inclusive_ancestors()
        .take_while(|ancestor| {
            !ancestor.is_module() && Some(ancestor) != from
        })
        .filter(|ancestor| !ancestor.is_choice_or_case())
        .collect::<Vec<_>>();
    path.reverse();
    path
}

// Flattened member of a union type.
#[derive(Clone, Copy, Debug)]
pub struct UnionMember<'a> {
    pub leaf_type: &'a LeafType,
    // Closest union typedef containing the member, or the outermost union.
    pub context: &'a LeafType,
    // Position of the member among the enumerations of its context.
    pub enum_index: usize,
}

// Recursively flattens a union into its non-union member types.
pub fn flatten_union(union: &LeafType) -> Vec<UnionMember<'_>> {
    let mut members = vec![];
    let mut enum_count = 0;
    flatten_union_members(union, union, &mut enum_count, &mut members);
    members
}

fn flatten_union_members<'a>(
    union: &'a LeafType,
    context: &'a LeafType,
    enum_count: &mut usize,
    members: &mut Vec<UnionMember<'a>>,
) {
    for member in &union.union_types {
        match member.kind {
            TypeKind::Union if member.is_typedef() => {
                let mut typedef_count = 0;
                flatten_union_members(member, member, &mut typedef_count, members);
            }
            TypeKind::Union => {
                flatten_union_members(member, context, enum_count, members);
            }
            _ => {
                let enum_index = *enum_count;
                if member.kind == TypeKind::Enumeration && !member.is_typedef() {
                    *enum_count += 1;
                }
                members.push(UnionMember {
                    leaf_type: member,
                    context,
                    enum_index,
                });
            }
        }
    }
}

// Returns the YANG type of a leaf, failing if it has none.
pub fn leaf_type<'a>(snode: &SchemaNode<'a>) -> Result<&'a LeafType, Error> {
    snode
        .leaf_type()
        .ok_or_else(|| Error::MissingLeafType(snode.schema_path()))
}

// ===== unit tests =====
