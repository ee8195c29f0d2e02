//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::collections::BTreeMap;

use yanggen_schema::{SchemaNode, SchemaNodeId, SchemaNodeKind};

use crate::debug::Debug;
use crate::error::{Error, Errors};
use crate::options::CompressBehaviour;
use crate::util;

// Schema nodes that need generated code, keyed by schema path.
#[derive(Clone, Debug, Default)]
pub struct Classification {
    // Containers and lists mapped to a directory.
    pub directories: BTreeMap<String, SchemaNodeId>,
    // Leaves whose type is (or contains) an enumeration or identityref.
    pub enum_leaves: BTreeMap<String, SchemaNodeId>,
}

// ===== impl Classification =====

impl Classification {
    pub fn merge(&mut self, other: Classification) {
        self.directories.extend(other.directories);
        self.enum_leaves.extend(other.enum_leaves);
    }
}

// ===== global functions =====

// Finds the directories and enumerated leaves below the given root.
//
// `modules` holds the names of the modules in scope. Errors are collected
// and classification continues with the remaining nodes.
pub fn classify(
    root: &SchemaNode<'_>,
    skip_modules: &[String],
    compress: CompressBehaviour,
    modules: &[&str],
) -> (Classification, Errors) {
    let mut classification = Classification::default();
    let mut errors = Errors::default();
    find_mappable_entities(
        root,
        skip_modules,
        compress,
        modules,
        &mut classification,
        &mut errors,
    );
    Debug::EntitiesClassified(
        root.name(),
        classification.directories.len(),
        classification.enum_leaves.len(),
    )
    .log();
    (classification, errors)
}

fn find_mappable_entities(
    snode: &SchemaNode<'_>,
    skip_modules: &[String],
    compress: CompressBehaviour,
    modules: &[&str],
    classification: &mut Classification,
    errors: &mut Errors,
) {
    for child in snode.children_sorted() {
        if util::is_excluded_state(&child, compress) {
            continue;
        }

        // Skip nodes defined in modules that were excluded from generation.
        if !skip_modules.is_empty() {
            let module = child.module();
            if !modules.contains(&module) {
                errors.push(Error::UnresolvableModule(
                    module.to_owned(),
                    child.schema_path(),
                ));
                continue;
            }
            if skip_modules.iter().any(|skip| skip == module) {
                Debug::ModuleSkipped(module).log();
                continue;
            }
        }

        match child.kind() {
            SchemaNodeKind::Leaf | SchemaNodeKind::LeafList => {
                if is_enumerated_leaf(&child) {
                    classification
                        .enum_leaves
                        .insert(child.schema_path(), child.id());
                }
            }
            // Choice and case nodes are never mapped, but their children
            // are.
            SchemaNodeKind::Choice | SchemaNodeKind::Case => {
                find_mappable_entities(
                    &child,
                    skip_modules,
                    compress,
                    modules,
                    classification,
                    errors,
                );
            }
            SchemaNodeKind::Container | SchemaNodeKind::List => {
                // Config/state containers and list surrounding containers
                // are elided when compressing.
                if !util::is_compressed_out(&child, compress) {
                    classification
                        .directories
                        .insert(child.schema_path(), child.id());
                }
                find_mappable_entities(
                    &child,
                    skip_modules,
                    compress,
                    modules,
                    classification,
                    errors,
                );
            }
            SchemaNodeKind::AnyData => continue,
            SchemaNodeKind::Module => {
                errors.push(Error::UnknownEntryKind(child.schema_path()));
            }
        }
    }
}

// Returns whether the leaf type contains an enumeration or an identityref.
// Leafrefs aren't considered since their target defines the type.
fn is_enumerated_leaf(snode: &SchemaNode<'_>) -> bool {
    snode.leaf_type().is_some_and(|leaf_type| {
        leaf_type.any_member(&|leaf_type| leaf_type.kind.is_enumerated())
    })
}
