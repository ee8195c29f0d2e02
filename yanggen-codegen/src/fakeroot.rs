//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::collections::BTreeMap;

use yanggen_schema::{SchemaNode, SchemaNodeId, SchemaTree};

use crate::debug::Debug;
use crate::directory::DirectoryEntry;
use crate::error::Error;
use crate::options::CompressBehaviour;
use crate::util;

// Synthetic directory holding every root-level entity of the schema.
#[derive(Clone, Debug)]
pub struct FakeRoot {
    pub name: String,
    // Root-level children keyed by YANG name.
    pub children: BTreeMap<String, SchemaNodeId>,
}

// ===== impl FakeRoot =====

impl FakeRoot {
    pub fn path(&self) -> String {
        format!("/{}", self.name)
    }

    fn add_child(&mut self, snode: &SchemaNode<'_>) -> Result<(), Error> {
        let tree = snode.tree();
        match self.children.get(snode.name()) {
            Some(id) if *id == snode.id() => Ok(()),
            Some(id) => Err(Error::DuplicateRootChild(
                snode.name().to_owned(),
                snode.schema_path(),
                tree.node(*id).schema_path(),
            )),
            None => {
                self.children.insert(snode.name().to_owned(), snode.id());
                Ok(())
            }
        }
    }
}

// ===== global functions =====

// Returns the data nodes found right below the given modules.
pub fn root_level_nodes(tree: &SchemaTree, modules: &[&str]) -> Vec<SchemaNodeId> {
    modules
        .iter()
        .filter_map(|module| tree.module_node(module))
        .flat_map(|module| module.data_children())
        .map(|snode| snode.id())
        .collect()
}

// Inserts the fake root into the set of directories.
//
// The root gets a field for every directory at the top of the generated
// hierarchy and for every root-level leaf. Root-level containers elided by
// compression contribute their lists instead.
pub fn synthesize_root(
    tree: &SchemaTree,
    directories: &mut BTreeMap<String, DirectoryEntry>,
    root_level_nodes: &[SchemaNodeId],
    root_name: &str,
    compress: CompressBehaviour,
) -> Result<(), Error> {
    let mut root = FakeRoot {
        name: root_name.to_owned(),
        children: Default::default(),
    };
    let path = root.path();
    if directories.contains_key(&path) {
        return Err(Error::FakeRootClash(path));
    }

    for entry in directories.values() {
        let DirectoryEntry::Node(id) = entry else {
            continue;
        };
        let snode = tree.node(*id);
        if util::directory_parent(&snode, compress).is_none() {
            root.add_child(&snode)?;
        }
    }

    for id in root_level_nodes {
        let snode = tree.node(*id);
        if util::is_excluded_state(&snode, compress) {
            continue;
        }
        if snode.is_leaf_or_leaf_list() {
            root.add_child(&snode)?;
        } else if snode.is_dir() {
            let nodes = match util::is_compressed_out(&snode, compress) {
                true => snode.children().filter(|child| child.is_list()).collect(),
                false => vec![snode],
            };
            for snode in nodes {
                if directories.contains_key(&snode.schema_path()) {
                    root.add_child(&snode)?;
                }
            }
        }
    }

    Debug::FakeRootCreated(&root.name, root.children.len()).log();
    directories.insert(path, DirectoryEntry::FakeRoot(root));
    Ok(())
}
