//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Error;
use crate::tree::{Module, SchemaNode, SchemaNodeId, SchemaNodeKind, SchemaTree};
use crate::types::LeafType;

// Interchange representation of a parsed schema.
//
// This is the boundary with the YANG parser: the parser output is
// serialized into this format and loaded into a `SchemaTree`.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaDocument {
    #[serde(default)]
    pub modules: Vec<ModuleDocument>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ModuleDocument {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub identities: Vec<IdentityDocument>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeDocument>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct IdentityDocument {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct NodeDocument {
    pub name: String,
    pub kind: SchemaNodeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<bool>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub leaf_type: Option<LeafType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defining_module: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definition: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeDocument>,
}

// ===== impl SchemaDocument =====

impl SchemaDocument {
    pub fn from_json(data: &str) -> Result<SchemaDocument, Error> {
        let document = serde_json::from_str(data)?;
        Ok(document)
    }

    pub fn to_json(&self) -> Result<String, Error> {
        let data = serde_json::to_string_pretty(self)?;
        Ok(data)
    }
}

// ===== impl SchemaTree =====

impl SchemaTree {
    pub fn from_json(data: &str) -> Result<SchemaTree, Error> {
        let document = SchemaDocument::from_json(data)?;
        SchemaTree::from_document(&document)
    }

    pub fn from_document(document: &SchemaDocument) -> Result<SchemaTree, Error> {
        let mut tree = SchemaTree::new();

        // Register every module and identity first, so that nodes can
        // reference modules declared later in the document.
        let mut module_ids = Vec::with_capacity(document.modules.len());
        for mdoc in &document.modules {
            let mut module = Module::new(
                mdoc.name.clone(),
                mdoc.prefix.clone().unwrap_or_else(|| mdoc.name.clone()),
            );
            module.organization = mdoc.organization.clone();
            module.revision = mdoc.revision.clone();
            module_ids.push(tree.add_module(module)?);

            for identity in &mdoc.identities {
                tree.add_identity(&mdoc.name, &identity.name, identity.base.as_deref());
            }
        }

        for (mdoc, id) in document.modules.iter().zip(module_ids) {
            for ndoc in &mdoc.children {
                load_node(&mut tree, id, ndoc)?;
            }
        }

        // Validate list keys now that the whole tree is available.
        let lists = tree
            .modules()
            .flat_map(|module| tree.node(module.node).traverse())
            .filter(|snode| snode.is_list())
            .map(|snode| snode.id())
            .collect::<Vec<_>>();
        for id in lists {
            let snode = tree.node(id);
            for key in snode.list_keys() {
                if !snode
                    .data_children()
                    .iter()
                    .any(|child| child.is_leaf() && child.name() == key)
                {
                    return Err(Error::UnknownListKey(
                        snode.schema_path(),
                        key.clone(),
                    ));
                }
            }
        }

        debug!(modules = %document.modules.len(), "schema loaded");
        Ok(tree)
    }

    // Builds the interchange document for the given modules (or for all
    // modules when none is given).
    pub fn to_document(&self, modules: &[&str]) -> SchemaDocument {
        let modules = self
            .modules()
            .filter(|module| {
                modules.is_empty() || modules.contains(&module.name.as_str())
            })
            .map(|module| ModuleDocument {
                name: module.name.clone(),
                prefix: Some(module.prefix.clone()),
                organization: module.organization.clone(),
                revision: module.revision.clone(),
                identities: self
                    .identities()
                    .filter(|identity| identity.module == module.name)
                    .map(|identity| IdentityDocument {
                        name: identity.name.clone(),
                        base: identity.base.clone(),
                    })
                    .collect(),
                children: self
                    .node(module.node)
                    .children()
                    .map(|snode| dump_node(&snode))
                    .collect(),
            })
            .collect();
        SchemaDocument { modules }
    }
}

// ===== helper functions =====

fn load_node(
    tree: &mut SchemaTree,
    parent: SchemaNodeId,
    ndoc: &NodeDocument,
) -> Result<(), Error> {
    let id = tree.add_node(parent, &ndoc.name, ndoc.kind);
    if let Some(module) = &ndoc.module {
        if tree.module(module).is_none() {
            return Err(Error::UnknownModule(
                module.clone(),
                tree.node(id).schema_path(),
            ));
        }
        tree.set_module(id, module);
    }
    if let Some(config) = ndoc.config {
        tree.set_config(id, config);
    }
    match (&ndoc.leaf_type, ndoc.kind) {
        (Some(leaf_type), _) => tree.set_leaf_type(id, leaf_type.clone()),
        (None, SchemaNodeKind::Leaf | SchemaNodeKind::LeafList) => {
            return Err(Error::MissingLeafType(tree.node(id).schema_path()));
        }
        _ => (),
    }
    if let Some(key) = &ndoc.key {
        let keys = key.split_whitespace().collect::<Vec<_>>();
        tree.set_list_keys(id, &keys);
    }
    if let Some(default) = &ndoc.default {
        tree.set_default(id, default);
    }
    if let Some(definition) = &ndoc.definition {
        let module = match &ndoc.defining_module {
            Some(module) => module.clone(),
            None => tree.node(id).module().to_owned(),
        };
        tree.set_definition(id, &module, definition);
    }

    for child in &ndoc.children {
        load_node(tree, id, child)?;
    }

    Ok(())
}

fn dump_node(snode: &SchemaNode<'_>) -> NodeDocument {
    let parent_module = snode.parent().map(|parent| parent.module());
    NodeDocument {
        name: snode.name().to_owned(),
        kind: snode.kind(),
        module: (parent_module != Some(snode.module()))
            .then(|| snode.module().to_owned()),
        config: match (snode.is_config(), snode.parent()) {
            (false, Some(parent)) if parent.is_config() => Some(false),
            _ => None,
        },
        leaf_type: snode.leaf_type().cloned(),
        key: (!snode.list_keys().is_empty())
            .then(|| snode.list_keys().join(" ")),
        default: snode.default().map(str::to_owned).filter(|_| {
            snode.leaf_type().and_then(|t| t.default.as_deref()).is_none()
        }),
        defining_module: snode
            .has_definition()
            .then(|| snode.defining_module().to_owned()),
        definition: snode.has_definition().then(|| snode.definition_path()),
        children: snode.children().map(|child| dump_node(&child)).collect(),
    }
}
