//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::collections::{BTreeMap, BTreeSet};

use derive_new::new;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::types::{Identity, LeafType, TypeKind};

// Index of a node in the schema tree arena.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct SchemaNodeId(usize);

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[derive(Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SchemaNodeKind {
    Module,
    Container,
    List,
    Leaf,
    LeafList,
    Choice,
    Case,
    #[serde(rename = "anydata")]
    AnyData,
}

// Module metadata.
#[derive(Clone, Debug, new)]
pub struct Module {
    pub name: String,
    pub prefix: String,
    #[new(default)]
    pub organization: Option<String>,
    #[new(default)]
    pub revision: Option<String>,
    #[new(default)]
    pub node: SchemaNodeId,
}

// Parsed YANG schema.
//
// The tree is populated once by the schema loader and is read-only
// afterwards. Nodes are stored in an arena and referenced by `SchemaNodeId`.
#[derive(Clone, Debug, Default)]
pub struct SchemaTree {
    nodes: Vec<NodeData>,
    modules: BTreeMap<String, Module>,
    identities: BTreeMap<String, Identity>,
}

#[derive(Clone, Debug)]
struct NodeData {
    name: String,
    kind: SchemaNodeKind,
    module: String,
    definition: Option<(String, String)>,
    config: Option<bool>,
    leaf_type: Option<LeafType>,
    keys: Vec<String>,
    default: Option<String>,
    parent: Option<SchemaNodeId>,
    children: Vec<SchemaNodeId>,
}

// Borrowed handle to a schema node.
#[derive(Clone, Copy)]
pub struct SchemaNode<'a> {
    tree: &'a SchemaTree,
    id: SchemaNodeId,
}

// ===== impl SchemaTree =====

impl SchemaTree {
    pub fn new() -> SchemaTree {
        Default::default()
    }

    pub fn add_module(&mut self, mut module: Module) -> Result<SchemaNodeId, Error> {
        if self.modules.contains_key(&module.name) {
            return Err(Error::DuplicateModule(module.name));
        }

        let id = self.push(NodeData::new(
            &module.name,
            SchemaNodeKind::Module,
            &module.name,
            None,
        ));
        module.node = id;
        self.modules.insert(module.name.clone(), module);
        Ok(id)
    }

    pub fn add_node(
        &mut self,
        parent: SchemaNodeId,
        name: &str,
        kind: SchemaNodeKind,
    ) -> SchemaNodeId {
        let module = self.nodes[parent.0].module.clone();
        let id = self.push(NodeData::new(name, kind, &module, Some(parent)));
        self.nodes[parent.0].children.push(id);
        id
    }

    pub fn add_leaf(
        &mut self,
        parent: SchemaNodeId,
        name: &str,
        leaf_type: LeafType,
    ) -> SchemaNodeId {
        let id = self.add_node(parent, name, SchemaNodeKind::Leaf);
        self.set_leaf_type(id, leaf_type);
        id
    }

    pub fn add_identity(&mut self, module: &str, name: &str, base: Option<&str>) {
        let identity = Identity {
            module: module.to_owned(),
            name: name.to_owned(),
            base: base.map(str::to_owned),
        };
        self.identities.insert(identity.qualified_name(), identity);
    }

    // Overrides the module a node belongs to (e.g. augmented nodes). Nodes
    // added afterwards under this node inherit the new module.
    pub fn set_module(&mut self, id: SchemaNodeId, module: &str) {
        self.nodes[id.0].module = module.to_owned();
    }

    pub fn set_config(&mut self, id: SchemaNodeId, config: bool) {
        self.nodes[id.0].config = Some(config);
    }

    pub fn set_leaf_type(&mut self, id: SchemaNodeId, mut leaf_type: LeafType) {
        leaf_type.normalize();
        self.nodes[id.0].leaf_type = Some(leaf_type);
    }

    pub fn set_list_keys(&mut self, id: SchemaNodeId, keys: &[&str]) {
        self.nodes[id.0].keys = keys.iter().map(|key| (*key).to_owned()).collect();
    }

    pub fn set_default(&mut self, id: SchemaNodeId, default: &str) {
        self.nodes[id.0].default = Some(default.to_owned());
    }

    // Records where the node was originally defined (e.g. a grouping shared
    // by several nodes of the tree).
    pub fn set_definition(&mut self, id: SchemaNodeId, module: &str, path: &str) {
        self.nodes[id.0].definition = Some((module.to_owned(), path.to_owned()));
    }

    pub fn node(&self, id: SchemaNodeId) -> SchemaNode<'_> {
        SchemaNode { tree: self, id }
    }

    pub fn modules(&self) -> impl Iterator<Item = &Module> {
        self.modules.values()
    }

    pub fn module(&self, name: &str) -> Option<&Module> {
        self.modules.get(name)
    }

    pub fn module_mut(&mut self, name: &str) -> Option<&mut Module> {
        self.modules.get_mut(name)
    }

    // Looks up a module using either its name or its prefix.
    pub fn module_by_prefix(&self, prefix: &str) -> Option<&Module> {
        self.modules.get(prefix).or_else(|| {
            self.modules.values().find(|module| module.prefix == prefix)
        })
    }

    pub fn module_node(&self, name: &str) -> Option<SchemaNode<'_>> {
        self.module(name).map(|module| self.node(module.node))
    }

    pub fn identities(&self) -> impl Iterator<Item = &Identity> {
        self.identities.values()
    }

    // Looks up an identity from a (possibly prefixed) reference. Unprefixed
    // references are looked up in the context module.
    pub fn find_identity(
        &self,
        reference: &str,
        context_module: &str,
    ) -> Option<&Identity> {
        let (module, name) = match reference.split_once(':') {
            Some((prefix, name)) => {
                (self.module_by_prefix(prefix)?.name.as_str(), name)
            }
            None => (context_module, reference),
        };
        self.identities.get(&format!("{module}:{name}"))
    }

    // Returns all identities derived, directly or indirectly, from the given
    // base identity, sorted by name.
    pub fn derived_identities(&self, base: &Identity) -> Vec<&Identity> {
        self.identities
            .values()
            .filter(|identity| self.is_derived_from(identity, base))
            .sorted_by(|a, b| a.name.cmp(&b.name).then(a.module.cmp(&b.module)))
            .collect()
    }

    fn is_derived_from(&self, identity: &Identity, base: &Identity) -> bool {
        let mut visited = BTreeSet::new();
        let mut current = identity;
        while let Some(reference) = &current.base {
            let Some(parent) = self.find_identity(reference, &current.module)
            else {
                return false;
            };
            if parent == base {
                return true;
            }
            if !visited.insert(parent.qualified_name()) {
                return false;
            }
            current = parent;
        }
        false
    }

    // Follows a leafref (possibly chained through other leafrefs) to the leaf
    // that actually defines the value type.
    pub fn resolve_leafref<'a>(
        &'a self,
        snode: SchemaNode<'a>,
    ) -> Result<SchemaNode<'a>, Error> {
        let mut visited = BTreeSet::new();
        let mut current = snode;
        loop {
            let Some(leaf_type) = current.leaf_type() else {
                return Ok(current);
            };
            if leaf_type.kind != TypeKind::Leafref {
                return Ok(current);
            }
            if !visited.insert(current.id) {
                return Err(Error::LeafrefLoop(snode.schema_path()));
            }
            current = self.leafref_target(current, leaf_type)?;
        }
    }

    // Resolves a leafref type used in the context of the given node (e.g. a
    // leafref member of a union).
    pub fn resolve_leafref_type<'a>(
        &'a self,
        snode: SchemaNode<'a>,
        leaf_type: &LeafType,
    ) -> Result<SchemaNode<'a>, Error> {
        let target = self.leafref_target(snode, leaf_type)?;
        self.resolve_leafref(target)
    }

    fn leafref_target<'a>(
        &'a self,
        snode: SchemaNode<'a>,
        leaf_type: &LeafType,
    ) -> Result<SchemaNode<'a>, Error> {
        let path = leaf_type
            .path
            .as_deref()
            .ok_or_else(|| Error::LeafrefMissingPath(snode.schema_path()))?;
        let path = strip_predicates(path);
        let not_found = || Error::LeafrefTarget(snode.schema_path(), path.clone());

        let (mut current, relative) = match path.strip_prefix('/') {
            Some(path) => (None, path),
            None => (Some(snode), path.as_str()),
        };
        for segment in relative.split('/').filter(|segment| !segment.is_empty()) {
            let (prefix, name) = match segment.split_once(':') {
                Some((prefix, name)) => (Some(prefix.trim()), name.trim()),
                None => (None, segment.trim()),
            };
            current = match (current, name) {
                (_, ".") => current,
                (Some(node), "..") => Some(node.data_parent().ok_or_else(not_found)?),
                (None, "..") => return Err(not_found()),
                (Some(node), name) => node
                    .data_children()
                    .into_iter()
                    .find(|child| child.name() == name),
                (None, name) => {
                    let module = match prefix {
                        Some(prefix) => self.module_by_prefix(prefix).ok_or_else(
                            || {
                                Error::LeafrefPrefix(
                                    snode.schema_path(),
                                    prefix.to_owned(),
                                )
                            },
                        )?,
                        None => self.module(snode.module()).ok_or_else(|| {
                            Error::UnknownModule(
                                snode.module().to_owned(),
                                snode.schema_path(),
                            )
                        })?,
                    };
                    self.node(module.node)
                        .data_children()
                        .into_iter()
                        .find(|child| child.name() == name)
                }
            };
            if current.is_none() {
                return Err(not_found());
            }
        }

        match current {
            Some(target) if target.is_leaf_or_leaf_list() => Ok(target),
            _ => Err(not_found()),
        }
    }

    fn push(&mut self, node: NodeData) -> SchemaNodeId {
        let id = SchemaNodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }
}

// ===== impl NodeData =====

impl NodeData {
    fn new(
        name: &str,
        kind: SchemaNodeKind,
        module: &str,
        parent: Option<SchemaNodeId>,
    ) -> NodeData {
        NodeData {
            name: name.to_owned(),
            kind,
            module: module.to_owned(),
            definition: None,
            config: None,
            leaf_type: None,
            keys: Default::default(),
            default: None,
            parent,
            children: Default::default(),
        }
    }
}

// ===== impl SchemaNode =====

impl<'a> SchemaNode<'a> {
    fn data(&self) -> &'a NodeData {
        &self.tree.nodes[self.id.0]
    }

    pub fn id(&self) -> SchemaNodeId {
        self.id
    }

    pub fn tree(&self) -> &'a SchemaTree {
        self.tree
    }

    pub fn name(&self) -> &'a str {
        &self.data().name
    }

    pub fn kind(&self) -> SchemaNodeKind {
        self.data().kind
    }

    // Name of the module this node belongs to.
    pub fn module(&self) -> &'a str {
        &self.data().module
    }

    // Name of the module where this node was defined. Differs from the
    // belonging module when the node comes from a grouping of another module.
    pub fn defining_module(&self) -> &'a str {
        match &self.data().definition {
            Some((module, _)) => module,
            None => self.module(),
        }
    }

    // Path identifying where the node was defined. Nodes instantiated from
    // the same grouping share this path.
    pub fn definition_path(&self) -> String {
        match &self.data().definition {
            Some((_, path)) => path.clone(),
            None => self.schema_path(),
        }
    }

    pub fn has_definition(&self) -> bool {
        self.data().definition.is_some()
    }

    // Effective config property (inherited from the ancestors, defaulting to
    // true).
    pub fn is_config(&self) -> bool {
        self.inclusive_ancestors()
            .find_map(|snode| snode.data().config)
            .unwrap_or(true)
    }

    pub fn leaf_type(&self) -> Option<&'a LeafType> {
        self.data().leaf_type.as_ref()
    }

    pub fn list_keys(&self) -> &'a [String] {
        &self.data().keys
    }

    pub fn is_list_key(&self) -> bool {
        self.data_parent().is_some_and(|parent| {
            parent.is_list()
                && parent.list_keys().iter().any(|key| key == self.name())
        })
    }

    pub fn default(&self) -> Option<&'a str> {
        self.data()
            .default
            .as_deref()
            .or_else(|| self.leaf_type().and_then(|t| t.default.as_deref()))
    }

    pub fn parent(&self) -> Option<SchemaNode<'a>> {
        self.data().parent.map(|id| self.tree.node(id))
    }

    // Parent node in the data tree (skipping choice and case nodes).
    pub fn data_parent(&self) -> Option<SchemaNode<'a>> {
        self.ancestors().find(|snode| !snode.is_choice_or_case())
    }

    pub fn ancestors(self) -> impl Iterator<Item = SchemaNode<'a>> {
        std::iter::successors(self.parent(), |snode| snode.parent())
    }

    pub fn inclusive_ancestors(self) -> impl Iterator<Item = SchemaNode<'a>> {
        std::iter::successors(Some(self), |snode| snode.parent())
    }

    pub fn children(self) -> impl Iterator<Item = SchemaNode<'a>> {
        let tree = self.tree;
        self.data().children.iter().map(move |id| tree.node(*id))
    }

    // Children sorted by name.
    pub fn children_sorted(self) -> Vec<SchemaNode<'a>> {
        self.children()
            .sorted_by(|a, b| a.name().cmp(b.name()).then(a.id.cmp(&b.id)))
            .collect()
    }

    // Children in the data tree, with choice and case nodes flattened.
    pub fn data_children(self) -> Vec<SchemaNode<'a>> {
        let mut children = vec![];
        for child in self.children() {
            if child.is_choice_or_case() {
                children.extend(child.data_children());
            } else {
                children.push(child);
            }
        }
        children
    }

    // Pre-order traversal of the subtree rooted at this node.
    pub fn traverse(self) -> Vec<SchemaNode<'a>> {
        let mut nodes = vec![self];
        for child in self.children() {
            nodes.extend(child.traverse());
        }
        nodes
    }

    // Module node this node is contained in.
    pub fn module_node(self) -> SchemaNode<'a> {
        self.inclusive_ancestors().last().unwrap_or(self)
    }

    // Path including every schema node (choice and case included), starting
    // with the module name.
    pub fn schema_path(&self) -> String {
        let names = self
            .inclusive_ancestors()
            .map(|snode| snode.name())
            .collect::<Vec<_>>();
        format!("/{}", names.into_iter().rev().join("/"))
    }

    // Path of data nodes only (choice and case elided), starting with the
    // module name.
    pub fn data_path(&self) -> String {
        let names = self
            .inclusive_ancestors()
            .filter(|snode| !snode.is_choice_or_case())
            .map(|snode| snode.name())
            .collect::<Vec<_>>();
        format!("/{}", names.into_iter().rev().join("/"))
    }

    pub fn is_module(&self) -> bool {
        self.kind() == SchemaNodeKind::Module
    }

    pub fn is_container(&self) -> bool {
        self.kind() == SchemaNodeKind::Container
    }

    pub fn is_list(&self) -> bool {
        self.kind() == SchemaNodeKind::List
    }

    pub fn is_leaf(&self) -> bool {
        self.kind() == SchemaNodeKind::Leaf
    }

    pub fn is_leaf_list(&self) -> bool {
        self.kind() == SchemaNodeKind::LeafList
    }

    pub fn is_leaf_or_leaf_list(&self) -> bool {
        self.is_leaf() || self.is_leaf_list()
    }

    // Containers and lists.
    pub fn is_dir(&self) -> bool {
        self.is_container() || self.is_list()
    }

    pub fn is_choice_or_case(&self) -> bool {
        matches!(self.kind(), SchemaNodeKind::Choice | SchemaNodeKind::Case)
    }
}

impl PartialEq for SchemaNode<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for SchemaNode<'_> {}

impl std::fmt::Debug for SchemaNode<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaNode")
            .field("path", &self.schema_path())
            .field("kind", &self.kind())
            .finish()
    }
}

// ===== helper functions =====

// Removes path predicates (e.g. "[name = current()/../name]").
fn strip_predicates(path: &str) -> String {
    let mut depth = 0;
    path.chars()
        .filter(|c| match c {
            '[' => {
                depth += 1;
                false
            }
            ']' => {
                depth -= 1;
                false
            }
            _ => depth == 0,
        })
        .filter(|c| !c.is_whitespace())
        .collect()
}

// ===== unit tests =====
