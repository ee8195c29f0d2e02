//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use yanggen_schema::{SchemaNode, SchemaNodeId, SchemaNodeKind, SchemaTree, TypeKind};

use crate::debug::Debug;
use crate::error::{Error, Errors};
use crate::fakeroot::FakeRoot;
use crate::mapper::LangMapper;
use crate::naming::make_name_unique;
use crate::options::{CompressBehaviour, IrOptions};
use crate::types::MappedType;
use crate::util;

// Generated type (struct or message) and its fields.
#[derive(Clone, Debug, Serialize)]
pub struct Directory {
    pub name: String,
    pub path: String,
    pub is_list: bool,
    pub is_fake_root: bool,
    pub belonging_module: String,
    pub defining_module: String,
    pub config_false: bool,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub package_name: String,
    // Fields keyed by YANG name.
    pub fields: BTreeMap<String, Field>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub list_keys: BTreeMap<String, ListKey>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub list_key_yang_names: Vec<String>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldKind {
    Leaf,
    LeafList,
    Container,
    List,
}

// Field of a directory.
#[derive(Clone, Debug, Serialize)]
pub struct Field {
    pub name: String,
    pub yang_name: String,
    pub kind: FieldKind,
    pub schema_path: String,
    pub config_false: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lang_type: Option<MappedType>,
    // Data paths of the field relative to its directory.
    pub mapped_paths: Vec<Vec<String>>,
    pub mapped_path_modules: Vec<Vec<String>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub shadow_mapped_paths: Vec<Vec<String>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub shadow_mapped_path_modules: Vec<Vec<String>>,
    // Directory generated for a container or list field.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_directory: Option<String>,
    pub is_list_key: bool,
}

// List key of a directory.
#[derive(Clone, Debug, Serialize)]
pub struct ListKey {
    pub name: String,
    pub yang_name: String,
    pub lang_type: MappedType,
}

// Directory that still needs to be resolved into a `Directory`.
#[derive(Clone, Debug)]
pub enum DirectoryEntry {
    Node(SchemaNodeId),
    FakeRoot(FakeRoot),
}

// Schema nodes backing a field. The first primary node defines the field.
#[derive(Clone, Debug, Default)]
pub struct FieldNodes {
    pub primary: Vec<SchemaNodeId>,
    pub shadow: Vec<SchemaNodeId>,
}

// Where a candidate field node was found.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Origin {
    Direct,
    Config,
    State,
}

// ===== impl Field =====

impl Field {
    // Path tag ("a/b|c") of the field.
    pub fn path_tag(&self) -> String {
        path_tag(&self.mapped_paths)
    }

    // Path tag of the shadowed copies of the field, if any.
    pub fn shadow_path_tag(&self) -> Option<String> {
        (!self.shadow_mapped_paths.is_empty())
            .then(|| path_tag(&self.shadow_mapped_paths))
    }
}

// ===== impl FieldKind =====

impl FieldKind {
    fn from_schema(kind: SchemaNodeKind) -> Option<FieldKind> {
        match kind {
            SchemaNodeKind::Leaf => Some(FieldKind::Leaf),
            SchemaNodeKind::LeafList => Some(FieldKind::LeafList),
            SchemaNodeKind::Container => Some(FieldKind::Container),
            SchemaNodeKind::List => Some(FieldKind::List),
            _ => None,
        }
    }
}

// ===== global functions =====

// Finds the fields of a directory, grouped by YANG name.
//
// Choice and case nodes are flattened. Under compression, the children of
// config/state containers and the lists of surrounding containers are lifted
// into the directory. Name clashes between config and state copies are
// resolved according to the compression behaviour: the preferred copy is the
// primary path and the other one the shadow path. List keys that are also
// direct children are mapped to both.
pub fn find_all_children(
    snode: &SchemaNode<'_>,
    compress: CompressBehaviour,
) -> Result<BTreeMap<String, FieldNodes>, Error> {
    let mut candidates = BTreeMap::<&str, Vec<(SchemaNode<'_>, Origin)>>::new();
    collect_children(snode, compress, Origin::Direct, &mut candidates);

    let mut children = BTreeMap::new();
    for (name, nodes) in candidates {
        let duplicate = || Error::DuplicateField(snode.schema_path(), name.to_owned());
        if nodes.len() == 1 {
            let nodes = FieldNodes {
                primary: vec![nodes[0].0.id()],
                shadow: vec![],
            };
            children.insert(name.to_owned(), nodes);
            continue;
        }
        if !compress.compress_enabled() {
            return Err(duplicate());
        }

        let by_origin = |origin: Origin| {
            nodes
                .iter()
                .filter(move |(_, node_origin)| *node_origin == origin)
                .map(|(node, _)| node.id())
                .collect::<Vec<_>>()
        };
        let direct = by_origin(Origin::Direct);
        let config = by_origin(Origin::Config);
        let state = by_origin(Origin::State);
        if direct.len() > 1 || config.len() > 1 || state.len() > 1 {
            return Err(duplicate());
        }

        let (mut primary, mut shadow) = match compress.prefer_operational_state() {
            true => (state, config),
            false => (config, state),
        };
        if primary.is_empty() {
            std::mem::swap(&mut primary, &mut shadow);
        }
        primary.extend(&direct);
        if !shadow.is_empty() {
            shadow.extend(&direct);
            Debug::FieldShadowed(
                &snode.schema_path(),
                name,
                &snode.tree().node(shadow[0]).schema_path(),
            )
            .log();
        }
        children.insert(name.to_owned(), FieldNodes { primary, shadow });
    }

    Ok(children)
}

fn collect_children<'a>(
    snode: &SchemaNode<'a>,
    compress: CompressBehaviour,
    origin: Origin,
    candidates: &mut BTreeMap<&'a str, Vec<(SchemaNode<'a>, Origin)>>,
) {
    for child in snode.children_sorted() {
        if util::is_excluded_state(&child, compress) {
            continue;
        }
        if child.is_choice_or_case() {
            collect_children(&child, compress, origin, candidates);
            continue;
        }
        if compress.compress_enabled() {
            if util::is_config_state(&child) {
                let origin = match child.name() {
                    "config" => Origin::Config,
                    _ => Origin::State,
                };
                collect_children(&child, compress, origin, candidates);
                continue;
            }
            if util::is_surrounding_container(&child) {
                for list in child.children() {
                    candidates.entry(list.name()).or_default().push((list, origin));
                }
                continue;
            }
        }
        if child.kind() == SchemaNodeKind::AnyData {
            continue;
        }
        candidates.entry(child.name()).or_default().push((child, origin));
    }
}

// Resolves every directory entry into a directory. Directory names are
// assigned first, in path order, so that they don't depend on the order
// fields are resolved.
pub fn build_directories<M: LangMapper>(
    tree: &SchemaTree,
    entries: &BTreeMap<String, DirectoryEntry>,
    mapper: &mut M,
    opts: &IrOptions,
) -> (BTreeMap<String, Directory>, Errors) {
    let compress = opts.compress_behaviour;
    let mut errors = Errors::default();

    // The fake root claims its name before any other directory.
    let mut names = BTreeMap::new();
    for (path, entry) in entries {
        if let DirectoryEntry::FakeRoot(root) = entry {
            names.insert(path.clone(), mapper.fake_root_name(&root.name));
        }
    }
    for (path, entry) in entries {
        if let DirectoryEntry::Node(id) = entry {
            match mapper.directory_name(&tree.node(*id), compress) {
                Ok(name) => {
                    names.insert(path.clone(), name);
                }
                Err(error) => errors.push(error),
            }
        }
    }

    let mut directories = BTreeMap::new();
    for (path, entry) in entries {
        let Some(name) = names.get(path) else {
            continue;
        };
        let result = match entry {
            DirectoryEntry::Node(id) => build_directory(
                tree,
                &tree.node(*id),
                name,
                entries,
                &names,
                mapper,
                opts,
            ),
            DirectoryEntry::FakeRoot(root) => {
                build_fake_root(tree, root, name, entries, &names, mapper, opts)
            }
        };
        match result {
            Ok(directory) => {
                directories.insert(path.clone(), directory);
            }
            Err(dir_errors) => errors.append(dir_errors),
        }
    }

    (directories, errors)
}

fn build_directory<M: LangMapper>(
    tree: &SchemaTree,
    snode: &SchemaNode<'_>,
    name: &str,
    entries: &BTreeMap<String, DirectoryEntry>,
    names: &BTreeMap<String, String>,
    mapper: &mut M,
    opts: &IrOptions,
) -> Result<Directory, Errors> {
    let compress = opts.compress_behaviour;
    let children = find_all_children(snode, compress)?;
    let package_name = mapper.package_name(Some(snode), compress)?;
    let fields =
        build_fields(tree, Some(snode), &children, entries, names, mapper, opts)?;

    let mut directory = Directory {
        name: name.to_owned(),
        path: snode.schema_path(),
        is_list: snode.is_list(),
        is_fake_root: false,
        belonging_module: snode.module().to_owned(),
        defining_module: snode.defining_module().to_owned(),
        config_false: !snode.is_config(),
        package_name,
        fields,
        list_keys: Default::default(),
        list_key_yang_names: Default::default(),
    };

    if snode.is_list() {
        let mut errors = Errors::default();
        for key in snode.list_keys() {
            match build_list_key(tree, snode, key, &children, &directory, mapper, opts)
            {
                Ok(list_key) => {
                    directory.list_keys.insert(key.clone(), list_key);
                }
                Err(error) => errors.push(error),
            }
        }
        directory.list_key_yang_names = snode.list_keys().to_vec();
        for key in snode.list_keys() {
            if let Some(field) = directory.fields.get_mut(key) {
                field.is_list_key = true;
            }
        }
        return errors.into_result(directory);
    }

    Ok(directory)
}

fn build_fake_root<M: LangMapper>(
    tree: &SchemaTree,
    root: &FakeRoot,
    name: &str,
    entries: &BTreeMap<String, DirectoryEntry>,
    names: &BTreeMap<String, String>,
    mapper: &mut M,
    opts: &IrOptions,
) -> Result<Directory, Errors> {
    let children = root
        .children
        .iter()
        .map(|(name, id)| {
            let nodes = FieldNodes {
                primary: vec![*id],
                shadow: vec![],
            };
            (name.clone(), nodes)
        })
        .collect();
    let package_name = mapper.package_name(None, opts.compress_behaviour)?;
    let fields = build_fields(tree, None, &children, entries, names, mapper, opts)?;

    Ok(Directory {
        name: name.to_owned(),
        path: root.path(),
        is_list: false,
        is_fake_root: true,
        belonging_module: String::new(),
        defining_module: String::new(),
        config_false: false,
        package_name,
        fields,
        list_keys: Default::default(),
        list_key_yang_names: Default::default(),
    })
}

fn build_fields<M: LangMapper>(
    tree: &SchemaTree,
    dir_node: Option<&SchemaNode<'_>>,
    children: &BTreeMap<String, FieldNodes>,
    entries: &BTreeMap<String, DirectoryEntry>,
    names: &BTreeMap<String, String>,
    mapper: &mut M,
    opts: &IrOptions,
) -> Result<BTreeMap<String, Field>, Errors> {
    let mut errors = Errors::default();
    let mut defined = BTreeSet::new();
    let mut fields = BTreeMap::new();

    for (yang_name, nodes) in children {
        let Some(primary) = nodes.primary.first().map(|id| tree.node(*id)) else {
            continue;
        };
        let Some(kind) = FieldKind::from_schema(primary.kind()) else {
            errors.push(Error::UnknownEntryKind(primary.schema_path()));
            continue;
        };

        // Directories of excluded modules aren't generated.
        if primary.is_dir() && !entries.contains_key(&primary.schema_path()) {
            continue;
        }

        let name = match mapper.field_name(&primary) {
            Ok(name) => make_name_unique(&name, &mut defined),
            Err(error) => {
                errors.push(error);
                continue;
            }
        };
        let lang_type = match primary.is_leaf_or_leaf_list() {
            true => match mapper.leaf_type(&primary, opts) {
                Ok(lang_type) => Some(lang_type),
                Err(error) => {
                    errors.push(error);
                    continue;
                }
            },
            false => None,
        };
        let target_directory = match primary.is_dir() {
            true => names.get(&primary.schema_path()).cloned(),
            false => None,
        };
        let (primary_paths, primary_path_modules) =
            mapped_paths(tree, dir_node, &nodes.primary);
        let (shadow_paths, shadow_path_modules) =
            mapped_paths(tree, dir_node, &nodes.shadow);

        let field = Field {
            name,
            yang_name: yang_name.clone(),
            kind,
            schema_path: primary.schema_path(),
            config_false: !primary.is_config(),
            default: primary.default().map(str::to_owned),
            lang_type,
            mapped_paths: primary_paths,
            mapped_path_modules: primary_path_modules,
            shadow_mapped_paths: shadow_paths,
            shadow_mapped_path_modules: shadow_path_modules,
            target_directory,
            is_list_key: false,
        };
        fields.insert(yang_name.clone(), field);
    }

    errors.into_result(fields)
}

fn build_list_key<M: LangMapper>(
    tree: &SchemaTree,
    list: &SchemaNode<'_>,
    key: &str,
    children: &BTreeMap<String, FieldNodes>,
    directory: &Directory,
    mapper: &mut M,
    opts: &IrOptions,
) -> Result<ListKey, Error> {
    let missing = || Error::MissingListKey(list.schema_path(), key.to_owned());
    let field = directory.fields.get(key).ok_or_else(missing)?;
    let key_node = children
        .get(key)
        .and_then(|nodes| nodes.primary.first())
        .map(|id| tree.node(*id))
        .ok_or_else(missing)?;

    check_binary_key(list, &key_node)?;
    let lang_type = mapper.key_leaf_type(&key_node, opts)?;
    Ok(ListKey {
        name: field.name.clone(),
        yang_name: key.to_owned(),
        lang_type,
    })
}

// Binary values can't be used as list keys.
fn check_binary_key(
    list: &SchemaNode<'_>,
    key_node: &SchemaNode<'_>,
) -> Result<(), Error> {
    let target = key_node.tree().resolve_leafref(*key_node)?;
    let leaf_type = util::leaf_type(&target)?;
    match leaf_type.kind {
        TypeKind::Binary => Err(Error::BinaryListKey(
            list.schema_path(),
            key_node.name().to_owned(),
        )),
        TypeKind::Union if union_contains_binary(&target, leaf_type)? => {
            Err(Error::BinaryUnionListKey(
                list.schema_path(),
                key_node.name().to_owned(),
            ))
        }
        _ => Ok(()),
    }
}

fn union_contains_binary(
    snode: &SchemaNode<'_>,
    union: &yanggen_schema::LeafType,
) -> Result<bool, Error> {
    for member in util::flatten_union(union) {
        match member.leaf_type.kind {
            TypeKind::Binary => return Ok(true),
            TypeKind::Leafref => {
                let target = snode
                    .tree()
                    .resolve_leafref_type(*snode, member.leaf_type)?;
                let target_type = util::leaf_type(&target)?;
                if target_type.kind == TypeKind::Binary
                    || (target_type.kind == TypeKind::Union
                        && union_contains_binary(&target, target_type)?)
                {
                    return Ok(true);
                }
            }
            _ => (),
        }
    }
    Ok(false)
}

fn mapped_paths(
    tree: &SchemaTree,
    dir_node: Option<&SchemaNode<'_>>,
    ids: &[SchemaNodeId],
) -> (Vec<Vec<String>>, Vec<Vec<String>>) {
    ids.iter()
        .map(|id| {
            let path = util::relative_data_path(dir_node, &tree.node(*id));
            let names = path.iter().map(|snode| snode.name().to_owned()).collect();
            let modules =
                path.iter().map(|snode| snode.module().to_owned()).collect();
            (names, modules)
        })
        .unzip()
}

fn path_tag(paths: &[Vec<String>]) -> String {
    paths
        .iter()
        .map(|path| path.join("/"))
        .collect::<Vec<_>>()
        .join("|")
}
