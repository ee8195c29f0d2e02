//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::collections::{BTreeMap, BTreeSet};

use itertools::Itertools;
use serde::Serialize;
use yanggen_schema::{EnumValue, LeafType, SchemaNode, SchemaNodeId, SchemaTree, TypeKind};

use crate::debug::Debug;
use crate::error::{Error, Errors};
use crate::naming::{camel_case, make_name_unique, strip_prefix, trim_org_prefix};
use crate::options::IrOptions;
use crate::util::{self, UnionMember};

// Suffix of the enumerated types defined inside unions.
pub const ENUMERATED_UNION_SUFFIX: &str = "Union";

#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EnumeratedKind {
    // Enumeration defined inline in a leaf.
    SimpleEnumeration,
    // Enumeration defined by a typedef.
    DerivedEnumeration,
    // Enumeration defined inline in a union.
    UnionEnumeration,
    // Enumeration defined inside a union typedef.
    DerivedUnionEnumeration,
    // Identityref.
    Identity,
}

// Enumerated type that needs to be generated.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct EnumeratedYangType {
    pub name: String,
    pub kind: EnumeratedKind,
    pub type_name: String,
    pub defining_module: String,
    pub values: Vec<EnumValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity_base: Option<String>,
}

// Registry of the enumerated types of a generation run.
//
// Every enumeration, typedef enumeration and identity base gets exactly one
// generated name, shared by all the leaves that use it. Names are
// deduplicated through a key derived from where the enumeration is defined.
#[derive(Debug)]
pub struct EnumSet {
    compress: bool,
    use_underscores: bool,
    skip_dedup: bool,
    shorten_leaf_names: bool,
    org_prefixes: Vec<String>,
    use_defining_module_for_typedefs: bool,
    defined_names: BTreeSet<String>,
    names_by_key: BTreeMap<String, String>,
    types: BTreeMap<String, EnumeratedYangType>,
}

// ===== impl EnumSet =====

impl EnumSet {
    pub fn new(opts: &IrOptions) -> EnumSet {
        EnumSet {
            compress: opts.compress_behaviour.compress_enabled(),
            use_underscores: opts.enumerations_use_underscores,
            skip_dedup: opts.skip_enum_deduplication,
            shorten_leaf_names: opts.shorten_enum_leaf_names,
            org_prefixes: opts.enum_org_prefixes_to_trim.clone(),
            use_defining_module_for_typedefs: opts
                .use_defining_module_for_typedef_enum_names,
            defined_names: Default::default(),
            names_by_key: Default::default(),
            types: Default::default(),
        }
    }

    // Returns the generated name and the deduplication key of an enumerated
    // type, registering it on first use.
    //
    // `member` must be provided when the type is a member of a union.
    pub fn register(
        &mut self,
        snode: &SchemaNode<'_>,
        leaf_type: &LeafType,
        member: Option<&UnionMember<'_>>,
    ) -> Result<(String, String), Error> {
        match leaf_type.kind {
            TypeKind::Identityref => self.register_identity(snode, leaf_type),
            TypeKind::Enumeration if leaf_type.is_typedef() => self
                .register_typedef(
                    snode,
                    leaf_type,
                    leaf_type,
                    EnumeratedKind::DerivedEnumeration,
                    0,
                ),
            TypeKind::Enumeration => match member {
                Some(member) if member.context.is_typedef() => self
                    .register_typedef(
                        snode,
                        member.context,
                        leaf_type,
                        EnumeratedKind::DerivedUnionEnumeration,
                        member.enum_index,
                    ),
                Some(member) => {
                    self.register_leaf(snode, leaf_type, Some(member.enum_index))
                }
                None => self.register_leaf(snode, leaf_type, None),
            },
            _ => Err(Error::NotEnumerated(snode.schema_path())),
        }
    }

    pub fn get(&self, key: &str) -> Option<&EnumeratedYangType> {
        self.types.get(key)
    }

    // Registered types keyed by their deduplication key.
    pub fn types(&self) -> &BTreeMap<String, EnumeratedYangType> {
        &self.types
    }

    // Registered types keyed by their generated name.
    pub fn types_by_name(&self) -> BTreeMap<String, EnumeratedYangType> {
        self.types
            .values()
            .map(|etype| (etype.name.clone(), etype.clone()))
            .collect()
    }

    fn register_leaf(
        &mut self,
        snode: &SchemaNode<'_>,
        leaf_type: &LeafType,
        union_index: Option<usize>,
    ) -> Result<(String, String), Error> {
        let path = match self.skip_dedup {
            true => snode.schema_path(),
            false => snode.definition_path(),
        };
        let mut key = self.strip_config_state(&path);
        if let Some(index) = union_index {
            key.push_str(&format!("#union{index}"));
        }
        if let Some(name) = self.names_by_key.get(&key) {
            return Ok((name.clone(), key));
        }

        // Build the name from the module and the leaf location.
        let module = snode.defining_module();
        let mut parts = vec![camel_case(trim_org_prefix(module, &self.org_prefixes))];
        if self.compress {
            if !self.shorten_leaf_names
                && let Some(parent) = self.compressed_parent(snode)
            {
                parts.push(camel_case(parent.name()));
            }
            parts.push(camel_case(snode.name()));
        } else {
            parts.extend(
                util::relative_data_path(None, snode)
                    .iter()
                    .map(|snode| camel_case(snode.name())),
            );
        }
        let name = self.join(parts, union_index);

        let etype = EnumeratedYangType {
            name: String::new(),
            kind: match union_index {
                Some(_) => EnumeratedKind::UnionEnumeration,
                None => EnumeratedKind::SimpleEnumeration,
            },
            type_name: leaf_type.name.clone(),
            defining_module: module.to_owned(),
            values: leaf_type.enum_values.clone(),
            identity_base: None,
        };
        Ok(self.insert(key, name, etype))
    }

    fn register_typedef(
        &mut self,
        snode: &SchemaNode<'_>,
        typedef: &LeafType,
        leaf_type: &LeafType,
        kind: EnumeratedKind,
        union_index: usize,
    ) -> Result<(String, String), Error> {
        let typedef_module =
            typedef.typedef_module.as_deref().unwrap_or(snode.module());
        let naming_module = match self.use_defining_module_for_typedefs {
            true => typedef_module,
            false => snode.module(),
        };
        let typedef_name = strip_prefix(&typedef.name);
        let union_index = (kind == EnumeratedKind::DerivedUnionEnumeration)
            .then_some(union_index);

        let mut key = format!("{naming_module}/{typedef_module}:{typedef_name}");
        if let Some(index) = union_index {
            key.push_str(&format!("#union{index}"));
        }
        if let Some(name) = self.names_by_key.get(&key) {
            return Ok((name.clone(), key));
        }

        let parts = vec![
            camel_case(trim_org_prefix(naming_module, &self.org_prefixes)),
            camel_case(typedef_name),
        ];
        let name = self.join(parts, union_index);

        let etype = EnumeratedYangType {
            name: String::new(),
            kind,
            type_name: typedef.name.clone(),
            defining_module: typedef_module.to_owned(),
            values: leaf_type.enum_values.clone(),
            identity_base: None,
        };
        Ok(self.insert(key, name, etype))
    }

    fn register_identity(
        &mut self,
        snode: &SchemaNode<'_>,
        leaf_type: &LeafType,
    ) -> Result<(String, String), Error> {
        let tree = snode.tree();
        let context_module =
            leaf_type.typedef_module.as_deref().unwrap_or(snode.module());
        let base = leaf_type
            .base
            .as_deref()
            .and_then(|base| tree.find_identity(base, context_module))
            .ok_or_else(|| Error::UnresolvableIdentityBase(snode.schema_path()))?;

        let key = format!("{}/{}", base.module, base.name);
        if let Some(name) = self.names_by_key.get(&key) {
            return Ok((name.clone(), key));
        }

        let parts = vec![
            camel_case(trim_org_prefix(&base.module, &self.org_prefixes)),
            camel_case(&base.name),
        ];
        let name = self.join(parts, None);

        let etype = EnumeratedYangType {
            name: String::new(),
            kind: EnumeratedKind::Identity,
            type_name: leaf_type.name.clone(),
            defining_module: base.module.clone(),
            values: identity_values(tree, base),
            identity_base: Some(base.qualified_name()),
        };
        Ok(self.insert(key, name, etype))
    }

    fn insert(
        &mut self,
        key: String,
        name: String,
        mut etype: EnumeratedYangType,
    ) -> (String, String) {
        let name = make_name_unique(&name, &mut self.defined_names);
        Debug::EnumRegistered(&key, &name).log();
        etype.name = name.clone();
        self.names_by_key.insert(key.clone(), name.clone());
        self.types.insert(key.clone(), etype);
        (name, key)
    }

    // Parent used to qualify compressed enumeration names: the closest
    // ancestor that isn't a config/state container nor a choice/case.
    fn compressed_parent<'a>(
        &self,
        snode: &SchemaNode<'a>,
    ) -> Option<SchemaNode<'a>> {
        snode
            .ancestors()
            .take_while(|ancestor| !ancestor.is_module())
            .find(|ancestor| {
                !ancestor.is_choice_or_case() && !util::is_config_state(ancestor)
            })
    }

    fn strip_config_state(&self, path: &str) -> String {
        if !self.compress {
            return path.to_owned();
        }
        path.split('/')
            .filter(|segment| !matches!(*segment, "config" | "state"))
            .join("/")
    }

    fn join(&self, parts: Vec<String>, union_index: Option<usize>) -> String {
        let separator = if self.use_underscores { "_" } else { "" };
        let mut name = parts.join(separator);
        if let Some(index) = union_index {
            name.push_str(separator);
            name.push_str(ENUMERATED_UNION_SUFFIX);
            if index > 0 {
                name.push_str(&(index + 1).to_string());
            }
        }
        name
    }
}

// ===== global functions =====

// Registers all the enumerated types used by the given enumerated leaves.
//
// Leaves are processed in path order so that the generated names don't
// depend on the order the schema was walked.
pub fn find_enum_set(
    tree: &SchemaTree,
    enum_leaves: &BTreeMap<String, SchemaNodeId>,
    enum_set: &mut EnumSet,
) -> Errors {
    let mut errors = Errors::default();
    for id in enum_leaves.values() {
        let snode = tree.node(*id);
        let result = util::leaf_type(&snode)
            .and_then(|leaf_type| register_leaf_type(enum_set, &snode, leaf_type));
        if let Err(error) = result {
            errors.push(error);
        }
    }
    errors
}

fn register_leaf_type(
    enum_set: &mut EnumSet,
    snode: &SchemaNode<'_>,
    leaf_type: &LeafType,
) -> Result<(), Error> {
    match leaf_type.kind {
        TypeKind::Enumeration | TypeKind::Identityref => {
            enum_set.register(snode, leaf_type, None)?;
        }
        TypeKind::Union => {
            for member in util::flatten_union(leaf_type)
                .iter()
                .filter(|member| member.leaf_type.kind.is_enumerated())
            {
                enum_set.register(snode, member.leaf_type, Some(member))?;
            }
        }
        _ => (),
    }
    Ok(())
}

fn identity_values(
    tree: &SchemaTree,
    base: &yanggen_schema::Identity,
) -> Vec<EnumValue> {
    tree.derived_identities(base)
        .into_iter()
        .enumerate()
        .map(|(index, identity)| EnumValue {
            name: identity.name.clone(),
            value: index as i64 + 1,
        })
        .collect()
}
