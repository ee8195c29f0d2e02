//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::collections::{BTreeMap, BTreeSet};

use yanggen_schema::{LeafType, SchemaNode, SchemaNodeId, TypeKind};

use crate::debug::Debug;
use crate::enum_set::EnumSet;
use crate::error::Error;
use crate::mapper::LangMapper;
use crate::naming::{camel_case, make_name_unique, strip_prefix};
use crate::options::{BackendOptions, CompressBehaviour, GoOptions, IrOptions};
use crate::types::MappedType;
use crate::util::{self, UnionMember};

// Prefix of the generated enumerated types.
pub const GO_ENUM_PREFIX: &str = "E_";

// Mapper for the struct code generator.
#[derive(Debug)]
pub struct GoLangMapper {
    options: GoOptions,
    enum_set: EnumSet,
    // Names defined in the global namespace.
    defined_globals: BTreeSet<String>,
    directory_names: BTreeMap<SchemaNodeId, String>,
    fake_root: Option<String>,
}

// ===== impl GoLangMapper =====

impl GoLangMapper {
    pub fn new(options: GoOptions) -> GoLangMapper {
        GoLangMapper {
            options,
            enum_set: EnumSet::new(&Default::default()),
            defined_globals: Default::default(),
            directory_names: Default::default(),
            fake_root: None,
        }
    }

    pub fn options(&self) -> &GoOptions {
        &self.options
    }

    fn yang_type_to_go(
        &mut self,
        snode: &SchemaNode<'_>,
        leaf_type: &LeafType,
        opts: &IrOptions,
    ) -> Result<MappedType, Error> {
        // Typedefs of enumerated types map directly to their registered
        // type.
        if leaf_type.is_typedef() && leaf_type.kind.is_enumerated() {
            return self.enumerated_type(snode, leaf_type, None);
        }

        let mtype = match leaf_type.kind {
            TypeKind::Int8 => MappedType::new("int8").with_zero("0"),
            TypeKind::Int16 => MappedType::new("int16").with_zero("0"),
            TypeKind::Int32 => MappedType::new("int32").with_zero("0"),
            TypeKind::Int64 => MappedType::new("int64").with_zero("0"),
            TypeKind::Uint8 => MappedType::new("uint8").with_zero("0"),
            TypeKind::Uint16 => MappedType::new("uint16").with_zero("0"),
            TypeKind::Uint32 => MappedType::new("uint32").with_zero("0"),
            TypeKind::Uint64 => MappedType::new("uint64").with_zero("0"),
            TypeKind::Decimal64 => MappedType::new("float64").with_zero("0.0"),
            TypeKind::String | TypeKind::InstanceIdentifier => {
                MappedType::new("string").with_zero("\"\"")
            }
            TypeKind::Boolean => MappedType::new("bool").with_zero("false"),
            TypeKind::Empty => MappedType::new("YANGEmpty").with_zero("false"),
            TypeKind::Binary => MappedType::new("Binary").with_zero("nil"),
            TypeKind::Enumeration | TypeKind::Identityref => {
                self.enumerated_type(snode, leaf_type, None)?
            }
            TypeKind::Leafref => {
                let target =
                    snode.tree().resolve_leafref_type(*snode, leaf_type)?;
                let target_type = util::leaf_type(&target)?;
                self.yang_type_to_go(&target, target_type, opts)?
            }
            TypeKind::Union => self.union_type(snode, leaf_type, opts)?,
            TypeKind::Bits => {
                return Err(Error::UnsupportedType(
                    snode.schema_path(),
                    leaf_type.kind,
                ));
            }
        };

        Ok(mtype)
    }

    fn enumerated_type(
        &mut self,
        snode: &SchemaNode<'_>,
        leaf_type: &LeafType,
        member: Option<&UnionMember<'_>>,
    ) -> Result<MappedType, Error> {
        let (name, key) = self.enum_set.register(snode, leaf_type, member)?;
        Ok(MappedType::enumerated(format!("{GO_ENUM_PREFIX}{name}"), key)
            .with_zero("0"))
    }

    fn union_type(
        &mut self,
        snode: &SchemaNode<'_>,
        leaf_type: &LeafType,
        opts: &IrOptions,
    ) -> Result<MappedType, Error> {
        let mut members = vec![];
        for member in util::flatten_union(leaf_type) {
            let mtype = match member.leaf_type.kind {
                TypeKind::Enumeration if !member.leaf_type.is_typedef() => {
                    self.enumerated_type(snode, member.leaf_type, Some(&member))?
                }
                _ => self.yang_type_to_go(snode, member.leaf_type, opts)?,
            };
            members.push(mtype);
        }

        let name = self.union_name(snode, opts.compress_behaviour)?;
        let mut mtype = MappedType::union(name, members);
        if mtype.is_union() {
            mtype.zero_value = Some("nil".to_owned());
        }
        Ok(mtype)
    }

    // Unions are named after the directory containing the leaf.
    fn union_name(
        &mut self,
        snode: &SchemaNode<'_>,
        compress: CompressBehaviour,
    ) -> Result<String, Error> {
        let parent = match util::directory_parent(snode, compress) {
            Some(parent) => self.directory_name(&parent, compress)?,
            None => match &self.fake_root {
                Some(fake_root) => fake_root.clone(),
                None => camel_case(snode.module()),
            },
        };
        Ok(format!("{}_{}_Union", parent, camel_case(snode.name())))
    }

    fn default_value(mtype: &MappedType, default: &str) -> String {
        if mtype.is_enumerated_value {
            let value = strip_prefix(default).replace(['-', '.', '+'], "_");
            return format!("{}_{}", mtype.native_type, value);
        }
        match mtype.native_type.as_str() {
            "string" => format!("{default:?}"),
            _ => default.to_owned(),
        }
    }
}

impl LangMapper for GoLangMapper {
    fn set_enum_set(&mut self, enum_set: EnumSet) {
        self.enum_set = enum_set;
    }

    fn enum_set(&self) -> &EnumSet {
        &self.enum_set
    }

    fn backend_options(&self) -> BackendOptions {
        BackendOptions::Go(self.options.clone())
    }

    fn directory_name(
        &mut self,
        snode: &SchemaNode<'_>,
        compress: CompressBehaviour,
    ) -> Result<String, Error> {
        if let Some(name) = self.directory_names.get(&snode.id()) {
            return Ok(name.clone());
        }

        // Join the names of the ancestors that are mapped to directories.
        // When not compressing, the module name is included too.
        let mut parts = vec![];
        for ancestor in snode.inclusive_ancestors() {
            if ancestor.is_module() {
                if !compress.compress_enabled() {
                    parts.push(camel_case(ancestor.name()));
                }
                break;
            }
            if util::is_compressed_out(&ancestor, compress) {
                continue;
            }
            parts.push(camel_case(ancestor.name()));
        }
        parts.reverse();

        let name = make_name_unique(&parts.join("_"), &mut self.defined_globals);
        Debug::DirectoryNamed(&snode.schema_path(), &name).log();
        self.directory_names.insert(snode.id(), name.clone());
        Ok(name)
    }

    fn fake_root_name(&mut self, name: &str) -> String {
        let name = make_name_unique(&camel_case(name), &mut self.defined_globals);
        self.fake_root = Some(name.clone());
        name
    }

    fn field_name(&mut self, snode: &SchemaNode<'_>) -> Result<String, Error> {
        Ok(camel_case(snode.name()))
    }

    fn leaf_type(
        &mut self,
        snode: &SchemaNode<'_>,
        opts: &IrOptions,
    ) -> Result<MappedType, Error> {
        let leaf_type = util::leaf_type(snode)?;
        let mut mtype = self.yang_type_to_go(snode, leaf_type, opts)?;

        if let Some(default) = snode.default() {
            if mtype.is_union() && !self.options.generate_simple_unions {
                return Err(Error::WrapperUnionDefault(snode.schema_path()));
            }
            mtype.default_value = Some(Self::default_value(&mtype, default));
        }

        Ok(mtype)
    }

    fn key_leaf_type(
        &mut self,
        snode: &SchemaNode<'_>,
        opts: &IrOptions,
    ) -> Result<MappedType, Error> {
        let leaf_type = util::leaf_type(snode)?;
        self.yang_type_to_go(snode, leaf_type, opts)
    }

    fn package_name(
        &mut self,
        _snode: Option<&SchemaNode<'_>>,
        _compress: CompressBehaviour,
    ) -> Result<String, Error> {
        Ok(String::new())
    }
}
