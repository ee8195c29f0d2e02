//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::collections::{BTreeMap, BTreeSet};

use yanggen_schema::{LeafType, SchemaNode, SchemaNodeId, TypeKind};

use crate::debug::Debug;
use crate::enum_set::{ENUMERATED_UNION_SUFFIX, EnumSet};
use crate::error::Error;
use crate::mapper::LangMapper;
use crate::naming::{camel_case, make_name_unique, safe_proto_identifier};
use crate::options::{BackendOptions, CompressBehaviour, IrOptions, ProtoOptions};
use crate::types::MappedType;
use crate::util::{self, UnionMember};

// Package holding the wrapper messages of nullable scalar values.
pub const WRAPPER_PACKAGE: &str = "ywrapper";

// Mapper for the protobuf code generator.
#[derive(Debug)]
pub struct ProtoLangMapper {
    options: ProtoOptions,
    enum_set: EnumSet,
    // Package names defined so far.
    defined_packages: BTreeSet<String>,
    // Package names keyed by the schema node they were derived from.
    package_names: BTreeMap<SchemaNodeId, String>,
    // Message names defined within each package.
    defined_messages: BTreeMap<String, BTreeSet<String>>,
    message_names: BTreeMap<SchemaNodeId, String>,
}

// ===== impl ProtoLangMapper =====

impl ProtoLangMapper {
    pub fn new(options: ProtoOptions) -> ProtoLangMapper {
        ProtoLangMapper {
            options,
            enum_set: EnumSet::new(&Default::default()),
            defined_packages: Default::default(),
            package_names: Default::default(),
            defined_messages: Default::default(),
            message_names: Default::default(),
        }
    }

    pub fn options(&self) -> &ProtoOptions {
        &self.options
    }

    // Package a message is generated in.
    //
    // The package is named after the path of the message's parent. Without
    // compression, the path starts with the module name. Under compression,
    // the module is left out and the parent of a list or of a config/state
    // container is skipped, since that container isn't mapped to a message.
    fn protobuf_package(
        &mut self,
        snode: &SchemaNode<'_>,
        compress: CompressBehaviour,
    ) -> Result<String, Error> {
        let Some(mut parent) = snode.parent() else {
            return Err(Error::ModulePackage(snode.schema_path()));
        };
        if compress.compress_enabled()
            && (snode.is_list() || util::is_config_state(snode))
            && let Some(grandparent) = parent.parent()
        {
            parent = grandparent;
        }
        if compress.compress_enabled() && parent.is_module() {
            return Ok(String::new());
        }
        if let Some(package) = self.package_names.get(&parent.id()) {
            return Ok(package.clone());
        }

        let mut parts = parent
            .inclusive_ancestors()
            .filter(|ancestor| match compress.compress_enabled() {
                true => {
                    !ancestor.is_module()
                        && !util::is_compressed_out(ancestor, compress)
                }
                false => !ancestor.is_choice_or_case(),
            })
            .map(|ancestor| safe_proto_identifier(ancestor.name()))
            .collect::<Vec<_>>();
        parts.reverse();

        let package = match parts.is_empty() {
            true => String::new(),
            false => make_name_unique(&parts.join("."), &mut self.defined_packages),
        };
        self.package_names.insert(parent.id(), package.clone());
        Ok(package)
    }

    fn proto_type(
        &mut self,
        snode: &SchemaNode<'_>,
        leaf_type: &LeafType,
        scalar: bool,
    ) -> Result<MappedType, Error> {
        if leaf_type.is_typedef() && leaf_type.kind.is_enumerated() {
            return self.enumerated_type(snode, leaf_type, None);
        }

        let native_type = match (leaf_type.kind, scalar) {
            (kind, true) if kind.is_signed_integer() => "sint64",
            (kind, false) if kind.is_signed_integer() => "IntValue",
            (kind, true) if kind.is_unsigned_integer() => "uint64",
            (kind, false) if kind.is_unsigned_integer() => "UintValue",
            (TypeKind::Binary, true) => "bytes",
            (TypeKind::Binary, false) => "BytesValue",
            (TypeKind::Boolean | TypeKind::Empty, true) => "bool",
            (TypeKind::Boolean | TypeKind::Empty, false) => "BoolValue",
            (TypeKind::String, true) => "string",
            (TypeKind::String, false) => "StringValue",
            (TypeKind::Decimal64, _) => "Decimal64Value",
            (TypeKind::Enumeration | TypeKind::Identityref, _) => {
                return self.enumerated_type(snode, leaf_type, None);
            }
            (TypeKind::Leafref, _) => {
                let target =
                    snode.tree().resolve_leafref_type(*snode, leaf_type)?;
                let target_type = util::leaf_type(&target)?;
                return self.proto_type(&target, target_type, scalar);
            }
            (TypeKind::Union, _) => {
                return self.union_type(snode, leaf_type, scalar);
            }
            _ => {
                return Err(Error::UnsupportedType(
                    snode.schema_path(),
                    leaf_type.kind,
                ));
            }
        };

        // Everything but the key scalars lives in the wrapper package.
        let mtype = match native_type.ends_with("Value") {
            true => MappedType::new(&format!("{WRAPPER_PACKAGE}.{native_type}")),
            false => MappedType::new(native_type),
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

        // Enumerations defined inline are generated within the message of
        // their leaf. Everything else goes in the enumeration package.
        let inline = leaf_type.kind == TypeKind::Enumeration
            && !leaf_type.is_typedef()
            && !member.is_some_and(|member| member.context.is_typedef());
        let native_type = match (inline, member) {
            (true, None) => camel_case(snode.name()),
            (true, Some(member)) => {
                let mut name =
                    format!("{}{}", camel_case(snode.name()), ENUMERATED_UNION_SUFFIX);
                if member.enum_index > 0 {
                    name.push_str(&(member.enum_index + 1).to_string());
                }
                name
            }
            (false, _) => format!(
                "{}.{}.{}",
                self.options.base_package_name, self.options.enum_package_name, name
            ),
        };
        Ok(MappedType::enumerated(native_type, key))
    }

    fn union_type(
        &mut self,
        snode: &SchemaNode<'_>,
        leaf_type: &LeafType,
        scalar: bool,
    ) -> Result<MappedType, Error> {
        let mut members = vec![];
        for member in util::flatten_union(leaf_type) {
            let mtype = match member.leaf_type.kind {
                TypeKind::Enumeration if !member.leaf_type.is_typedef() => {
                    self.enumerated_type(snode, member.leaf_type, Some(&member))?
                }
                _ => self.proto_type(snode, member.leaf_type, true)?,
            };
            members.push((member.leaf_type, mtype));
        }

        let first = members.first().map(|(leaf_type, _)| *leaf_type);
        let mtype = MappedType::union(
            String::new(),
            members.into_iter().map(|(_, mtype)| mtype),
        );
        if mtype.is_union() || mtype.is_enumerated_value || scalar {
            return Ok(mtype);
        }

        // A union collapsed into a single scalar type uses its wrapper type
        // when nullable.
        match first {
            Some(member_type) => self.proto_type(snode, member_type, false),
            None => Ok(mtype),
        }
    }
}

impl LangMapper for ProtoLangMapper {
    fn set_enum_set(&mut self, enum_set: EnumSet) {
        self.enum_set = enum_set;
    }

    fn enum_set(&self) -> &EnumSet {
        &self.enum_set
    }

    fn backend_options(&self) -> BackendOptions {
        BackendOptions::Proto(self.options.clone())
    }

    fn directory_name(
        &mut self,
        snode: &SchemaNode<'_>,
        compress: CompressBehaviour,
    ) -> Result<String, Error> {
        if let Some(name) = self.message_names.get(&snode.id()) {
            return Ok(name.clone());
        }

        let package = self.protobuf_package(snode, compress)?;
        let defined = self.defined_messages.entry(package).or_default();
        let name = make_name_unique(&camel_case(snode.name()), defined);
        Debug::DirectoryNamed(&snode.schema_path(), &name).log();
        self.message_names.insert(snode.id(), name.clone());
        Ok(name)
    }

    fn fake_root_name(&mut self, name: &str) -> String {
        let defined = self.defined_messages.entry(String::new()).or_default();
        make_name_unique(&camel_case(name), defined)
    }

    fn field_name(&mut self, snode: &SchemaNode<'_>) -> Result<String, Error> {
        Ok(safe_proto_identifier(snode.name()))
    }

    fn leaf_type(
        &mut self,
        snode: &SchemaNode<'_>,
        _opts: &IrOptions,
    ) -> Result<MappedType, Error> {
        let leaf_type = util::leaf_type(snode)?;
        self.proto_type(snode, leaf_type, false)
    }

    fn key_leaf_type(
        &mut self,
        snode: &SchemaNode<'_>,
        _opts: &IrOptions,
    ) -> Result<MappedType, Error> {
        let leaf_type = util::leaf_type(snode)?;
        self.proto_type(snode, leaf_type, true).map_err(|error| match error {
            Error::UnsupportedType(..) => {
                let list = snode
                    .ancestors()
                    .find(|ancestor| ancestor.is_list())
                    .map(|list| list.schema_path())
                    .unwrap_or_default();
                Error::InvalidKeyType(list, snode.name().to_owned())
            }
            error => error,
        })
    }

    fn package_name(
        &mut self,
        snode: Option<&SchemaNode<'_>>,
        compress: CompressBehaviour,
    ) -> Result<String, Error> {
        // The fake root lives in the base package.
        let Some(snode) = snode else {
            return Ok(String::new());
        };
        if snode.is_module() {
            return Err(Error::ModulePackage(snode.schema_path()));
        }

        // With nested messages, every message lives in the package of its
        // top-level ancestor.
        let mut snode = *snode;
        if self.options.nested_messages {
            while let Some(parent) = util::directory_parent(&snode, compress) {
                snode = parent;
            }
        }
        self.protobuf_package(&snode, compress)
    }

    fn qualified_package(&self, package: &str) -> Option<String> {
        let base = &self.options.base_package_name;
        match package.is_empty() {
            true => Some(base.clone()),
            false => Some(format!("{base}.{package}")),
        }
    }
}
