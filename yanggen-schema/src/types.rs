//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use serde::{Deserialize, Serialize};

// YANG built-in types.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[derive(Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TypeKind {
    Int8,
    Int16,
    Int32,
    Int64,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Decimal64,
    String,
    Boolean,
    Empty,
    Binary,
    Bits,
    Enumeration,
    Identityref,
    Leafref,
    Union,
    InstanceIdentifier,
}

// A single enumeration member.
#[derive(Clone, Debug, Eq, PartialEq)]
#[derive(Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EnumValue {
    pub name: String,
    pub value: i64,
}

// Type of a leaf or leaf-list.
//
// When the type was referenced through a typedef, `name` holds the typedef
// name and `typedef_module` the module where the typedef is defined. For
// built-in types `name` is the built-in type name.
#[derive(Clone, Debug, Eq, PartialEq)]
#[derive(Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LeafType {
    pub kind: TypeKind,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typedef_module: Option<String>,
    #[serde(default, rename = "union", skip_serializing_if = "Vec::is_empty")]
    pub union_types: Vec<LeafType>,
    #[serde(default, rename = "enum", skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<EnumValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

// YANG identity.
#[derive(Clone, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub struct Identity {
    pub module: String,
    pub name: String,
    pub base: Option<String>,
}

// ===== impl TypeKind =====

impl TypeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeKind::Int8 => "int8",
            TypeKind::Int16 => "int16",
            TypeKind::Int32 => "int32",
            TypeKind::Int64 => "int64",
            TypeKind::Uint8 => "uint8",
            TypeKind::Uint16 => "uint16",
            TypeKind::Uint32 => "uint32",
            TypeKind::Uint64 => "uint64",
            TypeKind::Decimal64 => "decimal64",
            TypeKind::String => "string",
            TypeKind::Boolean => "boolean",
            TypeKind::Empty => "empty",
            TypeKind::Binary => "binary",
            TypeKind::Bits => "bits",
            TypeKind::Enumeration => "enumeration",
            TypeKind::Identityref => "identityref",
            TypeKind::Leafref => "leafref",
            TypeKind::Union => "union",
            TypeKind::InstanceIdentifier => "instance-identifier",
        }
    }

    pub fn is_signed_integer(&self) -> bool {
        matches!(
            self,
            TypeKind::Int8 | TypeKind::Int16 | TypeKind::Int32 | TypeKind::Int64
        )
    }

    pub fn is_unsigned_integer(&self) -> bool {
        matches!(
            self,
            TypeKind::Uint8
                | TypeKind::Uint16
                | TypeKind::Uint32
                | TypeKind::Uint64
        )
    }

    // Returns whether the type is an enumerated type (enumeration or
    // identityref).
    pub fn is_enumerated(&self) -> bool {
        matches!(self, TypeKind::Enumeration | TypeKind::Identityref)
    }
}

impl std::fmt::Display for TypeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ===== impl LeafType =====

impl LeafType {
    pub fn builtin(kind: TypeKind) -> LeafType {
        LeafType {
            kind,
            name: kind.as_str().to_owned(),
            typedef_module: None,
            union_types: Default::default(),
            enum_values: Default::default(),
            base: None,
            path: None,
            default: None,
        }
    }

    pub fn typedef(kind: TypeKind, name: &str, module: &str) -> LeafType {
        LeafType {
            name: name.to_owned(),
            typedef_module: Some(module.to_owned()),
            ..LeafType::builtin(kind)
        }
    }

    pub fn with_union(mut self, union_types: Vec<LeafType>) -> LeafType {
        self.union_types = union_types;
        self
    }

    pub fn with_enum(mut self, names: &[&str]) -> LeafType {
        self.enum_values = names
            .iter()
            .enumerate()
            .map(|(value, name)| EnumValue {
                name: (*name).to_owned(),
                value: value as i64,
            })
            .collect();
        self
    }

    pub fn with_base(mut self, base: &str) -> LeafType {
        self.base = Some(base.to_owned());
        self
    }

    pub fn with_path(mut self, path: &str) -> LeafType {
        self.path = Some(path.to_owned());
        self
    }

    pub fn with_default(mut self, default: &str) -> LeafType {
        self.default = Some(default.to_owned());
        self
    }

    // Returns whether the type was referenced through a typedef.
    pub fn is_typedef(&self) -> bool {
        self.typedef_module.is_some()
    }

    // Returns whether this type, or any of its (possibly nested) union
    // members, satisfies the given predicate.
    pub fn any_member<F>(&self, f: &F) -> bool
    where
        F: Fn(&LeafType) -> bool,
    {
        if f(self) {
            return true;
        }
        self.union_types.iter().any(|member| member.any_member(f))
    }

    pub(crate) fn normalize(&mut self) {
        if self.name.is_empty() {
            self.name = self.kind.as_str().to_owned();
        }
        for member in &mut self.union_types {
            member.normalize();
        }
    }
}

// ===== impl Identity =====

impl Identity {
    pub fn qualified_name(&self) -> String {
        format!("{}:{}", self.module, self.name)
    }
}
