//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use itertools::Itertools;

use crate::error::Error;
use crate::value::{Value, YangStruct};

// Hook run against a struct when its tree is validated.
pub type Validator = fn(&YangStruct) -> Result<(), String>;

// Native representation of a scalar leaf.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ScalarKind {
    String,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Decimal64,
    Boolean,
    Binary,
    Empty,
}

// Enumerated type, either a YANG enumeration or the set of identities
// derived from an identityref base.
#[derive(Debug)]
pub struct EnumDef {
    pub name: &'static str,
    pub identityref: bool,
    pub values: &'static [EnumEntry],
}

#[derive(Debug)]
pub struct EnumEntry {
    pub value: i64,
    pub name: &'static str,
    pub module: &'static str,
}

#[derive(Clone, Copy, Debug)]
pub enum FieldKind {
    Leaf(ScalarKind),
    LeafList(ScalarKind),
    Enum(&'static EnumDef),
    // Union holding any scalar or one of the listed enumerated types.
    Union(&'static [&'static EnumDef]),
    Container(&'static StructSchema),
    List(&'static StructSchema),
    KeyedList(&'static StructSchema),
}

// Descriptor of a single field of a generated struct.
#[derive(Debug)]
pub struct FieldSchema {
    pub name: &'static str,
    pub path: &'static str,
    pub shadow_path: Option<&'static str>,
    pub module: &'static str,
    pub shadow_module: Option<&'static str>,
    pub kind: FieldKind,
}

// Descriptor of a generated struct.
#[derive(Debug)]
pub struct StructSchema {
    pub name: &'static str,
    pub module: &'static str,
    pub fields: Vec<FieldSchema>,
    pub keys: Vec<&'static str>,
    pub validator: Option<Validator>,
}

// Parsed path tag: a set of alternative paths, each a list of elements.
//
// "config/name|name" maps the same value to both "config/name" and "name".
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PathTag(Vec<Vec<String>>);

// ===== impl ScalarKind =====

impl ScalarKind {
    pub fn accepts(&self, value: &Value) -> bool {
        match (self, value) {
            (ScalarKind::String, Value::String(_)) => true,
            (ScalarKind::Int8, Value::Int(v)) => i8::try_from(*v).is_ok(),
            (ScalarKind::Int16, Value::Int(v)) => i16::try_from(*v).is_ok(),
            (ScalarKind::Int32, Value::Int(v)) => i32::try_from(*v).is_ok(),
            (ScalarKind::Int64, Value::Int(_)) => true,
            (ScalarKind::Uint8, Value::Uint(v)) => u8::try_from(*v).is_ok(),
            (ScalarKind::Uint16, Value::Uint(v)) => u16::try_from(*v).is_ok(),
            (ScalarKind::Uint32, Value::Uint(v)) => u32::try_from(*v).is_ok(),
            (ScalarKind::Uint64, Value::Uint(_)) => true,
            (ScalarKind::Decimal64, Value::Decimal(_)) => true,
            (ScalarKind::Boolean, Value::Bool(_)) => true,
            (ScalarKind::Binary, Value::Binary(_)) => true,
            (ScalarKind::Empty, Value::Empty) => true,
            _ => false,
        }
    }

    // RFC7951 encodes 64-bit numbers as strings.
    pub(crate) fn quoted(&self) -> bool {
        matches!(
            self,
            ScalarKind::Int64 | ScalarKind::Uint64 | ScalarKind::Decimal64
        )
    }
}

// ===== impl EnumDef =====

impl EnumDef {
    pub fn entry(&self, value: i64) -> Option<&'static EnumEntry> {
        self.values.iter().find(|entry| entry.value == value)
    }

    pub fn value_of(&self, name: &str) -> Option<i64> {
        self.values
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.value)
    }
}

// ===== impl FieldKind =====

impl FieldKind {
    pub fn is_container(&self) -> bool {
        matches!(self, FieldKind::Container(_))
    }
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldKind::Leaf(_) => write!(f, "leaf"),
            FieldKind::LeafList(_) => write!(f, "leaf-list"),
            FieldKind::Enum(def) => write!(f, "enumeration {}", def.name),
            FieldKind::Union(_) => write!(f, "union"),
            FieldKind::Container(schema) => {
                write!(f, "container {}", schema.name)
            }
            FieldKind::List(schema) | FieldKind::KeyedList(schema) => {
                write!(f, "list {}", schema.name)
            }
        }
    }
}

// ===== impl FieldSchema =====

impl FieldSchema {
    pub const fn new(
        name: &'static str,
        path: &'static str,
        kind: FieldKind,
    ) -> FieldSchema {
        FieldSchema {
            name,
            path,
            shadow_path: None,
            module: "",
            shadow_module: None,
            kind,
        }
    }

    pub const fn module(mut self, module: &'static str) -> FieldSchema {
        self.module = module;
        self
    }

    pub const fn shadow(
        mut self,
        path: &'static str,
        module: Option<&'static str>,
    ) -> FieldSchema {
        self.shadow_path = Some(path);
        self.shadow_module = module;
        self
    }

    // Paths the field maps to.
    //
    // The shadow path is used whenever it's requested and the field has one.
    // There's no fallback between the two once a path is chosen.
    pub fn paths(&self, prefer_shadow: bool) -> Result<PathTag, Error> {
        let tag = match (prefer_shadow, self.shadow_path) {
            (true, Some(shadow)) => shadow,
            _ => self.path,
        };
        PathTag::parse(tag)
            .map_err(|_| Error::MissingPath(self.name.to_owned()))
    }

    // Modules of each path element, parallel to `paths`.
    pub fn modules(&self, prefer_shadow: bool) -> Option<PathTag> {
        let tag = match (prefer_shadow, self.shadow_path) {
            (true, Some(_)) => self.shadow_module.unwrap_or(self.module),
            _ => self.module,
        };
        PathTag::parse(tag).ok()
    }
}

// ===== impl StructSchema =====

impl StructSchema {
    pub fn new(name: &'static str, fields: Vec<FieldSchema>) -> StructSchema {
        StructSchema {
            name,
            module: "",
            fields,
            keys: vec![],
            validator: None,
        }
    }

    pub fn module(mut self, module: &'static str) -> StructSchema {
        self.module = module;
        self
    }

    pub fn keys(mut self, keys: &[&'static str]) -> StructSchema {
        self.keys = keys.to_vec();
        self
    }

    pub fn validator(mut self, validator: Validator) -> StructSchema {
        self.validator = Some(validator);
        self
    }

    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|field| field.name == name)
    }

    pub fn field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|field| field.name == name)
    }
}

// ===== impl PathTag =====

impl PathTag {
    pub fn parse(tag: &str) -> Result<PathTag, Error> {
        if tag.is_empty() {
            return Err(Error::InvalidPathTag(tag.to_owned()));
        }

        let mut paths = vec![];
        for alternative in tag.split('|') {
            let elements = alternative
                .split('/')
                .filter(|element| !element.is_empty())
                .map(str::to_owned)
                .collect::<Vec<_>>();
            if elements.is_empty() {
                return Err(Error::InvalidPathTag(tag.to_owned()));
            }
            paths.push(elements);
        }
        Ok(PathTag(paths))
    }

    pub fn alternatives(&self) -> &[Vec<String>] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for PathTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tag = self.0.iter().map(|path| path.join("/")).join("|");
        write!(f, "{tag}")
    }
}

// ===== unit tests =====
