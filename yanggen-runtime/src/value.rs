//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::collections::BTreeMap;

use enum_as_inner::EnumAsInner;

use crate::error::Error;
use crate::schema::{EnumDef, FieldKind, FieldSchema, StructSchema};

// Scalar value held by a leaf, a leaf-list element or a union.
#[derive(Clone, Debug, EnumAsInner, PartialEq)]
pub enum Value {
    String(String),
    Int(i64),
    Uint(u64),
    Decimal(f64),
    Bool(bool),
    Binary(Vec<u8>),
    Empty,
    Enum(EnumValue),
}

// Value of an enumerated type. Zero stands for an unset value.
#[derive(Clone, Copy, Debug)]
pub struct EnumValue {
    pub def: &'static EnumDef,
    pub value: i64,
}

// Value of a struct field.
#[derive(Clone, Debug, Default, EnumAsInner, PartialEq)]
pub enum FieldValue {
    #[default]
    Unset,
    Leaf(Value),
    LeafList(Vec<Value>),
    Container(Box<YangStruct>),
    List(Vec<YangStruct>),
    KeyedList(BTreeMap<String, YangStruct>),
}

// Instance of a generated struct.
#[derive(Clone)]
pub struct YangStruct {
    schema: &'static StructSchema,
    values: Vec<FieldValue>,
}

// ===== impl Value =====

impl Value {
    pub fn string(value: impl Into<String>) -> Value {
        Value::String(value.into())
    }

    pub fn enumerated(def: &'static EnumDef, value: i64) -> Value {
        Value::Enum(EnumValue { def, value })
    }

    // Whether the value holds anything, an enumerated zero value being unset.
    pub fn is_set(&self) -> bool {
        match self {
            Value::Enum(value) => value.is_set(),
            _ => true,
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Value {
        Value::String(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Value {
        Value::String(value)
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Value {
        Value::Uint(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Value {
        Value::Int(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Value {
        Value::Bool(value)
    }
}

impl From<EnumValue> for Value {
    fn from(value: EnumValue) -> Value {
        Value::Enum(value)
    }
}

// ===== impl EnumValue =====

impl EnumValue {
    pub fn is_set(&self) -> bool {
        self.value != 0
    }
}

impl PartialEq for EnumValue {
    fn eq(&self, other: &EnumValue) -> bool {
        self.def.name == other.def.name && self.value == other.value
    }
}

// ===== impl FieldValue =====

impl FieldValue {
    // Whether the field holds any data, recursing into child structs.
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Unset => true,
            FieldValue::Leaf(value) => !value.is_set(),
            FieldValue::LeafList(values) => values.is_empty(),
            FieldValue::Container(child) => child.is_empty(),
            FieldValue::List(entries) => entries.is_empty(),
            FieldValue::KeyedList(entries) => entries.is_empty(),
        }
    }
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> FieldValue {
        FieldValue::Leaf(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> FieldValue {
        FieldValue::Leaf(value.into())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> FieldValue {
        FieldValue::Leaf(value.into())
    }
}

impl From<u64> for FieldValue {
    fn from(value: u64) -> FieldValue {
        FieldValue::Leaf(value.into())
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> FieldValue {
        FieldValue::Leaf(value.into())
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> FieldValue {
        FieldValue::Leaf(value.into())
    }
}

impl From<EnumValue> for FieldValue {
    fn from(value: EnumValue) -> FieldValue {
        FieldValue::Leaf(value.into())
    }
}

impl From<Vec<Value>> for FieldValue {
    fn from(values: Vec<Value>) -> FieldValue {
        FieldValue::LeafList(values)
    }
}

impl From<YangStruct> for FieldValue {
    fn from(child: YangStruct) -> FieldValue {
        FieldValue::Container(Box::new(child))
    }
}

// ===== impl YangStruct =====

impl YangStruct {
    pub fn new(schema: &'static StructSchema) -> YangStruct {
        YangStruct {
            schema,
            values: vec![FieldValue::Unset; schema.fields.len()],
        }
    }

    pub fn schema(&self) -> &'static StructSchema {
        self.schema
    }

    pub fn name(&self) -> &'static str {
        self.schema.name
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.schema
            .field_index(name)
            .map(|index| &self.values[index])
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut FieldValue> {
        self.schema
            .field_index(name)
            .map(|index| &mut self.values[index])
    }

    pub(crate) fn field_mut(
        &mut self,
        name: &str,
    ) -> Result<(&'static FieldSchema, &mut FieldValue), Error> {
        let schema = self.schema;
        let index = schema.field_index(name).ok_or_else(|| {
            Error::UnknownField(schema.name.to_owned(), name.to_owned())
        })?;
        Ok((&schema.fields[index], &mut self.values[index]))
    }

    // Sets a field, checking the value against the field's kind.
    pub fn set(
        &mut self,
        name: &str,
        value: impl Into<FieldValue>,
    ) -> Result<(), Error> {
        let struct_name = self.schema.name;
        let (field, slot) = self.field_mut(name)?;
        let value = value.into();
        check_field(struct_name, field, &value)?;
        *slot = value;
        Ok(())
    }

    // Builder flavor of `set`.
    pub fn with(
        mut self,
        name: &str,
        value: impl Into<FieldValue>,
    ) -> Result<YangStruct, Error> {
        self.set(name, value)?;
        Ok(self)
    }

    // Adds an entry to a list field, keyed by the entry's key leaves when
    // the list is keyed.
    pub fn append(&mut self, name: &str, entry: YangStruct) -> Result<(), Error> {
        let struct_name = self.schema.name;
        let (field, slot) = self.field_mut(name)?;
        let entry_schema = match field.kind {
            FieldKind::List(schema) | FieldKind::KeyedList(schema) => schema,
            kind => {
                return Err(Error::InvalidValue(
                    struct_name.to_owned(),
                    field.name.to_owned(),
                    kind.to_string(),
                ));
            }
        };
        if entry.schema.name != entry_schema.name {
            return Err(Error::InvalidValue(
                struct_name.to_owned(),
                field.name.to_owned(),
                field.kind.to_string(),
            ));
        }
        entry.check()?;

        let invalid = || {
            Error::InvalidValue(
                struct_name.to_owned(),
                field.name.to_owned(),
                field.kind.to_string(),
            )
        };
        match field.kind {
            FieldKind::KeyedList(_) => {
                let key = entry.list_key()?;
                if slot.is_unset() {
                    *slot = FieldValue::KeyedList(Default::default());
                }
                let entries = slot.as_keyed_list_mut().ok_or_else(invalid)?;
                if entries.contains_key(&key) {
                    return Err(Error::DuplicateListKey(
                        field.name.to_owned(),
                        key,
                    ));
                }
                entries.insert(key, entry);
            }
            _ => {
                if slot.is_unset() {
                    *slot = FieldValue::List(Default::default());
                }
                slot.as_list_mut().ok_or_else(invalid)?.push(entry);
            }
        }
        Ok(())
    }

    pub fn fields(
        &self,
    ) -> impl Iterator<Item = (&'static FieldSchema, &FieldValue)> {
        self.schema.fields.iter().zip(self.values.iter())
    }

    pub fn fields_mut(
        &mut self,
    ) -> impl Iterator<Item = (&'static FieldSchema, &mut FieldValue)> {
        self.schema.fields.iter().zip(self.values.iter_mut())
    }

    // Whether no leaf anywhere in the subtree is set.
    pub fn is_empty(&self) -> bool {
        self.values.iter().all(FieldValue::is_empty)
    }

    // Key of a keyed list entry. Multiple keys are joined by a space.
    pub fn list_key(&self) -> Result<String, Error> {
        let mut parts = vec![];
        for key in &self.schema.keys {
            let value = self
                .get(key)
                .and_then(FieldValue::as_leaf)
                .filter(|value| value.is_set())
                .ok_or_else(|| {
                    Error::MissingListKey(
                        self.schema.name.to_owned(),
                        (*key).to_owned(),
                    )
                })?;
            let part = key_string(value)?.ok_or_else(|| {
                Error::InvalidListKey(
                    self.schema.name.to_owned(),
                    (*key).to_owned(),
                )
            })?;
            parts.push(part);
        }
        Ok(parts.join(" "))
    }

    // Checks every value in the subtree against its field kind.
    pub fn check(&self) -> Result<(), Error> {
        for (field, value) in self.fields() {
            check_field(self.schema.name, field, value)?;
        }
        Ok(())
    }

    // Checks the subtree and runs the validation hook of every struct in it.
    pub fn validate(&self) -> Result<(), Error> {
        self.check()?;
        self.walk(&mut |ystruct| match ystruct.schema.validator {
            Some(validator) => validator(ystruct).map_err(|reason| {
                Error::ValidatorFailed(ystruct.schema.name.to_owned(), reason)
            }),
            None => Ok(()),
        })
    }

    // Calls `f` on this struct and every struct below it, in field order.
    pub fn walk<F>(&self, f: &mut F) -> Result<(), Error>
    where
        F: FnMut(&YangStruct) -> Result<(), Error>,
    {
        f(self)?;
        for value in &self.values {
            match value {
                FieldValue::Container(child) => child.walk(f)?,
                FieldValue::List(entries) => {
                    for entry in entries {
                        entry.walk(f)?;
                    }
                }
                FieldValue::KeyedList(entries) => {
                    for entry in entries.values() {
                        entry.walk(f)?;
                    }
                }
                _ => (),
            }
        }
        Ok(())
    }
}

impl PartialEq for YangStruct {
    fn eq(&self, other: &YangStruct) -> bool {
        self.schema.name == other.schema.name && self.values == other.values
    }
}

impl std::fmt::Debug for YangStruct {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut debug = f.debug_struct(self.schema.name);
        for (field, value) in self.fields() {
            if !value.is_unset() {
                debug.field(field.name, value);
            }
        }
        debug.finish()
    }
}

// ===== helper functions =====

// Checks a field value against the field's kind.
pub(crate) fn check_field(
    struct_name: &str,
    field: &FieldSchema,
    value: &FieldValue,
) -> Result<(), Error> {
    let invalid = || {
        Error::InvalidValue(
            struct_name.to_owned(),
            field.name.to_owned(),
            field.kind.to_string(),
        )
    };

    match (field.kind, value) {
        (_, FieldValue::Unset) => Ok(()),
        (FieldKind::Leaf(kind), FieldValue::Leaf(value)) => {
            match kind.accepts(value) {
                true => Ok(()),
                false => Err(invalid()),
            }
        }
        (FieldKind::LeafList(kind), FieldValue::LeafList(values)) => {
            match values.iter().all(|value| kind.accepts(value)) {
                true => Ok(()),
                false => Err(invalid()),
            }
        }
        (FieldKind::Enum(def), FieldValue::Leaf(Value::Enum(value))) => {
            if value.def.name != def.name {
                return Err(invalid());
            }
            check_enum_value(value)
        }
        (FieldKind::Union(enums), FieldValue::Leaf(value)) => match value {
            Value::Enum(value) => {
                if !enums.iter().any(|def| def.name == value.def.name) {
                    return Err(Error::UnknownEnumType(
                        value.def.name.to_owned(),
                    ));
                }
                check_enum_value(value)
            }
            _ => Ok(()),
        },
        (FieldKind::Container(schema), FieldValue::Container(child)) => {
            check_child(schema, child).ok_or_else(invalid)?
        }
        (FieldKind::List(schema), FieldValue::List(entries)) => {
            for entry in entries {
                check_child(schema, entry).ok_or_else(invalid)??;
            }
            Ok(())
        }
        (FieldKind::KeyedList(schema), FieldValue::KeyedList(entries)) => {
            for entry in entries.values() {
                check_child(schema, entry).ok_or_else(invalid)??;
            }
            Ok(())
        }
        _ => Err(invalid()),
    }
}

fn check_child(
    schema: &StructSchema,
    child: &YangStruct,
) -> Option<Result<(), Error>> {
    (child.schema.name == schema.name).then(|| child.check())
}

fn check_enum_value(value: &EnumValue) -> Result<(), Error> {
    if value.is_set() && value.def.entry(value.value).is_none() {
        return Err(Error::UnknownEnumValue(
            value.def.name.to_owned(),
            value.value,
        ));
    }
    Ok(())
}

// Renders a key leaf the way it appears in a keyed list.
pub(crate) fn key_string(value: &Value) -> Result<Option<String>, Error> {
    let key = match value {
        Value::String(value) => value.clone(),
        Value::Int(value) => value.to_string(),
        Value::Uint(value) => value.to_string(),
        Value::Decimal(value) => value.to_string(),
        Value::Bool(value) => value.to_string(),
        Value::Enum(value) => crate::enums::enum_name(value)?,
        Value::Binary(_) | Value::Empty => return Ok(None),
    };
    Ok(Some(key))
}
