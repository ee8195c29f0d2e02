//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::Serialize;
use serde_json::{Map, Number, Value as JsonValue};

use crate::debug::Debug;
use crate::enums::{enum_name, qualified_enum_name};
use crate::error::Error;
use crate::schema::{FieldKind, FieldSchema};
use crate::value::{FieldValue, Value, YangStruct};

// JSON encoding of a struct tree.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum JsonFormat {
    // Keyed by raw path elements, keyed lists rendered as objects.
    #[default]
    Internal,
    // RFC7951 encoding, module-qualified names and keyed lists rendered as
    // arrays.
    Rfc7951,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Rfc7951Config {
    // Render enumerated values as "module:NAME".
    pub append_module_name: bool,
    // Render identityref values as "module:NAME".
    pub prepend_module_name_identityref: bool,
}

#[derive(Clone, Debug)]
pub struct EmitJsonConfig {
    pub format: JsonFormat,
    pub rfc7951: Rfc7951Config,
    pub indent: String,
    pub escape_html: bool,
    pub skip_validation: bool,
    pub prefer_shadow_path: bool,
}

struct Encoder<'a> {
    format: JsonFormat,
    rfc7951: &'a Rfc7951Config,
    prefer_shadow_path: bool,
}

// ===== impl JsonFormat =====

impl JsonFormat {
    pub(crate) fn construct_name(&self) -> &'static str {
        match self {
            JsonFormat::Internal => "ConstructInternalJSON",
            JsonFormat::Rfc7951 => "ConstructIETFJSON",
        }
    }
}

impl std::fmt::Display for JsonFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JsonFormat::Internal => write!(f, "internal"),
            JsonFormat::Rfc7951 => write!(f, "rfc7951"),
        }
    }
}

// ===== impl EmitJsonConfig =====

impl Default for EmitJsonConfig {
    fn default() -> EmitJsonConfig {
        EmitJsonConfig {
            format: JsonFormat::Internal,
            rfc7951: Default::default(),
            indent: "  ".to_owned(),
            escape_html: false,
            skip_validation: false,
            prefer_shadow_path: false,
        }
    }
}

// ===== impl Encoder =====

impl Encoder<'_> {
    fn struct_json(
        &self,
        ystruct: &YangStruct,
        parent_module: &str,
    ) -> Result<Map<String, JsonValue>, Error> {
        let mut object = Map::new();
        for (field, value) in ystruct.fields() {
            if value.is_empty() {
                continue;
            }

            let paths = field.paths(self.prefer_shadow_path)?;
            let modules = field.modules(self.prefer_shadow_path);
            for (idx, path) in paths.alternatives().iter().enumerate() {
                let path_modules = modules.as_ref().and_then(|modules| {
                    let alternatives = modules.alternatives();
                    alternatives.get(idx).or(alternatives.first())
                });

                // Qualify each element whose module differs from its
                // parent's.
                let mut module = match ystruct.schema().module {
                    "" => parent_module,
                    module => module,
                };
                let mut current = parent_module;
                let mut keys = vec![];
                for (pos, element) in path.iter().enumerate() {
                    if let Some(element_module) = path_modules
                        .and_then(|modules| modules.get(pos))
                        .or(path_modules.and_then(|modules| modules.last()))
                    {
                        module = element_module.as_str();
                    }
                    let key = match self.format {
                        JsonFormat::Rfc7951
                            if !module.is_empty() && module != current =>
                        {
                            format!("{module}:{element}")
                        }
                        _ => element.clone(),
                    };
                    keys.push(key);
                    current = module;
                }

                if let Some(json) = self.field_json(field, value, module)? {
                    insert_at(&mut object, &keys, json)?;
                }
            }
        }
        Ok(object)
    }

    fn field_json(
        &self,
        field: &FieldSchema,
        value: &FieldValue,
        module: &str,
    ) -> Result<Option<JsonValue>, Error> {
        let quoted = match field.kind {
            FieldKind::Leaf(kind) | FieldKind::LeafList(kind) => kind.quoted(),
            _ => false,
        };

        let json = match value {
            FieldValue::Unset => return Ok(None),
            FieldValue::Leaf(value) => {
                return self.scalar_json(field, value, quoted);
            }
            FieldValue::LeafList(values) => {
                let mut array = vec![];
                for value in values {
                    if let Some(json) = self.scalar_json(field, value, quoted)? {
                        array.push(json);
                    }
                }
                JsonValue::Array(array)
            }
            FieldValue::Container(child) => {
                let object = self.struct_json(child, module)?;
                if object.is_empty() {
                    return Ok(None);
                }
                JsonValue::Object(object)
            }
            FieldValue::List(entries) => {
                let mut array = vec![];
                for entry in entries {
                    array.push(JsonValue::Object(self.struct_json(entry, module)?));
                }
                JsonValue::Array(array)
            }
            FieldValue::KeyedList(entries) => match self.format {
                JsonFormat::Internal => {
                    let mut object = Map::new();
                    for (key, entry) in entries {
                        let entry = self.struct_json(entry, module)?;
                        object.insert(key.clone(), JsonValue::Object(entry));
                    }
                    JsonValue::Object(object)
                }
                JsonFormat::Rfc7951 => {
                    let mut array = vec![];
                    for entry in entries.values() {
                        let entry = self.struct_json(entry, module)?;
                        array.push(JsonValue::Object(entry));
                    }
                    JsonValue::Array(array)
                }
            },
        };
        Ok(Some(json))
    }

    fn scalar_json(
        &self,
        field: &FieldSchema,
        value: &Value,
        quoted: bool,
    ) -> Result<Option<JsonValue>, Error> {
        let rfc7951 = self.format == JsonFormat::Rfc7951;
        let json = match value {
            Value::String(value) => JsonValue::String(value.clone()),
            Value::Int(value) if rfc7951 && quoted => {
                JsonValue::String(value.to_string())
            }
            Value::Int(value) => JsonValue::Number((*value).into()),
            Value::Uint(value) if rfc7951 && quoted => {
                JsonValue::String(value.to_string())
            }
            Value::Uint(value) => JsonValue::Number((*value).into()),
            Value::Decimal(value) if rfc7951 && quoted => {
                JsonValue::String(value.to_string())
            }
            Value::Decimal(value) => Number::from_f64(*value)
                .map(JsonValue::Number)
                .ok_or_else(|| {
                    Error::InvalidDecimal(field.name.to_owned(), *value)
                })?,
            Value::Bool(value) => JsonValue::Bool(*value),
            Value::Binary(value) => JsonValue::String(BASE64.encode(value)),
            Value::Empty if rfc7951 => JsonValue::Array(vec![JsonValue::Null]),
            Value::Empty => JsonValue::Bool(true),
            Value::Enum(value) => {
                if !value.is_set() {
                    return Ok(None);
                }
                let qualify = rfc7951
                    && (self.rfc7951.append_module_name
                        || (value.def.identityref
                            && self.rfc7951.prepend_module_name_identityref));
                let name = match qualify {
                    true => qualified_enum_name(value)?,
                    false => enum_name(value)?,
                };
                JsonValue::String(name)
            }
        };
        Ok(Some(json))
    }
}

// ===== global functions =====

// Builds the internal JSON representation of a struct tree.
pub fn construct_internal_json(
    ystruct: &YangStruct,
    prefer_shadow_path: bool,
) -> Result<Map<String, JsonValue>, Error> {
    let rfc7951 = Rfc7951Config::default();
    let encoder = Encoder {
        format: JsonFormat::Internal,
        rfc7951: &rfc7951,
        prefer_shadow_path,
    };
    encoder.struct_json(ystruct, "")
}

// Builds the RFC7951 representation of a struct tree.
pub fn construct_rfc7951_json(
    ystruct: &YangStruct,
    config: &Rfc7951Config,
    prefer_shadow_path: bool,
) -> Result<Map<String, JsonValue>, Error> {
    let encoder = Encoder {
        format: JsonFormat::Rfc7951,
        rfc7951: config,
        prefer_shadow_path,
    };
    encoder.struct_json(ystruct, "")
}

// Validates a struct tree and renders it as a JSON document.
pub fn emit_json(
    ystruct: &YangStruct,
    config: &EmitJsonConfig,
) -> Result<String, Error> {
    if !config.skip_validation {
        ystruct
            .validate()
            .map_err(|error| Error::Validation(Box::new(error)))?;
    }

    let object = construct_json(ystruct, config)?;
    let mut json = to_string_indent(&JsonValue::Object(object), &config.indent)?;
    if config.escape_html {
        json = escape_html(&json);
    }
    Debug::JsonEmitted(config.format, ystruct.name()).log();
    Ok(json)
}

// Merges two JSON objects.
//
// Objects are merged recursively and arrays are concatenated. A key holding
// different scalar values in both objects is a conflict.
pub fn merge_json(
    a: &Map<String, JsonValue>,
    b: &Map<String, JsonValue>,
) -> Result<Map<String, JsonValue>, Error> {
    let mut merged = a.clone();
    for (key, value) in b {
        merge_json_key(&mut merged, key, value)?;
    }
    Ok(merged)
}

// Renders a struct tree and merges it into an existing JSON object.
pub fn merge_struct_json(
    ystruct: &YangStruct,
    existing: &Map<String, JsonValue>,
    config: &EmitJsonConfig,
) -> Result<Map<String, JsonValue>, Error> {
    let object = construct_json(ystruct, config)?;
    merge_json(existing, &object)
}

// ===== helper functions =====

fn construct_json(
    ystruct: &YangStruct,
    config: &EmitJsonConfig,
) -> Result<Map<String, JsonValue>, Error> {
    match config.format {
        JsonFormat::Internal => {
            construct_internal_json(ystruct, config.prefer_shadow_path)
        }
        JsonFormat::Rfc7951 => construct_rfc7951_json(
            ystruct,
            &config.rfc7951,
            config.prefer_shadow_path,
        ),
    }
    .map_err(|error| Error::Construct(config.format, Box::new(error)))
}

// Inserts a value under a path of nested objects, creating the intermediate
// objects as needed.
fn insert_at(
    object: &mut Map<String, JsonValue>,
    keys: &[String],
    value: JsonValue,
) -> Result<(), Error> {
    let Some((last, parents)) = keys.split_last() else {
        return Ok(());
    };

    let mut object = object;
    for key in parents {
        let child = object
            .entry(key.clone())
            .or_insert_with(|| JsonValue::Object(Map::new()));
        object = child
            .as_object_mut()
            .ok_or_else(|| Error::JsonConflict(key.clone()))?;
    }
    merge_json_key(object, last, &value)
}

fn merge_json_key(
    object: &mut Map<String, JsonValue>,
    key: &str,
    value: &JsonValue,
) -> Result<(), Error> {
    let Some(existing) = object.get_mut(key) else {
        object.insert(key.to_owned(), value.clone());
        return Ok(());
    };

    match (existing, value) {
        (JsonValue::Object(dst), JsonValue::Object(src)) => {
            for (key, value) in src {
                merge_json_key(dst, key, value)?;
            }
            Ok(())
        }
        (JsonValue::Array(dst), JsonValue::Array(src)) => {
            dst.extend(src.iter().cloned());
            Ok(())
        }
        (dst, src) if *dst == *src => Ok(()),
        _ => Err(Error::JsonConflict(key.to_owned())),
    }
}

fn to_string_indent(value: &JsonValue, indent: &str) -> Result<String, Error> {
    if indent.is_empty() {
        return Ok(serde_json::to_string(value)?);
    }

    let mut buf = Vec::new();
    let formatter =
        serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

// Escapes the characters that are unsafe to embed in HTML. They can only
// appear inside JSON strings, where the escaped form is equivalent.
fn escape_html(json: &str) -> String {
    let mut escaped = String::with_capacity(json.len());
    for c in json.chars() {
        match c {
            '<' => escaped.push_str("\\u003c"),
            '>' => escaped.push_str("\\u003e"),
            '&' => escaped.push_str("\\u0026"),
            c => escaped.push(c),
        }
    }
    escaped
}

// ===== unit tests =====
