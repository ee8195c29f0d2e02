//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use tracing::warn;

use crate::json::JsonFormat;

// Runtime errors.
#[derive(Debug)]
pub enum Error {
    // Struct access
    UnknownField(String, String),
    NotContainer(String, String),
    InvalidValue(String, String, String),
    UnknownEnumType(String),
    UnknownEnumValue(String, i64),
    MissingListKey(String, String),
    InvalidListKey(String, String),
    DuplicateListKey(String, String),
    // Merge
    MismatchedTypes(String, String),
    LeafConflict,
    EnumConflict,
    UnionConflict,
    NonUniqueList,
    DeepCopy(Box<Error>),
    // Validation
    Validation(Box<Error>),
    ValidatorFailed(String, String),
    // JSON
    InvalidPathTag(String),
    MissingPath(String),
    Construct(JsonFormat, Box<Error>),
    InvalidDecimal(String, f64),
    JsonConflict(String),
    JsonEncode(serde_json::Error),
}

// ===== impl Error =====

impl Error {
    pub fn log(&self) {
        match self {
            Error::DeepCopy(error)
            | Error::Validation(error)
            | Error::Construct(_, error) => {
                warn!(error = %error, "{}", self);
            }
            Error::JsonEncode(error) => {
                warn!(%error, "{}", self);
            }
            _ => {
                warn!("{}", self);
            }
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::UnknownField(name, field) => {
                write!(f, "field {field} not found in struct {name}")
            }
            Error::NotContainer(name, field) => {
                write!(f, "field {field} of struct {name} is not a container")
            }
            Error::InvalidValue(name, field, kind) => {
                write!(
                    f,
                    "invalid value for field {field} of struct {name}, expected {kind}"
                )
            }
            Error::UnknownEnumType(name) => {
                write!(
                    f,
                    "cannot map enumerated value as type {name} was unknown"
                )
            }
            Error::UnknownEnumValue(name, value) => {
                write!(f, "invalid value {value} for enumerated type {name}")
            }
            Error::MissingListKey(name, key) => {
                write!(f, "list entry {name} does not have a value for key {key}")
            }
            Error::InvalidListKey(name, key) => {
                write!(f, "list entry {name} has a key {key} that can't be rendered")
            }
            Error::DuplicateListKey(field, key) => {
                write!(f, "duplicate key {key} for list {field}")
            }
            Error::MismatchedTypes(a, b) => {
                write!(
                    f,
                    "cannot merge structs that are not of matching types, {a} != {b}"
                )
            }
            Error::LeafConflict => {
                write!(
                    f,
                    "destination value was set, but was not equal to source value when merging ptr field"
                )
            }
            Error::EnumConflict => {
                write!(
                    f,
                    "destination and source values were set when merging enum field"
                )
            }
            Error::UnionConflict => {
                write!(
                    f,
                    "interface field was set in both src and dst and was not equal"
                )
            }
            Error::NonUniqueList => {
                write!(f, "source and destination lists must be unique")
            }
            Error::DeepCopy(error) => {
                write!(f, "cannot DeepCopy struct: {error}")
            }
            Error::Validation(error) => {
                write!(f, "validation err: {error}")
            }
            Error::ValidatorFailed(_, reason) => {
                write!(f, "{reason}")
            }
            Error::InvalidPathTag(tag) => {
                write!(f, "invalid path tag: {tag:?}")
            }
            Error::MissingPath(field) => {
                write!(f, "{field}: field did not specify a path")
            }
            Error::Construct(format, error) => {
                write!(f, "{} error: {error}", format.construct_name())
            }
            Error::InvalidDecimal(field, value) => {
                write!(f, "{field}: cannot encode decimal value {value}")
            }
            Error::JsonConflict(key) => {
                write!(
                    f,
                    "cannot merge JSON, key {key} is set to different values"
                )
            }
            Error::JsonEncode(..) => {
                write!(f, "failed to encode JSON")
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::DeepCopy(error)
            | Error::Validation(error)
            | Error::Construct(_, error) => Some(error.as_ref()),
            Error::JsonEncode(error) => Some(error),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Error {
        Error::JsonEncode(error)
    }
}
