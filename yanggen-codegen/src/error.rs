//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use tracing::{error, warn};
use yanggen_schema::TypeKind;

// Code generation errors.
#[derive(Debug)]
pub enum Error {
    // Schema errors
    Schema(yanggen_schema::Error),
    UnresolvableModule(String, String),
    UnknownEntryKind(String),
    MissingLeafType(String),
    UnsupportedType(String, TypeKind),
    UnresolvableIdentityBase(String),
    NotEnumerated(String),
    WrapperUnionDefault(String),
    // List keys
    MissingListKey(String, String),
    InvalidKeyType(String, String),
    BinaryListKey(String, String),
    BinaryUnionListKey(String, String),
    // Naming
    DuplicateField(String, String),
    DuplicateRootChild(String, String, String),
    FakeRootClash(String),
    ModulePackage(String),
}

// Errors collected over a generation run.
#[derive(Debug, Default)]
pub struct Errors(Vec<Error>);

// ===== impl Error =====

impl Error {
    pub fn log(&self) {
        match self {
            Error::Schema(error) => {
                warn!(error = %with_source(error), "{}", self);
            }
            Error::DuplicateRootChild(..) | Error::FakeRootClash(..) => {
                error!("{}", self);
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
            Error::Schema(error) => std::fmt::Display::fmt(error, f),
            Error::UnresolvableModule(module, path) => {
                write!(
                    f,
                    "cannot find module {module} associated with {path}: unresolvable module association"
                )
            }
            Error::UnknownEntryKind(path) => {
                write!(f, "unknown type of entry {path}")
            }
            Error::MissingLeafType(path) => {
                write!(f, "leaf {path} has no type")
            }
            Error::UnsupportedType(path, kind) => {
                write!(f, "unimplemented type {kind} for leaf {path}")
            }
            Error::UnresolvableIdentityBase(path) => {
                write!(f, "identityref {path} does not have a registrable base")
            }
            Error::NotEnumerated(path) => {
                write!(f, "cannot map {path} as an enumerated type")
            }
            Error::WrapperUnionDefault(path) => {
                write!(
                    f,
                    "{path}: default value not supported for wrapper union values, please generate using simplified union leaves"
                )
            }
            Error::MissingListKey(list, key) => {
                write!(f, "list {list} does not have a field for key {key}")
            }
            Error::InvalidKeyType(list, key) => {
                write!(
                    f,
                    "list {list} included a key {key} that did not have a valid proto type"
                )
            }
            Error::BinaryListKey(list, key) => {
                write!(
                    f,
                    "list {list} has a binary key {key}, which is unsupported"
                )
            }
            Error::BinaryUnionListKey(list, key) => {
                write!(
                    f,
                    "list {list} has a union key {key} containing a binary, which is an unsupported binary key"
                )
            }
            Error::DuplicateField(dir, field) => {
                write!(f, "{dir} has multiple fields named {field}")
            }
            Error::DuplicateRootChild(name, new, existing) => {
                write!(
                    f,
                    "duplicate entry {name} at the root: new: {new}, existing: {existing}"
                )
            }
            Error::FakeRootClash(path) => {
                write!(f, "fake root path {path} clashes with an existing directory")
            }
            Error::ModulePackage(path) => {
                write!(
                    f,
                    "{path}: protobuf messages are not generated for modules"
                )
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Schema(error) => std::error::Error::source(error),
            _ => None,
        }
    }
}

impl From<yanggen_schema::Error> for Error {
    fn from(error: yanggen_schema::Error) -> Error {
        Error::Schema(error)
    }
}

// ===== impl Errors =====

impl Errors {
    pub fn push(&mut self, error: Error) {
        self.0.push(error);
    }

    pub fn append(&mut self, other: Errors) {
        self.0.extend(other.0);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Error> {
        self.0.iter()
    }

    // Sorts the collected errors and removes duplicates, so that the same
    // input always reports the same errors in the same order.
    pub fn normalize(&mut self) {
        self.0.sort_by_cached_key(|error| error.to_string());
        self.0.dedup_by(|a, b| a.to_string() == b.to_string());
    }

    pub fn log(&self) {
        for error in &self.0 {
            error.log();
        }
    }

    // Returns the given value if no error was collected.
    pub fn into_result<T>(mut self, value: T) -> Result<T, Errors> {
        if self.is_empty() {
            Ok(value)
        } else {
            self.normalize();
            Err(self)
        }
    }
}

impl std::fmt::Display for Errors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (idx, error) in self.0.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", with_source(error))?;
        }
        Ok(())
    }
}

impl std::error::Error for Errors {}

impl From<Error> for Errors {
    fn from(error: Error) -> Errors {
        Errors(vec![error])
    }
}

impl IntoIterator for Errors {
    type Item = Error;
    type IntoIter = std::vec::IntoIter<Error>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

// ===== global functions =====

fn with_source<E: std::error::Error>(error: E) -> String {
    if let Some(source) = error.source() {
        format!("{} ({})", error, with_source(source))
    } else {
        error.to_string()
    }
}
