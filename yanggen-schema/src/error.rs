//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use tracing::warn;

// Schema errors.
#[derive(Debug)]
pub enum Error {
    DocumentParse(serde_json::Error),
    DuplicateModule(String),
    UnknownModule(String, String),
    MissingLeafType(String),
    UnknownListKey(String, String),
    LeafrefMissingPath(String),
    LeafrefPrefix(String, String),
    LeafrefTarget(String, String),
    LeafrefLoop(String),
}

// ===== impl Error =====

impl Error {
    pub fn log(&self) {
        match self {
            Error::DocumentParse(error) => {
                warn!(%error, "{}", self);
            }
            Error::DuplicateModule(module) => {
                warn!(%module, "{}", self);
            }
            Error::UnknownModule(module, path) => {
                warn!(%module, %path, "{}", self);
            }
            Error::MissingLeafType(path)
            | Error::LeafrefMissingPath(path)
            | Error::LeafrefLoop(path) => {
                warn!(%path, "{}", self);
            }
            Error::UnknownListKey(path, key) => {
                warn!(%path, %key, "{}", self);
            }
            Error::LeafrefPrefix(path, prefix) => {
                warn!(%path, %prefix, "{}", self);
            }
            Error::LeafrefTarget(path, target) => {
                warn!(%path, %target, "{}", self);
            }
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::DocumentParse(..) => {
                write!(f, "failed to parse schema document")
            }
            Error::DuplicateModule(module) => {
                write!(f, "module {module} defined more than once")
            }
            Error::UnknownModule(module, path) => {
                write!(f, "unknown module {module} referenced by {path}")
            }
            Error::MissingLeafType(path) => {
                write!(f, "leaf {path} has no type")
            }
            Error::UnknownListKey(path, key) => {
                write!(f, "list {path} has a key {key} that is not a child leaf")
            }
            Error::LeafrefMissingPath(path) => {
                write!(f, "leafref {path} has no path statement")
            }
            Error::LeafrefPrefix(path, prefix) => {
                write!(f, "leafref {path} uses unknown prefix {prefix}")
            }
            Error::LeafrefTarget(path, target) => {
                write!(f, "cannot resolve leafref target {target} for {path}")
            }
            Error::LeafrefLoop(path) => {
                write!(f, "leafref {path} references itself")
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::DocumentParse(error) => Some(error),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Error {
        Error::DocumentParse(error)
    }
}
