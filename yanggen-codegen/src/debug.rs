//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use tracing::{debug, debug_span, trace, trace_span};

#[derive(Debug)]
pub enum Debug<'a> {
    ModuleSkipped(&'a str),
    EntitiesClassified(&'a str, usize, usize),
    EnumRegistered(&'a str, &'a str),
    DirectoryNamed(&'a str, &'a str),
    FieldShadowed(&'a str, &'a str, &'a str),
    FakeRootCreated(&'a str, usize),
    IrGenerated(usize, usize),
}

// ===== impl Debug =====

impl Debug<'_> {
    pub fn log(&self) {
        match self {
            Debug::ModuleSkipped(module) => {
                debug_span!("classify").in_scope(|| {
                    debug!(%module, "{}", self);
                });
            }
            Debug::EntitiesClassified(module, directories, enums) => {
                debug_span!("classify").in_scope(|| {
                    debug!(%module, %directories, %enums, "{}", self);
                });
            }
            Debug::EnumRegistered(key, name) => {
                trace_span!("enum-registry").in_scope(|| {
                    trace!(%key, %name, "{}", self);
                });
            }
            Debug::DirectoryNamed(path, name) => {
                trace_span!("directory").in_scope(|| {
                    trace!(%path, %name, "{}", self);
                });
            }
            Debug::FieldShadowed(directory, field, shadow) => {
                trace_span!("directory").in_scope(|| {
                    trace!(%directory, %field, %shadow, "{}", self);
                });
            }
            Debug::FakeRootCreated(name, fields) => {
                debug!(%name, %fields, "{}", self);
            }
            Debug::IrGenerated(directories, enums) => {
                debug!(%directories, %enums, "{}", self);
            }
        }
    }
}

impl std::fmt::Display for Debug<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Debug::ModuleSkipped(..) => {
                write!(f, "module skipped")
            }
            Debug::EntitiesClassified(..) => {
                write!(f, "mappable entities found")
            }
            Debug::EnumRegistered(..) => {
                write!(f, "enumerated type registered")
            }
            Debug::DirectoryNamed(..) => {
                write!(f, "directory named")
            }
            Debug::FieldShadowed(..) => {
                write!(f, "field copy recorded as shadow path")
            }
            Debug::FakeRootCreated(..) => {
                write!(f, "fake root created")
            }
            Debug::IrGenerated(..) => {
                write!(f, "IR generated")
            }
        }
    }
}
