//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use tracing::{debug, trace, trace_span};

use crate::json::JsonFormat;

#[derive(Debug)]
pub enum Debug<'a> {
    FieldOverwritten(&'a str, &'a str),
    ListEntryAdded(&'a str, &'a str),
    BranchPruned(&'a str, &'a str),
    ContainerInitialized(&'a str, &'a str),
    JsonEmitted(JsonFormat, &'a str),
}

// ===== impl Debug =====

impl Debug<'_> {
    pub fn log(&self) {
        match self {
            Debug::FieldOverwritten(name, field)
            | Debug::ListEntryAdded(name, field) => {
                trace_span!("merge").in_scope(|| {
                    trace!(%name, %field, "{}", self);
                });
            }
            Debug::BranchPruned(name, field)
            | Debug::ContainerInitialized(name, field) => {
                trace!(%name, %field, "{}", self);
            }
            Debug::JsonEmitted(format, name) => {
                debug!(%format, %name, "{}", self);
            }
        }
    }
}

impl std::fmt::Display for Debug<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Debug::FieldOverwritten(..) => {
                write!(f, "destination field overwritten")
            }
            Debug::ListEntryAdded(..) => {
                write!(f, "list entry added")
            }
            Debug::BranchPruned(..) => {
                write!(f, "empty branch pruned")
            }
            Debug::ContainerInitialized(..) => {
                write!(f, "container initialized")
            }
            Debug::JsonEmitted(..) => {
                write!(f, "JSON emitted")
            }
        }
    }
}
