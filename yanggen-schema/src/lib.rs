//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

#![warn(rust_2018_idioms)]

pub mod document;
pub mod error;
pub mod tree;
pub mod types;

pub use document::SchemaDocument;
pub use error::Error;
pub use tree::{Module, SchemaNode, SchemaNodeId, SchemaNodeKind, SchemaTree};
pub use types::{EnumValue, Identity, LeafType, TypeKind};
