//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

#![warn(rust_2018_idioms)]

mod debug;

pub mod classify;
pub mod directory;
pub mod enum_set;
pub mod error;
pub mod fakeroot;
pub mod gogen;
pub mod ir;
pub mod mapper;
pub mod naming;
pub mod options;
pub mod protogen;
pub mod types;
pub mod util;

pub use directory::{Directory, Field, FieldKind, ListKey};
pub use enum_set::{EnumSet, EnumeratedKind, EnumeratedYangType};
pub use error::{Error, Errors};
pub use gogen::GoLangMapper;
pub use ir::{Ir, ModelData, generate_ir};
pub use mapper::LangMapper;
pub use options::{
    BackendOptions, CompressBehaviour, GoOptions, IrOptions, ProtoOptions,
};
pub use protogen::ProtoLangMapper;
pub use types::{MappedType, MappedUnionSubtype};
