//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

#![warn(rust_2018_idioms)]

mod debug;

pub mod copy;
pub mod enums;
pub mod error;
pub mod json;
pub mod schema;
pub mod tree;
pub mod value;

pub use copy::{
    MergeOptions, deep_copy, merge_struct_into, merge_structs, unique_slices,
    validate_slices,
};
pub use enums::{enum_log_string, enum_name, qualified_enum_name};
pub use error::Error;
pub use json::{
    EmitJsonConfig, JsonFormat, Rfc7951Config, construct_internal_json,
    construct_rfc7951_json, emit_json, merge_json, merge_struct_json,
};
pub use schema::{
    EnumDef, EnumEntry, FieldKind, FieldSchema, PathTag, ScalarKind,
    StructSchema, Validator,
};
pub use tree::{build_empty_tree, init_container, prune_empty_branches};
pub use value::{EnumValue, FieldValue, Value, YangStruct};
