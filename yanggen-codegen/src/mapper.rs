//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use yanggen_schema::SchemaNode;

use crate::enum_set::EnumSet;
use crate::error::Error;
use crate::options::{BackendOptions, CompressBehaviour, IrOptions};
use crate::types::MappedType;

// Language-specific naming and type mapping used to build the IR.
//
// Each generation run uses its own mapper instance, which owns the naming
// state (defined names, enumerated types) of that run.
pub trait LangMapper {
    // Installs the enumerated type registry populated for this run.
    fn set_enum_set(&mut self, enum_set: EnumSet);

    fn enum_set(&self) -> &EnumSet;

    // Options passed on to the code emitter of this language.
    fn backend_options(&self) -> BackendOptions;

    // Name of the type generated for a directory.
    fn directory_name(
        &mut self,
        snode: &SchemaNode<'_>,
        compress: CompressBehaviour,
    ) -> Result<String, Error>;

    // Name of the type generated for the fake root.
    fn fake_root_name(&mut self, name: &str) -> String;

    // Name of a field within its directory.
    fn field_name(&mut self, snode: &SchemaNode<'_>) -> Result<String, Error>;

    // Native type of a leaf or leaf-list.
    fn leaf_type(
        &mut self,
        snode: &SchemaNode<'_>,
        opts: &IrOptions,
    ) -> Result<MappedType, Error>;

    // Native type of a list key leaf. Never a wrapper or nullable type.
    fn key_leaf_type(
        &mut self,
        snode: &SchemaNode<'_>,
        opts: &IrOptions,
    ) -> Result<MappedType, Error>;

    // Package of a directory. `None` stands for the fake root.
    fn package_name(
        &mut self,
        snode: Option<&SchemaNode<'_>>,
        compress: CompressBehaviour,
    ) -> Result<String, Error>;

    // Fully qualified name of a package, for languages using packages.
    fn qualified_package(&self, _package: &str) -> Option<String> {
        None
    }
}
