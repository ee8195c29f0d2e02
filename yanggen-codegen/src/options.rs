//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

#![allow(clippy::derivable_impls)]

use std::str::FromStr;

use serde::{Deserialize, Serialize};

// How config/state containers and list surrounding containers are handled.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[derive(Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompressBehaviour {
    #[default]
    Uncompressed,
    UncompressedExcludeDerivedState,
    PreferIntendedConfig,
    PreferOperationalState,
    ExcludeDerivedState,
}

// Options controlling the generated IR.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct IrOptions {
    pub compress_behaviour: CompressBehaviour,
    pub exclude_modules: Vec<String>,
    pub generate_fake_root: bool,
    pub fake_root_name: String,
    pub shorten_enum_leaf_names: bool,
    pub enum_org_prefixes_to_trim: Vec<String>,
    pub use_defining_module_for_typedef_enum_names: bool,
    pub enumerations_use_underscores: bool,
    pub skip_enum_deduplication: bool,
    pub include_model_data: bool,
    pub include_schema: bool,
}

// Options consumed by the struct code emitter.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct GoOptions {
    pub generate_simple_unions: bool,
    pub generate_getters: bool,
    pub generate_leaf_setters: bool,
    pub generate_append: bool,
    pub generate_delete: bool,
    pub add_annotation_fields: bool,
    pub annotation_prefix: String,
    pub generate_json_schema: bool,
}

// Options consumed by the protobuf emitter.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProtoOptions {
    pub base_package_name: String,
    pub enum_package_name: String,
    pub nested_messages: bool,
    pub annotate_schema_paths: bool,
    pub annotate_enum_names: bool,
}

// Backend options recorded in the IR for the code emitter.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "language", rename_all = "lowercase")]
pub enum BackendOptions {
    Go(GoOptions),
    Proto(ProtoOptions),
}

// ===== impl CompressBehaviour =====

impl CompressBehaviour {
    pub fn compress_enabled(&self) -> bool {
        matches!(
            self,
            CompressBehaviour::PreferIntendedConfig
                | CompressBehaviour::PreferOperationalState
                | CompressBehaviour::ExcludeDerivedState
        )
    }

    pub fn state_excluded(&self) -> bool {
        matches!(
            self,
            CompressBehaviour::ExcludeDerivedState
                | CompressBehaviour::UncompressedExcludeDerivedState
        )
    }

    pub fn prefer_operational_state(&self) -> bool {
        *self == CompressBehaviour::PreferOperationalState
    }
}

impl FromStr for CompressBehaviour {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "uncompressed" => Ok(CompressBehaviour::Uncompressed),
            "uncompressed-exclude-derived-state" => {
                Ok(CompressBehaviour::UncompressedExcludeDerivedState)
            }
            "prefer-intended-config" => Ok(CompressBehaviour::PreferIntendedConfig),
            "prefer-operational-state" => {
                Ok(CompressBehaviour::PreferOperationalState)
            }
            "exclude-derived-state" => Ok(CompressBehaviour::ExcludeDerivedState),
            _ => Err(format!("unknown compression behaviour: {s}")),
        }
    }
}

// ===== impl IrOptions =====

impl IrOptions {
    pub const DFLT_FAKE_ROOT_NAME: &'static str = "device";

    pub fn compressed(compress_behaviour: CompressBehaviour) -> IrOptions {
        IrOptions {
            compress_behaviour,
            ..Default::default()
        }
    }
}

impl Default for IrOptions {
    fn default() -> IrOptions {
        IrOptions {
            compress_behaviour: Default::default(),
            exclude_modules: Default::default(),
            generate_fake_root: false,
            fake_root_name: IrOptions::DFLT_FAKE_ROOT_NAME.to_owned(),
            shorten_enum_leaf_names: false,
            enum_org_prefixes_to_trim: Default::default(),
            use_defining_module_for_typedef_enum_names: false,
            enumerations_use_underscores: true,
            skip_enum_deduplication: false,
            include_model_data: false,
            include_schema: false,
        }
    }
}

// ===== impl GoOptions =====

impl Default for GoOptions {
    fn default() -> GoOptions {
        GoOptions {
            generate_simple_unions: false,
            generate_getters: false,
            generate_leaf_setters: false,
            generate_append: false,
            generate_delete: false,
            add_annotation_fields: false,
            annotation_prefix: "Λ".to_owned(),
            generate_json_schema: false,
        }
    }
}

// ===== impl ProtoOptions =====

impl Default for ProtoOptions {
    fn default() -> ProtoOptions {
        ProtoOptions {
            base_package_name: "openconfig".to_owned(),
            enum_package_name: "enums".to_owned(),
            nested_messages: false,
            annotate_schema_paths: false,
            annotate_enum_names: false,
        }
    }
}
