//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

#![allow(clippy::derivable_impls)]

use serde::Deserialize;
use yanggen_codegen::{GoOptions, IrOptions, ProtoOptions};

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub logging: Logging,
    pub generator: IrOptions,
    pub go: GoOptions,
    pub proto: ProtoOptions,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Logging {
    pub stdout: LoggingStdout,
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingStdout {
    pub enabled: bool,
    pub filter: String,
    pub style: LoggingFmtStyle,
    pub colors: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoggingFmtStyle {
    Compact,
    Full,
    Json,
    Pretty,
}

// ===== impl Config =====

impl Config {
    pub(crate) fn load(config_file: Option<&str>) -> Config {
        let Some(config_file) = config_file else {
            return Config::default();
        };

        match std::fs::read_to_string(config_file) {
            Ok(config_str) => match toml::from_str(&config_str) {
                Ok(config) => config,
                Err(err) => {
                    eprintln!("Failed to parse configuration file: {err}");
                    std::process::exit(1);
                }
            },
            Err(err) => {
                eprintln!("Failed to load configuration file: {err}");
                eprintln!("Falling back to default configuration...");
                Config::default()
            }
        }
    }
}

// ===== impl LoggingStdout =====

impl Default for LoggingStdout {
    fn default() -> LoggingStdout {
        LoggingStdout {
            enabled: false,
            filter: "yanggen=info".to_owned(),
            style: LoggingFmtStyle::Full,
            colors: false,
        }
    }
}

// ===== unit tests =====
