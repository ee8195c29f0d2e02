//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

#![warn(rust_2018_idioms)]

mod config;

use clap::{App, Arg};
use config::{Config, LoggingFmtStyle};
use similar::{ChangeTag, TextDiff};
use tracing::{error, info, warn};
use tracing_subscriber::filter::{Directive, LevelFilter};
use tracing_subscriber::prelude::*;
use yanggen_codegen::{Errors, GoLangMapper, Ir, ProtoLangMapper, generate_ir};
use yanggen_schema::SchemaTree;

#[derive(Clone, Copy, Debug)]
enum Backend {
    Go,
    Proto,
}

// ===== helper functions =====

fn init_tracing(config: &config::LoggingStdout) {
    // Enable logging to stdout.
    let stdout = config.enabled.then(|| {
        let layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_ansi(config.colors);
        let layer = match config.style {
            LoggingFmtStyle::Compact => layer.compact().boxed(),
            LoggingFmtStyle::Full => layer.boxed(),
            LoggingFmtStyle::Json => layer.json().boxed(),
            LoggingFmtStyle::Pretty => layer.pretty().boxed(),
        };
        layer.with_filter(LevelFilter::TRACE)
    });

    // Configure the tracing fmt layer.
    let default_directive: Directive = config
        .filter
        .parse()
        .unwrap_or_else(|_| LevelFilter::INFO.into());
    let env_filter = tracing_subscriber::EnvFilter::builder()
        .with_default_directive(default_directive)
        .from_env_lossy();
    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout)
        .init();
}

fn generate(
    tree: &SchemaTree,
    backend: Backend,
    config: &Config,
) -> Result<Ir, Errors> {
    match backend {
        Backend::Go => {
            let mut mapper = GoLangMapper::new(config.go.clone());
            generate_ir(tree, &mut mapper, &config.generator)
        }
        Backend::Proto => {
            let mut mapper = ProtoLangMapper::new(config.proto.clone());
            generate_ir(tree, &mut mapper, &config.generator)
        }
    }
}

fn ir_json(ir: &Ir) -> String {
    match ir.to_json() {
        Ok(json) => json,
        Err(error) => {
            error!(%error, "failed to serialize IR");
            eprintln!("Failed to serialize IR: {error}");
            std::process::exit(1);
        }
    }
}

// Regenerates the IR several times and compares the output of each run
// against the first one.
fn deflake(
    tree: &SchemaTree,
    backend: Backend,
    config: &Config,
    runs: usize,
    expected: &str,
) -> bool {
    for run in 1..runs {
        let output = match generate(tree, backend, config) {
            Ok(ir) => ir_json(&ir),
            Err(errors) => {
                errors.log();
                eprintln!("{errors}");
                return false;
            }
        };

        if output != expected {
            warn!(%run, "non-deterministic output");
            eprintln!("Run {run} produced a different IR:");
            let diff = TextDiff::from_lines(expected, &output);
            for change in diff.iter_all_changes() {
                let sign = match change.tag() {
                    ChangeTag::Delete => "-",
                    ChangeTag::Insert => "+",
                    ChangeTag::Equal => " ",
                };
                eprint!("{sign}{change}");
            }
            return false;
        }
    }

    true
}

// ===== main =====

fn main() {
    // Parse command-line parameters.
    let matches = App::new("YANG code generator")
        .about("Generates the typed IR of a set of YANG modules")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::with_name("schema")
                .short("s")
                .long("schema")
                .value_name("file")
                .help("Schema document (JSON)")
                .required(true),
        )
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .value_name("file")
                .help("Configuration file"),
        )
        .arg(
            Arg::with_name("backend")
                .short("b")
                .long("backend")
                .value_name("name")
                .possible_values(&["go", "proto"])
                .default_value("go")
                .help("Target language"),
        )
        .arg(
            Arg::with_name("deflake")
                .short("d")
                .long("deflake")
                .value_name("runs")
                .help("Number of runs used to check for non-deterministic output"),
        )
        .arg(
            Arg::with_name("print")
                .short("p")
                .long("print")
                .help("Print the generated IR"),
        )
        .get_matches();

    // Read configuration file.
    let config = Config::load(matches.value_of("config"));

    // Initialize tracing.
    init_tracing(&config.logging.stdout);

    let backend = match matches.value_of("backend") {
        Some("proto") => Backend::Proto,
        _ => Backend::Go,
    };
    let runs = match matches.value_of("deflake").map(str::parse::<usize>) {
        None => 1,
        Some(Ok(runs)) => runs,
        Some(Err(error)) => {
            eprintln!("Invalid number of runs: {error}");
            std::process::exit(1);
        }
    };

    // Load the schema.
    let schema = matches.value_of("schema").unwrap_or_default();
    let data = match std::fs::read_to_string(schema) {
        Ok(data) => data,
        Err(error) => {
            eprintln!("Failed to read schema file {schema}: {error}");
            std::process::exit(1);
        }
    };
    let tree = match SchemaTree::from_json(&data) {
        Ok(tree) => tree,
        Err(error) => {
            error.log();
            match std::error::Error::source(&error) {
                Some(source) => {
                    eprintln!("Failed to load schema: {error} ({source})")
                }
                None => eprintln!("Failed to load schema: {error}"),
            }
            std::process::exit(1);
        }
    };

    // Generate the IR.
    let ir = match generate(&tree, backend, &config) {
        Ok(ir) => ir,
        Err(errors) => {
            errors.log();
            eprintln!("{errors}");
            std::process::exit(1);
        }
    };
    info!(
        directories = ir.directories.len(),
        enums = ir.enums.len(),
        ?backend,
        "IR generated"
    );

    let json = ir_json(&ir);
    if !deflake(&tree, backend, &config, runs, &json) {
        std::process::exit(1);
    }
    if matches.is_present("print") {
        println!("{json}");
    }
}
