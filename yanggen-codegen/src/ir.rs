//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::collections::BTreeMap;

use derive_new::new;
use serde::Serialize;
use yanggen_schema::SchemaTree;

use crate::classify::{self, Classification};
use crate::debug::Debug;
use crate::directory::{self, Directory, DirectoryEntry};
use crate::enum_set::{self, EnumSet, EnumeratedYangType};
use crate::error::{Error, Errors};
use crate::fakeroot;
use crate::mapper::LangMapper;
use crate::options::{BackendOptions, IrOptions};

// Intermediate representation handed to the code emitters.
#[derive(Clone, Debug, Serialize)]
pub struct Ir {
    // Directories keyed by schema path.
    pub directories: BTreeMap<String, Directory>,
    // Enumerated types keyed by generated name.
    pub enums: BTreeMap<String, EnumeratedYangType>,
    // Messages of each protobuf package.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub proto_packages: BTreeMap<String, Vec<String>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub model_data: Vec<ModelData>,
    // Path of the fake root directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fake_root: Option<String>,
    // Machine-readable schema document.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    // Language-specific emitter options.
    pub backend: BackendOptions,
}

// Module used to generate the code.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, new)]
pub struct ModelData {
    pub name: String,
    pub organization: Option<String>,
    pub revision: Option<String>,
}

// ===== impl Ir =====

impl Ir {
    pub fn directory_by_name(&self, name: &str) -> Option<&Directory> {
        self.directories.values().find(|directory| directory.name == name)
    }

    pub fn fake_root(&self) -> Option<&Directory> {
        self.fake_root
            .as_ref()
            .and_then(|path| self.directories.get(path))
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

// ===== global functions =====

// Builds the IR of the given schema.
//
// The schema is classified, enumerated types are registered and directories
// are named before any field is resolved. Errors of independent nodes are
// collected and reported together, and no IR is returned if any occurred.
pub fn generate_ir<M: LangMapper>(
    tree: &SchemaTree,
    mapper: &mut M,
    opts: &IrOptions,
) -> Result<Ir, Errors> {
    let compress = opts.compress_behaviour;
    let mut errors = Errors::default();

    let all_modules = tree
        .modules()
        .map(|module| module.name.as_str())
        .collect::<Vec<_>>();
    let modules = all_modules
        .iter()
        .copied()
        .filter(|module| !opts.exclude_modules.iter().any(|m| m == module))
        .collect::<Vec<_>>();

    // Find the directories and enumerated leaves.
    let mut classification = Classification::default();
    for module in &all_modules {
        if !modules.contains(module) {
            Debug::ModuleSkipped(module).log();
            continue;
        }
        let Some(root) = tree.module_node(module) else {
            continue;
        };
        let (module_classification, module_errors) = classify::classify(
            &root,
            &opts.exclude_modules,
            compress,
            &all_modules,
        );
        classification.merge(module_classification);
        errors.append(module_errors);
    }

    // Register the enumerated types.
    let mut enum_set = EnumSet::new(opts);
    errors.append(enum_set::find_enum_set(
        tree,
        &classification.enum_leaves,
        &mut enum_set,
    ));
    mapper.set_enum_set(enum_set);

    let mut entries = classification
        .directories
        .iter()
        .map(|(path, id)| (path.clone(), DirectoryEntry::Node(*id)))
        .collect::<BTreeMap<_, _>>();
    let mut fake_root = None;
    if opts.generate_fake_root {
        let nodes = fakeroot::root_level_nodes(tree, &modules);
        match fakeroot::synthesize_root(
            tree,
            &mut entries,
            &nodes,
            &opts.fake_root_name,
            compress,
        ) {
            Ok(()) => fake_root = Some(format!("/{}", opts.fake_root_name)),
            Err(error) => errors.push(error),
        }
    }
    errors.into_result(())?;

    // Name and resolve the directories.
    let (directories, errors) =
        directory::build_directories(tree, &entries, mapper, opts);
    errors.into_result(())?;

    let enums = mapper.enum_set().types_by_name();
    let proto_packages = proto_packages(&directories, mapper);
    let model_data = match opts.include_model_data {
        true => model_data(tree, &modules),
        false => vec![],
    };
    let schema = match opts.include_schema {
        true => Some(tree.to_document(&modules).to_json().map_err(Error::from)?),
        false => None,
    };

    Debug::IrGenerated(directories.len(), enums.len()).log();
    Ok(Ir {
        directories,
        enums,
        proto_packages,
        model_data,
        fake_root,
        schema,
        backend: mapper.backend_options(),
    })
}

fn proto_packages<M: LangMapper>(
    directories: &BTreeMap<String, Directory>,
    mapper: &M,
) -> BTreeMap<String, Vec<String>> {
    let mut packages = BTreeMap::<String, Vec<String>>::new();
    for directory in directories.values() {
        if let Some(package) = mapper.qualified_package(&directory.package_name) {
            packages.entry(package).or_default().push(directory.name.clone());
        }
    }
    for messages in packages.values_mut() {
        messages.sort();
    }
    packages
}

fn model_data(tree: &SchemaTree, modules: &[&str]) -> Vec<ModelData> {
    modules
        .iter()
        .filter_map(|module| tree.module(module))
        .map(|module| {
            ModelData::new(
                module.name.clone(),
                module.organization.clone(),
                module.revision.clone(),
            )
        })
        .collect()
}
