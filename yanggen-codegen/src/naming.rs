//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::collections::BTreeSet;

use convert_case::{Boundary, Case, Casing};

// Converts a YANG identifier into an upper camel case name.
pub fn camel_case(name: &str) -> String {
    name.replace('.', "-")
        .from_case(Case::Kebab)
        .without_boundaries(&[Boundary::UpperDigit, Boundary::LowerDigit])
        .to_case(Case::Pascal)
}

// Returns a name that is unique within the given set of defined names,
// appending a numeric suffix when required. The returned name is added to
// the set.
pub fn make_name_unique(name: &str, defined: &mut BTreeSet<String>) -> String {
    let mut candidate = name.to_owned();
    let mut suffix = 0;
    while defined.contains(&candidate) {
        suffix += 1;
        candidate = format!("{name}_{suffix}");
    }
    defined.insert(candidate.clone());
    candidate
}

// Strips the first matching organization prefix (e.g. "openconfig-") from a
// module name.
pub fn trim_org_prefix<'a>(module: &'a str, prefixes: &[String]) -> &'a str {
    for prefix in prefixes {
        if let Some(name) = module
            .strip_prefix(prefix.as_str())
            .and_then(|name| name.strip_prefix('-'))
            && !name.is_empty()
        {
            return name;
        }
    }
    module
}

// Removes the prefix of a possibly prefixed YANG identifier.
pub fn strip_prefix(name: &str) -> &str {
    match name.split_once(':') {
        Some((_, name)) => name,
        None => name,
    }
}

// Protobuf identifiers can't contain hyphens or dots.
pub fn safe_proto_identifier(name: &str) -> String {
    name.replace(['-', '.'], "_")
}

// ===== unit tests =====
