//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use crate::error::Error;
use crate::value::EnumValue;

// Name of an enumerated value, empty when the value is unset.
pub fn enum_name(value: &EnumValue) -> Result<String, Error> {
    if !value.is_set() {
        return Ok(String::new());
    }
    value
        .def
        .entry(value.value)
        .map(|entry| entry.name.to_owned())
        .ok_or_else(|| {
            Error::UnknownEnumValue(value.def.name.to_owned(), value.value)
        })
}

// Name of an enumerated value qualified with its defining module.
pub fn qualified_enum_name(value: &EnumValue) -> Result<String, Error> {
    if !value.is_set() {
        return Ok(String::new());
    }
    value
        .def
        .entry(value.value)
        .map(|entry| match entry.module.is_empty() {
            true => entry.name.to_owned(),
            false => format!("{}:{}", entry.module, entry.name),
        })
        .ok_or_else(|| {
            Error::UnknownEnumValue(value.def.name.to_owned(), value.value)
        })
}

// Name of an enumerated value suitable for logging. Never fails.
pub fn enum_log_string(value: &EnumValue) -> String {
    match enum_name(value) {
        Ok(name) => name,
        Err(_) => format!(
            "out-of-range {} enum value: {}",
            value.def.name, value.value
        ),
    }
}
