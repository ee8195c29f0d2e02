//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use yanggen_runtime::{enum_log_string, enum_name, qualified_enum_name};

use super::{MODE, afi, child, mode};

#[test]
fn test_enum_name() {
    assert_eq!(enum_name(&mode(1)).unwrap(), "UP");
    assert_eq!(enum_name(&mode(0)).unwrap(), "");
    assert_eq!(qualified_enum_name(&afi(2)).unwrap(), "test-types:IPV6");
    assert_eq!(MODE.value_of("DOWN"), Some(2));

    let error = enum_name(&mode(42)).unwrap_err();
    assert_eq!(
        error.to_string(),
        "invalid value 42 for enumerated type Test_Mode"
    );
}

#[test]
fn test_enum_log_string() {
    assert_eq!(enum_log_string(&mode(2)), "DOWN");
    assert_eq!(
        enum_log_string(&mode(42)),
        "out-of-range Test_Mode enum value: 42"
    );
}

#[test]
fn test_enum_field_values() {
    // Values outside the enumeration are rejected.
    assert!(child().with("mode", mode(3)).is_err());

    // A field only accepts its own enumerated type.
    let error = child().with("mode", afi(1)).unwrap_err();
    assert_eq!(
        error.to_string(),
        "invalid value for field mode of struct Device_Child, expected enumeration Test_Mode"
    );

    // Unions only accept the enumerated types they were generated with.
    let error = child().with("value", afi(1)).unwrap_err();
    assert_eq!(
        error.to_string(),
        "cannot map enumerated value as type TestTypes_Afi was unknown"
    );
    assert!(child().with("value", mode(1)).is_ok());
}
