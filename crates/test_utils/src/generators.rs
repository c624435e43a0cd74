//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating request inputs on both sides
//! of the validation rules.

use proptest::prelude::*;
use serde_json::{Map, Value};

/// Strategy for caller-supplied insurance references, strings or bare numbers
pub fn insurance_id_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        "[A-Z]{3}[0-9]{1,8}".prop_map(Value::from),
        "PMFBY-[0-9]{4}-[0-9]{6}".prop_map(Value::from),
        ".{0,24}".prop_map(Value::from),
        any::<u32>().prop_map(Value::from),
    ]
}

/// Strategy for flat form data objects
pub fn form_data_strategy() -> impl Strategy<Value = Map<String, Value>> {
    prop::collection::btree_map(
        "[a-z][a-zA-Z]{0,11}",
        prop_oneof![
            any::<i64>().prop_map(Value::from),
            "[ -~]{0,16}".prop_map(Value::from),
            any::<bool>().prop_map(Value::from),
        ],
        0..6,
    )
    .prop_map(|fields| fields.into_iter().collect())
}

/// Strategy for mobile numbers matching `^[6-9][0-9]{9}$`
pub fn valid_phone_strategy() -> impl Strategy<Value = String> {
    "[6-9][0-9]{9}"
}

/// Strategy for ten-digit numbers whose leading digit is 0-5
pub fn invalid_leading_digit_phone_strategy() -> impl Strategy<Value = String> {
    "[0-5][0-9]{9}"
}

/// Strategy for digit strings of the wrong length
pub fn wrong_length_phone_strategy() -> impl Strategy<Value = String> {
    prop_oneof!["[6-9][0-9]{0,8}", "[6-9][0-9]{10,14}"]
}

/// Strategy for six-digit OTPs
pub fn valid_otp_strategy() -> impl Strategy<Value = String> {
    "[0-9]{6}"
}

/// Strategy for strings that are not six-digit OTPs
pub fn invalid_otp_strategy() -> impl Strategy<Value = String> {
    prop_oneof!["[0-9]{0,5}", "[0-9]{7,10}", "[0-9]{5}[a-zA-Z]", "[0-9]{3} [0-9]{2}"]
}
