//! Custom Test Assertions
//!
//! Assertion helpers that give more meaningful failure messages than
//! comparing raw JSON by hand.

use core_kernel::DocumentId;
use serde_json::Value;

/// Asserts that a document number has the `^[0-9]{8}[A-Z0-9]{2}$` shape
pub fn assert_document_id_format(value: &str) {
    assert!(
        DocumentId::is_well_formed(value),
        "Expected document id of 8 digits and 2 uppercase alphanumerics, got {:?}",
        value
    );
}

/// Asserts that a response body is a success envelope
pub fn assert_success_envelope(body: &Value) {
    assert_eq!(
        body.get("success"),
        Some(&Value::Bool(true)),
        "Expected success envelope, got {}",
        body
    );
}

/// Asserts that a response body is an error envelope with the given message
///
/// # Panics
///
/// Panics if `success` is not `false` or `error` differs from `expected_error`
pub fn assert_error_envelope(body: &Value, expected_error: &str) {
    assert_eq!(
        body.get("success"),
        Some(&Value::Bool(false)),
        "Expected error envelope, got {}",
        body
    );
    assert_eq!(
        body.get("error").and_then(Value::as_str),
        Some(expected_error),
        "Unexpected error message in {}",
        body
    );
}

/// Asserts that a claim summary carries the expected status
pub fn assert_claim_status(body: &Value, expected_status: &str) {
    assert_eq!(
        body["claim"]["status"].as_str(),
        Some(expected_status),
        "Unexpected claim status in {}",
        body
    );
}
