//! Pre-built Test Fixtures
//!
//! Ready-to-use request payloads and login inputs. Values are fixed so test
//! failures are reproducible.

use serde_json::{json, Map, Value};

/// Fixture for claim request payloads
pub struct ClaimFixtures;

impl ClaimFixtures {
    /// Insurance reference used by the worked example
    pub fn insurance_id() -> &'static str {
        "INS1"
    }

    /// A realistic crop claim form
    pub fn form_data() -> Map<String, Value> {
        let mut form = Map::new();
        form.insert("farmerName".to_string(), json!("Ravi Patil"));
        form.insert("cropType".to_string(), json!("soybean"));
        form.insert("parcelId".to_string(), json!("PARCEL001"));
        form.insert("claimedDamagePercent".to_string(), json!(40));
        form.insert("sumInsured".to_string(), json!(100000));
        form
    }

    /// Body for POST /initialize
    pub fn initialize_body() -> Value {
        json!({
            "insuranceId": Self::insurance_id(),
            "formData": Value::Object(Self::form_data()),
        })
    }

    /// Captured photos as the front end uploads them
    pub fn media() -> Value {
        json!({
            "corner1": {"url": "uploads/c1.jpg", "lat": 19.1231, "lon": 72.4561},
            "corner2": {"url": "uploads/c2.jpg", "lat": 19.1242, "lon": 72.4572},
            "corner3": {"url": "uploads/c3.jpg", "lat": 19.1253, "lon": 72.4583},
            "corner4": {"url": "uploads/c4.jpg", "lat": 19.1264, "lon": 72.4594},
            "damage": {"url": "uploads/damage.jpg"}
        })
    }

    /// Assessment output as the front end forwards it
    pub fn processing_result() -> Value {
        json!({
            "overallAssessment": {
                "finalDecision": "MANUAL_REVIEW",
                "confidenceScore": 0.62,
                "riskLevel": "medium"
            }
        })
    }

    /// Body for POST /complete
    pub fn complete_body(document_id: &str) -> Value {
        json!({
            "documentId": document_id,
            "media": Self::media(),
            "processingResult": Self::processing_result(),
        })
    }
}

/// Fixture for login inputs
pub struct LoginFixtures;

impl LoginFixtures {
    /// A mobile number accepted by the phone pattern
    pub fn valid_phone() -> &'static str {
        "9876543210"
    }

    /// Ten digits but the leading digit is outside 6-9
    pub fn invalid_leading_digit_phone() -> &'static str {
        "5123456789"
    }

    /// Too short
    pub fn short_phone() -> &'static str {
        "98765"
    }

    /// A well-formed OTP
    pub fn valid_otp() -> &'static str {
        "123456"
    }

    /// Five digits
    pub fn short_otp() -> &'static str {
        "12345"
    }
}
