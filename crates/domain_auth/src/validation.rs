//! Phone number and OTP validation
//!
//! The same patterns gate the login form and the server's auth endpoints.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::AuthError;

/// Indian mobile numbers: ten digits, leading digit 6-9
pub static PHONE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[6-9][0-9]{9}$").expect("phone pattern is valid"));

/// Exactly six digits
pub static OTP_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{6}$").expect("otp pattern is valid"));

pub const INVALID_PHONE_MESSAGE: &str = "Please enter a valid 10-digit mobile number";
pub const INVALID_OTP_MESSAGE: &str = "Please enter a valid 6-digit OTP";

/// A validated mobile number
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Validates user input
    ///
    /// # Errors
    ///
    /// `AuthError::Validation` unless the input matches [`PHONE_PATTERN`]
    pub fn parse(input: &str) -> Result<Self, AuthError> {
        if PHONE_PATTERN.is_match(input) {
            Ok(Self(input.to_string()))
        } else {
            Err(AuthError::validation(INVALID_PHONE_MESSAGE))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Last four digits only, for logs
    pub fn masked(&self) -> String {
        format!("******{}", &self.0[6..])
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for PhoneNumber {
    type Error = AuthError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<PhoneNumber> for String {
    fn from(phone: PhoneNumber) -> String {
        phone.0
    }
}

/// A six-digit one-time code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpCode(String);

impl OtpCode {
    /// Validates user input
    ///
    /// # Errors
    ///
    /// `AuthError::Validation` unless the input matches [`OTP_PATTERN`]
    pub fn parse(input: &str) -> Result<Self, AuthError> {
        if OTP_PATTERN.is_match(input) {
            Ok(Self(input.to_string()))
        } else {
            Err(AuthError::validation(INVALID_OTP_MESSAGE))
        }
    }

    /// Builds a code from a number below one million, zero-padded
    pub fn from_number(value: u32) -> Self {
        Self(format!("{:06}", value % 1_000_000))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
