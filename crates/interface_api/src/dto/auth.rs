//! Auth DTOs

use serde::{Deserialize, Serialize};
use validator::Validate;

use domain_auth::{AuthUser, OTP_PATTERN, PHONE_PATTERN};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SendOtpRequest {
    #[validate(regex(path = *PHONE_PATTERN, message = "Please enter a valid 10-digit mobile number"))]
    pub phone_number: String,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOtpRequest {
    #[validate(regex(path = *PHONE_PATTERN, message = "Please enter a valid 10-digit mobile number"))]
    pub phone_number: String,
    #[validate(regex(path = *OTP_PATTERN, message = "Please enter a valid 6-digit OTP"))]
    pub otp: String,
}

#[derive(Debug, Serialize)]
pub struct SendOtpResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct VerifyOtpResponse {
    pub success: bool,
    pub token: String,
    pub user: AuthUser,
}
