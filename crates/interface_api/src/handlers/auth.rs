//! OTP login handlers

use axum::{extract::State, Json};
use validator::Validate;

use domain_auth::{OtpCode, PhoneNumber};

use crate::{AppState, error::{ApiError, ApiJson}};
use crate::auth::create_token;
use crate::dto::auth::*;

/// Issues a one-time code for a phone number
pub async fn send_otp(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<SendOtpRequest>,
) -> Result<Json<SendOtpResponse>, ApiError> {
    request.validate()?;
    let phone = PhoneNumber::parse(&request.phone_number)?;

    state.otp.issue(&phone).await?;

    Ok(Json(SendOtpResponse {
        success: true,
        message: "OTP sent successfully".to_string(),
    }))
}

/// Exchanges a valid code for a signed token
pub async fn verify_otp(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<VerifyOtpRequest>,
) -> Result<Json<VerifyOtpResponse>, ApiError> {
    request.validate()?;
    let phone = PhoneNumber::parse(&request.phone_number)?;
    let otp = OtpCode::parse(&request.otp)?;

    let user = state.otp.verify(&phone, &otp).await?;

    let token = create_token(&user, &state.config.jwt_secret, state.config.jwt_expiration_secs)
        .map_err(|e| ApiError::internal("Failed to issue token", e))?;

    Ok(Json(VerifyOtpResponse {
        success: true,
        token,
        user,
    }))
}
