//! API error handling

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    extract::{FromRequest, FromRequestParts, Query},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use domain_auth::AuthError;
use domain_claims::ClaimError;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("{message}: {details}")]
    Internal { message: String, details: String },
}

impl ApiError {
    /// Unexpected fault with a fixed public message and the cause in `details`
    pub fn internal(message: impl Into<String>, cause: impl std::fmt::Display) -> Self {
        ApiError::Internal {
            message: message.into(),
            details: cause.to_string(),
        }
    }

    /// Maps a claims failure, using `context` as the message for faults
    pub fn from_claim_error(context: &str, err: ClaimError) -> Self {
        if err.is_not_found() {
            ApiError::NotFound("Claim not found".to_string())
        } else {
            ApiError::internal(context, err)
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, details) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, None),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, None),
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, msg, None),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg, None),
            ApiError::Internal { message, details } => {
                error!(error = %message, details = %details, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, message, Some(details))
            }
        };

        let body = ErrorResponse {
            success: false,
            error: message,
            details,
        };

        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .into_values()
            .flat_map(|errs| errs.iter())
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string())
            })
            .collect();
        messages.sort();
        ApiError::Validation(messages.join("; "))
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Validation(msg) => ApiError::Validation(msg),
            AuthError::InvalidOtp => ApiError::Unauthorized(AuthError::InvalidOtp.to_string()),
            err @ AuthError::Delivery(_) => ApiError::internal("Failed to send OTP", err),
            other => ApiError::internal("Authentication failed", other),
        }
    }
}

/// `Json` extractor whose rejection renders as an [`ApiError`]
#[derive(Debug, FromRequest)]
#[from_request(via(Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// `Query` extractor whose rejection renders as an [`ApiError`]
#[derive(Debug, FromRequestParts)]
#[from_request(via(Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);
