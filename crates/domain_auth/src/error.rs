//! Auth domain errors

use thiserror::Error;

/// Errors raised by an [`crate::ports::AuthGateway`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// The server answered and refused the request
    #[error("{}", message.as_deref().unwrap_or("Request rejected"))]
    Rejected { message: Option<String> },

    /// The server could not be reached or answered with garbage
    #[error("Transport error: {0}")]
    Transport(String),
}

impl GatewayError {
    /// Text the server supplied with a rejection, if any
    pub fn server_message(&self) -> Option<&str> {
        match self {
            GatewayError::Rejected { message } => message.as_deref(),
            GatewayError::Transport(_) => None,
        }
    }
}

/// Errors that can occur in the auth domain
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{0}")]
    Validation(String),

    #[error("Invalid or expired OTP")]
    InvalidOtp,

    #[error("Cannot {event} while in {state}")]
    InvalidTransition {
        state: &'static str,
        event: &'static str,
    },

    #[error("A login request is already in flight")]
    Busy,

    #[error("OTP delivery failed: {0}")]
    Delivery(String),

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

impl AuthError {
    pub fn validation(message: impl Into<String>) -> Self {
        AuthError::Validation(message.into())
    }
}
