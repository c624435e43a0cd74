//! Claims domain errors

use core_kernel::PortError;
use thiserror::Error;

/// Errors that can occur in the claims domain
#[derive(Debug, Error)]
pub enum ClaimError {
    #[error("Claim not found: {0}")]
    ClaimNotFound(String),

    #[error("Unknown claim status: {0}")]
    UnknownStatus(String),

    #[error("Could not allocate a unique document id after {attempts} attempts")]
    DocumentIdExhausted { attempts: u32 },

    #[error("Repository error: {0}")]
    Repository(#[from] PortError),
}

impl ClaimError {
    /// Returns true if the claim lookup failed
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClaimError::ClaimNotFound(_))
    }
}
