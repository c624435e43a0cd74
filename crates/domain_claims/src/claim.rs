//! Claim entity

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use core_kernel::{ClaimId, DocumentId};
use crate::error::ClaimError;

/// Claim status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClaimStatus {
    /// Opened by initialize, awaiting media
    Draft,
    /// Media and processing output attached
    Submitted,
}

impl ClaimStatus {
    /// Wire representation of the status
    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimStatus::Draft => "draft",
            ClaimStatus::Submitted => "submitted",
        }
    }
}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClaimStatus {
    type Err = ClaimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(ClaimStatus::Draft),
            "submitted" => Ok(ClaimStatus::Submitted),
            other => Err(ClaimError::UnknownStatus(other.to_string())),
        }
    }
}

/// An insurance claim captured by the intake flow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claim {
    /// Internal identifier, time-ordered
    pub id: ClaimId,
    /// External lookup key, assigned once at creation
    pub document_id: DocumentId,
    /// Caller-supplied insurance reference, any JSON value
    pub insurance_id: Value,
    /// Caller-supplied form fields
    pub form_data: Map<String, Value>,
    /// Status
    pub status: ClaimStatus,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Set by the most recent completion
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<DateTime<Utc>>,
    /// Captured media, opaque to this domain
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media: Option<Value>,
    /// Assessment output, opaque to this domain
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processing_result: Option<Value>,
}

impl Claim {
    /// Opens a new draft claim
    pub fn draft(
        document_id: DocumentId,
        insurance_id: impl Into<Value>,
        form_data: Map<String, Value>,
    ) -> Self {
        Self {
            id: ClaimId::new_v7(),
            document_id,
            insurance_id: insurance_id.into(),
            form_data,
            status: ClaimStatus::Draft,
            created_at: Utc::now(),
            submitted_at: None,
            media: None,
            processing_result: None,
        }
    }

    /// Attaches media and processing output and marks the claim submitted
    ///
    /// Submitting again overwrites the payloads and the submission time;
    /// the status stays `Submitted`.
    pub fn submit(&mut self, media: Value, processing_result: Value) {
        self.media = Some(media);
        self.processing_result = Some(processing_result);
        self.status = ClaimStatus::Submitted;
        self.submitted_at = Some(Utc::now());
    }

    /// Returns true once the claim has been submitted
    pub fn is_submitted(&self) -> bool {
        self.status == ClaimStatus::Submitted
    }

    /// The short form returned by initialize and complete
    pub fn summary(&self) -> ClaimSummary {
        ClaimSummary::from(self)
    }
}

/// Identifiers and status of a claim
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimSummary {
    pub id: ClaimId,
    pub document_id: DocumentId,
    pub status: ClaimStatus,
}

impl From<&Claim> for ClaimSummary {
    fn from(claim: &Claim) -> Self {
        Self {
            id: claim.id,
            document_id: claim.document_id.clone(),
            status: claim.status,
        }
    }
}
