//! Claims DTOs

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use core_kernel::DocumentId;
use domain_claims::{Claim, ClaimResult, ClaimSummary, Pagination};

/// Query string of `GET /list`; values are parsed leniently downstream
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ListClaimsParams {
    pub status: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl ListClaimsParams {
    /// Builds the params from raw query pairs. A repeated key keeps its first value
    /// and unknown keys are ignored.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "status" => &mut params.status,
                "page" => &mut params.page,
                "limit" => &mut params.limit,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        params
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeClaimRequest {
    pub insurance_id: Value,
    #[serde(default)]
    pub form_data: Option<Map<String, Value>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteClaimRequest {
    pub document_id: DocumentId,
    #[serde(default)]
    pub media: Value,
    #[serde(default)]
    pub processing_result: Value,
}

#[derive(Debug, Serialize)]
pub struct ClaimListResponse {
    pub success: bool,
    pub claims: Vec<Claim>,
    pub pagination: Pagination,
}

/// Response of initialize and complete
#[derive(Debug, Serialize)]
pub struct ClaimActionResponse {
    pub success: bool,
    pub message: String,
    pub claim: ClaimSummary,
}

impl ClaimActionResponse {
    pub fn new(message: &str, claim: ClaimSummary) -> Self {
        Self {
            success: true,
            message: message.to_string(),
            claim,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ClaimResultResponse {
    pub success: bool,
    pub claim: ClaimResult,
}
