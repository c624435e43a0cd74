//! Claims handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::warn;

use core_kernel::DocumentId;
use domain_claims::{CompleteClaim, InitializeClaim, ListQuery};

use crate::{AppState, error::{ApiError, ApiJson, ApiQuery}};
use crate::dto::claims::*;

/// Lists claims, optionally filtered by status
pub async fn list_claims(
    State(state): State<AppState>,
    ApiQuery(pairs): ApiQuery<Vec<(String, String)>>,
) -> Result<Json<ClaimListResponse>, ApiError> {
    let params = ListClaimsParams::from_pairs(pairs);
    let query = ListQuery::from_raw(
        params.status.as_deref(),
        params.page.as_deref(),
        params.limit.as_deref(),
    );

    let listing = state
        .claims
        .list(&query)
        .await
        .map_err(|e| ApiError::internal("Failed to fetch claims", e))?;

    Ok(Json(ClaimListResponse {
        success: true,
        claims: listing.claims,
        pagination: listing.pagination,
    }))
}

/// Opens a draft claim
pub async fn initialize_claim(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<InitializeClaimRequest>,
) -> Result<(StatusCode, Json<ClaimActionResponse>), ApiError> {
    let summary = state
        .claims
        .initialize(InitializeClaim {
            insurance_id: request.insurance_id,
            form_data: request.form_data.unwrap_or_default(),
        })
        .await
        .map_err(|e| ApiError::from_claim_error("Failed to initialize claim", e))?;

    Ok((
        StatusCode::CREATED,
        Json(ClaimActionResponse::new("Claim initialized successfully", summary)),
    ))
}

/// Attaches media and processing results and submits the claim
pub async fn complete_claim(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CompleteClaimRequest>,
) -> Result<Json<ClaimActionResponse>, ApiError> {
    let summary = state
        .claims
        .complete(CompleteClaim {
            document_id: request.document_id,
            media: request.media,
            processing_result: request.processing_result,
        })
        .await
        .map_err(|e| ApiError::from_claim_error("Failed to complete claim", e))?;

    Ok(Json(ClaimActionResponse::new("Claim submitted successfully", summary)))
}

/// Returns the assessment result for a document number
pub async fn claim_results(
    State(state): State<AppState>,
    Path(document_id): Path<String>,
) -> Json<ClaimResultResponse> {
    let document_id = DocumentId::new(document_id);
    if !DocumentId::is_well_formed(document_id.as_str()) {
        warn!(document_id = %document_id, "Results requested for malformed document id");
    }

    Json(ClaimResultResponse {
        success: true,
        claim: state.claims.results(document_id),
    })
}
