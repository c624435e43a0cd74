//! Claim result lookup
//!
//! Result retrieval is not wired to stored claims yet. [`ClaimResult::sample`]
//! returns a fixed assessment in the shape the front end renders, echoing only
//! the requested document number.

use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;

use core_kernel::DocumentId;

use crate::claim::ClaimStatus;

const SAMPLE_CLAIM_ID: &str = "0190f5a2-7c3e-7b1a-9d44-5e2c81f0a6b3";
const SAMPLE_INSURANCE_ID: &str = "PMFBY-2024-000123";
const SAMPLE_LATITUDE: f64 = 19.0760;
const SAMPLE_LONGITUDE: f64 = 72.8777;

/// Outcome of a processing phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PhaseStatus {
    Completed,
    Skipped,
    Failed,
}

/// Final decision on a claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Decision {
    Approve,
    ManualReview,
    Reject,
}

impl Decision {
    /// Risk level reported with the decision
    pub fn risk(&self) -> RiskLevel {
        match self {
            Decision::Approve => RiskLevel::Low,
            Decision::ManualReview => RiskLevel::Medium,
            Decision::Reject => RiskLevel::High,
        }
    }

    /// Follow-up action for the decision
    pub fn action(&self) -> &'static str {
        match self {
            Decision::Approve => "APPROVE_CLAIM",
            Decision::ManualReview => "SCHEDULE_MANUAL_REVIEW",
            Decision::Reject => "REJECT_CLAIM",
        }
    }
}

/// Risk level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// Result of one processing phase
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseResult {
    pub status: PhaseStatus,
    pub score: f64,
    pub summary: String,
}

impl PhaseResult {
    fn completed(score: f64, summary: &str) -> Self {
        Self {
            status: PhaseStatus::Completed,
            score,
            summary: summary.to_string(),
        }
    }
}

/// Overall verdict
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalAssessment {
    pub decision: Decision,
    pub risk: RiskLevel,
    pub confidence: f64,
    pub action: String,
    pub manual_review_required: bool,
}

/// Processing output: five phases and a verdict
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentResult {
    pub authentication: PhaseResult,
    pub damage_assessment: PhaseResult,
    pub fraud_detection: PhaseResult,
    pub scoring: PhaseResult,
    pub decision: PhaseResult,
    #[serde(rename = "final")]
    pub final_assessment: FinalAssessment,
}

/// One captured photo
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaEntry {
    pub url: String,
    pub latitude: f64,
    pub longitude: f64,
    pub captured_at: DateTime<Utc>,
}

/// Photos keyed by shot position
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MediaSet {
    pub corner1: MediaEntry,
    pub corner2: MediaEntry,
    pub corner3: MediaEntry,
    pub corner4: MediaEntry,
    pub damage: MediaEntry,
    pub overview: MediaEntry,
}

/// Claim as returned by the results lookup
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimResult {
    pub id: String,
    pub document_id: DocumentId,
    pub insurance_id: String,
    pub status: ClaimStatus,
    pub created_at: DateTime<Utc>,
    pub submitted_at: DateTime<Utc>,
    pub media: MediaSet,
    pub processing_result: AssessmentResult,
}

impl ClaimResult {
    /// The fixed sample result for `document_id`
    pub fn sample(document_id: DocumentId) -> Self {
        let created_at = fixed_time(10, 30);
        let submitted_at = fixed_time(10, 45);
        let decision = Decision::Approve;

        Self {
            id: SAMPLE_CLAIM_ID.to_string(),
            document_id,
            insurance_id: SAMPLE_INSURANCE_ID.to_string(),
            status: ClaimStatus::Submitted,
            created_at,
            submitted_at,
            media: MediaSet {
                corner1: placeholder("Corner+1", 0.0001, 0.0001, fixed_time(10, 32)),
                corner2: placeholder("Corner+2", 0.0001, -0.0001, fixed_time(10, 34)),
                corner3: placeholder("Corner+3", -0.0001, -0.0001, fixed_time(10, 36)),
                corner4: placeholder("Corner+4", -0.0001, 0.0001, fixed_time(10, 38)),
                damage: placeholder("Damage", 0.0, 0.0, fixed_time(10, 40)),
                overview: placeholder("Overview", 0.0, 0.0, fixed_time(10, 42)),
            },
            processing_result: AssessmentResult {
                authentication: PhaseResult::completed(0.92, "All corner photos inside the parcel boundary"),
                damage_assessment: PhaseResult::completed(0.81, "Moderate crop damage, 35% affected area"),
                fraud_detection: PhaseResult::completed(0.88, "No fraud indicators found"),
                scoring: PhaseResult::completed(0.85, "Weighted confidence above approval threshold"),
                decision: PhaseResult::completed(0.85, "Eligible for automatic approval"),
                final_assessment: FinalAssessment {
                    decision,
                    risk: decision.risk(),
                    confidence: 0.85,
                    action: decision.action().to_string(),
                    manual_review_required: false,
                },
            },
        }
    }
}

fn placeholder(label: &str, d_lat: f64, d_lon: f64, captured_at: DateTime<Utc>) -> MediaEntry {
    MediaEntry {
        url: format!("https://placehold.co/600x400?text={}", label),
        latitude: SAMPLE_LATITUDE + d_lat,
        longitude: SAMPLE_LONGITUDE + d_lon,
        captured_at,
    }
}

fn fixed_time(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 15, hour, minute, 0)
        .single()
        .unwrap_or_default()
}
