//! Claims application service
//!
//! Orchestrates the intake operations over the repository port and the
//! document number generator.

use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{info, warn};

use core_kernel::DocumentId;

use crate::claim::{Claim, ClaimSummary};
use crate::document_id::{DocumentIdGenerator, RandomDocumentIdGenerator};
use crate::error::ClaimError;
use crate::listing::{ClaimListing, ListQuery};
use crate::ports::ClaimsRepository;
use crate::results::ClaimResult;

/// Attempts at drawing an unused document number before giving up
pub const MAX_DOCUMENT_ID_ATTEMPTS: u32 = 5;

/// Input for opening a draft claim
#[derive(Debug, Clone, Default)]
pub struct InitializeClaim {
    pub insurance_id: Value,
    pub form_data: Map<String, Value>,
}

/// Input for submitting a claim
#[derive(Debug, Clone)]
pub struct CompleteClaim {
    pub document_id: DocumentId,
    pub media: Value,
    pub processing_result: Value,
}

/// Service for the claim intake lifecycle
#[derive(Clone)]
pub struct ClaimsService {
    repository: Arc<dyn ClaimsRepository>,
    document_ids: Arc<dyn DocumentIdGenerator>,
}

impl ClaimsService {
    /// Creates a service using random document numbers
    pub fn new(repository: Arc<dyn ClaimsRepository>) -> Self {
        Self::with_generator(repository, Arc::new(RandomDocumentIdGenerator::new()))
    }

    /// Creates a service with a specific document number generator
    pub fn with_generator(
        repository: Arc<dyn ClaimsRepository>,
        document_ids: Arc<dyn DocumentIdGenerator>,
    ) -> Self {
        Self {
            repository,
            document_ids,
        }
    }

    /// The underlying repository
    pub fn repository(&self) -> &Arc<dyn ClaimsRepository> {
        &self.repository
    }

    /// Lists claims matching the query's status filter
    ///
    /// Every matching claim is returned; page and limit only drive the
    /// pagination summary.
    pub async fn list(&self, query: &ListQuery) -> Result<ClaimListing, ClaimError> {
        let claims = self.repository.list().await?;
        Ok(query.apply(claims))
    }

    /// Opens a draft claim
    ///
    /// # Errors
    ///
    /// `ClaimError::DocumentIdExhausted` if every drawn document number was
    /// already taken
    pub async fn initialize(&self, request: InitializeClaim) -> Result<ClaimSummary, ClaimError> {
        for attempt in 1..=MAX_DOCUMENT_ID_ATTEMPTS {
            let claim = Claim::draft(
                self.document_ids.generate(),
                request.insurance_id.clone(),
                request.form_data.clone(),
            );
            let summary = claim.summary();

            match self.repository.insert(claim).await {
                Ok(()) => {
                    info!(
                        claim_id = %summary.id,
                        document_id = %summary.document_id,
                        insurance_id = %request.insurance_id,
                        "Claim initialized"
                    );
                    return Ok(summary);
                }
                Err(e) if e.is_conflict() => {
                    warn!(
                        document_id = %summary.document_id,
                        attempt,
                        "Document id collision, drawing another"
                    );
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(ClaimError::DocumentIdExhausted {
            attempts: MAX_DOCUMENT_ID_ATTEMPTS,
        })
    }

    /// Attaches media and processing output and marks the claim submitted
    ///
    /// # Errors
    ///
    /// `ClaimError::ClaimNotFound` if no claim has the document number; the
    /// store is left untouched
    pub async fn complete(&self, request: CompleteClaim) -> Result<ClaimSummary, ClaimError> {
        let mut claim = self
            .repository
            .find_by_document_id(&request.document_id)
            .await?
            .ok_or_else(|| {
                warn!(document_id = %request.document_id, "Completion for unknown claim");
                ClaimError::ClaimNotFound(request.document_id.to_string())
            })?;

        claim.submit(request.media, request.processing_result);
        self.repository.update(&claim).await?;

        info!(
            claim_id = %claim.id,
            document_id = %claim.document_id,
            "Claim submitted"
        );
        Ok(claim.summary())
    }

    /// Result for a document number
    ///
    /// Stored claims are not consulted; see [`ClaimResult::sample`].
    pub fn results(&self, document_id: DocumentId) -> ClaimResult {
        ClaimResult::sample(document_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use crate::adapters::memory::InMemoryClaimsRepository;
    use crate::claim::ClaimStatus;

    /// Hands out a fixed sequence of document numbers, then repeats the last
    struct ScriptedIds(Mutex<Vec<&'static str>>);

    impl DocumentIdGenerator for ScriptedIds {
        fn generate(&self) -> DocumentId {
            let mut ids = self.0.lock().unwrap();
            let next = if ids.len() > 1 { ids.remove(0) } else { ids[0] };
            DocumentId::new(next)
        }
    }

    fn service_with(repo: InMemoryClaimsRepository, ids: Vec<&'static str>) -> ClaimsService {
        ClaimsService::with_generator(Arc::new(repo), Arc::new(ScriptedIds(Mutex::new(ids))))
    }

    #[tokio::test]
    async fn test_initialize_retries_on_collision() {
        let repo = InMemoryClaimsRepository::new();
        let service = service_with(repo.clone(), vec!["00000001AA", "00000001AA", "00000002BB"]);

        let first = service.initialize(InitializeClaim::default()).await.unwrap();
        let second = service.initialize(InitializeClaim::default()).await.unwrap();

        assert_eq!(first.document_id.as_str(), "00000001AA");
        assert_eq!(second.document_id.as_str(), "00000002BB");
        assert_eq!(repo.len().await, 2);
    }

    #[tokio::test]
    async fn test_initialize_gives_up_after_max_attempts() {
        let repo = InMemoryClaimsRepository::new();
        let service = service_with(repo.clone(), vec!["00000001AA"]);

        service.initialize(InitializeClaim::default()).await.unwrap();
        let err = service.initialize(InitializeClaim::default()).await.unwrap_err();

        assert!(matches!(
            err,
            ClaimError::DocumentIdExhausted { attempts: MAX_DOCUMENT_ID_ATTEMPTS }
        ));
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_complete_marks_submitted() {
        let repo = InMemoryClaimsRepository::new();
        let service = service_with(repo.clone(), vec!["00000001AA"]);
        let draft = service.initialize(InitializeClaim::default()).await.unwrap();

        let done = service
            .complete(CompleteClaim {
                document_id: draft.document_id.clone(),
                media: serde_json::json!({}),
                processing_result: serde_json::json!({}),
            })
            .await
            .unwrap();

        assert_eq!(done.id, draft.id);
        assert_eq!(done.status, ClaimStatus::Submitted);
    }
}
