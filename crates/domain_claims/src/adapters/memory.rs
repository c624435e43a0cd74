//! In-memory claims repository
//!
//! Claims are held in a vector behind a `tokio::sync::RwLock`. Each call
//! is atomic on its own; a find followed by an update is not, so concurrent
//! completions of one claim resolve as last writer wins.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use core_kernel::{
    AdapterHealth, DocumentId, DomainPort, HealthCheckResult, HealthCheckable, PortError,
};

use crate::claim::Claim;
use crate::ports::ClaimsRepository;

/// Process-local claims store
#[derive(Debug, Default, Clone)]
pub struct InMemoryClaimsRepository {
    claims: Arc<RwLock<Vec<Claim>>>,
}

impl InMemoryClaimsRepository {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populates the store, keeping the given order
    pub fn with_claims(claims: Vec<Claim>) -> Self {
        Self {
            claims: Arc::new(RwLock::new(claims)),
        }
    }

    /// Number of stored claims
    pub async fn len(&self) -> usize {
        self.claims.read().await.len()
    }
}

impl DomainPort for InMemoryClaimsRepository {}

#[async_trait]
impl HealthCheckable for InMemoryClaimsRepository {
    async fn health_check(&self) -> HealthCheckResult {
        let count = self.claims.read().await.len();
        HealthCheckResult {
            adapter_id: "in-memory-claims".to_string(),
            status: AdapterHealth::Healthy,
            latency_ms: 0,
            message: Some(format!("{} claims held in memory", count)),
            checked_at: Utc::now(),
        }
    }
}

#[async_trait]
impl ClaimsRepository for InMemoryClaimsRepository {
    async fn list(&self) -> Result<Vec<Claim>, PortError> {
        Ok(self.claims.read().await.clone())
    }

    async fn insert(&self, claim: Claim) -> Result<(), PortError> {
        let mut claims = self.claims.write().await;
        if claims.iter().any(|c| c.document_id == claim.document_id) {
            return Err(PortError::conflict(format!(
                "document id {} already assigned",
                claim.document_id
            )));
        }
        claims.push(claim);
        Ok(())
    }

    async fn find_by_document_id(
        &self,
        document_id: &DocumentId,
    ) -> Result<Option<Claim>, PortError> {
        Ok(self
            .claims
            .read()
            .await
            .iter()
            .find(|c| &c.document_id == document_id)
            .cloned())
    }

    async fn update(&self, claim: &Claim) -> Result<(), PortError> {
        let mut claims = self.claims.write().await;
        let slot = claims
            .iter_mut()
            .find(|c| c.id == claim.id)
            .ok_or_else(|| PortError::not_found("Claim", claim.id))?;
        *slot = claim.clone();
        Ok(())
    }
}
