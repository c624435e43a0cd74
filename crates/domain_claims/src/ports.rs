//! Claims Domain Ports
//!
//! The `ClaimsRepository` trait is everything the claims service needs from
//! storage. The in-process adapter in [`crate::adapters::memory`] is the only
//! one shipped; a persistent store can implement the same trait without
//! changing the service or the HTTP handlers.
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use domain_claims::{ClaimsRepository, ClaimsService, InMemoryClaimsRepository};
//!
//! let repository: Arc<dyn ClaimsRepository> = Arc::new(InMemoryClaimsRepository::new());
//! let service = ClaimsService::new(repository);
//! ```

use async_trait::async_trait;

use core_kernel::{DocumentId, DomainPort, HealthCheckable, PortError};

use crate::claim::Claim;

/// Storage port for claims
///
/// Implementations keep claims in creation order.
#[async_trait]
pub trait ClaimsRepository: DomainPort + HealthCheckable {
    /// Returns every stored claim in creation order
    async fn list(&self) -> Result<Vec<Claim>, PortError>;

    /// Appends a new claim
    ///
    /// # Errors
    ///
    /// `PortError::Conflict` if a claim with the same document number exists
    async fn insert(&self, claim: Claim) -> Result<(), PortError>;

    /// Finds the first claim with the given document number
    async fn find_by_document_id(
        &self,
        document_id: &DocumentId,
    ) -> Result<Option<Claim>, PortError>;

    /// Replaces the stored claim that has the same `id`
    ///
    /// # Errors
    ///
    /// `PortError::NotFound` if no claim has that id
    async fn update(&self, claim: &Claim) -> Result<(), PortError>;
}
