//! Core Kernel - Foundational types for the claims intake system
//!
//! This crate provides the building blocks shared by the domain crates:
//! - Strongly-typed identifiers, including the external claim document number
//! - Port infrastructure for swappable adapters, with their errors and health checks

pub mod identifiers;
pub mod ports;

pub use identifiers::{ClaimId, UserId, DocumentId, DocumentIdError};
pub use ports::{
    PortError, DomainPort, HealthCheckable, HealthCheckResult, AdapterHealth,
};
