//! Claims Intake Domain
//!
//! This crate implements the claim intake lifecycle: a draft is opened with
//! the caller's form data, then submitted once media and processing output
//! are attached.
//!
//! # Claim Lifecycle
//!
//! ```text
//! initialize -> Draft -> complete -> Submitted (complete may repeat)
//! ```
//!
//! Storage is reached through the [`ports::ClaimsRepository`] port; the
//! in-process adapter lives in [`adapters::memory`].

pub mod claim;
pub mod listing;
pub mod document_id;
pub mod ports;
pub mod adapters;
pub mod results;
pub mod service;
pub mod error;

pub use claim::{Claim, ClaimStatus, ClaimSummary};
pub use listing::{ListQuery, StatusFilter, Pagination, ClaimListing};
pub use document_id::{DocumentIdGenerator, RandomDocumentIdGenerator};
pub use ports::ClaimsRepository;
pub use adapters::memory::InMemoryClaimsRepository;
pub use results::ClaimResult;
pub use service::{ClaimsService, InitializeClaim, CompleteClaim};
pub use error::ClaimError;
