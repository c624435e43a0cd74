//! Adapters for the claims repository port
//!
//! - **InMemoryClaimsRepository**: process-local store; contents are lost on restart

pub mod memory;

pub use memory::InMemoryClaimsRepository;
