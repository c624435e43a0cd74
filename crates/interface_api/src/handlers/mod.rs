//! Route handlers

pub mod claims;
pub mod auth;
pub mod health;
