//! HTTP API Layer
//!
//! REST surface of the claims intake backend, built on Axum.
//!
//! # Architecture
//!
//! - **Handlers**: claims intake, OTP login, health
//! - **Middleware**: caller identification, audit logging, tracing
//! - **DTOs**: camelCase request/response bodies
//! - **Error Handling**: every failure renders as `{success: false, error, details?}`
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, AppState};
//!
//! let app = create_router(AppState::new(config));
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod handlers;
pub mod dto;
pub mod auth;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
    middleware as axum_middleware,
};
use chrono::Duration;
use tower_http::trace::TraceLayer;
use tower_http::cors::{CorsLayer, Any};

use domain_auth::{LoggingOtpSender, OtpIssuer, OtpSender};
use domain_claims::{ClaimsService, InMemoryClaimsRepository};

use crate::config::ApiConfig;
use crate::middleware::{identity_middleware, audit_middleware};
use crate::handlers::{auth as auth_handlers, claims, health};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub claims: ClaimsService,
    pub otp: Arc<OtpIssuer>,
    pub config: ApiConfig,
}

impl AppState {
    /// In-memory claims store; OTP codes are written to the log
    pub fn new(config: ApiConfig) -> Self {
        Self::with_otp_sender(config, Arc::new(LoggingOtpSender))
    }

    /// In-memory claims store with a specific OTP delivery channel
    pub fn with_otp_sender(config: ApiConfig, sender: Arc<dyn OtpSender>) -> Self {
        let claims = ClaimsService::new(Arc::new(InMemoryClaimsRepository::new()));
        let otp = Arc::new(OtpIssuer::new(sender, Duration::seconds(config.otp_ttl_secs as i64)));
        Self { claims, otp, config }
    }
}

/// Creates the main API router
///
/// Health routes sit at the root; claims and auth routes are nested under
/// `/api`.
pub fn create_router(state: AppState) -> Router {
    // Public routes
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    // Claims routes
    let claims_routes = Router::new()
        .route("/list", get(claims::list_claims))
        .route("/initialize", post(claims::initialize_claim))
        .route("/complete", post(claims::complete_claim))
        .route("/results/:document_id", get(claims::claim_results));

    // Auth routes
    let auth_routes = Router::new()
        .route("/send-otp", post(auth_handlers::send_otp))
        .route("/verify-otp", post(auth_handlers::verify_otp));

    let api_routes = Router::new()
        .nest("/claims", claims_routes)
        .nest("/auth", auth_routes)
        .layer(axum_middleware::from_fn(audit_middleware))
        .layer(axum_middleware::from_fn_with_state(state.clone(), identity_middleware));

    // Combine all routes
    Router::new()
        .merge(public_routes)
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
