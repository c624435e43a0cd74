//! API middleware

use axum::{
    body::Body,
    extract::State,
    http::{header::AUTHORIZATION, Request},
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use tracing::{debug, info};

use crate::AppState;
use crate::auth::{bearer_token, validate_token, TokenClaims};

/// Identification middleware
///
/// Attaches [`TokenClaims`] to the request when it carries a valid bearer
/// token. Requests without one pass through unchanged.
pub async fn identity_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(bearer_token)
        .map(str::to_owned);

    if let Some(token) = token {
        match validate_token(&token, &state.config.jwt_secret) {
            Ok(claims) => {
                request.extensions_mut().insert(claims);
            }
            Err(e) => debug!(error = %e, "Ignoring bearer token"),
        }
    }

    next.run(request).await
}

/// Audit logging middleware
///
/// Logs every API request with the caller's user id, or `anonymous`
pub async fn audit_middleware(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let user_id = request
        .extensions()
        .get::<TokenClaims>()
        .map(|c| c.sub.clone())
        .unwrap_or_else(|| "anonymous".to_string());

    let start = Utc::now();

    let response = next.run(request).await;

    let duration = Utc::now() - start;
    let status = response.status();

    info!(
        method = %method,
        uri = %uri,
        user = %user_id,
        status = %status.as_u16(),
        duration_ms = duration.num_milliseconds(),
        "API request"
    );

    response
}
