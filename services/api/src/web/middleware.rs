//! services/api/src/web/middleware.rs
//!
//! Authentication middleware for protecting write routes.

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::warn;

use crate::web::auth::{bearer_token, verify_token};
use crate::web::state::AppState;

/// Middleware that validates the bearer token before a write reaches its handler.
///
/// Returns 401 Unauthorized when the token is missing or wrong, and for every
/// request when no admin token hash is configured.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    req: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    // 1. Extract the bearer token
    let token = bearer_token(req.headers()).ok_or_else(|| {
        warn!(method = %req.method(), path = %req.uri().path(), "Write rejected: no bearer token");
        StatusCode::UNAUTHORIZED
    })?;

    // 2. Writes are disabled without a configured credential
    let phc_hash = state.config.admin_token_hash.as_deref().ok_or_else(|| {
        warn!("Write rejected: ADMIN_TOKEN_HASH is not configured");
        StatusCode::UNAUTHORIZED
    })?;

    // 3. Verify the token
    if !verify_token(token, phc_hash) {
        warn!(method = %req.method(), path = %req.uri().path(), "Write rejected: invalid token");
        return Err(StatusCode::UNAUTHORIZED);
    }

    // 4. Continue to the handler
    Ok(next.run(req).await)
}
