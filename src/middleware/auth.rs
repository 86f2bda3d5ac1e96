// ABOUTME: Static bearer-token authentication for the store routes
// ABOUTME: Rejects requests without a matching Authorization header before any handler runs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::config::AuthConfig;
use crate::errors::{AppError, AppResult};
use axum::extract::{Request, State};
use axum::http::{header::AUTHORIZATION, HeaderMap};
use axum::middleware::Next;
use axum::response::Response;
use std::sync::Arc;
use subtle::ConstantTimeEq;
use tracing::debug;

const BEARER_PREFIX: &str = "Bearer ";

/// Check the `Authorization` header against the configured token
///
/// # Errors
///
/// Returns an unauthorized error when the header is missing, malformed, empty
/// or does not match
pub fn authenticate_bearer(headers: &HeaderMap, expected: &str) -> AppResult<()> {
    let header = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| AppError::unauthorized("Authorization header is required"))?
        .to_str()
        .map_err(|_| AppError::unauthorized("Invalid token format. Use 'Bearer <token>'"))?;

    let token = header
        .strip_prefix(BEARER_PREFIX)
        .ok_or_else(|| AppError::unauthorized("Invalid token format. Use 'Bearer <token>'"))?
        .trim();
    if token.is_empty() {
        return Err(AppError::unauthorized("Token not provided"));
    }

    if expected.is_empty() || !bool::from(token.as_bytes().ct_eq(expected.as_bytes())) {
        return Err(AppError::unauthorized("Invalid token"));
    }

    Ok(())
}

/// Axum middleware enforcing [`authenticate_bearer`]
///
/// # Errors
///
/// Returns an unauthorized error that short-circuits the request
pub async fn require_bearer_token(
    State(auth): State<Arc<AuthConfig>>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if let Err(e) = authenticate_bearer(request.headers(), &auth.bearer_token) {
        debug!(path = %request.uri().path(), reason = %e.message, "Rejected unauthenticated request");
        return Err(e);
    }
    Ok(next.run(request).await)
}
