// ABOUTME: Store route handlers for activation, deactivation, and status queries
// ABOUTME: Parses path, body, and header input and delegates to the platform gateway
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Store routes
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | POST   | `/platforms/:platform/stores/:store_id/activate`   | activate one store |
//! | POST   | `/platforms/:platform/stores/:store_id/deactivate` | deactivate one store |
//! | GET    | `/platforms/:platform/stores/:store_id/status`     | status of one store |
//! | PATCH  | `/platforms/:platform/stores/activate`             | activate many stores |
//! | PATCH  | `/platforms/:platform/stores/deactivate`           | deactivate many stores |
//! | GET    | `/platforms/:platform/stores/status`               | status of many or all stores |
//!
//! The many-store status query takes its filter from the comma-separated
//! `X-Store-IDs` header; without the header every known store is returned.

use crate::constants::server::STORE_IDS_HEADER;
use crate::errors::{AppError, AppResult};
use crate::gateway::PlatformGateway;
use crate::models::{
    BulkOperationResponse, StatusQueryResponse, StoreOperationResponse,
};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use serde::Deserialize;
use std::sync::Arc;

/// Body of the many-store operations
#[derive(Debug, Deserialize)]
pub struct BulkStoreRequest {
    /// Store ids to process, in order
    #[serde(default)]
    pub store_ids: Vec<String>,
}

/// Store routes implementation
pub struct StoreRoutes;

impl StoreRoutes {
    /// Create the store routes bound to `gateway`
    pub fn routes(gateway: Arc<PlatformGateway>) -> Router {
        Router::new()
            .route(
                "/platforms/:platform/stores/:store_id/activate",
                post(Self::handle_activate),
            )
            .route(
                "/platforms/:platform/stores/:store_id/deactivate",
                post(Self::handle_deactivate),
            )
            .route(
                "/platforms/:platform/stores/:store_id/status",
                get(Self::handle_store_status),
            )
            .route(
                "/platforms/:platform/stores/activate",
                patch(Self::handle_activate_many),
            )
            .route(
                "/platforms/:platform/stores/deactivate",
                patch(Self::handle_deactivate_many),
            )
            .route("/platforms/:platform/stores/status", get(Self::handle_status))
            .with_state(gateway)
    }

    /// Handle POST /platforms/:platform/stores/:store_id/activate
    async fn handle_activate(
        State(gateway): State<Arc<PlatformGateway>>,
        Path((platform, store_id)): Path<(String, String)>,
    ) -> AppResult<Json<StoreOperationResponse>> {
        Ok(Json(gateway.activate_store(&platform, &store_id).await?))
    }

    /// Handle POST /platforms/:platform/stores/:store_id/deactivate
    async fn handle_deactivate(
        State(gateway): State<Arc<PlatformGateway>>,
        Path((platform, store_id)): Path<(String, String)>,
    ) -> AppResult<Json<StoreOperationResponse>> {
        Ok(Json(gateway.deactivate_store(&platform, &store_id).await?))
    }

    /// Handle GET /platforms/:platform/stores/:store_id/status
    async fn handle_store_status(
        State(gateway): State<Arc<PlatformGateway>>,
        Path((platform, store_id)): Path<(String, String)>,
    ) -> AppResult<Json<StatusQueryResponse>> {
        let store_ids = [store_id];
        Ok(Json(gateway.query_status(&platform, &store_ids).await?))
    }

    /// Handle PATCH /platforms/:platform/stores/activate
    async fn handle_activate_many(
        State(gateway): State<Arc<PlatformGateway>>,
        Path(platform): Path<String>,
        body: Result<Json<BulkStoreRequest>, JsonRejection>,
    ) -> AppResult<Json<BulkOperationResponse>> {
        let store_ids = Self::bulk_store_ids(body)?;
        Ok(Json(gateway.activate_stores(&platform, &store_ids).await?))
    }

    /// Handle PATCH /platforms/:platform/stores/deactivate
    async fn handle_deactivate_many(
        State(gateway): State<Arc<PlatformGateway>>,
        Path(platform): Path<String>,
        body: Result<Json<BulkStoreRequest>, JsonRejection>,
    ) -> AppResult<Json<BulkOperationResponse>> {
        let store_ids = Self::bulk_store_ids(body)?;
        Ok(Json(gateway.deactivate_stores(&platform, &store_ids).await?))
    }

    /// Handle GET /platforms/:platform/stores/status
    async fn handle_status(
        State(gateway): State<Arc<PlatformGateway>>,
        Path(platform): Path<String>,
        headers: HeaderMap,
    ) -> AppResult<Json<StatusQueryResponse>> {
        let store_ids = Self::header_store_ids(&headers)?;
        Ok(Json(gateway.query_status(&platform, &store_ids).await?))
    }

    fn bulk_store_ids(body: Result<Json<BulkStoreRequest>, JsonRejection>) -> AppResult<Vec<String>> {
        let Json(request) =
            body.map_err(|e| AppError::invalid_request(format!("Invalid request body: {}", e.body_text())))?;
        if request.store_ids.is_empty() {
            return Err(AppError::invalid_request(
                "At least one store id must be provided",
            ));
        }
        Ok(request.store_ids)
    }

    fn header_store_ids(headers: &HeaderMap) -> AppResult<Vec<String>> {
        let Some(value) = headers.get(STORE_IDS_HEADER) else {
            return Ok(Vec::new());
        };
        let value = value
            .to_str()
            .map_err(|_| AppError::invalid_request("X-Store-IDs header must be ASCII"))?;
        let store_ids = parse_store_ids(value);
        if store_ids.is_empty() {
            return Err(AppError::invalid_request(
                "X-Store-IDs header contains no store ids",
            ));
        }
        Ok(store_ids)
    }
}

/// Split a comma-separated id list, dropping blank entries
#[must_use]
pub fn parse_store_ids(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_owned)
        .collect()
}
