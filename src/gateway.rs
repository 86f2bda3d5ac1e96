// ABOUTME: Platform gateway dispatching store operations to the registered platform client
// ABOUTME: Validates input, runs bulk operations with per-store outcomes, and normalizes errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Platform gateway
//!
//! The gateway is the single entry point for store operations. It resolves the
//! platform identifier, validates caller input before anything reaches a
//! platform, and turns [`PlatformError`]s into the shared error taxonomy.
//!
//! Bulk operations run one store at a time, in request order. A failing store
//! is recorded in its outcome and never aborts the rest of the batch.

use crate::config::ServerConfig;
use crate::errors::{AppError, AppResult, ErrorKind};
use crate::models::{
    BulkOperationResponse, Platform, StatusQueryResponse, StoreOperationOutcome,
    StoreOperationResponse, StoreStatus,
};
use crate::platforms::{AnotaAiClient, DeliveryVipClient, PlatformClient, PlatformError};
use crate::utils::http_client::platform_client;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};

/// Store state change requested by a caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StoreOperation {
    Activate,
    Deactivate,
}

impl StoreOperation {
    const fn verb(self) -> &'static str {
        match self {
            Self::Activate => "activate",
            Self::Deactivate => "deactivate",
        }
    }

    const fn resulting_status(self) -> StoreStatus {
        match self {
            Self::Activate => StoreStatus::Active,
            Self::Deactivate => StoreStatus::Inactive,
        }
    }

    const fn success_message(self) -> &'static str {
        match self {
            Self::Activate => "Store activated successfully",
            Self::Deactivate => "Store deactivated successfully",
        }
    }

    async fn apply(self, client: &dyn PlatformClient, store_id: &str) -> Result<(), PlatformError> {
        match self {
            Self::Activate => client.activate(store_id).await,
            Self::Deactivate => client.deactivate(store_id).await,
        }
    }
}

/// Registry of platform clients keyed by platform
#[derive(Default)]
pub struct PlatformGateway {
    clients: HashMap<Platform, Arc<dyn PlatformClient>>,
}

impl PlatformGateway {
    /// Create an empty gateway
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a gateway with every supported platform client
    ///
    /// Spawns each client's token renewal task, so it must be called from
    /// within a Tokio runtime.
    #[must_use]
    pub fn from_config(config: &ServerConfig) -> Self {
        let http = platform_client(&config.http_client);
        let mut gateway = Self::new();
        gateway.register(Arc::new(AnotaAiClient::new(
            &config.platforms.anotaai,
            http.clone(),
        )));
        gateway.register(Arc::new(DeliveryVipClient::new(
            &config.platforms.deliveryvip,
            http,
        )));
        gateway
    }

    /// Register a client, replacing any previous client for the same platform
    pub fn register(&mut self, client: Arc<dyn PlatformClient>) {
        let platform = client.platform();
        if self.clients.insert(platform, client).is_some() {
            warn!(platform = %platform, "Replaced previously registered platform client");
        } else {
            info!(platform = %platform, "Registered platform client");
        }
    }

    /// Builder-style [`Self::register`]
    #[must_use]
    pub fn with_client(mut self, client: Arc<dyn PlatformClient>) -> Self {
        self.register(client);
        self
    }

    /// Platforms with a registered client
    #[must_use]
    pub fn platforms(&self) -> Vec<Platform> {
        Platform::ALL
            .into_iter()
            .filter(|platform| self.clients.contains_key(platform))
            .collect()
    }

    /// Stop background work of every registered client
    pub async fn shutdown(&self) {
        for client in self.clients.values() {
            client.shutdown().await;
        }
    }

    fn resolve(&self, platform: &str) -> AppResult<(Platform, &dyn PlatformClient)> {
        if platform.is_empty() {
            return Err(AppError::invalid_request("Platform is required"));
        }
        let parsed: Platform = platform
            .parse()
            .map_err(|e| AppError::not_found(format!("Platform not supported: {platform}")).with_source(e))?;
        let client = self
            .clients
            .get(&parsed)
            .ok_or_else(|| AppError::not_found(format!("Platform not supported: {platform}")))?;
        Ok((parsed, client.as_ref()))
    }

    /// Activate one store
    ///
    /// # Errors
    ///
    /// Returns an invalid-request error for empty input, not-found for an
    /// unknown platform, or the normalized platform failure
    pub async fn activate_store(
        &self,
        platform: &str,
        store_id: &str,
    ) -> AppResult<StoreOperationResponse> {
        self.run_single(StoreOperation::Activate, platform, store_id)
            .await
    }

    /// Deactivate one store
    ///
    /// # Errors
    ///
    /// Returns an invalid-request error for empty input, not-found for an
    /// unknown platform, or the normalized platform failure
    pub async fn deactivate_store(
        &self,
        platform: &str,
        store_id: &str,
    ) -> AppResult<StoreOperationResponse> {
        self.run_single(StoreOperation::Deactivate, platform, store_id)
            .await
    }

    /// Activate each store in order, recording one outcome per id
    ///
    /// # Errors
    ///
    /// Fails only when the platform itself is missing or unknown; per-store
    /// failures are reported in the outcomes
    pub async fn activate_stores(
        &self,
        platform: &str,
        store_ids: &[String],
    ) -> AppResult<BulkOperationResponse> {
        self.run_bulk(StoreOperation::Activate, platform, store_ids)
            .await
    }

    /// Deactivate each store in order, recording one outcome per id
    ///
    /// # Errors
    ///
    /// Fails only when the platform itself is missing or unknown; per-store
    /// failures are reported in the outcomes
    pub async fn deactivate_stores(
        &self,
        platform: &str,
        store_ids: &[String],
    ) -> AppResult<BulkOperationResponse> {
        self.run_bulk(StoreOperation::Deactivate, platform, store_ids)
            .await
    }

    /// Current status of the requested stores, or of every known store
    ///
    /// # Errors
    ///
    /// Returns an invalid-request error for an empty platform, not-found for
    /// an unknown platform, or the normalized platform failure
    pub async fn query_status(
        &self,
        platform: &str,
        store_ids: &[String],
    ) -> AppResult<StatusQueryResponse> {
        let (platform, client) = self.resolve(platform)?;
        let stores = client.query_status(store_ids).await?;
        Ok(StatusQueryResponse { platform, stores })
    }

    async fn run_single(
        &self,
        operation: StoreOperation,
        platform: &str,
        store_id: &str,
    ) -> AppResult<StoreOperationResponse> {
        if platform.is_empty() || store_id.is_empty() {
            return Err(AppError::invalid_request(
                "Platform and store id are required",
            ));
        }
        let (platform, client) = self.resolve(platform)?;

        operation.apply(client, store_id).await.map_err(|e| {
            warn!(
                platform = %platform,
                store_id,
                operation = operation.verb(),
                kind = %e.kind(),
                error = %e,
                "Store operation failed"
            );
            AppError::from(e)
        })?;

        Ok(StoreOperationResponse {
            platform,
            store_id: store_id.to_owned(),
            status: operation.resulting_status(),
            message: operation.success_message().to_owned(),
        })
    }

    async fn run_bulk(
        &self,
        operation: StoreOperation,
        platform: &str,
        store_ids: &[String],
    ) -> AppResult<BulkOperationResponse> {
        let (platform, client) = self.resolve(platform)?;

        let mut results = Vec::with_capacity(store_ids.len());
        for store_id in store_ids {
            results.push(Self::run_one(operation, client, store_id).await);
        }

        let succeeded = results.iter().filter(|outcome| outcome.success).count();
        info!(
            platform = %platform,
            operation = operation.verb(),
            requested = store_ids.len(),
            succeeded,
            "Bulk store operation finished"
        );

        Ok(BulkOperationResponse { platform, results })
    }

    async fn run_one(
        operation: StoreOperation,
        client: &dyn PlatformClient,
        store_id: &str,
    ) -> StoreOperationOutcome {
        if store_id.is_empty() {
            return StoreOperationOutcome {
                store_id: String::new(),
                status: StoreStatus::NotFound,
                success: false,
                message: "Store id is required".to_owned(),
                error: Some(ErrorKind::InvalidRequest),
            };
        }

        match operation.apply(client, store_id).await {
            Ok(()) => StoreOperationOutcome {
                store_id: store_id.to_owned(),
                status: operation.resulting_status(),
                success: true,
                message: operation.success_message().to_owned(),
                error: None,
            },
            Err(e) => {
                warn!(
                    platform = %e.platform(),
                    store_id,
                    operation = operation.verb(),
                    kind = %e.kind(),
                    error = %e,
                    "Store operation failed"
                );
                let message = if e.is_not_found() {
                    "Store not found on platform".to_owned()
                } else {
                    format!("Failed to {} store: {e}", operation.verb())
                };
                StoreOperationOutcome {
                    store_id: store_id.to_owned(),
                    status: StoreStatus::NotFound,
                    success: false,
                    message,
                    error: Some(e.kind()),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_platform_is_invalid_request() {
        let gateway = PlatformGateway::new();

        let error = gateway.activate_store("", "s1").await.unwrap_err();
        assert_eq!(error.kind, ErrorKind::InvalidRequest);

        let error = gateway.query_status("", &[]).await.unwrap_err();
        assert_eq!(error.kind, ErrorKind::InvalidRequest);
    }

    #[tokio::test]
    async fn test_unregistered_platform_is_not_found() {
        let gateway = PlatformGateway::new();

        let error = gateway
            .deactivate_stores("anotaai", &["s1".to_owned()])
            .await
            .unwrap_err();

        assert_eq!(error.kind, ErrorKind::NotFound);
    }

    #[test]
    fn test_operation_messages() {
        assert_eq!(
            StoreOperation::Activate.success_message(),
            "Store activated successfully"
        );
        assert_eq!(
            StoreOperation::Deactivate.resulting_status(),
            StoreStatus::Inactive
        );
    }
}
