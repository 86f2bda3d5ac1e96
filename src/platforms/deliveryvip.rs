// ABOUTME: DeliveryVip partner API client for merchant blocking, unblocking, and listing
// ABOUTME: Uses OAuth client credentials and renews the bearer token before its daily expiry
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::errors::PlatformError;
use super::renewal::{renew_once, Authenticator, RenewalHandle, TokenRenewer};
use super::token::TokenCache;
use super::{decode, select_stores, send, PlatformClient};
use crate::config::DeliveryVipConfig;
use crate::constants::deliveryvip;
use crate::errors::ErrorKind;
use crate::models::{Platform, StoreStatus, StoreStatusEntry};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

const PLATFORM: Platform = Platform::DeliveryVip;

#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    access_token: String,
    #[serde(default)]
    token_type: String,
    #[serde(default)]
    expires_in: u64,
}

#[derive(Debug, Deserialize)]
struct Merchant {
    #[serde(default, deserialize_with = "super::null_as_default")]
    id: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    name: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    subscription: Subscription,
}

#[derive(Debug, Default, Deserialize)]
struct Subscription {
    #[serde(default, deserialize_with = "super::null_as_default")]
    status: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    blocked: bool,
}

impl Subscription {
    fn is_active(&self) -> bool {
        self.status == deliveryvip::ACTIVATED_STATUS && !self.blocked
    }
}

impl From<Merchant> for StoreStatusEntry {
    fn from(merchant: Merchant) -> Self {
        Self {
            status: StoreStatus::from_active(merchant.subscription.is_active()),
            store_id: merchant.id,
            document: None,
            display_name: Some(merchant.name).filter(|name| !name.is_empty()),
        }
    }
}

/// OAuth client-credentials exchange against the DeliveryVip API
pub struct DeliveryVipAuthenticator {
    token_url: String,
    client_id: String,
    client_secret: String,
    http: Client,
}

impl DeliveryVipAuthenticator {
    /// Create an authenticator from configuration
    #[must_use]
    pub fn new(config: &DeliveryVipConfig, http: Client) -> Self {
        Self {
            token_url: format!("{}{}", config.base_url, deliveryvip::TOKEN_PATH),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            http,
        }
    }
}

#[async_trait]
impl Authenticator for DeliveryVipAuthenticator {
    fn platform(&self) -> Platform {
        PLATFORM
    }

    async fn authenticate(&self) -> Result<String, PlatformError> {
        if self.client_id.is_empty() {
            return Err(PlatformError::MissingCredentials {
                platform: PLATFORM,
                field: "DELIVERYVIP_CLIENT_ID",
            });
        }
        if self.client_secret.is_empty() {
            return Err(PlatformError::MissingCredentials {
                platform: PLATFORM,
                field: "DELIVERYVIP_CLIENT_SECRET",
            });
        }

        let params = [
            ("grant_type", "client_credentials"),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
        ];
        let (status, body) = send(PLATFORM, self.http.post(&self.token_url).form(&params)).await?;
        if status != StatusCode::OK {
            return Err(PlatformError::from_status(PLATFORM, status, body));
        }

        let token: TokenResponse = decode(PLATFORM, &body)?;
        if token.access_token.is_empty() {
            return Err(PlatformError::Rejected {
                platform: PLATFORM,
                kind: ErrorKind::Unauthorized,
                message: "Token endpoint returned an empty access token".to_owned(),
            });
        }

        debug!(
            token_type = %token.token_type,
            expires_in = token.expires_in,
            "DeliveryVip token issued"
        );
        Ok(token.access_token)
    }
}

/// DeliveryVip merchant client
pub struct DeliveryVipClient {
    base_url: String,
    http: Client,
    token: Arc<TokenCache>,
    authenticator: Arc<DeliveryVipAuthenticator>,
    renewal: Mutex<Option<RenewalHandle>>,
}

impl DeliveryVipClient {
    /// Create a client and start its token renewal task
    ///
    /// Must be called from within a Tokio runtime.
    #[must_use]
    pub fn new(config: &DeliveryVipConfig, http: Client) -> Self {
        let client = Self::without_renewal(config, http);
        let handle = TokenRenewer::spawn(
            Arc::clone(&client.authenticator),
            Arc::clone(&client.token),
            config.renewal_interval,
        );
        Self {
            renewal: Mutex::new(Some(handle)),
            ..client
        }
    }

    /// Create a client whose token is only refreshed through [`Self::renew_token`]
    #[must_use]
    pub fn without_renewal(config: &DeliveryVipConfig, http: Client) -> Self {
        Self {
            base_url: config.base_url.clone(),
            authenticator: Arc::new(DeliveryVipAuthenticator::new(config, http.clone())),
            http,
            token: Arc::new(TokenCache::new()),
            renewal: Mutex::new(None),
        }
    }

    /// Token slot used by this client
    #[must_use]
    pub const fn token_cache(&self) -> &Arc<TokenCache> {
        &self.token
    }

    /// Request a token once and store it
    ///
    /// # Errors
    ///
    /// Returns the token request failure; the previous token is kept
    pub async fn renew_token(&self) -> Result<(), PlatformError> {
        renew_once(self.authenticator.as_ref(), &self.token).await
    }

    async fn access_token(&self) -> Result<String, PlatformError> {
        self.token
            .get()
            .await
            .ok_or(PlatformError::TokenUnavailable { platform: PLATFORM })
    }

    async fn set_block_state(&self, store_id: &str, action: &str) -> Result<(), PlatformError> {
        let token = self.access_token().await?;
        let url = format!(
            "{}{}/{}/{action}",
            self.base_url,
            deliveryvip::MERCHANTS_PATH,
            urlencoding::encode(store_id)
        );

        let (status, body) = send(PLATFORM, self.http.post(&url).bearer_auth(token)).await?;
        if status != StatusCode::ACCEPTED {
            return Err(PlatformError::from_status(PLATFORM, status, body));
        }

        Ok(())
    }

    async fn list_merchants(&self) -> Result<Vec<StoreStatusEntry>, PlatformError> {
        let token = self.access_token().await?;
        let url = format!("{}{}", self.base_url, deliveryvip::MERCHANTS_PATH);

        let (status, body) = send(PLATFORM, self.http.get(&url).bearer_auth(token)).await?;
        if status != StatusCode::OK {
            return Err(PlatformError::from_status(PLATFORM, status, body));
        }

        let merchants: Vec<Merchant> = decode(PLATFORM, &body)?;
        debug!(merchants = merchants.len(), "DeliveryVip merchant listing received");
        Ok(merchants.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl PlatformClient for DeliveryVipClient {
    fn platform(&self) -> Platform {
        PLATFORM
    }

    async fn activate(&self, store_id: &str) -> Result<(), PlatformError> {
        self.set_block_state(store_id, "unblock").await?;
        info!(store_id, "DeliveryVip merchant unblocked");
        Ok(())
    }

    async fn deactivate(&self, store_id: &str) -> Result<(), PlatformError> {
        self.set_block_state(store_id, "block").await?;
        info!(store_id, "DeliveryVip merchant blocked");
        Ok(())
    }

    async fn query_status(
        &self,
        store_ids: &[String],
    ) -> Result<Vec<StoreStatusEntry>, PlatformError> {
        let listing = self.list_merchants().await?;
        Ok(select_stores(listing, store_ids))
    }

    async fn shutdown(&self) {
        if let Some(handle) = self.renewal.lock().await.take() {
            handle.shutdown().await;
        }
    }
}
