// ABOUTME: AnotaAI partner API client for page activation, blocking, and listing
// ABOUTME: Logs in with email and password and renews the partner token every few hours
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::errors::PlatformError;
use super::renewal::{renew_once, Authenticator, RenewalHandle, TokenRenewer};
use super::token::TokenCache;
use super::{decode, select_stores, send, PlatformClient};
use crate::config::AnotaAiConfig;
use crate::constants::anotaai;
use crate::errors::ErrorKind;
use crate::models::{Platform, StoreStatus, StoreStatusEntry};
use crate::utils::document::clean_document;
use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

const PLATFORM: Platform = Platform::AnotaAi;

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    access_token: String,
    #[serde(default, rename = "mensagem", alias = "message")]
    message: String,
}

#[derive(Debug, Deserialize)]
struct OperationResponse {
    #[serde(default)]
    success: bool,
    #[serde(default, rename = "mensagem", alias = "message")]
    message: String,
}

#[derive(Debug, Deserialize)]
struct ListPagesResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    info: ListPagesInfo,
    #[serde(default, rename = "mensagem", alias = "message")]
    message: String,
}

#[derive(Debug, Default, Deserialize)]
struct ListPagesInfo {
    #[serde(default)]
    docs: Vec<PageDoc>,
}

#[derive(Debug, Deserialize)]
struct PageDoc {
    #[serde(default, deserialize_with = "super::null_as_default")]
    page_id: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    page_name: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    page: PageDetails,
}

#[derive(Debug, Default, Deserialize)]
struct PageDetails {
    #[serde(default, deserialize_with = "super::null_as_default")]
    establishment: Establishment,
}

#[derive(Debug, Default, Deserialize)]
struct Establishment {
    #[serde(default, deserialize_with = "super::null_as_default")]
    sign: Sign,
}

#[derive(Debug, Default, Deserialize)]
struct Sign {
    #[serde(default, deserialize_with = "super::null_as_default")]
    active: bool,
    #[serde(default)]
    cpf_cnpj: Option<DocumentField>,
}

/// Document number, sent either bare or wrapped with its type
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DocumentField {
    Typed {
        #[serde(default)]
        value: String,
    },
    Plain(String),
}

impl DocumentField {
    fn value(&self) -> &str {
        match self {
            Self::Typed { value } | Self::Plain(value) => value,
        }
    }
}

impl From<PageDoc> for StoreStatusEntry {
    fn from(doc: PageDoc) -> Self {
        let sign = doc.page.establishment.sign;
        let document = sign
            .cpf_cnpj
            .as_ref()
            .map(|field| clean_document(field.value()))
            .filter(|digits| !digits.is_empty());

        Self {
            store_id: doc.page_id,
            status: StoreStatus::from_active(sign.active),
            document,
            display_name: Some(doc.page_name).filter(|name| !name.is_empty()),
        }
    }
}

/// Partner login against the AnotaAI API
pub struct AnotaAiAuthenticator {
    login_url: String,
    email: String,
    password: String,
    http: Client,
}

impl AnotaAiAuthenticator {
    /// Create an authenticator from configuration
    #[must_use]
    pub fn new(config: &AnotaAiConfig, http: Client) -> Self {
        Self {
            login_url: format!("{}{}", config.base_url, anotaai::LOGIN_PATH),
            email: config.email.clone(),
            password: config.password.clone(),
            http,
        }
    }
}

#[async_trait]
impl Authenticator for AnotaAiAuthenticator {
    fn platform(&self) -> Platform {
        PLATFORM
    }

    async fn authenticate(&self) -> Result<String, PlatformError> {
        if self.email.is_empty() {
            return Err(PlatformError::MissingCredentials {
                platform: PLATFORM,
                field: "ANOTAAI_EMAIL",
            });
        }
        if self.password.is_empty() {
            return Err(PlatformError::MissingCredentials {
                platform: PLATFORM,
                field: "ANOTAAI_PASSWORD",
            });
        }

        let request = self.http.post(&self.login_url).json(&LoginRequest {
            email: &self.email,
            password: &self.password,
        });
        let (status, body) = send(PLATFORM, request).await?;
        if status != StatusCode::OK {
            return Err(PlatformError::from_status(PLATFORM, status, body));
        }

        let login: LoginResponse = decode(PLATFORM, &body)?;
        if !login.success || login.access_token.is_empty() {
            let message = if login.message.is_empty() {
                "Partner login rejected".to_owned()
            } else {
                login.message
            };
            return Err(PlatformError::Rejected {
                platform: PLATFORM,
                kind: ErrorKind::Unauthorized,
                message,
            });
        }

        Ok(login.access_token)
    }
}

/// AnotaAI store client
pub struct AnotaAiClient {
    base_url: String,
    http: Client,
    token: Arc<TokenCache>,
    authenticator: Arc<AnotaAiAuthenticator>,
    renewal: Mutex<Option<RenewalHandle>>,
}

impl AnotaAiClient {
    /// Create a client and start its token renewal task
    ///
    /// Must be called from within a Tokio runtime.
    #[must_use]
    pub fn new(config: &AnotaAiConfig, http: Client) -> Self {
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
    pub fn without_renewal(config: &AnotaAiConfig, http: Client) -> Self {
        Self {
            base_url: config.base_url.clone(),
            authenticator: Arc::new(AnotaAiAuthenticator::new(config, http.clone())),
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

    /// Log in once and store the new token
    ///
    /// # Errors
    ///
    /// Returns the login failure; the previous token is kept
    pub async fn renew_token(&self) -> Result<(), PlatformError> {
        renew_once(self.authenticator.as_ref(), &self.token).await
    }

    async fn access_token(&self) -> Result<String, PlatformError> {
        self.token
            .get()
            .await
            .ok_or(PlatformError::TokenUnavailable { platform: PLATFORM })
    }

    async fn set_page_state(&self, path: &str, store_id: &str) -> Result<(), PlatformError> {
        let token = self.access_token().await?;
        let url = format!(
            "{}{path}/{}",
            self.base_url,
            urlencoding::encode(store_id)
        );

        let (status, body) = send(PLATFORM, self.http.put(&url).header(AUTHORIZATION, token)).await?;
        if status != StatusCode::OK {
            return Err(PlatformError::from_status(PLATFORM, status, body));
        }

        let reply: OperationResponse = decode(PLATFORM, &body)?;
        if !reply.success {
            let message = if reply.message.is_empty() {
                "Operation rejected by platform".to_owned()
            } else {
                reply.message
            };
            return Err(PlatformError::rejected(PLATFORM, message));
        }

        Ok(())
    }

    async fn list_pages(&self) -> Result<Vec<StoreStatusEntry>, PlatformError> {
        let token = self.access_token().await?;
        let url = format!("{}{}", self.base_url, anotaai::LIST_PAGES_PATH);
        let request = self
            .http
            .get(&url)
            .query(&[("limit", anotaai::LIST_PAGES_LIMIT), ("page", 1)])
            .header(AUTHORIZATION, token);

        let (status, body) = send(PLATFORM, request).await?;
        if status != StatusCode::OK {
            return Err(PlatformError::from_status(PLATFORM, status, body));
        }

        let listing: ListPagesResponse = decode(PLATFORM, &body)?;
        if !listing.success {
            let message = if listing.message.is_empty() {
                "Page listing rejected by platform".to_owned()
            } else {
                listing.message
            };
            return Err(PlatformError::rejected(PLATFORM, message));
        }

        debug!(pages = listing.info.docs.len(), "AnotaAI page listing received");
        Ok(listing.info.docs.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl PlatformClient for AnotaAiClient {
    fn platform(&self) -> Platform {
        PLATFORM
    }

    async fn activate(&self, store_id: &str) -> Result<(), PlatformError> {
        self.set_page_state(anotaai::ACTIVATE_PATH, store_id).await?;
        info!(store_id, "AnotaAI page activated");
        Ok(())
    }

    async fn deactivate(&self, store_id: &str) -> Result<(), PlatformError> {
        self.set_page_state(anotaai::DEACTIVATE_PATH, store_id).await?;
        info!(store_id, "AnotaAI page blocked");
        Ok(())
    }

    async fn query_status(
        &self,
        store_ids: &[String],
    ) -> Result<Vec<StoreStatusEntry>, PlatformError> {
        let listing = self.list_pages().await?;
        Ok(select_stores(listing, store_ids))
    }

    async fn shutdown(&self) {
        if let Some(handle) = self.renewal.lock().await.take() {
            handle.shutdown().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_doc(json: serde_json::Value) -> StoreStatusEntry {
        serde_json::from_value::<PageDoc>(json).unwrap().into()
    }

    #[test]
    fn test_page_with_plain_document() {
        let entry = parse_doc(serde_json::json!({
            "page_id": "p1",
            "page_name": "Pizzaria",
            "page": {"establishment": {"sign": {"active": true, "cpf_cnpj": "12.345.678/0001-90"}}}
        }));

        assert_eq!(entry.store_id, "p1");
        assert_eq!(entry.status, StoreStatus::Active);
        assert_eq!(entry.document.as_deref(), Some("12345678000190"));
        assert_eq!(entry.display_name.as_deref(), Some("Pizzaria"));
    }

    #[test]
    fn test_page_with_typed_document() {
        let entry = parse_doc(serde_json::json!({
            "page_id": "p2",
            "page_name": "Lanches",
            "page": {"establishment": {"sign": {
                "active": false,
                "cpf_cnpj": {"type": "cpf", "value": "123.456.789-09"}
            }}}
        }));

        assert_eq!(entry.status, StoreStatus::Inactive);
        assert_eq!(entry.document.as_deref(), Some("12345678909"));
    }

    #[test]
    fn test_page_without_details() {
        let entry = parse_doc(serde_json::json!({"page_id": "p3"}));

        assert_eq!(entry.status, StoreStatus::Inactive);
        assert_eq!(entry.document, None);
        assert_eq!(entry.display_name, None);
    }

    #[test]
    fn test_page_with_null_fields() {
        let entry = parse_doc(serde_json::json!({
            "page_id": "p4",
            "page_name": null,
            "page": {"establishment": {"sign": {"active": null, "cpf_cnpj": null}}}
        }));

        assert_eq!(entry.status, StoreStatus::Inactive);
        assert_eq!(entry.display_name, None);
        assert_eq!(entry.document, None);
    }

    #[test]
    fn test_operation_response_reads_portuguese_message() {
        let reply: OperationResponse =
            serde_json::from_str(r#"{"success": false, "mensagem": "Página não encontrada"}"#)
                .unwrap();

        assert!(!reply.success);
        assert_eq!(reply.message, "Página não encontrada");
    }

    #[tokio::test]
    async fn test_missing_credentials_fail_before_network() {
        let config = AnotaAiConfig {
            base_url: "http://127.0.0.1:9".to_owned(),
            ..AnotaAiConfig::default()
        };
        let authenticator = AnotaAiAuthenticator::new(&config, Client::new());

        let error = authenticator.authenticate().await.unwrap_err();

        assert!(matches!(
            error,
            PlatformError::MissingCredentials {
                field: "ANOTAAI_EMAIL",
                ..
            }
        ));
    }
}
