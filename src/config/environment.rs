// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Parses server port, inbound bearer token, platform URLs, credentials, and timing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration management for production deployment

use crate::constants::{anotaai, deliveryvip, http_client, server};
use anyhow::{bail, Context, Result};
use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};

/// Inbound authentication configuration
#[derive(Clone, Default)]
pub struct AuthConfig {
    /// Static bearer token inbound requests must present
    pub bearer_token: String,
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("bearer_token", &"[REDACTED]")
            .finish()
    }
}

/// AnotaAI integration settings
#[derive(Clone)]
pub struct AnotaAiConfig {
    /// API base URL, without trailing slash
    pub base_url: String,
    /// Partner login email
    pub email: String,
    /// Partner login password
    pub password: String,
    /// Token renewal period
    pub renewal_interval: Duration,
}

impl Default for AnotaAiConfig {
    fn default() -> Self {
        Self {
            base_url: anotaai::DEFAULT_BASE_URL.to_owned(),
            email: String::new(),
            password: String::new(),
            renewal_interval: Duration::from_secs(anotaai::TOKEN_RENEWAL_SECS),
        }
    }
}

impl fmt::Debug for AnotaAiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnotaAiConfig")
            .field("base_url", &self.base_url)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("renewal_interval", &self.renewal_interval)
            .finish()
    }
}

/// DeliveryVip integration settings
#[derive(Clone)]
pub struct DeliveryVipConfig {
    /// API base URL, without trailing slash
    pub base_url: String,
    /// OAuth client id
    pub client_id: String,
    /// OAuth client secret
    pub client_secret: String,
    /// Token renewal period
    pub renewal_interval: Duration,
}

impl Default for DeliveryVipConfig {
    fn default() -> Self {
        Self {
            base_url: deliveryvip::DEFAULT_BASE_URL.to_owned(),
            client_id: String::new(),
            client_secret: String::new(),
            renewal_interval: Duration::from_secs(deliveryvip::TOKEN_RENEWAL_SECS),
        }
    }
}

impl fmt::Debug for DeliveryVipConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeliveryVipConfig")
            .field("base_url", &self.base_url)
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("renewal_interval", &self.renewal_interval)
            .finish()
    }
}

/// Settings for all supported platforms
#[derive(Debug, Clone, Default)]
pub struct PlatformsConfig {
    /// AnotaAI settings
    pub anotaai: AnotaAiConfig,
    /// DeliveryVip settings
    pub deliveryvip: DeliveryVipConfig,
}

/// Outbound HTTP client timeouts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpClientConfig {
    /// Fixed per-call timeout
    pub timeout_secs: u64,
    /// Connection establishment timeout
    pub connect_timeout_secs: u64,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout_secs: http_client::DEFAULT_TIMEOUT_SECS,
            connect_timeout_secs: http_client::DEFAULT_CONNECT_TIMEOUT_SECS,
        }
    }
}

/// Complete server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Inbound HTTP port
    pub http_port: u16,
    /// Inbound authentication
    pub auth: AuthConfig,
    /// Platform integrations
    pub platforms: PlatformsConfig,
    /// Outbound HTTP client settings
    pub http_client: HttpClientConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if `BEARER_TOKEN` is missing or a numeric variable
    /// cannot be parsed
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        // Load .env file if it exists
        if let Err(e) = dotenvy::dotenv() {
            warn!("No .env file found or failed to load: {}", e);
        }

        let bearer_token = env::var("BEARER_TOKEN").unwrap_or_default();
        if bearer_token.is_empty() {
            bail!("BEARER_TOKEN environment variable is required");
        }

        let http_port = match env::var("HTTP_PORT").or_else(|_| env::var("PORT")) {
            Ok(value) => value
                .parse()
                .with_context(|| format!("Invalid HTTP_PORT value: {value}"))?,
            Err(_) => server::DEFAULT_HTTP_PORT,
        };

        let config = Self {
            http_port,
            auth: AuthConfig { bearer_token },
            platforms: PlatformsConfig {
                anotaai: AnotaAiConfig {
                    base_url: trimmed_url(&env_var_or(
                        "ANOTAAI_API_URL",
                        anotaai::DEFAULT_BASE_URL,
                    )),
                    email: env_var_or("ANOTAAI_EMAIL", ""),
                    password: env_var_or("ANOTAAI_PASSWORD", ""),
                    renewal_interval: Duration::from_secs(parse_env_or(
                        "ANOTAAI_TOKEN_RENEWAL_SECS",
                        anotaai::TOKEN_RENEWAL_SECS,
                    )?),
                },
                deliveryvip: DeliveryVipConfig {
                    base_url: trimmed_url(&env_var_or(
                        "DELIVERYVIP_API_URL",
                        deliveryvip::DEFAULT_BASE_URL,
                    )),
                    client_id: env_var_or("DELIVERYVIP_CLIENT_ID", ""),
                    client_secret: env_var_or("DELIVERYVIP_CLIENT_SECRET", ""),
                    renewal_interval: Duration::from_secs(parse_env_or(
                        "DELIVERYVIP_TOKEN_RENEWAL_SECS",
                        deliveryvip::TOKEN_RENEWAL_SECS,
                    )?),
                },
            },
            http_client: HttpClientConfig {
                timeout_secs: parse_env_or(
                    "HTTP_CLIENT_TIMEOUT_SECS",
                    http_client::DEFAULT_TIMEOUT_SECS,
                )?,
                connect_timeout_secs: parse_env_or(
                    "HTTP_CLIENT_CONNECT_TIMEOUT_SECS",
                    http_client::DEFAULT_CONNECT_TIMEOUT_SECS,
                )?,
            },
        };

        if config.platforms.anotaai.email.is_empty() || config.platforms.anotaai.password.is_empty()
        {
            warn!("AnotaAI credentials are not configured; token renewal will fail");
        }
        if config.platforms.deliveryvip.client_id.is_empty()
            || config.platforms.deliveryvip.client_secret.is_empty()
        {
            warn!("DeliveryVip credentials are not configured; token renewal will fail");
        }

        Ok(config)
    }

    /// One-line-per-setting summary safe for logging
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Delivery Control Configuration:\n\
             - HTTP Port: {}\n\
             - AnotaAI: {} (credentials {}, renewal every {}s)\n\
             - DeliveryVip: {} (credentials {}, renewal every {}s)\n\
             - Outbound timeout: {}s",
            self.http_port,
            self.platforms.anotaai.base_url,
            configured(
                !self.platforms.anotaai.email.is_empty()
                    && !self.platforms.anotaai.password.is_empty()
            ),
            self.platforms.anotaai.renewal_interval.as_secs(),
            self.platforms.deliveryvip.base_url,
            configured(
                !self.platforms.deliveryvip.client_id.is_empty()
                    && !self.platforms.deliveryvip.client_secret.is_empty()
            ),
            self.platforms.deliveryvip.renewal_interval.as_secs(),
            self.http_client.timeout_secs,
        )
    }
}

const fn configured(flag: bool) -> &'static str {
    if flag {
        "configured"
    } else {
        "missing"
    }
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Parse an environment variable, falling back to a default when unset
fn parse_env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(value) => value
            .trim()
            .parse()
            .with_context(|| format!("Invalid {key} value: {value}")),
        Err(_) => Ok(default),
    }
}

fn trimmed_url(url: &str) -> String {
    url.trim_end_matches('/').to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trimmed_url_strips_trailing_slashes() {
        assert_eq!(trimmed_url("https://api.example.com/"), "https://api.example.com");
        assert_eq!(trimmed_url("https://api.example.com"), "https://api.example.com");
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = PlatformsConfig {
            anotaai: AnotaAiConfig {
                password: "hunter2".to_owned(),
                ..AnotaAiConfig::default()
            },
            deliveryvip: DeliveryVipConfig {
                client_secret: "s3cret".to_owned(),
                ..DeliveryVipConfig::default()
            },
        };
        let rendered = format!("{config:?}");

        assert!(!rendered.contains("hunter2"));
        assert!(!rendered.contains("s3cret"));
        assert!(rendered.contains("[REDACTED]"));
    }

    #[test]
    fn test_default_renewal_intervals() {
        let config = PlatformsConfig::default();

        assert_eq!(config.anotaai.renewal_interval, Duration::from_secs(10_800));
        assert_eq!(
            config.deliveryvip.renewal_interval,
            Duration::from_secs(72_000)
        );
    }
}
