// ABOUTME: Unit tests for environment-driven server configuration
// ABOUTME: Validates required variables, defaults, overrides, and parse errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use delivery_control::config::ServerConfig;
use serial_test::serial;
use std::env;
use std::time::Duration;

const VARS: [&str; 14] = [
    "BEARER_TOKEN",
    "HTTP_PORT",
    "PORT",
    "ANOTAAI_API_URL",
    "ANOTAAI_EMAIL",
    "ANOTAAI_PASSWORD",
    "ANOTAAI_TOKEN_RENEWAL_SECS",
    "DELIVERYVIP_API_URL",
    "DELIVERYVIP_CLIENT_ID",
    "DELIVERYVIP_CLIENT_SECRET",
    "DELIVERYVIP_TOKEN_RENEWAL_SECS",
    "HTTP_CLIENT_TIMEOUT_SECS",
    "HTTP_CLIENT_CONNECT_TIMEOUT_SECS",
    "SERVICE_NAME",
];

fn clear_env() {
    for var in VARS {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_bearer_token_is_required() {
    clear_env();

    let error = ServerConfig::from_env().unwrap_err();

    assert!(error.to_string().contains("BEARER_TOKEN"));
}

#[test]
#[serial]
fn test_defaults() {
    clear_env();
    env::set_var("BEARER_TOKEN", "inbound");

    let config = ServerConfig::from_env().unwrap();

    assert_eq!(config.http_port, 8080);
    assert_eq!(config.auth.bearer_token, "inbound");
    assert_eq!(
        config.platforms.anotaai.base_url,
        "https://integration-admin.api.anota.ai"
    );
    assert_eq!(
        config.platforms.anotaai.renewal_interval,
        Duration::from_secs(3 * 60 * 60)
    );
    assert_eq!(
        config.platforms.deliveryvip.renewal_interval,
        Duration::from_secs(20 * 60 * 60)
    );
    assert_eq!(config.http_client.timeout_secs, 30);
    assert!(config.platforms.anotaai.email.is_empty());

    clear_env();
}

#[test]
#[serial]
fn test_overrides() {
    clear_env();
    env::set_var("BEARER_TOKEN", "inbound");
    env::set_var("HTTP_PORT", "9090");
    env::set_var("ANOTAAI_API_URL", "http://anota.local/");
    env::set_var("ANOTAAI_EMAIL", "partner@example.com");
    env::set_var("ANOTAAI_PASSWORD", "pw");
    env::set_var("DELIVERYVIP_CLIENT_ID", "cid");
    env::set_var("DELIVERYVIP_CLIENT_SECRET", "csecret");
    env::set_var("DELIVERYVIP_TOKEN_RENEWAL_SECS", "60");
    env::set_var("HTTP_CLIENT_TIMEOUT_SECS", "5");

    let config = ServerConfig::from_env().unwrap();

    assert_eq!(config.http_port, 9090);
    assert_eq!(config.platforms.anotaai.base_url, "http://anota.local");
    assert_eq!(config.platforms.anotaai.email, "partner@example.com");
    assert_eq!(config.platforms.deliveryvip.client_id, "cid");
    assert_eq!(
        config.platforms.deliveryvip.renewal_interval,
        Duration::from_secs(60)
    );
    assert_eq!(config.http_client.timeout_secs, 5);

    let summary = config.summary();
    assert!(summary.contains("9090"));
    assert!(!summary.contains("csecret"));

    clear_env();
}

#[test]
#[serial]
fn test_invalid_port_is_rejected() {
    clear_env();
    env::set_var("BEARER_TOKEN", "inbound");
    env::set_var("HTTP_PORT", "not-a-port");

    assert!(ServerConfig::from_env().is_err());

    clear_env();
}

#[test]
#[serial]
fn test_invalid_renewal_period_is_rejected() {
    clear_env();
    env::set_var("BEARER_TOKEN", "inbound");
    env::set_var("ANOTAAI_TOKEN_RENEWAL_SECS", "soon");

    assert!(ServerConfig::from_env().is_err());

    clear_env();
}
