// ABOUTME: Configuration management module for server and platform integration settings
// ABOUTME: Exposes environment-driven configuration for the HTTP server and platform clients
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module for Delivery Control
//!
//! All settings come from environment variables (optionally seeded from a
//! `.env` file). See [`environment::ServerConfig::from_env`].

/// Environment and server configuration
pub mod environment;

pub use environment::{
    AnotaAiConfig, AuthConfig, DeliveryVipConfig, HttpClientConfig, PlatformsConfig,
    ServerConfig,
};
