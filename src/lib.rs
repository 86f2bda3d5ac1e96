// ABOUTME: Main library entry point for the delivery control gateway
// ABOUTME: Uniform store activation, deactivation, and status API over several delivery platforms
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Delivery Control
//!
//! An HTTP service that opens, blocks and inspects restaurant stores on
//! several delivery platforms through one API.
//!
//! ## Architecture
//!
//! - **Platforms**: one client per delivery platform, each owning its access
//!   token and a background task that renews it
//! - **Gateway**: resolves the platform, validates input, runs bulk
//!   operations and normalizes platform failures
//! - **Routes**: thin axum handlers behind a static bearer token
//! - **Config**: environment-driven settings
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use delivery_control::config::ServerConfig;
//! use delivery_control::gateway::PlatformGateway;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     let gateway = Arc::new(PlatformGateway::from_config(&config));
//!     delivery_control::server::serve(&config, gateway).await
//! }
//! ```

/// Environment configuration
pub mod config;

/// Application constants
pub mod constants;

/// Unified error handling
pub mod errors;

/// Platform dispatch, validation and bulk operations
pub mod gateway;

/// Structured logging setup
pub mod logging;

/// HTTP middleware
pub mod middleware;

/// Shared data models
pub mod models;

/// Platform clients and token renewal
pub mod platforms;

/// HTTP routes
pub mod routes;

/// HTTP server assembly
pub mod server;

/// Utility helpers
pub mod utils;
