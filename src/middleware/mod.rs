// ABOUTME: HTTP middleware for inbound request authentication
// ABOUTME: Re-exports the bearer-token guard applied to the store routes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Bearer-token authentication
pub mod auth;

pub use auth::{authenticate_bearer, require_bearer_token};
