// ABOUTME: Utility modules for common functionality across the application
// ABOUTME: Contains shared utilities for outbound HTTP clients and document normalization
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Document number normalization
pub mod document;
/// HTTP client configuration and helpers
pub mod http_client;
