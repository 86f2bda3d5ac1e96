// ABOUTME: Shared data models for platforms, store status, and gateway responses
// ABOUTME: Platform-neutral DTOs produced by the gateway and serialized by the routes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::platforms;
use crate::errors::ErrorKind;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported delivery platforms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// AnotaAI store management
    AnotaAi,
    /// DeliveryVip merchant management
    DeliveryVip,
}

impl Platform {
    /// All supported platforms
    pub const ALL: [Self; 2] = [Self::AnotaAi, Self::DeliveryVip];

    /// Platform identifier as used in routes and responses
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AnotaAi => platforms::ANOTAAI,
            Self::DeliveryVip => platforms::DELIVERYVIP,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a platform identifier is not supported
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported platform: {0}")]
pub struct UnsupportedPlatform(pub String);

impl FromStr for Platform {
    type Err = UnsupportedPlatform;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|platform| platform.as_str() == s)
            .ok_or_else(|| UnsupportedPlatform(s.to_owned()))
    }
}

/// Store status as seen by the gateway
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreStatus {
    /// Store is open for orders
    Active,
    /// Store is blocked or deactivated
    Inactive,
    /// Store id is unknown to the platform, or the operation failed
    NotFound,
}

impl StoreStatus {
    /// Status corresponding to an "is active" flag
    #[must_use]
    pub const fn from_active(active: bool) -> Self {
        if active {
            Self::Active
        } else {
            Self::Inactive
        }
    }
}

/// Result of a single-store activate or deactivate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreOperationResponse {
    /// Platform that handled the operation
    pub platform: Platform,
    /// Store id as supplied by the caller
    pub store_id: String,
    /// Resulting store status
    pub status: StoreStatus,
    /// Human-readable message
    pub message: String,
}

/// Per-store outcome inside a bulk operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreOperationOutcome {
    /// Store id as supplied by the caller
    pub store_id: String,
    /// Resulting store status
    pub status: StoreStatus,
    /// Whether the platform accepted the operation
    pub success: bool,
    /// Human-readable message
    pub message: String,
    /// Normalized error kind when the operation failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorKind>,
}

/// Result of an activate-many or deactivate-many request
///
/// `results` holds exactly one entry per requested store id, in request order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkOperationResponse {
    /// Platform that handled the batch
    pub platform: Platform,
    /// Ordered per-store outcomes
    pub results: Vec<StoreOperationOutcome>,
}

/// Status of one store, optionally enriched with platform details
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreStatusEntry {
    /// Store id
    pub store_id: String,
    /// Current status
    pub status: StoreStatus,
    /// Normalized document number (digits only), when the platform exposes one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document: Option<String>,
    /// Store display name, when the platform exposes one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl StoreStatusEntry {
    /// Entry for a requested id the platform does not know
    #[must_use]
    pub fn not_found(store_id: impl Into<String>) -> Self {
        Self {
            store_id: store_id.into(),
            status: StoreStatus::NotFound,
            document: None,
            display_name: None,
        }
    }
}

/// Result of a status query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusQueryResponse {
    /// Platform that was queried
    pub platform: Platform,
    /// One entry per requested id, or every known store when no filter was given
    pub stores: Vec<StoreStatusEntry>,
}
