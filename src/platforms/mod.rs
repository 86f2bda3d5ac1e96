// ABOUTME: Platform client abstraction shared by every delivery platform integration
// ABOUTME: Declares the PlatformClient trait plus response helpers and status filtering
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Platform clients
//!
//! Each supported platform implements [`PlatformClient`]. A client owns its
//! own token cache and renewal task, speaks the platform's wire format and
//! reports failures as [`PlatformError`], which the gateway normalizes.

/// AnotaAI client
pub mod anotaai;
/// DeliveryVip client
pub mod deliveryvip;
/// Platform failure types
pub mod errors;
/// Background token renewal
pub mod renewal;
/// Shared token slot
pub mod token;

pub use anotaai::AnotaAiClient;
pub use deliveryvip::DeliveryVipClient;
pub use errors::PlatformError;
pub use renewal::{Authenticator, RenewalHandle, TokenRenewer};
pub use token::TokenCache;

use crate::models::{Platform, StoreStatusEntry};
use async_trait::async_trait;
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use std::collections::HashMap;

/// Store operations every platform supports
#[async_trait]
pub trait PlatformClient: Send + Sync {
    /// Platform served by this client
    fn platform(&self) -> Platform;

    /// Open a store for orders
    async fn activate(&self, store_id: &str) -> Result<(), PlatformError>;

    /// Block a store from taking orders
    async fn deactivate(&self, store_id: &str) -> Result<(), PlatformError>;

    /// Status of the requested stores, or of every known store when
    /// `store_ids` is empty
    async fn query_status(&self, store_ids: &[String])
        -> Result<Vec<StoreStatusEntry>, PlatformError>;

    /// Stop background work owned by the client
    async fn shutdown(&self) {}
}

/// Apply a status filter to a platform listing
///
/// With no requested ids the listing is returned as-is. Otherwise the result
/// has one entry per requested id, in request order; ids the listing does not
/// contain become not-found entries. Duplicate ids in the listing resolve to
/// their first occurrence.
#[must_use]
pub fn select_stores(listing: Vec<StoreStatusEntry>, requested: &[String]) -> Vec<StoreStatusEntry> {
    if requested.is_empty() {
        return listing;
    }

    let mut by_id: HashMap<&str, &StoreStatusEntry> = HashMap::with_capacity(listing.len());
    for entry in &listing {
        by_id.entry(entry.store_id.as_str()).or_insert(entry);
    }

    requested
        .iter()
        .map(|id| {
            by_id
                .get(id.as_str())
                .map_or_else(|| StoreStatusEntry::not_found(id.as_str()), |entry| (*entry).clone())
        })
        .collect()
}

/// Deserialize a field, treating an explicit `null` like a missing value
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Send a request and read the whole body
async fn send(platform: Platform, request: RequestBuilder) -> Result<(StatusCode, String), PlatformError> {
    let response = request
        .send()
        .await
        .map_err(|source| PlatformError::Transport { platform, source })?;
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    Ok((status, body))
}

/// Decode a JSON body
fn decode<T: DeserializeOwned>(platform: Platform, body: &str) -> Result<T, PlatformError> {
    serde_json::from_str(body).map_err(|source| PlatformError::Decode { platform, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StoreStatus;

    fn entry(id: &str, status: StoreStatus) -> StoreStatusEntry {
        StoreStatusEntry {
            store_id: id.to_owned(),
            status,
            document: None,
            display_name: Some(format!("Store {id}")),
        }
    }

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_owned()).collect()
    }

    #[test]
    fn test_empty_filter_returns_listing() {
        let listing = vec![entry("a", StoreStatus::Active), entry("b", StoreStatus::Inactive)];

        let selected = select_stores(listing.clone(), &[]);

        assert_eq!(selected, listing);
    }

    #[test]
    fn test_filter_follows_request_order_and_marks_unknown() {
        let listing = vec![entry("a", StoreStatus::Active), entry("b", StoreStatus::Inactive)];

        let selected = select_stores(listing, &ids(&["b", "zzz", "a"]));

        let statuses: Vec<_> = selected.iter().map(|e| (e.store_id.as_str(), e.status)).collect();
        assert_eq!(
            statuses,
            vec![
                ("b", StoreStatus::Inactive),
                ("zzz", StoreStatus::NotFound),
                ("a", StoreStatus::Active),
            ]
        );
        assert_eq!(selected[1].display_name, None);
    }

    #[test]
    fn test_duplicate_requests_and_listing_entries() {
        let listing = vec![entry("a", StoreStatus::Active), entry("a", StoreStatus::Inactive)];

        let selected = select_stores(listing, &ids(&["a", "a"]));

        assert_eq!(selected.len(), 2);
        assert!(selected.iter().all(|e| e.status == StoreStatus::Active));
    }

    #[test]
    fn test_filter_against_empty_listing() {
        let selected = select_stores(Vec::new(), &ids(&["x"]));

        assert_eq!(selected, vec![StoreStatusEntry::not_found("x")]);
    }
}
