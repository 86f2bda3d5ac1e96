// ABOUTME: Shared test utilities for gateway and route integration tests
// ABOUTME: Provides an in-memory platform client that records every call it receives
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(dead_code, missing_docs)]

use async_trait::async_trait;
use delivery_control::models::{Platform, StoreStatus, StoreStatusEntry};
use delivery_control::platforms::{select_stores, PlatformClient, PlatformError};
use reqwest::StatusCode;
use std::sync::Mutex;

/// In-memory platform with a fixed set of stores
///
/// Unknown ids are rejected with a "not found" message, ids listed as broken
/// fail with an HTTP 500.
pub struct FakePlatformClient {
    platform: Platform,
    stores: Mutex<Vec<(String, bool)>>,
    broken: Vec<String>,
    calls: Mutex<Vec<String>>,
}

impl FakePlatformClient {
    pub fn new(platform: Platform, stores: &[(&str, bool)]) -> Self {
        Self {
            platform,
            stores: Mutex::new(
                stores
                    .iter()
                    .map(|(id, active)| ((*id).to_owned(), *active))
                    .collect(),
            ),
            broken: Vec::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_broken(mut self, store_id: &str) -> Self {
        self.broken.push(store_id.to_owned());
        self
    }

    /// Calls received so far, formatted as `operation:store_id`
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn is_active(&self, store_id: &str) -> Option<bool> {
        self.stores
            .lock()
            .unwrap()
            .iter()
            .find(|(id, _)| id == store_id)
            .map(|(_, active)| *active)
    }

    fn set_active(&self, operation: &str, store_id: &str, active: bool) -> Result<(), PlatformError> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("{operation}:{store_id}"));

        if self.broken.iter().any(|id| id == store_id) {
            return Err(PlatformError::from_status(
                self.platform,
                StatusCode::INTERNAL_SERVER_ERROR,
                "boom".to_owned(),
            ));
        }

        let mut stores = self.stores.lock().unwrap();
        match stores.iter_mut().find(|(id, _)| id == store_id) {
            Some(entry) => {
                entry.1 = active;
                Ok(())
            }
            None => Err(PlatformError::rejected(
                self.platform,
                "Página não encontrada",
            )),
        }
    }
}

#[async_trait]
impl PlatformClient for FakePlatformClient {
    fn platform(&self) -> Platform {
        self.platform
    }

    async fn activate(&self, store_id: &str) -> Result<(), PlatformError> {
        self.set_active("activate", store_id, true)
    }

    async fn deactivate(&self, store_id: &str) -> Result<(), PlatformError> {
        self.set_active("deactivate", store_id, false)
    }

    async fn query_status(
        &self,
        store_ids: &[String],
    ) -> Result<Vec<StoreStatusEntry>, PlatformError> {
        self.calls.lock().unwrap().push("status".to_owned());
        let listing = self
            .stores
            .lock()
            .unwrap()
            .iter()
            .map(|(id, active)| StoreStatusEntry {
                store_id: id.clone(),
                status: StoreStatus::from_active(*active),
                document: None,
                display_name: None,
            })
            .collect();
        Ok(select_stores(listing, store_ids))
    }
}

pub fn ids(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_owned()).collect()
}
