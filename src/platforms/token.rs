// ABOUTME: Shared access-token slot read by platform calls and written by the renewer
// ABOUTME: Readers never observe a partially written token
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt;
use tokio::sync::RwLock;

/// Current access token of one platform
///
/// Starts empty. The renewer replaces the whole value on each successful
/// authentication; a failed renewal leaves the previous token in place.
#[derive(Default)]
pub struct TokenCache {
    token: RwLock<Option<String>>,
}

impl TokenCache {
    /// Create an empty cache
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current token, if one has been obtained
    pub async fn get(&self) -> Option<String> {
        self.token.read().await.clone()
    }

    /// Replace the current token
    pub async fn set(&self, token: impl Into<String>) {
        *self.token.write().await = Some(token.into());
    }
}

impl fmt::Debug for TokenCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenCache")
            .field("token", &"[REDACTED]")
            .finish()
    }
}
