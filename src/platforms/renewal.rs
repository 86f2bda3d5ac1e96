// ABOUTME: Background token renewal keeping each platform's token cache populated
// ABOUTME: Authenticates immediately, then once per period, until shut down
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Periodic token renewal
//!
//! A renewer alternates between two states: authenticating, and idle until the
//! next period elapses. The first authentication starts as soon as the task is
//! spawned. A failed attempt is logged and the cache keeps whatever token it
//! held before; the next attempt happens one full period later.

use super::errors::PlatformError;
use super::token::TokenCache;
use crate::models::Platform;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info};

/// Smallest period accepted by the renewer
const MIN_RENEWAL_PERIOD: Duration = Duration::from_secs(1);

/// Obtains a fresh access token from a platform
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Platform this authenticator logs into
    fn platform(&self) -> Platform;

    /// Perform one authentication round-trip and return the new token
    async fn authenticate(&self) -> Result<String, PlatformError>;
}

/// Authenticate once and store the resulting token
///
/// # Errors
///
/// Returns the authentication failure; the cache is left untouched in that case
pub async fn renew_once<A>(authenticator: &A, cache: &TokenCache) -> Result<(), PlatformError>
where
    A: Authenticator + ?Sized,
{
    let platform = authenticator.platform();
    match authenticator.authenticate().await {
        Ok(token) => {
            cache.set(token).await;
            info!(platform = %platform, "Access token renewed");
            Ok(())
        }
        Err(e) => {
            error!(platform = %platform, kind = %e.kind(), error = %e, "Access token renewal failed");
            Err(e)
        }
    }
}

/// Spawns renewal tasks
pub struct TokenRenewer;

impl TokenRenewer {
    /// Start renewing `cache` every `period` using `authenticator`
    ///
    /// Must be called from within a Tokio runtime.
    pub fn spawn<A>(authenticator: Arc<A>, cache: Arc<TokenCache>, period: Duration) -> RenewalHandle
    where
        A: Authenticator + ?Sized + 'static,
    {
        let period = period.max(MIN_RENEWAL_PERIOD);
        let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);
        let platform = authenticator.platform();

        let task = tokio::spawn(async move {
            info!(platform = %platform, period_secs = period.as_secs(), "Token renewal task started");
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        // Failure is already logged; the next tick retries
                        let _ = renew_once(authenticator.as_ref(), &cache).await;
                    }
                    _ = shutdown_rx.recv() => {
                        debug!(platform = %platform, "Token renewal task received shutdown signal");
                        break;
                    }
                }
            }
        });

        RenewalHandle { shutdown_tx, task }
    }
}

/// Owner handle of a running renewal task
///
/// Dropping the handle closes the shutdown channel, which also stops the task.
#[derive(Debug)]
pub struct RenewalHandle {
    shutdown_tx: mpsc::Sender<()>,
    task: JoinHandle<()>,
}

impl RenewalHandle {
    /// Stop the task and wait for it to exit
    pub async fn shutdown(self) {
        // A closed channel means the task has already stopped
        let _ = self.shutdown_tx.send(()).await;
        if let Err(e) = self.task.await {
            error!(error = %e, "Token renewal task ended abnormally");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingAuthenticator {
        calls: AtomicUsize,
        fail_after: usize,
    }

    impl CountingAuthenticator {
        fn new(fail_after: usize) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail_after,
            }
        }
    }

    #[async_trait]
    impl Authenticator for CountingAuthenticator {
        fn platform(&self) -> Platform {
            Platform::AnotaAi
        }

        async fn authenticate(&self) -> Result<String, PlatformError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if call > self.fail_after {
                return Err(PlatformError::rejected(Platform::AnotaAi, "invalid credentials"));
            }
            Ok(format!("token-{call}"))
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_authenticates_immediately() {
        let authenticator = Arc::new(CountingAuthenticator::new(usize::MAX));
        let cache = Arc::new(TokenCache::new());

        let handle = TokenRenewer::spawn(
            Arc::clone(&authenticator),
            Arc::clone(&cache),
            Duration::from_secs(3600),
        );
        tokio::time::sleep(Duration::from_millis(10)).await;

        assert_eq!(cache.get().await.as_deref(), Some("token-1"));
        assert_eq!(authenticator.calls.load(Ordering::SeqCst), 1);
        handle.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_renews_every_period() {
        let authenticator = Arc::new(CountingAuthenticator::new(usize::MAX));
        let cache = Arc::new(TokenCache::new());

        let handle = TokenRenewer::spawn(
            Arc::clone(&authenticator),
            Arc::clone(&cache),
            Duration::from_secs(60),
        );
        tokio::time::sleep(Duration::from_secs(150)).await;

        assert_eq!(authenticator.calls.load(Ordering::SeqCst), 3);
        assert_eq!(cache.get().await.as_deref(), Some("token-3"));
        handle.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_renewal_keeps_previous_token() {
        let authenticator = Arc::new(CountingAuthenticator::new(1));
        let cache = Arc::new(TokenCache::new());

        let handle = TokenRenewer::spawn(
            Arc::clone(&authenticator),
            Arc::clone(&cache),
            Duration::from_secs(60),
        );
        tokio::time::sleep(Duration::from_secs(90)).await;

        assert_eq!(authenticator.calls.load(Ordering::SeqCst), 2);
        assert_eq!(cache.get().await.as_deref(), Some("token-1"));
        handle.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_stops_task() {
        let authenticator = Arc::new(CountingAuthenticator::new(usize::MAX));
        let cache = Arc::new(TokenCache::new());

        let handle = TokenRenewer::spawn(
            Arc::clone(&authenticator),
            Arc::clone(&cache),
            Duration::from_secs(60),
        );
        tokio::time::sleep(Duration::from_millis(10)).await;
        handle.shutdown().await;

        tokio::time::sleep(Duration::from_secs(600)).await;
        assert_eq!(authenticator.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_renew_once_propagates_failure() {
        let authenticator = CountingAuthenticator::new(0);
        let cache = TokenCache::new();

        let result = renew_once(&authenticator, &cache).await;

        assert!(result.is_err());
        assert_eq!(cache.get().await, None);
    }
}
