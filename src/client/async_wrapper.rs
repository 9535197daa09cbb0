//! Async wrapper around the synchronous BrevoClient.
//!
//! This module provides an async interface to the synchronous BrevoClient by using
//! `tokio::task::spawn_blocking` to run HTTP operations on a dedicated thread pool,
//! preventing blocking of the async runtime.

use crate::client::{BrevoClient, ProviderResponse};
use crate::error::{ProviderError, ProviderResult};
use crate::metrics::Metrics;
use crate::models::EmailRequest;
use async_trait::async_trait;
use std::sync::Arc;

/// Anything that can deliver an `EmailRequest`.
///
/// The dispatch service depends on this trait rather than on `BrevoClient`,
/// so tests can substitute an in-memory provider.
#[async_trait]
pub trait EmailProvider: Send + Sync {
    async fn send_email(&self, request: &EmailRequest) -> ProviderResult<ProviderResponse>;

    /// Provider call metrics, when the implementation keeps any.
    fn metrics(&self) -> Option<&Metrics> {
        None
    }
}

/// Async wrapper around synchronous BrevoClient.
///
/// Uses `tokio::task::spawn_blocking` to run synchronous HTTP
/// operations on a dedicated thread pool, preventing blocking
/// the async runtime.
#[derive(Clone)]
pub struct AsyncBrevoClient {
    client: Arc<BrevoClient>,
}

impl AsyncBrevoClient {
    pub fn new(client: BrevoClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }
}

#[async_trait]
impl EmailProvider for AsyncBrevoClient {
    async fn send_email(&self, request: &EmailRequest) -> ProviderResult<ProviderResponse> {
        let client = self.client.clone();
        let request = request.clone();

        tokio::task::spawn_blocking(move || client.send_email(&request))
            .await
            .map_err(|e| ProviderError::HttpError(format!("Task join error: {}", e)))?
    }

    fn metrics(&self) -> Option<&Metrics> {
        Some(self.client.metrics())
    }
}
