//! Bounds the number of in-flight requests to the language model.

use crate::traits::{CompletionRequest, Embedder, LanguageModel};
use async_trait::async_trait;
use gist_core::{GistError, Result};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::trace;

/// Wraps a model so at most `max_in_flight` requests run concurrently.
/// Clones share the same permits.
#[derive(Clone)]
pub struct RateLimitedModel {
    inner: Arc<dyn LanguageModel>,
    permits: Arc<Semaphore>,
    max_in_flight: usize,
}

impl RateLimitedModel {
    pub fn new(inner: Arc<dyn LanguageModel>, max_in_flight: usize) -> Self {
        let max_in_flight = max_in_flight.max(1);
        Self { inner, permits: Arc::new(Semaphore::new(max_in_flight)), max_in_flight }
    }

    pub fn in_flight(&self) -> usize {
        self.max_in_flight - self.permits.available_permits()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight
    }

    /// Put an embedder behind the same permits as this model.
    pub fn embedder(&self, inner: Arc<dyn Embedder>) -> RateLimitedEmbedder {
        RateLimitedEmbedder { inner, permits: Arc::clone(&self.permits) }
    }
}

/// An embedder sharing a [`RateLimitedModel`]'s in-flight budget.
#[derive(Clone)]
pub struct RateLimitedEmbedder {
    inner: Arc<dyn Embedder>,
    permits: Arc<Semaphore>,
}

#[async_trait]
impl Embedder for RateLimitedEmbedder {
    async fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|_| GistError::Model("rate limiter closed".into()))?;
        self.inner.embed(texts).await
    }
}

#[async_trait]
impl LanguageModel for RateLimitedModel {
    async fn complete(&self, request: &CompletionRequest) -> Result<Vec<String>> {
        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|_| GistError::Model("rate limiter closed".into()))?;
        trace!(in_flight = self.in_flight(), "model permit acquired");
        self.inner.complete(request).await
    }
}
