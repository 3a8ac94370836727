//! OpenAI-compatible embeddings client.

use crate::retry::with_retry;
use crate::traits::Embedder;
use anyhow::Context as _;
use async_trait::async_trait;
use gist_core::config::RetryConfig;
use gist_core::{EngineConfig, GistError, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    input: &'a [&'a str],
}

#[derive(Debug, Deserialize)]
struct EmbedResponse {
    #[serde(default)]
    data: Vec<EmbedData>,
}

#[derive(Debug, Deserialize)]
struct EmbedData {
    #[serde(default)]
    index: usize,
    embedding: Vec<f32>,
}

/// Sentence embeddings from `POST {base_url}/embeddings`, retried like
/// completion calls.
pub struct OpenAiEmbedder {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: String,
    retry: RetryConfig,
}

impl OpenAiEmbedder {
    pub fn new(config: &EngineConfig, api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into().trim().to_string();
        if api_key.is_empty() {
            return Err(GistError::InvalidConfig("API key is required".into()));
        }
        Ok(Self {
            client: reqwest::Client::new(),
            endpoint: format!("{}/embeddings", config.model.base_url.trim_end_matches('/')),
            model: config.model.embedding_model.clone(),
            api_key,
            retry: config.retry.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn try_embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        self.send(texts).await.map_err(|e| GistError::Model(format!("{e:#}")))
    }

    async fn send(&self, texts: &[&str]) -> anyhow::Result<Vec<Vec<f32>>> {
        let resp = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&EmbedRequest { model: &self.model, input: texts })
            .send()
            .await
            .context("embedding request failed")?;

        let status = resp.status();
        let text = resp.text().await.context("failed to read embedding response")?;
        if !status.is_success() {
            anyhow::bail!("embeddings returned {status}: {text}");
        }
        let vectors = parse_embeddings(&text)?;
        if vectors.len() != texts.len() {
            anyhow::bail!("expected {} embeddings, got {}", texts.len(), vectors.len());
        }
        Ok(vectors)
    }
}

/// Extract `data[].embedding`, ordered by `data[].index`.
pub fn parse_embeddings(body: &str) -> anyhow::Result<Vec<Vec<f32>>> {
    let mut parsed: EmbedResponse = serde_json::from_str(body).context("malformed embedding response")?;
    parsed.data.sort_by_key(|d| d.index);
    Ok(parsed.data.into_iter().map(|d| d.embedding).collect())
}

/// Wire body of an embedding request.
pub fn embedding_request_body(model: &str, texts: &[&str]) -> serde_json::Value {
    serde_json::to_value(EmbedRequest { model, input: texts }).unwrap_or(serde_json::Value::Null)
}

#[async_trait]
impl Embedder for OpenAiEmbedder {
    async fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        debug!(model = %self.model, inputs = texts.len(), "embedding");
        with_retry(&self.retry, "embed", || self.try_embed(texts)).await
    }
}
