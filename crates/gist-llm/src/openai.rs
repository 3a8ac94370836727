//! OpenAI-compatible chat-completions client.

use crate::traits::{CompletionRequest, LanguageModel};
use anyhow::Context as _;
use async_trait::async_trait;
use gist_core::config::ModelConfig;
use gist_core::{GistError, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    n: usize,
    temperature: f64,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Chat-completions client. The API key is supplied by the caller.
pub struct OpenAiChatModel {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl OpenAiChatModel {
    pub fn new(config: &ModelConfig, api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into().trim().to_string();
        if api_key.is_empty() {
            return Err(GistError::InvalidConfig("API key is required".into()));
        }
        Ok(Self {
            client: reqwest::Client::new(),
            endpoint: format!("{}/chat/completions", config.base_url.trim_end_matches('/')),
            model: config.model.clone(),
            api_key,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn send(&self, request: &CompletionRequest) -> anyhow::Result<Vec<String>> {
        let body = build_request(&self.model, request);
        let resp = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .context("chat completion request failed")?;

        let status = resp.status();
        let text = resp.text().await.context("failed to read chat completion response")?;
        if !status.is_success() {
            anyhow::bail!("chat completion returned {status}: {text}");
        }
        parse_response(&text)
    }
}

fn build_request<'a>(model: &'a str, request: &'a CompletionRequest) -> ChatRequest<'a> {
    let mut messages = Vec::with_capacity(2);
    if let Some(system) = request.system.as_deref() {
        messages.push(ChatMessage { role: "system", content: system });
    }
    messages.push(ChatMessage { role: "user", content: &request.prompt });
    ChatRequest { model, messages, n: request.n, temperature: request.temperature }
}

/// Extract `choices[].message.content` from a response body.
pub fn parse_response(body: &str) -> anyhow::Result<Vec<String>> {
    let parsed: ChatResponse = serde_json::from_str(body).context("malformed chat completion response")?;
    Ok(parsed.choices.into_iter().filter_map(|c| c.message.content).collect())
}

/// Serialize the wire body for a request (exposed for inspection and tests).
pub fn request_body(model: &str, request: &CompletionRequest) -> serde_json::Value {
    serde_json::to_value(build_request(model, request)).unwrap_or(serde_json::Value::Null)
}

#[async_trait]
impl LanguageModel for OpenAiChatModel {
    async fn complete(&self, request: &CompletionRequest) -> Result<Vec<String>> {
        debug!(model = %self.model, n = request.n, "chat completion");
        self.send(request).await.map_err(|e| GistError::Model(format!("{e:#}")))
    }
}
