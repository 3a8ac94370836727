//! Candidate generator backed by a language model.

use crate::prompts;
use crate::retry::with_retry;
use crate::traits::{CandidateGenerator, CompletionRequest, LanguageModel};
use async_trait::async_trait;
use gist_core::config::RetryConfig;
use gist_core::text::{keys, strip_wrapping_quotes, word_count};
use gist_core::{EngineConfig, Intensity, Result};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

/// Asks the model for extractive shortenings of a text.
pub struct ModelGenerator {
    model: Arc<dyn LanguageModel>,
    retry: RetryConfig,
    temperature: f64,
    system_message: Option<String>,
}

impl ModelGenerator {
    pub fn new(model: Arc<dyn LanguageModel>, config: &EngineConfig) -> Self {
        Self {
            model,
            retry: config.retry.clone(),
            temperature: config.model.temperature,
            system_message: config.model.system_message.clone(),
        }
    }

    pub fn with_system_message(mut self, message: Option<String>) -> Self {
        self.system_message = message;
        self
    }
}

#[async_trait]
impl CandidateGenerator for ModelGenerator {
    async fn generate(&self, text: &str, n: usize, intensity: Intensity) -> Result<Vec<String>> {
        if n == 0 || text.trim().is_empty() {
            return Ok(Vec::new());
        }
        let request = CompletionRequest {
            system: self.system_message.clone(),
            prompt: prompts::shortener(text, intensity),
            n,
            temperature: self.temperature,
        };
        let raw = with_retry(&self.retry, "generate", || self.model.complete(&request)).await?;
        let returned = raw.len();
        let candidates = clean_candidates(text, raw, n);
        debug!(returned, kept = candidates.len(), ?intensity, "generated candidates");
        Ok(candidates)
    }
}

/// Drop degenerate completions: empty, not strictly shorter than `parent` in
/// words, or duplicates (compared by normalized words). Keeps model order.
pub fn clean_candidates(parent: &str, raw: Vec<String>, n: usize) -> Vec<String> {
    let parent_words = word_count(parent);
    let mut seen: HashSet<Vec<String>> = HashSet::new();
    let mut out = Vec::new();
    for completion in raw {
        let text = strip_wrapping_quotes(&completion);
        let words = word_count(text);
        if words == 0 || words >= parent_words {
            continue;
        }
        if !seen.insert(keys(text)) {
            continue;
        }
        out.push(text.to_string());
        if out.len() == n {
            break;
        }
    }
    out
}
