use async_trait::async_trait;
use gist_core::{Intensity, Result};

/// One chat-style completion request.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub system: Option<String>,
    pub prompt: String,
    /// Number of completions to sample.
    pub n: usize,
    pub temperature: f64,
}

/// The external generative-text service.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Return up to `request.n` completions.
    async fn complete(&self, request: &CompletionRequest) -> Result<Vec<String>>;
}

/// Produces shorter rewrites of a text.
#[async_trait]
pub trait CandidateGenerator: Send + Sync {
    /// Up to `n` distinct rewrites, each strictly shorter (in words) than `text`.
    /// An error means the service could not be reached within the retry budget.
    async fn generate(&self, text: &str, n: usize, intensity: Intensity) -> Result<Vec<String>>;
}

/// Grades how well-formed a text is as a standalone sentence, in `[0, 1]`.
#[async_trait]
pub trait GrammarJudge: Send + Sync {
    async fn grade(&self, text: &str) -> Result<f64>;
}

/// Maps texts to dense vectors, one per input and in input order.
#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>>;
}
