use crate::error::{GistError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Default system message: legal-document framing used by the shortener prompts.
pub const LEGAL_SYSTEM_MESSAGE: &str = "You are an expert legal assistant. Your goal is to reveal the core legal structure. You MUST aggressively delete specific dates, locations, and citations as they are considered noise here. However, you must PRESERVE legal terms of art (e.g., 'common ground', 'proprietor', 'registered') and the logical flow of the argument. Focus on the main legal action.";

/// Engine configuration. Every field has a default, so partial TOML files are accepted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    /// Candidates sampled per depth (`N`).
    pub candidates_per_depth: usize,
    /// Recursion depth ceiling (`MAX_DEPTH`).
    pub max_depth: usize,
    pub grammaticality_gate: f64,
    pub semantic_gate: f64,
    /// Full variant when true; the reduced-latency variant skips grammar grading.
    pub enable_grammaticality_scoring: bool,
    /// Texts with fewer words than this are not compressed further.
    pub min_words: usize,
    pub optimal_length_ratio: f64,
    pub aggressiveness: AggressivenessConfig,
    pub weights: WeightsConfig,
    pub retry: RetryConfig,
    pub concurrency: ConcurrencyConfig,
    pub paragraph_deadline_ms: Option<u64>,
    pub model: ModelConfig,
}

/// Sentence-length driven aggressiveness.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AggressivenessConfig {
    /// At or below this word count a sentence is handled fully conservatively.
    pub short_words: usize,
    /// At or above this word count a sentence is handled fully aggressively.
    pub long_words: usize,
    /// Aggressiveness above which the aggressive prompt is used.
    pub aggressive_prompt_above: f64,
    /// Aggressiveness above which the aggressive score profile is blended in.
    pub blend_above: f64,
    /// Optimal length ratio for a fully aggressive sentence.
    pub aggressive_length_ratio: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ScoreWeights {
    pub semantic: f64,
    pub grammaticality: f64,
    pub paraphrase: f64,
    pub length: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WeightsConfig {
    pub conservative: ScoreWeights,
    pub aggressive: ScoreWeights,
    /// Used for sentences whose aggressiveness is below `blend_above`.
    pub short_sentence: ScoreWeights,
    /// Bonus per unit of length reduction, scaled by aggressiveness.
    pub length_bonus: f64,
    /// Subtracted when grammaticality is below 1 (moderate issues).
    pub moderate_grammar_penalty: f64,
    /// Subtracted when grammaticality is 0 (major issues).
    pub poor_grammar_penalty: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RetryConfig {
    pub max_attempts: u32,
    pub base_delay_ms: u64,
    pub call_timeout_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ConcurrencyConfig {
    pub max_concurrent_sentences: usize,
    pub max_in_flight_requests: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ModelConfig {
    pub base_url: String,
    pub model: String,
    /// Sampling temperature for candidate generation.
    pub temperature: f64,
    /// Temperature for grammar grading; 0 keeps grading deterministic.
    pub grading_temperature: f64,
    pub system_message: Option<String>,
    /// Embedding model used for semantic closeness.
    pub embedding_model: String,
}

impl EngineConfig {
    /// Full variant: grammar grading on, deeper recursion, more candidates.
    pub fn full() -> Self {
        Self::default()
    }

    /// Reduced-latency variant: no grammar grading, smaller `N` and `MAX_DEPTH`.
    pub fn reduced_latency() -> Self {
        Self {
            candidates_per_depth: 2,
            max_depth: 3,
            enable_grammaticality_scoring: false,
            ..Self::default()
        }
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&raw)?;
        debug!(path = %path.display(), max_depth = config.max_depth, "engine config loaded");
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.candidates_per_depth == 0 {
            return Err(GistError::InvalidConfig("candidates_per_depth must be at least 1".into()));
        }
        for (name, v) in [
            ("grammaticality_gate", self.grammaticality_gate),
            ("semantic_gate", self.semantic_gate),
            ("optimal_length_ratio", self.optimal_length_ratio),
            ("aggressiveness.aggressive_length_ratio", self.aggressiveness.aggressive_length_ratio),
        ] {
            if !(0.0..=1.0).contains(&v) {
                return Err(GistError::InvalidConfig(format!("{name} must be within [0, 1], got {v}")));
            }
        }
        if self.aggressiveness.short_words >= self.aggressiveness.long_words {
            return Err(GistError::InvalidConfig(
                "aggressiveness.short_words must be below aggressiveness.long_words".into(),
            ));
        }
        if self.retry.max_attempts == 0 {
            return Err(GistError::InvalidConfig("retry.max_attempts must be at least 1".into()));
        }
        if self.concurrency.max_concurrent_sentences == 0 || self.concurrency.max_in_flight_requests == 0 {
            return Err(GistError::InvalidConfig("concurrency limits must be at least 1".into()));
        }
        Ok(())
    }

    /// Depth ceiling for one request. A caller-supplied `k` can only lower it.
    pub fn effective_depth(&self, k: Option<usize>) -> usize {
        match k {
            Some(k) => k.min(self.max_depth),
            None => self.max_depth,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            candidates_per_depth: 3,
            max_depth: 4,
            grammaticality_gate: 0.5,
            semantic_gate: 0.4,
            enable_grammaticality_scoring: true,
            min_words: 3,
            optimal_length_ratio: 0.6,
            aggressiveness: AggressivenessConfig::default(),
            weights: WeightsConfig::default(),
            retry: RetryConfig::default(),
            concurrency: ConcurrencyConfig::default(),
            paragraph_deadline_ms: None,
            model: ModelConfig::default(),
        }
    }
}

impl Default for AggressivenessConfig {
    fn default() -> Self {
        Self {
            short_words: 20,
            long_words: 80,
            aggressive_prompt_above: 0.5,
            blend_above: 0.1,
            aggressive_length_ratio: 0.5,
        }
    }
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            conservative: ScoreWeights { semantic: 1.0, grammaticality: 1.5, paraphrase: 1.0, length: 1.0 },
            aggressive: ScoreWeights { semantic: 0.3, grammaticality: 0.6, paraphrase: 0.15, length: 0.4 },
            short_sentence: ScoreWeights { semantic: 1.0, grammaticality: 2.0, paraphrase: 1.0, length: 1.0 },
            length_bonus: 0.3,
            moderate_grammar_penalty: 0.3,
            poor_grammar_penalty: 2.0,
        }
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self { max_attempts: 3, base_delay_ms: 250, call_timeout_ms: 30_000 }
    }
}

impl Default for ConcurrencyConfig {
    fn default() -> Self {
        Self { max_concurrent_sentences: 4, max_in_flight_requests: 8 }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".into(),
            model: "gpt-3.5-turbo".into(),
            embedding_model: "text-embedding-3-small".into(),
            temperature: 0.8,
            grading_temperature: 0.0,
            system_message: Some(LEGAL_SYSTEM_MESSAGE.into()),
        }
    }
}
