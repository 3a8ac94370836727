//! Model-judged grammaticality.

use crate::prompts;
use crate::retry::with_retry;
use crate::traits::{CompletionRequest, GrammarJudge, LanguageModel};
use async_trait::async_trait;
use gist_core::config::RetryConfig;
use gist_core::{EngineConfig, Result};
use regex::Regex;
use std::sync::{Arc, LazyLock};
use tracing::warn;

static RE_GRADE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b([ABC])\b").unwrap());

/// Letter grade returned by the grammar prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrammarGrade {
    /// Fully grammatical.
    A,
    /// Minor issues.
    B,
    /// Major errors.
    C,
}

impl GrammarGrade {
    pub fn score(self) -> f64 {
        match self {
            Self::A => 1.0,
            Self::B => 0.5,
            Self::C => 0.0,
        }
    }
}

/// Extract the grade letter from a free-form reply ("A", "B.", "Answer: C", ...).
pub fn parse_grade(reply: &str) -> Option<GrammarGrade> {
    let upper = reply.trim().to_uppercase();
    let tail = match upper.split_once("ANSWER") {
        Some((_, rest)) => rest.trim_start().trim_start_matches(':').trim(),
        None => upper.as_str(),
    };
    let letter = RE_GRADE
        .captures(tail)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().chars().next())
        .or_else(|| tail.chars().next());
    match letter {
        Some('A') => Some(GrammarGrade::A),
        Some('B') => Some(GrammarGrade::B),
        Some('C') => Some(GrammarGrade::C),
        _ => None,
    }
}

/// Grammar judge that asks the language model for a letter grade.
pub struct ModelGrammarJudge {
    model: Arc<dyn LanguageModel>,
    retry: RetryConfig,
    temperature: f64,
}

impl ModelGrammarJudge {
    pub fn new(model: Arc<dyn LanguageModel>, config: &EngineConfig) -> Self {
        Self {
            model,
            retry: config.retry.clone(),
            temperature: config.model.grading_temperature,
        }
    }
}

#[async_trait]
impl GrammarJudge for ModelGrammarJudge {
    async fn grade(&self, text: &str) -> Result<f64> {
        let request = CompletionRequest {
            system: None,
            prompt: prompts::grammar_check(text),
            n: 1,
            temperature: self.temperature,
        };
        let replies = with_retry(&self.retry, "grade", || self.model.complete(&request)).await?;
        let reply = replies.first().map(String::as_str).unwrap_or("");
        match parse_grade(reply) {
            Some(grade) => Ok(grade.score()),
            None => {
                warn!(reply, "unparseable grammar grade, treating as C");
                Ok(GrammarGrade::C.score())
            }
        }
    }
}
