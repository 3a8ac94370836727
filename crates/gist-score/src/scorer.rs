//! Candidate scorer.

use crate::embedder::Embedder;
use crate::metrics::{paraphrase_fidelity, revert_paraphrasing, semantic_closeness};
use async_trait::async_trait;
use gist_core::{Result, Scores};
use gist_llm::GrammarJudge;
use std::sync::Arc;
use tracing::trace;

/// Scores a raw rewrite against its parent.
#[async_trait]
pub trait Scorer: Send + Sync {
    async fn score(&self, parent: &str, candidate: &str) -> Result<Scores>;
}

/// Embedding-based closeness, diff-based fidelity and an optional grammar judge.
///
/// Closeness and grammaticality are measured on the candidate after it has
/// been reverted onto the parent's words (the text that would be kept);
/// fidelity is measured on the raw candidate.
pub struct CompositeScorer {
    embedder: Arc<dyn Embedder>,
    grammar: Option<Arc<dyn GrammarJudge>>,
}

impl CompositeScorer {
    pub fn new(embedder: Arc<dyn Embedder>, grammar: Option<Arc<dyn GrammarJudge>>) -> Self {
        Self { embedder, grammar }
    }

    /// Reduced-latency scorer: no grammar grading.
    pub fn without_grammar(embedder: Arc<dyn Embedder>) -> Self {
        Self::new(embedder, None)
    }

    pub fn grades_grammar(&self) -> bool {
        self.grammar.is_some()
    }
}

#[async_trait]
impl Scorer for CompositeScorer {
    async fn score(&self, parent: &str, candidate: &str) -> Result<Scores> {
        let kept = revert_paraphrasing(parent, candidate);
        let semantic = semantic_closeness(self.embedder.as_ref(), parent, &kept).await?;
        let paraphrase = paraphrase_fidelity(parent, candidate);
        let grammaticality = match &self.grammar {
            Some(judge) => Some(judge.grade(&kept).await?.clamp(0.0, 1.0)),
            None => None,
        };
        trace!(semantic, paraphrase, ?grammaticality, "scored candidate");
        Ok(Scores { semantic, grammaticality, paraphrase })
    }
}
