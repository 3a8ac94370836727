//! Paragraph orchestration: segment, compress sentences concurrently, align
//! and reassemble by sentence index.

use crate::aligner::{align, spans};
use crate::exporter::{export, ParagraphExport};
use crate::recursion::{Compression, RecursionEngine};
use anyhow::anyhow;
use gist_core::{EngineConfig, GistError, Result, SalienceMap, Sentence};
use gist_llm::{
    CandidateGenerator, Embedder, GrammarJudge, LanguageModel, ModelGenerator, ModelGrammarJudge, RateLimitedModel,
};
use gist_score::{CompositeScorer, Scorer};
use gist_segment::{RuleSegmenter, Segmenter};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio::time::Instant;
use tracing::{info, warn};

/// Inbound request for one paragraph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SalienceRequest {
    #[serde(default)]
    pub title: Option<String>,
    pub content: String,
    /// Depth ceiling for this request; never exceeds the configured maximum.
    #[serde(default)]
    pub k: Option<usize>,
    /// Include per-level winner scores in the export.
    #[serde(default)]
    pub diagnostics: bool,
}

/// The salience engine.
pub struct ParagraphEngine {
    segmenter: Arc<dyn Segmenter>,
    recursion: Arc<RecursionEngine>,
    config: Arc<EngineConfig>,
}

impl ParagraphEngine {
    pub fn new(
        segmenter: Arc<dyn Segmenter>,
        generator: Arc<dyn CandidateGenerator>,
        scorer: Arc<dyn Scorer>,
        config: EngineConfig,
    ) -> Result<Self> {
        config.validate()?;
        let config = Arc::new(config);
        let recursion = Arc::new(RecursionEngine::new(generator, scorer, Arc::clone(&config)));
        Ok(Self { segmenter, recursion, config })
    }

    /// Wire the default components around a language model and an embedder:
    /// one shared in-flight limit, the model-backed generator and, in the
    /// full variant, the model-graded grammar judge.
    pub fn with_model(model: Arc<dyn LanguageModel>, embedder: Arc<dyn Embedder>, config: EngineConfig) -> Result<Self> {
        let limiter = RateLimitedModel::new(model, config.concurrency.max_in_flight_requests);
        let embedder: Arc<dyn Embedder> = Arc::new(limiter.embedder(embedder));
        let limited: Arc<dyn LanguageModel> = Arc::new(limiter);
        let generator = Arc::new(ModelGenerator::new(Arc::clone(&limited), &config));
        let scorer = if config.enable_grammaticality_scoring {
            let judge: Arc<dyn GrammarJudge> = Arc::new(ModelGrammarJudge::new(limited, &config));
            CompositeScorer::new(embedder, Some(judge))
        } else {
            CompositeScorer::without_grammar(embedder)
        };
        Self::new(Arc::new(RuleSegmenter::default()), generator, Arc::new(scorer), config)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Salience maps for every sentence of `paragraph`, ordered by index.
    pub async fn analyze(&self, paragraph: &str, k: Option<usize>) -> Result<Vec<SalienceMap>> {
        let sentences = self.segmenter.segment(paragraph)?;
        let max_level = self.config.effective_depth(k);
        let deadline = self
            .config
            .paragraph_deadline_ms
            .map(|ms| Instant::now() + Duration::from_millis(ms));
        let count = sentences.len();
        info!(sentences = count, max_level, "analyzing paragraph");

        let permits = Arc::new(Semaphore::new(self.config.concurrency.max_concurrent_sentences));
        let mut tasks = JoinSet::new();
        for sentence in sentences {
            let recursion = Arc::clone(&self.recursion);
            let permits = Arc::clone(&permits);
            tasks.spawn(async move {
                let _permit = permits
                    .acquire_owned()
                    .await
                    .map_err(|_| GistError::Other(anyhow!("sentence limiter closed")))?;
                let compression = recursion.compress(&sentence.text, max_level, deadline).await;
                Ok::<_, GistError>((sentence, compression))
            });
        }

        let mut done: Vec<(Sentence, Compression)> = Vec::with_capacity(count);
        while let Some(joined) = tasks.join_next().await {
            let result = joined.map_err(|e| GistError::Other(anyhow!("sentence task failed: {e}")))?;
            done.push(result?);
        }

        if !done.is_empty() && done.iter().all(|(_, c)| c.failed_at_start()) {
            warn!(sentences = done.len(), "language model unreachable for every sentence");
            return Err(GistError::ServiceExhausted { sentences: done.len() });
        }

        done.sort_by_key(|(s, _)| s.index);
        Ok(done.into_iter().map(|(s, c)| salience_map(s, c, max_level)).collect())
    }

    /// Analyze and export in one call.
    pub async fn salience(&self, request: &SalienceRequest) -> Result<ParagraphExport> {
        let maps = self.analyze(&request.content, request.k).await?;
        Ok(export(request.title.clone(), &maps, request.diagnostics))
    }
}

/// Assemble the read-only map: align the distinct levels, then pad the level
/// list up to `max_level` with the final text.
pub fn salience_map(sentence: Sentence, compression: Compression, max_level: usize) -> SalienceMap {
    let depth_reached = compression.depth_reached();
    let tokens = align(&compression.levels, max_level);
    let spans = spans(&tokens);

    let mut levels = compression.levels;
    if let Some(last) = levels.last().cloned() {
        levels.resize(max_level.max(depth_reached) + 1, last);
    }

    SalienceMap {
        sentence,
        levels,
        level_scores: compression.level_scores,
        depth_reached,
        max_level,
        termination: compression.termination,
        spans,
    }
}
