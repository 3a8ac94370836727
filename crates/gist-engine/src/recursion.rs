//! Per-sentence compression recursion.
//!
//! An explicit state machine over depths `0..=max_depth`: each transition asks
//! the generator for shorter rewrites of `T_d`, reverts them onto `T_d`'s
//! words, scores them concurrently and keeps the best one that passes the
//! gate as `T_{d+1}`.

use gist_core::text::word_count;
use gist_core::{Candidate, EngineConfig, Scores, Termination};
use gist_llm::CandidateGenerator;
use gist_score::composite::{intensity, optimal_length};
use gist_score::{aggressiveness, composite_score, length_score, passes_gate, revert_paraphrasing, Scorer};
use std::cmp::Ordering;
use std::sync::Arc;
use tokio::task::JoinSet;
use tokio::time::{timeout_at, Instant};
use tracing::{debug, warn};

/// Outcome of one `d -> d+1` transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Advance(Candidate),
    Stop(Termination),
}

/// The compressions of one sentence, `T_0 ..= T_depth_reached`.
#[derive(Debug, Clone, PartialEq)]
pub struct Compression {
    pub levels: Vec<String>,
    /// Winner scores for `T_1 ..= T_depth_reached`.
    pub level_scores: Vec<Scores>,
    pub termination: Termination,
}

impl Compression {
    pub fn depth_reached(&self) -> usize {
        self.levels.len() - 1
    }

    /// True when the very first transition failed to reach the model, either
    /// generating or scoring.
    pub fn failed_at_start(&self) -> bool {
        self.depth_reached() == 0
            && matches!(self.termination, Termination::GenerationFailed | Termination::ScoringFailed)
    }
}

pub struct RecursionEngine {
    generator: Arc<dyn CandidateGenerator>,
    scorer: Arc<dyn Scorer>,
    config: Arc<EngineConfig>,
}

impl RecursionEngine {
    pub fn new(generator: Arc<dyn CandidateGenerator>, scorer: Arc<dyn Scorer>, config: Arc<EngineConfig>) -> Self {
        Self { generator, scorer, config }
    }

    /// Compress `sentence` until `max_depth` or a terminal condition. With a
    /// deadline, an unfinished transition is abandoned and the deepest
    /// completed level is kept.
    pub async fn compress(&self, sentence: &str, max_depth: usize, deadline: Option<Instant>) -> Compression {
        let aggr = aggressiveness(word_count(sentence), &self.config.aggressiveness);
        let mut levels = vec![sentence.to_string()];
        let mut level_scores = Vec::new();

        let termination = loop {
            let depth = levels.len() - 1;
            if depth >= max_depth {
                break Termination::MaxDepth;
            }
            let parent = &levels[depth];
            let step = match deadline {
                Some(at) => match timeout_at(at, self.step(parent, aggr)).await {
                    Ok(step) => step,
                    Err(_) => Step::Stop(Termination::DeadlineExceeded),
                },
                None => self.step(parent, aggr).await,
            };
            match step {
                Step::Advance(winner) => {
                    debug!(depth = depth + 1, words = word_count(&winner.text), composite = winner.composite, "level selected");
                    level_scores.push(winner.scores);
                    levels.push(winner.text);
                }
                Step::Stop(reason) => break reason,
            }
        };

        debug!(depth_reached = levels.len() - 1, ?termination, "sentence compressed");
        Compression { levels, level_scores, termination }
    }

    /// One transition from `parent`, at the sentence's aggressiveness.
    pub async fn step(&self, parent: &str, aggr: f64) -> Step {
        let cfg = &self.config;
        let parent_words = word_count(parent);
        if parent_words < cfg.min_words.max(1) {
            return Step::Stop(Termination::BelowLengthFloor);
        }

        let raw = match self
            .generator
            .generate(parent, cfg.candidates_per_depth, intensity(aggr, &cfg.aggressiveness))
            .await
        {
            Ok(raw) => raw,
            Err(e) => {
                warn!(error = %e, "candidate generation failed");
                return Step::Stop(Termination::GenerationFailed);
            }
        };

        let mut tasks = JoinSet::new();
        for (rank, raw) in raw.into_iter().enumerate() {
            let text = revert_paraphrasing(parent, &raw);
            let words = word_count(&text);
            if words == 0 || words >= parent_words {
                continue;
            }
            let scorer = Arc::clone(&self.scorer);
            let parent = parent.to_string();
            tasks.spawn(async move {
                let scores = scorer.score(&parent, &raw).await;
                (rank, raw, text, scores)
            });
        }
        if tasks.is_empty() {
            return Step::Stop(Termination::NoCandidates);
        }

        let optimal = optimal_length(aggr, cfg.optimal_length_ratio, &cfg.aggressiveness);
        let mut scored = Vec::new();
        let mut failures = 0usize;
        while let Some(joined) = tasks.join_next().await {
            let (rank, raw, text, scores) = match joined {
                Ok(result) => result,
                Err(e) => {
                    warn!(error = %e, "scoring task aborted");
                    failures += 1;
                    continue;
                }
            };
            let scores = match scores {
                Ok(scores) => scores,
                Err(e) => {
                    warn!(rank, error = %e, "scoring failed, candidate discarded");
                    failures += 1;
                    continue;
                }
            };
            let mut candidate = Candidate {
                rank,
                length_score: length_score(parent, &text, optimal),
                raw,
                text,
                scores,
                composite: 0.0,
            };
            candidate.composite =
                composite_score(&candidate.scores, candidate.length_score, candidate.reduction(parent), aggr, cfg);
            scored.push(candidate);
        }
        if scored.is_empty() {
            // every failure is an outage, not a rejection
            return Step::Stop(if failures > 0 { Termination::ScoringFailed } else { Termination::NoCandidates });
        }

        let considered = scored.len();
        let winner = scored
            .into_iter()
            .filter(|c| passes_gate(&c.scores, cfg))
            .max_by(|a, b| compare(a, b, parent));
        match winner {
            Some(winner) => Step::Advance(winner),
            None => {
                debug!(considered, "every candidate rejected by the gate");
                Step::Stop(Termination::GateRejected)
            }
        }
    }
}

/// Selection order: composite, then length reduction, then earlier generator rank.
pub(crate) fn compare(a: &Candidate, b: &Candidate, parent: &str) -> Ordering {
    a.composite
        .total_cmp(&b.composite)
        .then_with(|| a.reduction(parent).total_cmp(&b.reduction(parent)))
        .then_with(|| b.rank.cmp(&a.rank))
}
