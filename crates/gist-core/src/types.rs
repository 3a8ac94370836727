use serde::{Deserialize, Serialize};
use std::ops::Range;

/// A sentence of a paragraph.
///
/// `range` tiles the paragraph together with the neighbouring sentences
/// (it includes trailing whitespace); `content` is the trimmed sentence text.
/// Both are byte ranges into the paragraph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    pub index: usize,
    pub range: Range<usize>,
    pub content: Range<usize>,
    pub text: String,
}

impl Sentence {
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}

/// Prompt intensity requested from the candidate generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intensity {
    /// Keep at most ~80% of the text.
    Standard,
    /// Keep at most ~70% of the text.
    Aggressive,
}

/// Quality scores of a candidate against its parent, each in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scores {
    pub semantic: f64,
    /// `None` when grammar grading is disabled (reduced-latency variant).
    pub grammaticality: Option<f64>,
    pub paraphrase: f64,
}

/// A scored rewrite of `T_d`.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// Position in the generator's output.
    pub rank: usize,
    /// Raw model output.
    pub raw: String,
    /// Output reverted onto the parent's words.
    pub text: String,
    pub scores: Scores,
    pub length_score: f64,
    pub composite: f64,
}

impl Candidate {
    /// Fraction of the parent's characters removed by this candidate.
    pub fn reduction(&self, parent: &str) -> f64 {
        if parent.is_empty() {
            return 0.0;
        }
        1.0 - self.text.len() as f64 / parent.len() as f64
    }
}

/// Why a sentence's recursion stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    MaxDepth,
    BelowLengthFloor,
    NoCandidates,
    GateRejected,
    GenerationFailed,
    /// Candidates were produced but none could be scored.
    ScoringFailed,
    DeadlineExceeded,
}

/// Salience of one `T_0` token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenLevel {
    /// Byte range within the sentence text.
    pub range: Range<usize>,
    pub level: usize,
}

/// A maximal run of `T_0` tokens sharing one salience level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpanSalience {
    /// Byte range within the sentence text.
    pub range: Range<usize>,
    pub level: usize,
}

/// Complete per-sentence result. Built once, read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalienceMap {
    pub sentence: Sentence,
    /// `T_0 ..= T_max_level`; levels past `depth_reached` repeat the last text.
    pub levels: Vec<String>,
    /// Winner scores for `T_1 ..= T_depth_reached`.
    pub level_scores: Vec<Scores>,
    pub depth_reached: usize,
    pub max_level: usize,
    pub termination: Termination,
    pub spans: Vec<SpanSalience>,
}

impl SalienceMap {
    /// Highest level covering the given byte offset of the sentence, if any.
    pub fn level_at(&self, offset: usize) -> Option<usize> {
        self.spans
            .iter()
            .find(|s| s.range.contains(&offset))
            .map(|s| s.level)
    }

    pub fn core_text(&self) -> &str {
        self.levels.last().map(String::as_str).unwrap_or(self.sentence.text.as_str())
    }
}
