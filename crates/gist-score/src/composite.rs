//! Weighted composite score, gates and sentence-length aggressiveness.

use gist_core::config::{AggressivenessConfig, ScoreWeights};
use gist_core::{EngineConfig, Intensity, Scores};

/// Smoothstep of the word count between `short_words` and `long_words`:
/// 0 for short sentences, 1 for long ones.
pub fn aggressiveness(word_count: usize, cfg: &AggressivenessConfig) -> f64 {
    let x = if word_count <= cfg.short_words {
        0.0
    } else if word_count >= cfg.long_words {
        1.0
    } else {
        (word_count - cfg.short_words) as f64 / (cfg.long_words - cfg.short_words) as f64
    };
    x * x * (3.0 - 2.0 * x)
}

pub fn intensity(aggressiveness: f64, cfg: &AggressivenessConfig) -> Intensity {
    if aggressiveness > cfg.aggressive_prompt_above {
        Intensity::Aggressive
    } else {
        Intensity::Standard
    }
}

/// Target length ratio, moving from `base` towards the aggressive ratio.
pub fn optimal_length(aggressiveness: f64, base: f64, cfg: &AggressivenessConfig) -> f64 {
    base - (base - cfg.aggressive_length_ratio) * aggressiveness
}

struct Dimension {
    score: f64,
    weight: f64,
}

fn weighted(weights: &ScoreWeights, scores: &Scores, length_score: f64) -> f64 {
    let dimensions = [
        Dimension { score: scores.semantic, weight: weights.semantic },
        Dimension { score: scores.grammaticality.unwrap_or(0.0), weight: weights.grammaticality },
        Dimension { score: scores.paraphrase, weight: weights.paraphrase },
        Dimension { score: length_score, weight: weights.length },
    ];
    dimensions.iter().map(|d| d.score * d.weight).sum()
}

/// Penalty for imperfect grammar; zero when grammar is not graded.
pub fn grammar_penalty(grammaticality: Option<f64>, cfg: &EngineConfig) -> f64 {
    match grammaticality {
        Some(g) if g <= 0.0 => -cfg.weights.poor_grammar_penalty,
        Some(g) if g < 1.0 => -cfg.weights.moderate_grammar_penalty,
        _ => 0.0,
    }
}

/// Composite score of a candidate.
///
/// Short sentences use the short-sentence profile. Longer ones blend the
/// conservative and aggressive profiles by `aggressiveness`, the aggressive
/// side earning a bonus proportional to the length `reduction`.
pub fn composite_score(
    scores: &Scores,
    length_score: f64,
    reduction: f64,
    aggressiveness: f64,
    cfg: &EngineConfig,
) -> f64 {
    let w = &cfg.weights;
    let penalty = grammar_penalty(scores.grammaticality, cfg);

    if aggressiveness <= cfg.aggressiveness.blend_above {
        return weighted(&w.short_sentence, scores, length_score) + penalty;
    }
    let conservative = weighted(&w.conservative, scores, length_score) + penalty;
    let bonus = reduction.max(0.0) * w.length_bonus * aggressiveness;
    let aggressive = weighted(&w.aggressive, scores, length_score) + bonus + penalty;
    conservative * (1.0 - aggressiveness) + aggressive * aggressiveness
}

/// Minimum-threshold gate: grammaticality when graded, plus semantic
/// closeness in the full variant.
pub fn passes_gate(scores: &Scores, cfg: &EngineConfig) -> bool {
    if !cfg.enable_grammaticality_scoring {
        return true;
    }
    let grammatical = scores.grammaticality.unwrap_or(0.0) >= cfg.grammaticality_gate;
    grammatical && scores.semantic >= cfg.semantic_gate
}
