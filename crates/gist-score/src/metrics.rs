//! Individual quality measures of a rewrite against its parent.

use crate::embedder::{cosine, Embedder};
use gist_core::diff::{opcodes, OpKind};
use gist_core::text::keys;
use gist_core::{GistError, Result};

/// Map a rewrite back onto its parent's words: equal and replaced runs take
/// the parent's literal words, inserted words are dropped. The result is a
/// word subsequence of the parent, spelling and punctuation included.
pub fn revert_paraphrasing(parent: &str, candidate: &str) -> String {
    let parent_words: Vec<&str> = parent.split_whitespace().collect();
    let mut out: Vec<&str> = Vec::with_capacity(parent_words.len());

    for op in opcodes(&keys(parent), &keys(candidate)) {
        match op.kind {
            OpKind::Equal | OpKind::Replace => out.extend_from_slice(&parent_words[op.a]),
            OpKind::Delete | OpKind::Insert => {}
        }
    }
    out.join(" ")
}

/// `1 - (#insert + #replace opcodes) / parent word count`, clamped to `[0, 1]`.
pub fn paraphrase_fidelity(parent: &str, candidate: &str) -> f64 {
    let parent_keys = keys(parent);
    if parent_keys.is_empty() {
        return 0.0;
    }
    let changed = opcodes(&parent_keys, &keys(candidate))
        .iter()
        .filter(|op| matches!(op.kind, OpKind::Insert | OpKind::Replace))
        .count();
    (1.0 - changed as f64 / parent_keys.len() as f64).clamp(0.0, 1.0)
}

/// Cosine similarity of the two texts' embeddings, clamped to `[0, 1]`.
pub async fn semantic_closeness(embedder: &dyn Embedder, parent: &str, candidate: &str) -> Result<f64> {
    let vectors = embedder.embed(&[parent, candidate]).await?;
    match vectors.as_slice() {
        [p, c] => Ok(cosine(p, c).clamp(0.0, 1.0)),
        other => Err(GistError::Scoring(format!("expected 2 embeddings, got {}", other.len()))),
    }
}

/// `1 - |len(candidate)/len(parent) - optimal|`, clamped to `[0, 1]`.
pub fn length_score(parent: &str, candidate: &str, optimal: f64) -> f64 {
    if parent.is_empty() {
        return 0.0;
    }
    let ratio = candidate.len() as f64 / parent.len() as f64;
    (1.0 - (ratio - optimal).abs()).clamp(0.0, 1.0)
}
