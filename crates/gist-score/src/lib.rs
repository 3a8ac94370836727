//! Candidate scoring for the gist engine.
//!
//! Three measures per rewrite:
//! 1. Semantic closeness: embedding cosine similarity to the parent
//! 2. Grammaticality: model-judged letter grade (full variant only)
//! 3. Paraphrase fidelity: penalizes inserted and replaced words
//!
//! plus the weighted composite, the selection gate and the sentence-length
//! aggressiveness that tunes both.

pub mod composite;
pub mod embedder;
pub mod metrics;
pub mod scorer;

pub use composite::{aggressiveness, composite_score, passes_gate};
pub use embedder::{Embedder, HashedEmbedder};
pub use metrics::{length_score, paraphrase_fidelity, revert_paraphrasing, semantic_closeness};
pub use scorer::{CompositeScorer, Scorer};
