use gist_core::{Result, Sentence};

/// Splits a paragraph into sentences whose coverage ranges tile it exactly.
pub trait Segmenter: Send + Sync {
    fn segment(&self, paragraph: &str) -> Result<Vec<Sentence>>;
}
