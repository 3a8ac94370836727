//! Text embeddings for semantic closeness.

use async_trait::async_trait;
pub use gist_llm::Embedder;
use gist_core::Result;

/// Hashed term-frequency embedder: the deterministic offline stand-in for a
/// model-backed embedder.
///
/// Terms are hashed into fixed buckets with FNV-1a and weighted by frequency
/// times a length-based IDF approximation, then L2-normalized. Bag-of-words
/// only, so it cannot see negation or word order.
pub struct HashedEmbedder {
    dimensions: usize,
}

impl HashedEmbedder {
    pub fn new(dimensions: usize) -> Self {
        Self { dimensions: dimensions.max(1) }
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn bucket(term: &str, dims: usize) -> usize {
        let mut h: u64 = 0xcbf29ce484222325;
        for b in term.as_bytes() {
            h ^= *b as u64;
            h = h.wrapping_mul(0x100000001b3);
        }
        (h % dims as u64) as usize
    }

    fn terms(text: &str) -> impl Iterator<Item = String> + '_ {
        text.split(|c: char| !c.is_alphanumeric())
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
    }
}

impl HashedEmbedder {
    pub fn embed_one(&self, text: &str) -> Vec<f32> {
        let mut vec = vec![0.0f32; self.dimensions];
        let mut total = 0usize;
        for term in Self::terms(text) {
            let idf = 1.0 + (term.chars().count() as f32).ln();
            vec[Self::bucket(&term, self.dimensions)] += idf;
            total += 1;
        }
        if total == 0 {
            return vec;
        }
        let norm: f32 = vec.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > f32::EPSILON {
            for v in &mut vec {
                *v /= norm;
            }
        }
        vec
    }
}

#[async_trait]
impl Embedder for HashedEmbedder {
    async fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| self.embed_one(t)).collect())
    }
}

impl Default for HashedEmbedder {
    fn default() -> Self {
        Self::new(512)
    }
}

/// Cosine similarity; 0 when either vector is all zeros or lengths differ.
pub fn cosine(a: &[f32], b: &[f32]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let (mut dot, mut na, mut nb) = (0.0f64, 0.0f64, 0.0f64);
    for (x, y) in a.iter().zip(b) {
        dot += (*x as f64) * (*y as f64);
        na += (*x as f64) * (*x as f64);
        nb += (*y as f64) * (*y as f64);
    }
    if na <= f64::EPSILON || nb <= f64::EPSILON {
        return 0.0;
    }
    dot / (na.sqrt() * nb.sqrt())
}
