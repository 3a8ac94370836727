//! Sentence segmentation for the gist salience engine.
//!
//! Sentences keep byte ranges into the paragraph; consecutive coverage ranges
//! tile the input without gaps or overlap.

pub mod abbreviations;
pub mod rules;
pub mod traits;

pub use rules::RuleSegmenter;
pub use traits::Segmenter;

use gist_core::{Result, Sentence};

/// Segment with the default rule set.
pub fn segment(paragraph: &str) -> Result<Vec<Sentence>> {
    RuleSegmenter::default().segment(paragraph)
}

#[cfg(test)]
mod tests;
