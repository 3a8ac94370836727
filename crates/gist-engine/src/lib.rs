//! Gist engine: graduated salience through recursive compression.
//!
//! Stages:
//! 1. Segmentation into sentences
//! 2. Per-sentence recursion (generate, revert, score, gate, select)
//! 3. Span alignment of each `T_0` token to the deepest level it survives
//! 4. Export as a serializable paragraph view

pub mod aligner;
pub mod exporter;
pub mod paragraph;
pub mod recursion;

pub use exporter::{export, ParagraphExport, SentenceEntry, SpanExport};
pub use paragraph::{salience_map, ParagraphEngine, SalienceRequest};
pub use recursion::{Compression, RecursionEngine, Step};
