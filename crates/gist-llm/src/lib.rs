//! Language-model capability for the gist engine: the model trait, a rate
//! limiter, OpenAI-compatible chat and embedding clients, the candidate
//! generator and the model-judged grammar grader.

pub mod embeddings;
pub mod generator;
pub mod grader;
pub mod limiter;
pub mod openai;
pub mod prompts;
pub mod retry;
pub mod traits;

pub use embeddings::OpenAiEmbedder;
pub use generator::ModelGenerator;
pub use grader::{GrammarGrade, ModelGrammarJudge};
pub use limiter::{RateLimitedEmbedder, RateLimitedModel};
pub use openai::OpenAiChatModel;
pub use traits::{CandidateGenerator, CompletionRequest, Embedder, GrammarJudge, LanguageModel};
