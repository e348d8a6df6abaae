// Question answering over the knowledge store
//
// Components:
// - Scoring: tokenizer and keyword overlap scorer
// - Retrieval: ranks every document against a question
// - Composer: turns the top matches into an answer and links
// - Pipeline: end-to-end orchestration with the time budget check

pub mod scoring;
pub mod retrieval;
pub mod composer;
pub mod image;
pub mod pipeline;

// Re-export key types
pub use retrieval::{rank, RetrievalEngine, ScoredMatch, SearchParams, MAX_MATCHES};
pub use composer::{
    AnswerComposer, ComposerConfig, ANSWER_HEADER, FALLBACK_ANSWER, MAX_LINK_TEXT_CHARS, MAX_SOURCES,
};
pub use pipeline::{AnswerPipeline, PipelineConfig};
