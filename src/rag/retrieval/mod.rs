// Relevance ranking module
pub mod engine;

pub use engine::{rank, RetrievalEngine, ScoredMatch, SearchParams, MAX_MATCHES};
