// Keyword overlap scoring
pub mod keyword;

pub use keyword::{tokenize, KeywordScorer};
