// Relevance ranking over the whole knowledge store
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::knowledge::{Document, DocumentKind, KnowledgeStore};
use crate::rag::scoring::{tokenize, KeywordScorer};

/// Most matches a question ever returns
pub const MAX_MATCHES: usize = 5;

/// Search parameters for retrieval
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchParams {
    /// Maximum number of matches returned
    pub top_k: usize,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self { top_k: MAX_MATCHES }
    }
}

/// A document and its score for one question
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredMatch<'a> {
    pub document: &'a Document,
    pub relevance_score: usize,
}

impl<'a> ScoredMatch<'a> {
    pub fn kind(&self) -> DocumentKind {
        self.document.kind
    }
}

/// Score every document in `store` against `question` and keep the best
/// `top_k`. Zero scores are dropped; ties keep scan order.
pub fn rank<'a>(question: &str, store: &'a KnowledgeStore, top_k: usize) -> Vec<ScoredMatch<'a>> {
    let tokens = tokenize(question);
    if tokens.is_empty() {
        return Vec::new();
    }

    let scorer = KeywordScorer::new();
    let mut matches: Vec<ScoredMatch<'a>> = store
        .documents()
        .filter_map(|document| {
            let relevance_score = scorer.score(&tokens, document);
            (relevance_score > 0).then_some(ScoredMatch {
                document,
                relevance_score,
            })
        })
        .collect();

    // sort_by is stable
    matches.sort_by(|a, b| b.relevance_score.cmp(&a.relevance_score));
    matches.truncate(top_k);
    matches
}

/// Retrieval engine bound to a shared store
pub struct RetrievalEngine {
    store: Arc<KnowledgeStore>,
    params: SearchParams,
}

impl RetrievalEngine {
    pub fn with_params(store: Arc<KnowledgeStore>, params: SearchParams) -> Self {
        Self { store, params }
    }

    /// Rank the store against a question with the engine's parameters
    pub fn rank(&self, question: &str) -> Vec<ScoredMatch<'_>> {
        rank(question, &self.store, self.params.top_k)
    }
}
