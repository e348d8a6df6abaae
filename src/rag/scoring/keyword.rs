// Literal keyword overlap between a question and a document
use crate::knowledge::Document;

/// Lower-case the question and split it on whitespace.
///
/// Duplicates are kept: a word asked twice is scored twice.
pub fn tokenize(question: &str) -> Vec<String> {
    question
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Scores documents by how many question tokens they contain
#[derive(Debug, Clone, Default)]
pub struct KeywordScorer;

impl KeywordScorer {
    pub fn new() -> Self {
        Self
    }

    /// Count tokens found as a substring of the lower-cased content or
    /// title. A token found in both still counts once.
    pub fn score(&self, tokens: &[String], document: &Document) -> usize {
        if tokens.is_empty() {
            return 0;
        }

        let content = document.content_text().to_lowercase();
        let title = document.title_text().to_lowercase();

        tokens
            .iter()
            .filter(|token| content.contains(token.as_str()) || title.contains(token.as_str()))
            .count()
    }
}
