// Turns ranked matches into an answer with supporting links
use serde::{Deserialize, Serialize};

use crate::rag::retrieval::ScoredMatch;
use crate::types::{Answer, Link};

/// Answer returned when nothing in the store matches
pub const FALLBACK_ANSWER: &str = "I couldn't find specific information about your question in the available course materials and forum discussions. Please try rephrasing your question or check the course materials directly.";

/// First line of every non-fallback answer
pub const ANSWER_HEADER: &str = "Based on the course materials and forum discussions:";

/// Most sources cited in one answer
pub const MAX_SOURCES: usize = 3;

/// Longest link text, in characters
pub const MAX_LINK_TEXT_CHARS: usize = 100;

/// Answer composition configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComposerConfig {
    /// Matches turned into bullets and links
    pub max_sources: usize,
    /// Link text length, in characters
    pub link_text_chars: usize,
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            max_sources: MAX_SOURCES,
            link_text_chars: MAX_LINK_TEXT_CHARS,
        }
    }
}

/// Composer for answers
pub struct AnswerComposer {
    config: ComposerConfig,
}

impl AnswerComposer {
    /// Create new composer with default config
    pub fn new() -> Self {
        Self {
            config: ComposerConfig::default(),
        }
    }

    /// Create with custom configuration
    pub fn with_config(config: ComposerConfig) -> Self {
        Self { config }
    }

    /// Compose an answer from rank-ordered matches.
    ///
    /// No matches yields the fixed fallback text and no links. Otherwise the
    /// header is followed by a blank line and one bullet per source; a link
    /// is added for each source with a non-empty url, in the same order.
    pub fn compose(&self, matches: &[ScoredMatch<'_>]) -> Answer {
        if matches.is_empty() {
            return Answer {
                answer: FALLBACK_ANSWER.to_string(),
                links: Vec::new(),
            };
        }

        let mut parts = vec![format!("{ANSWER_HEADER}\n")];
        let mut links = Vec::new();

        for scored in matches.iter().take(self.config.max_sources) {
            let doc = scored.document;
            parts.push(format!(
                "• {}: {}",
                doc.kind.source_label(),
                doc.display_title()
            ));

            if let Some(url) = doc.link_url() {
                links.push(Link {
                    url: url.to_string(),
                    text: truncate_chars(doc.link_text(), self.config.link_text_chars),
                });
            }
        }

        Answer {
            answer: parts.join("\n"),
            links,
        }
    }
}

impl Default for AnswerComposer {
    fn default() -> Self {
        Self::new()
    }
}

/// First `max` characters of `text`
fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}
