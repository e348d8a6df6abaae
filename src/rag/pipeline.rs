// End-to-end question answering: decode image -> rank -> compose -> time check
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::errors::{AssistantError, Result};
use crate::knowledge::KnowledgeStore;
use crate::rag::composer::{AnswerComposer, ComposerConfig};
use crate::rag::image::decode_attachment;
use crate::rag::retrieval::{RetrievalEngine, SearchParams};
use crate::types::Answer;

/// Pipeline configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Search parameters for ranking
    pub search: SearchParams,
    /// Answer composition configuration
    pub composer: ComposerConfig,
    /// Budget checked once the answer has been computed
    pub timeout: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            search: SearchParams::default(),
            composer: ComposerConfig::default(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Answers questions against a shared knowledge store.
///
/// Holds no per-request state, so one instance serves concurrent requests.
pub struct AnswerPipeline {
    retrieval_engine: RetrievalEngine,
    composer: AnswerComposer,
    config: PipelineConfig,
}

impl AnswerPipeline {
    /// Create new pipeline with default configuration
    pub fn new(store: Arc<KnowledgeStore>) -> Self {
        Self::with_config(store, PipelineConfig::default())
    }

    /// Create with custom configuration
    pub fn with_config(store: Arc<KnowledgeStore>, config: PipelineConfig) -> Self {
        Self {
            retrieval_engine: RetrievalEngine::with_params(store, config.search.clone()),
            composer: AnswerComposer::with_config(config.composer.clone()),
            config,
        }
    }

    /// Answer a question, timing from now
    pub fn answer_question(&self, question: &str, image: Option<&str>) -> Result<Answer> {
        self.answer_question_since(question, image, Instant::now())
    }

    /// Answer a question, timing from `started`.
    ///
    /// The timeout is only checked after the answer is built. Work is never
    /// interrupted; a slow answer is discarded and reported as a timeout.
    pub fn answer_question_since(
        &self,
        question: &str,
        image: Option<&str>,
        started: Instant,
    ) -> Result<Answer> {
        let span = tracing::info_span!("answer_question", question_chars = question.chars().count());
        let _enter = span.enter();

        // No image analysis yet; the bytes are decoded and dropped.
        let _image = decode_attachment(image);

        let matches = self.retrieval_engine.rank(question);
        tracing::debug!(
            matches = matches.len(),
            top_score = matches.first().map(|m| m.relevance_score).unwrap_or(0),
            "ranked knowledge store"
        );

        let answer = self.composer.compose(&matches);

        let elapsed = started.elapsed();
        if elapsed > self.config.timeout {
            tracing::warn!(
                elapsed_ms = elapsed.as_millis() as u64,
                budget_ms = self.config.timeout.as_millis() as u64,
                "answer exceeded time budget, discarding it"
            );
            return Err(AssistantError::Timeout {
                duration_ms: elapsed.as_millis() as u64,
                budget_ms: self.config.timeout.as_millis() as u64,
            });
        }

        tracing::info!(links = answer.links.len(), elapsed_ms = elapsed.as_millis() as u64, "answered question");
        Ok(answer)
    }
}
