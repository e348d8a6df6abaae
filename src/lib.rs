//! CourseBuddy - Virtual Teaching Assistant
//!
//! Answers free-text student questions from a locally cached corpus of
//! course pages and forum posts, returning a short answer plus supporting
//! links.
//!
//! # Architecture
//!
//! - **knowledge**: read-only store loaded once from a JSON snapshot
//! - **rag**: keyword ranking, answer composition, request pipeline
//! - **server**: `POST /api/` over HTTP
//! - **cli**: arguments and TOML configuration

pub mod errors;
pub mod types;
pub mod knowledge;
pub mod rag;

// Re-export commonly used types
pub use errors::{AssistantError, Result};
pub use knowledge::{Document, DocumentKind, KnowledgeStore};
pub use rag::{AnswerPipeline, PipelineConfig};
pub use types::{Answer, Link, QuestionRequest};

// Interface layer
pub mod cli;
pub mod server;
pub mod telemetry;
