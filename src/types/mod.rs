//! Type definitions module
//!
//! Request and response shapes shared by the HTTP server and the CLI.

pub mod messages;

// Re-export commonly used types
pub use messages::{Answer, Link, QuestionRequest};
