//! Knowledge Store
//!
//! In-memory course and forum documents, built once from a JSON snapshot
//! and shared read-only with every request.

pub mod document;
pub mod snapshot;
pub mod store;

pub use document::{Document, DocumentKind};
pub use snapshot::{KnowledgeSnapshot, SnapshotDocument};
pub use store::{KnowledgeStore, StoreSummary};
