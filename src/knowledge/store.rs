//! In-memory knowledge store

use chrono::NaiveDateTime;
use serde::Serialize;
use std::path::Path;

use crate::errors::{AssistantError, Result};
use crate::knowledge::document::{Document, DocumentKind};
use crate::knowledge::snapshot::{KnowledgeSnapshot, SnapshotDocument};

/// Course and forum documents, in snapshot order.
///
/// Built whole or not at all: a snapshot that fails to load or validate
/// yields an empty store.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeStore {
    course: Vec<Document>,
    forum: Vec<Document>,
    created_at: Option<NaiveDateTime>,
}

/// Counts reported by `coursebuddy stats` and at startup
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoreSummary {
    pub course_documents: usize,
    pub forum_documents: usize,
    pub created_at: Option<NaiveDateTime>,
}

impl KnowledgeStore {
    /// Empty store
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from in-memory documents. Every document must be of the
    /// group's kind, as with a snapshot.
    pub fn from_documents(course: Vec<Document>, forum: Vec<Document>) -> Result<Self> {
        check_group(&course, DocumentKind::Course)?;
        check_group(&forum, DocumentKind::Forum)?;

        Ok(Self {
            course,
            forum,
            created_at: None,
        })
    }

    /// Validate a snapshot and build the store from it
    pub fn from_snapshot(snapshot: KnowledgeSnapshot) -> Result<Self> {
        let created_at = snapshot.created_at();

        let course = snapshot
            .course_content
            .into_iter()
            .map(|doc| doc.into_document(DocumentKind::Course))
            .collect::<Result<Vec<_>>>()?;

        let forum = snapshot
            .forum_posts
            .into_iter()
            .map(|doc| doc.into_document(DocumentKind::Forum))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            course,
            forum,
            created_at,
        })
    }

    /// Load the snapshot at `path`. Never fails; any problem is logged and
    /// an empty store is returned.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            tracing::warn!(path = %path.display(), "knowledge snapshot not found, starting with an empty store");
            return Self::empty();
        }

        match KnowledgeSnapshot::load(path).and_then(Self::from_snapshot) {
            Ok(store) => {
                tracing::info!(
                    path = %path.display(),
                    course = store.course.len(),
                    forum = store.forum.len(),
                    "knowledge snapshot loaded"
                );
                store
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "knowledge snapshot unusable, starting with an empty store");
                Self::empty()
            }
        }
    }

    pub fn course(&self) -> &[Document] {
        &self.course
    }

    pub fn forum(&self) -> &[Document] {
        &self.forum
    }

    /// All documents in scan order: course first, then forum.
    pub fn documents(&self) -> impl Iterator<Item = &Document> {
        self.course.iter().chain(self.forum.iter())
    }

    pub fn len(&self) -> usize {
        self.course.len() + self.forum.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn summary(&self) -> StoreSummary {
        StoreSummary {
            course_documents: self.course.len(),
            forum_documents: self.forum.len(),
            created_at: self.created_at,
        }
    }

    /// Snapshot that would rebuild this store
    pub fn to_snapshot(&self) -> KnowledgeSnapshot {
        KnowledgeSnapshot {
            course_content: self.course.iter().map(SnapshotDocument::from).collect(),
            forum_posts: self.forum.iter().map(SnapshotDocument::from).collect(),
            created_date: self
                .created_at
                .map(|ts| ts.format("%Y-%m-%dT%H:%M:%S%.f").to_string()),
        }
    }
}

fn check_group(docs: &[Document], group: DocumentKind) -> Result<()> {
    match docs.iter().find(|doc| doc.kind != group) {
        Some(doc) => Err(AssistantError::KindMismatch {
            declared: doc.kind.to_string(),
            group: group.snapshot_group().to_string(),
        }),
        None => Ok(()),
    }
}
