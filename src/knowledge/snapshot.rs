//! At-rest knowledge snapshot format
//!
//! The content fetcher writes this JSON file; the store reads it once at
//! startup. Every field is optional, and `null` is treated like a missing
//! field.

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::errors::{AssistantError, Result};
use crate::knowledge::document::{Document, DocumentKind};

/// Whole snapshot file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeSnapshot {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub course_content: Vec<SnapshotDocument>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub forum_posts: Vec<SnapshotDocument>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_date: Option<String>,
}

/// One document as the fetcher writes it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SnapshotDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headings: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scraped_date: Option<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<Vec<SnapshotDocument>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<SnapshotDocument>>::deserialize(deserializer)?.unwrap_or_default())
}

impl KnowledgeSnapshot {
    /// Read and parse a snapshot file
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Write the snapshot as two-space indented JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Parsed `created_date`. Accepts RFC 3339 and the offset-less ISO form.
    pub fn created_at(&self) -> Option<NaiveDateTime> {
        let raw = self.created_date.as_deref()?.trim();
        DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.naive_utc())
            .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f"))
            .ok()
    }

    pub fn document_count(&self) -> usize {
        self.course_content.len() + self.forum_posts.len()
    }
}

impl SnapshotDocument {
    /// Build a document for the group it was found in. A declared kind
    /// must be recognised and must match that group.
    pub fn into_document(self, group: DocumentKind) -> Result<Document> {
        if let Some(declared) = self.kind.as_deref() {
            let kind: DocumentKind = declared.parse()?;
            if kind != group {
                return Err(AssistantError::KindMismatch {
                    declared: kind.to_string(),
                    group: group.snapshot_group().to_string(),
                });
            }
        }

        Ok(Document {
            kind: group,
            title: self.title,
            content: self.content,
            url: self.url,
            headings: self.headings.unwrap_or_default(),
            retrieved_at: self.scraped_date,
        })
    }
}

impl From<&Document> for SnapshotDocument {
    fn from(doc: &Document) -> Self {
        Self {
            kind: None,
            title: doc.title.clone(),
            content: doc.content.clone(),
            url: doc.url.clone(),
            headings: if doc.headings.is_empty() {
                None
            } else {
                Some(doc.headings.clone())
            },
            scraped_date: doc.retrieved_at.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_groups_default_to_empty() {
        let snapshot = KnowledgeSnapshot::from_json("{}").unwrap();
        assert!(snapshot.course_content.is_empty());
        assert!(snapshot.forum_posts.is_empty());
        assert_eq!(snapshot.document_count(), 0);
    }

    #[test]
    fn test_null_groups_and_fields_tolerated() {
        let json = r#"{
            "course_content": [{"title": null, "content": "body"}],
            "forum_posts": null
        }"#;
        let snapshot = KnowledgeSnapshot::from_json(json).unwrap();
        assert_eq!(snapshot.course_content.len(), 1);
        assert!(snapshot.course_content[0].title.is_none());
        assert!(snapshot.forum_posts.is_empty());
    }

    #[test]
    fn test_fetcher_fields_are_carried() {
        let json = r#"{
            "course_content": [{
                "url": "https://tds.s-anand.net/",
                "title": "Tools in Data Science",
                "content": "Welcome",
                "headings": ["Intro", "Modules"],
                "scraped_date": "2025-01-15T10:30:00.123456"
            }],
            "forum_posts": [],
            "created_date": "2025-01-15T10:31:00.000001"
        }"#;
        let snapshot = KnowledgeSnapshot::from_json(json).unwrap();
        let doc = snapshot.course_content[0]
            .clone()
            .into_document(DocumentKind::Course)
            .unwrap();
        assert_eq!(doc.headings, vec!["Intro", "Modules"]);
        assert_eq!(doc.retrieved_at.as_deref(), Some("2025-01-15T10:30:00.123456"));
        assert!(snapshot.created_at().is_some());
    }

    #[test]
    fn test_created_at_accepts_rfc3339() {
        let snapshot = KnowledgeSnapshot {
            created_date: Some("2025-01-15T10:31:00Z".to_string()),
            ..Default::default()
        };
        assert!(snapshot.created_at().is_some());

        let garbage = KnowledgeSnapshot {
            created_date: Some("yesterday".to_string()),
            ..Default::default()
        };
        assert!(garbage.created_at().is_none());
    }

    #[test]
    fn test_declared_kind_must_match_group() {
        let doc = SnapshotDocument {
            kind: Some("forum".to_string()),
            ..Default::default()
        };
        let err = doc.into_document(DocumentKind::Course).unwrap_err();
        assert!(matches!(err, AssistantError::KindMismatch { .. }));
    }

    #[test]
    fn test_declared_unknown_kind_rejected() {
        let doc = SnapshotDocument {
            kind: Some("blog".to_string()),
            ..Default::default()
        };
        let err = doc.into_document(DocumentKind::Forum).unwrap_err();
        assert!(matches!(err, AssistantError::UnknownKind(_)));
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("knowledge_base.json");

        let snapshot = KnowledgeSnapshot {
            course_content: vec![SnapshotDocument {
                title: Some("Intro".to_string()),
                ..Default::default()
            }],
            forum_posts: Vec::new(),
            created_date: None,
        };
        snapshot.save(&path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("\n  \"course_content\""));
        assert_eq!(KnowledgeSnapshot::load(&path).unwrap(), snapshot);
    }
}
