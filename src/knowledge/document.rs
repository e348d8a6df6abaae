//! Retrievable documents and their kinds

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::AssistantError;

/// Where a document came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// Course page
    Course,
    /// Forum post
    Forum,
}

impl DocumentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::Course => "course",
            DocumentKind::Forum => "forum",
        }
    }

    /// Name of the snapshot group holding this kind
    pub fn snapshot_group(&self) -> &'static str {
        match self {
            DocumentKind::Course => "course_content",
            DocumentKind::Forum => "forum_posts",
        }
    }

    /// Bullet prefix used in composed answers
    pub fn source_label(&self) -> &'static str {
        match self {
            DocumentKind::Course => "From course materials",
            DocumentKind::Forum => "From forum discussion",
        }
    }

    /// Bullet text when the document has no title
    pub fn default_title(&self) -> &'static str {
        match self {
            DocumentKind::Course => "Course Content",
            DocumentKind::Forum => "Forum Post",
        }
    }

    /// Link text when the document has no title
    pub fn default_link_text(&self) -> &'static str {
        match self {
            DocumentKind::Course => "Course Material",
            DocumentKind::Forum => "Forum Discussion",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentKind {
    type Err = AssistantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "course" => Ok(DocumentKind::Course),
            "forum" => Ok(DocumentKind::Forum),
            _ => Err(AssistantError::UnknownKind(s.to_string())),
        }
    }
}

/// A unit of retrievable content. Never mutated after the store is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub kind: DocumentKind,
    pub title: Option<String>,
    pub content: Option<String>,
    pub url: Option<String>,
    pub headings: Vec<String>,
    /// When the fetcher captured the page (as written by the fetcher)
    pub retrieved_at: Option<String>,
}

impl Document {
    /// Create an untitled, empty document of the given kind
    pub fn new(kind: DocumentKind) -> Self {
        Self {
            kind,
            title: None,
            content: None,
            url: None,
            headings: Vec::new(),
            retrieved_at: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Title for display. An absent title falls back to the kind default;
    /// a present but empty title is kept empty.
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(self.kind.default_title())
    }

    /// Untruncated link text, with the same fallback rule as `display_title`
    pub fn link_text(&self) -> &str {
        self.title.as_deref().unwrap_or(self.kind.default_link_text())
    }

    /// Url to link, if it is present and non-empty
    pub fn link_url(&self) -> Option<&str> {
        self.url.as_deref().filter(|url| !url.is_empty())
    }

    pub fn title_text(&self) -> &str {
        self.title.as_deref().unwrap_or("")
    }

    pub fn content_text(&self) -> &str {
        self.content.as_deref().unwrap_or("")
    }
}
