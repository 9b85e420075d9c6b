//! Stored records.
//!
//! A [`Snippet`] owns an ordered, gap-free run of [`SnippetVersion`]s
//! numbered `1..=latest_version`. Versions are immutable: publishing always
//! creates a new record. [`FeedbackEntry`] records are append-only and hang
//! off a single version.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::{FeedbackId, PublicId, SnippetId, VersionId};
use crate::language::LanguageHint;

/// A shared snippet. Only `latest_version` ever changes after creation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snippet {
    pub id: SnippetId,
    pub public_id: PublicId,
    /// Number of the newest version; always `>= 1`.
    pub latest_version: u32,
    pub created_at: DateTime<Utc>,
}

impl Snippet {
    pub fn new(public_id: PublicId, created_at: DateTime<Utc>) -> Self {
        Self {
            id: SnippetId::new(),
            public_id,
            latest_version: 1,
            created_at,
        }
    }
}

/// One immutable revision of a snippet's code.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnippetVersion {
    pub id: VersionId,
    pub snippet_id: SnippetId,
    /// 1-based, contiguous per snippet.
    pub version: u32,
    pub code: String,
    pub language: LanguageHint,
    pub created_at: DateTime<Utc>,
}

impl SnippetVersion {
    pub fn new(
        snippet_id: SnippetId,
        version: u32,
        code: impl Into<String>,
        language: LanguageHint,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: VersionId::new(),
            snippet_id,
            version,
            code: code.into(),
            language,
            created_at,
        }
    }

    /// Number of lines in the code, not counting a trailing newline.
    pub fn line_count(&self) -> usize {
        self.code.lines().count()
    }
}

/// Free-text feedback (usually pasted console output) on one version.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackEntry {
    pub id: FeedbackId,
    pub version_id: VersionId,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl FeedbackEntry {
    pub fn new(version_id: VersionId, content: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: FeedbackId::new(),
            version_id,
            content: content.into(),
            created_at,
        }
    }
}
