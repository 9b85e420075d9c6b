//! The record graph shared by every backend.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use snip_types::{FeedbackEntry, LanguageHint, PublicId, Snippet, SnippetId, SnippetVersion, VersionId};

use crate::error::{StoreError, StoreResult};

/// Flat, serializable form of a store's contents.
///
/// Versions are listed per snippet in ascending order and feedback per
/// version in insertion order, so loading a snapshot reproduces the same
/// ordering a live store reports.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub snippets: Vec<Snippet>,
    pub versions: Vec<SnippetVersion>,
    pub feedback: Vec<FeedbackEntry>,
}

#[derive(Clone, Debug, Default)]
pub(crate) struct StoreState {
    snippets: HashMap<PublicId, Snippet>,
    versions: HashMap<VersionId, SnippetVersion>,
    /// Version ids per snippet; index `i` holds version `i + 1`.
    lineage: HashMap<SnippetId, Vec<VersionId>>,
    /// Feedback per version in insertion order.
    feedback: HashMap<VersionId, Vec<FeedbackEntry>>,
}

impl StoreState {
    /// Rebuild the indices from a snapshot, rejecting inconsistent input.
    pub(crate) fn from_snapshot(snapshot: Snapshot) -> StoreResult<Self> {
        let mut state = Self::default();
        for snippet in snapshot.snippets {
            state.lineage.insert(snippet.id, Vec::new());
            state.snippets.insert(snippet.public_id.clone(), snippet);
        }

        let mut versions = snapshot.versions;
        versions.sort_by_key(|v| (v.snippet_id, v.version));
        for version in versions {
            let lineage = state.lineage.get_mut(&version.snippet_id).ok_or_else(|| {
                StoreError::Serialization(format!(
                    "version {} references unknown snippet {}",
                    version.id, version.snippet_id
                ))
            })?;
            if version.version as usize != lineage.len() + 1 {
                return Err(StoreError::Serialization(format!(
                    "snippet {} has a gap before version {}",
                    version.snippet_id, version.version
                )));
            }
            lineage.push(version.id);
            state.versions.insert(version.id, version);
        }

        for snippet in state.snippets.values() {
            let count = state.lineage.get(&snippet.id).map_or(0, Vec::len);
            if count == 0 || count != snippet.latest_version as usize {
                return Err(StoreError::Serialization(format!(
                    "snippet {} records latest version {} but has {count}",
                    snippet.public_id, snippet.latest_version
                )));
            }
        }

        for entry in snapshot.feedback {
            if !state.versions.contains_key(&entry.version_id) {
                return Err(StoreError::Serialization(format!(
                    "feedback {} references unknown version {}",
                    entry.id, entry.version_id
                )));
            }
            state.feedback.entry(entry.version_id).or_default().push(entry);
        }
        Ok(state)
    }

    pub(crate) fn to_snapshot(&self) -> Snapshot {
        let mut snippets: Vec<Snippet> = self.snippets.values().cloned().collect();
        snippets.sort_by_key(|s| (s.created_at, s.id));

        let mut versions = Vec::with_capacity(self.versions.len());
        let mut feedback = Vec::new();
        for snippet in &snippets {
            for id in self.lineage.get(&snippet.id).into_iter().flatten() {
                if let Some(version) = self.versions.get(id) {
                    versions.push(version.clone());
                }
                if let Some(entries) = self.feedback.get(id) {
                    feedback.extend(entries.iter().cloned());
                }
            }
        }
        Snapshot {
            snippets,
            versions,
            feedback,
        }
    }

    pub(crate) fn snippet_count(&self) -> usize {
        self.snippets.len()
    }

    pub(crate) fn create_snippet(
        &mut self,
        public_id: PublicId,
        code: &str,
        language: LanguageHint,
        now: DateTime<Utc>,
    ) -> StoreResult<(Snippet, SnippetVersion)> {
        if self.snippets.contains_key(&public_id) {
            return Err(StoreError::AlreadyExists(public_id));
        }
        let snippet = Snippet::new(public_id.clone(), now);
        let version = SnippetVersion::new(snippet.id, 1, code, language, now);

        self.lineage.insert(snippet.id, vec![version.id]);
        self.versions.insert(version.id, version.clone());
        self.snippets.insert(public_id, snippet.clone());
        Ok((snippet, version))
    }

    pub(crate) fn append_version(
        &mut self,
        public_id: &PublicId,
        code: &str,
        language: LanguageHint,
        now: DateTime<Utc>,
    ) -> StoreResult<SnippetVersion> {
        let snippet = self
            .snippets
            .get_mut(public_id)
            .ok_or_else(|| StoreError::SnippetNotFound(public_id.clone()))?;
        let next = snippet
            .latest_version
            .checked_add(1)
            .ok_or_else(|| StoreError::VersionLimit(public_id.clone()))?;
        let version = SnippetVersion::new(snippet.id, next, code, language, now);

        snippet.latest_version = next;
        self.lineage.entry(snippet.id).or_default().push(version.id);
        self.versions.insert(version.id, version.clone());
        Ok(version)
    }

    pub(crate) fn snippet(&self, public_id: &PublicId) -> Option<Snippet> {
        self.snippets.get(public_id).cloned()
    }

    pub(crate) fn versions(&self, snippet_id: &SnippetId) -> Vec<SnippetVersion> {
        self.lineage
            .get(snippet_id)
            .into_iter()
            .flatten()
            .filter_map(|id| self.versions.get(id).cloned())
            .collect()
    }

    pub(crate) fn version(&self, id: &VersionId) -> Option<SnippetVersion> {
        self.versions.get(id).cloned()
    }

    pub(crate) fn version_by_number(&self, snippet_id: &SnippetId, number: u32) -> Option<SnippetVersion> {
        let index = (number as usize).checked_sub(1)?;
        let id = self.lineage.get(snippet_id)?.get(index)?;
        self.versions.get(id).cloned()
    }

    pub(crate) fn append_feedback(
        &mut self,
        version_id: &VersionId,
        content: &str,
        now: DateTime<Utc>,
    ) -> StoreResult<FeedbackEntry> {
        if !self.versions.contains_key(version_id) {
            return Err(StoreError::VersionNotFound(*version_id));
        }
        let entry = FeedbackEntry::new(*version_id, content, now);
        self.feedback.entry(*version_id).or_default().push(entry.clone());
        Ok(entry)
    }

    /// Feedback for a version, newest first; same-instant entries keep
    /// reverse insertion order.
    pub(crate) fn feedback(&self, version_id: &VersionId) -> Vec<FeedbackEntry> {
        let mut entries: Vec<FeedbackEntry> = self
            .feedback
            .get(version_id)
            .map(|entries| entries.iter().rev().cloned().collect())
            .unwrap_or_default();
        entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        entries
    }
}
