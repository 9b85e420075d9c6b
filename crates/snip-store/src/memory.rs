use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use snip_types::{FeedbackEntry, LanguageHint, PublicId, Snippet, SnippetId, SnippetVersion, VersionId};

use crate::error::{StoreError, StoreResult};
use crate::state::{Snapshot, StoreState};
use crate::traits::SnippetStore;

/// In-memory snippet store.
///
/// Intended for tests and embedding. All records live behind one `RwLock`,
/// so every write (including version number allocation) is serialized and
/// readers never see a half-applied write. Records are cloned on read.
pub struct InMemorySnippetStore {
    state: RwLock<StoreState>,
}

impl InMemorySnippetStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            state: RwLock::new(StoreState::default()),
        }
    }

    /// Create a store preloaded from a snapshot.
    pub fn from_snapshot(snapshot: Snapshot) -> StoreResult<Self> {
        Ok(Self {
            state: RwLock::new(StoreState::from_snapshot(snapshot)?),
        })
    }

    /// Copy the current contents out as a snapshot.
    pub fn snapshot(&self) -> StoreResult<Snapshot> {
        Ok(self.read()?.to_snapshot())
    }

    /// Number of snippets currently stored.
    pub fn len(&self) -> usize {
        self.read().map_or(0, |s| s.snippet_count())
    }

    /// Returns `true` if no snippet has been created.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, StoreState>> {
        self.state.read().map_err(|_| StoreError::Poisoned)
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, StoreState>> {
        self.state.write().map_err(|_| StoreError::Poisoned)
    }
}

impl Default for InMemorySnippetStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SnippetStore for InMemorySnippetStore {
    fn create_snippet(
        &self,
        public_id: PublicId,
        code: &str,
        language: LanguageHint,
    ) -> StoreResult<(Snippet, SnippetVersion)> {
        self.write()?.create_snippet(public_id, code, language, Utc::now())
    }

    fn append_version(
        &self,
        public_id: &PublicId,
        code: &str,
        language: LanguageHint,
    ) -> StoreResult<SnippetVersion> {
        self.write()?.append_version(public_id, code, language, Utc::now())
    }

    fn snippet(&self, public_id: &PublicId) -> StoreResult<Option<Snippet>> {
        Ok(self.read()?.snippet(public_id))
    }

    fn versions(&self, snippet_id: &SnippetId) -> StoreResult<Vec<SnippetVersion>> {
        Ok(self.read()?.versions(snippet_id))
    }

    fn version(&self, id: &VersionId) -> StoreResult<Option<SnippetVersion>> {
        Ok(self.read()?.version(id))
    }

    fn version_by_number(
        &self,
        snippet_id: &SnippetId,
        number: u32,
    ) -> StoreResult<Option<SnippetVersion>> {
        Ok(self.read()?.version_by_number(snippet_id, number))
    }

    fn append_feedback(&self, version_id: &VersionId, content: &str) -> StoreResult<FeedbackEntry> {
        self.write()?.append_feedback(version_id, content, Utc::now())
    }

    fn feedback(&self, version_id: &VersionId) -> StoreResult<Vec<FeedbackEntry>> {
        Ok(self.read()?.feedback(version_id))
    }
}

impl std::fmt::Debug for InMemorySnippetStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemorySnippetStore")
            .field("snippet_count", &self.len())
            .finish()
    }
}
