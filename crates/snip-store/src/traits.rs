use snip_types::{FeedbackEntry, LanguageHint, PublicId, Snippet, SnippetId, SnippetVersion, VersionId};

use crate::error::StoreResult;

/// Storage for snippets, their versions, and feedback.
///
/// All implementations must satisfy these invariants:
/// - Versions and feedback are never modified or deleted once written.
/// - A snippet's versions are numbered `1..=latest_version` with no gaps
///   or duplicates, even under concurrent [`append_version`] calls.
/// - Each write is all-or-nothing: on error the store is unchanged.
/// - Feedback only ever references an existing version.
///
/// Access control is not the store's concern; callers authorize first.
///
/// [`append_version`]: SnippetStore::append_version
pub trait SnippetStore: Send + Sync {
    /// Create a snippet under `public_id` together with its version 1.
    ///
    /// Fails with `AlreadyExists` if the public id is taken.
    fn create_snippet(
        &self,
        public_id: PublicId,
        code: &str,
        language: LanguageHint,
    ) -> StoreResult<(Snippet, SnippetVersion)>;

    /// Append the next version to an existing snippet.
    ///
    /// Reads `latest_version`, inserts `latest_version + 1` and advances the
    /// snippet as one atomic step.
    fn append_version(
        &self,
        public_id: &PublicId,
        code: &str,
        language: LanguageHint,
    ) -> StoreResult<SnippetVersion>;

    /// Look up a snippet by public id. Returns `Ok(None)` if absent.
    fn snippet(&self, public_id: &PublicId) -> StoreResult<Option<Snippet>>;

    /// All versions of a snippet in ascending version order.
    fn versions(&self, snippet_id: &SnippetId) -> StoreResult<Vec<SnippetVersion>>;

    /// Look up a version by id. Returns `Ok(None)` if absent.
    fn version(&self, id: &VersionId) -> StoreResult<Option<SnippetVersion>>;

    /// Look up a version by its number within a snippet.
    ///
    /// Default implementation scans [`versions`](SnippetStore::versions).
    fn version_by_number(
        &self,
        snippet_id: &SnippetId,
        number: u32,
    ) -> StoreResult<Option<SnippetVersion>> {
        Ok(self
            .versions(snippet_id)?
            .into_iter()
            .find(|v| v.version == number))
    }

    /// Attach feedback to a version.
    ///
    /// Fails with `VersionNotFound` if the version does not exist.
    fn append_feedback(&self, version_id: &VersionId, content: &str) -> StoreResult<FeedbackEntry>;

    /// Feedback for a version, newest first. Empty for unknown versions.
    fn feedback(&self, version_id: &VersionId) -> StoreResult<Vec<FeedbackEntry>>;
}

macro_rules! forward_store {
    ($($ptr:ident)::+) => {
        impl<T: SnippetStore + ?Sized> SnippetStore for $($ptr)::+<T> {
            fn create_snippet(
                &self,
                public_id: PublicId,
                code: &str,
                language: LanguageHint,
            ) -> StoreResult<(Snippet, SnippetVersion)> {
                (**self).create_snippet(public_id, code, language)
            }

            fn append_version(
                &self,
                public_id: &PublicId,
                code: &str,
                language: LanguageHint,
            ) -> StoreResult<SnippetVersion> {
                (**self).append_version(public_id, code, language)
            }

            fn snippet(&self, public_id: &PublicId) -> StoreResult<Option<Snippet>> {
                (**self).snippet(public_id)
            }

            fn versions(&self, snippet_id: &SnippetId) -> StoreResult<Vec<SnippetVersion>> {
                (**self).versions(snippet_id)
            }

            fn version(&self, id: &VersionId) -> StoreResult<Option<SnippetVersion>> {
                (**self).version(id)
            }

            fn version_by_number(
                &self,
                snippet_id: &SnippetId,
                number: u32,
            ) -> StoreResult<Option<SnippetVersion>> {
                (**self).version_by_number(snippet_id, number)
            }

            fn append_feedback(&self, version_id: &VersionId, content: &str) -> StoreResult<FeedbackEntry> {
                (**self).append_feedback(version_id, content)
            }

            fn feedback(&self, version_id: &VersionId) -> StoreResult<Vec<FeedbackEntry>> {
                (**self).feedback(version_id)
            }
        }
    };
}

forward_store!(Box);
forward_store!(std::sync::Arc);
