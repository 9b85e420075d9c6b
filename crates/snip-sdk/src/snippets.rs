use snip_diff::diff_versions;
use snip_lang::highlight;
use snip_store::{SnippetStore, StoreError};
use snip_types::{FeedbackEntry, LanguageHint, PublicId, Snippet, SnippetVersion, VersionId};

use crate::auth::AccessGate;
use crate::error::{SdkError, SdkResult};
use crate::view::{RenderedVersion, SnippetView, VersionComparison};

/// Attempts at drawing an unused public id before giving up.
const MAX_PUBLIC_ID_ATTEMPTS: usize = 8;

/// Snippet publishing and viewing over a [`SnippetStore`].
///
/// Writes that publish code (`create_snippet`, `create_version`) require the
/// admin secret and check it before touching the store. Reads and feedback
/// are open to anyone holding a public id or version id.
pub struct Snippets<S> {
    store: S,
    gate: AccessGate,
}

impl<S: SnippetStore> Snippets<S> {
    pub fn new(store: S, gate: AccessGate) -> Self {
        Self { store, gate }
    }

    // ---- Publishing ----

    /// Publish new code as version 1 of a fresh snippet.
    pub fn create_snippet(&self, code: &str, language: LanguageHint, secret: &str) -> SdkResult<PublicId> {
        self.create_snippet_with(code, language, secret, PublicId::generate)
    }

    fn create_snippet_with(
        &self,
        code: &str,
        language: LanguageHint,
        secret: &str,
        mut next_id: impl FnMut() -> PublicId,
    ) -> SdkResult<PublicId> {
        self.gate.check(secret)?;
        for _ in 0..MAX_PUBLIC_ID_ATTEMPTS {
            let public_id = next_id();
            match self.store.create_snippet(public_id, code, language.clone()) {
                Ok((snippet, version)) => {
                    tracing::info!(
                        public_id = %snippet.public_id,
                        language = %version.language,
                        lines = version.line_count(),
                        "snippet created"
                    );
                    return Ok(snippet.public_id);
                }
                Err(StoreError::AlreadyExists(taken)) => {
                    tracing::debug!(public_id = %taken, "public id collision, drawing another");
                }
                Err(e) => return Err(e.into()),
            }
        }
        Err(SdkError::Internal("could not allocate an unused public id".into()))
    }

    /// Publish new code as the next version of an existing snippet.
    ///
    /// Returns the new version number.
    pub fn create_version(
        &self,
        public_id: &PublicId,
        code: &str,
        language: LanguageHint,
        secret: &str,
    ) -> SdkResult<u32> {
        self.gate.check(secret)?;
        let version = self.store.append_version(public_id, code, language)?;
        tracing::info!(
            public_id = %public_id,
            version = version.version,
            language = %version.language,
            "version published"
        );
        Ok(version.version)
    }

    // ---- Retrieval ----

    /// A snippet and its versions in ascending order, or `None` if unknown.
    pub fn get_snippet(&self, public_id: &PublicId) -> SdkResult<Option<SnippetView>> {
        let Some(snippet) = self.store.snippet(public_id)? else {
            return Ok(None);
        };
        let mut versions = self.store.versions(&snippet.id)?;
        versions.sort_by_key(|v| v.version);
        Ok(Some(SnippetView { snippet, versions }))
    }

    /// A version highlighted as a whole; `None` selects the latest.
    pub fn render_version(&self, public_id: &PublicId, version: Option<u32>) -> SdkResult<RenderedVersion> {
        let snippet = self.require_snippet(public_id)?;
        let number = version.unwrap_or(snippet.latest_version);
        let version = self.require_version(&snippet, number)?;
        let highlighted = highlight(&version.code, &version.language, None);
        Ok(RenderedVersion { version, highlighted })
    }

    // ---- Comparison ----

    /// Diff version `from` against version `to` of one snippet.
    ///
    /// Rows are highlighted with the language of the `to` version.
    pub fn compare(&self, public_id: &PublicId, from: u32, to: u32) -> SdkResult<VersionComparison> {
        let snippet = self.require_snippet(public_id)?;
        let old = self.require_version(&snippet, from)?;
        let new = self.require_version(&snippet, to)?;
        Ok(VersionComparison {
            from: Some(from),
            to,
            diff: diff_versions(&old.code, &new.code, &new.language),
        })
    }

    /// Diff a version against its predecessor; `None` selects the latest.
    ///
    /// Version 1 has no predecessor and is compared against empty text, so
    /// every line shows as added.
    pub fn compare_with_previous(&self, public_id: &PublicId, version: Option<u32>) -> SdkResult<VersionComparison> {
        let snippet = self.require_snippet(public_id)?;
        let to = version.unwrap_or(snippet.latest_version);
        let new = self.require_version(&snippet, to)?;
        let (from, old_code) = match to.checked_sub(1).filter(|n| *n > 0) {
            Some(previous) => (Some(previous), self.require_version(&snippet, previous)?.code),
            None => (None, String::new()),
        };
        Ok(VersionComparison {
            from,
            to,
            diff: diff_versions(&old_code, &new.code, &new.language),
        })
    }

    // ---- Feedback ----

    /// Attach anonymous feedback to a version.
    pub fn add_feedback(&self, version_id: &VersionId, content: &str) -> SdkResult<FeedbackEntry> {
        if content.trim().is_empty() {
            return Err(SdkError::InvalidInput("feedback content is empty".into()));
        }
        let entry = self.store.append_feedback(version_id, content)?;
        tracing::info!(version_id = %version_id, feedback_id = %entry.id, "feedback added");
        Ok(entry)
    }

    /// Feedback for a version, newest first.
    pub fn get_feedback(&self, version_id: &VersionId) -> SdkResult<Vec<FeedbackEntry>> {
        Ok(self.store.feedback(version_id)?)
    }

    // ---- Accessors ----

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn gate(&self) -> &AccessGate {
        &self.gate
    }

    fn require_snippet(&self, public_id: &PublicId) -> SdkResult<Snippet> {
        self.store
            .snippet(public_id)?
            .ok_or_else(|| SdkError::NotFound(format!("snippet {public_id}")))
    }

    fn require_version(&self, snippet: &Snippet, number: u32) -> SdkResult<SnippetVersion> {
        self.store
            .version_by_number(&snippet.id, number)?
            .ok_or_else(|| SdkError::NotFound(format!("version {number} of snippet {}", snippet.public_id)))
    }
}

impl<S> std::fmt::Debug for Snippets<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Snippets").field("gate", &self.gate).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snip_diff::{ChangeKind, DiffRow};
    use snip_store::{FileSnippetStore, InMemorySnippetStore};
    use snip_types::Language;

    const SECRET: &str = "s3cret";

    fn snippets() -> Snippets<InMemorySnippetStore> {
        Snippets::new(InMemorySnippetStore::new(), AccessGate::with_secret(SECRET))
    }

    fn rows(comparison: &VersionComparison) -> Vec<DiffRow> {
        comparison.diff.rows.iter().map(|r| r.row.clone()).collect()
    }

    // ---- Publishing ----

    #[test]
    fn create_and_get_snippet() {
        let sdk = snippets();
        let id = sdk.create_snippet("a\nb\nc", LanguageHint::parse("python"), SECRET).unwrap();
        assert_eq!(id.as_str().len(), 8);

        let view = sdk.get_snippet(&id).unwrap().expect("should exist");
        assert_eq!(view.snippet.latest_version, 1);
        assert_eq!(view.versions.len(), 1);
        assert_eq!(view.versions[0].version, 1);
        assert_eq!(view.versions[0].line_count(), 3);
        assert_eq!(view.latest().unwrap().code, "a\nb\nc");
    }

    #[test]
    fn wrong_secret_creates_nothing() {
        let sdk = snippets();
        let err = sdk.create_snippet("x", LanguageHint::Auto, "guess").unwrap_err();
        assert!(matches!(err, SdkError::Unauthorized));
        assert!(sdk.store().is_empty());
    }

    #[test]
    fn unconfigured_gate_rejects_publishing() {
        let sdk = Snippets::new(InMemorySnippetStore::new(), AccessGate::unconfigured());
        let err = sdk.create_snippet("x", LanguageHint::Auto, "").unwrap_err();
        assert!(matches!(err, SdkError::Misconfigured));
        assert!(sdk.store().is_empty());
    }

    #[test]
    fn create_version_bumps_latest() {
        let sdk = snippets();
        let id = sdk.create_snippet("a", LanguageHint::Auto, SECRET).unwrap();
        assert_eq!(sdk.create_version(&id, "b", LanguageHint::Auto, SECRET).unwrap(), 2);
        assert_eq!(sdk.create_version(&id, "c", LanguageHint::Auto, SECRET).unwrap(), 3);

        let view = sdk.get_snippet(&id).unwrap().unwrap();
        assert_eq!(view.snippet.latest_version, 3);
        let numbers: Vec<u32> = view.versions.iter().map(|v| v.version).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }

    #[test]
    fn create_version_with_wrong_secret_changes_nothing() {
        let sdk = snippets();
        let id = sdk.create_snippet("a", LanguageHint::Auto, SECRET).unwrap();
        let err = sdk.create_version(&id, "b", LanguageHint::Auto, "nope").unwrap_err();
        assert!(matches!(err, SdkError::Unauthorized));

        let view = sdk.get_snippet(&id).unwrap().unwrap();
        assert_eq!(view.snippet.latest_version, 1);
        assert_eq!(view.versions.len(), 1);
    }

    #[test]
    fn create_version_on_unknown_snippet_is_not_found() {
        let sdk = snippets();
        let missing = PublicId::parse("missing1").unwrap();
        let err = sdk.create_version(&missing, "b", LanguageHint::Auto, SECRET).unwrap_err();
        assert!(matches!(err, SdkError::NotFound(_)));
    }

    #[test]
    fn bad_secret_wins_over_unknown_snippet() {
        let sdk = snippets();
        let missing = PublicId::parse("missing1").unwrap();
        let err = sdk.create_version(&missing, "b", LanguageHint::Auto, "nope").unwrap_err();
        assert!(matches!(err, SdkError::Unauthorized));
    }

    #[test]
    fn public_id_collision_draws_again() {
        let sdk = snippets();
        let taken = PublicId::parse("taken000").unwrap();
        sdk.store()
            .create_snippet(taken.clone(), "first", LanguageHint::Auto)
            .unwrap();

        let mut ids = vec![PublicId::parse("fresh000").unwrap(), taken].into_iter().rev();
        let id = sdk
            .create_snippet_with("second", LanguageHint::Auto, SECRET, || ids.next().unwrap())
            .unwrap();
        assert_eq!(id.as_str(), "fresh000");
        assert_eq!(sdk.store().len(), 2);
    }

    #[test]
    fn exhausted_public_ids_is_internal_error() {
        let sdk = snippets();
        let taken = PublicId::parse("taken000").unwrap();
        sdk.store()
            .create_snippet(taken.clone(), "first", LanguageHint::Auto)
            .unwrap();
        let err = sdk
            .create_snippet_with("second", LanguageHint::Auto, SECRET, || taken.clone())
            .unwrap_err();
        assert!(matches!(err, SdkError::Internal(_)));
    }

    #[test]
    fn concurrent_versions_are_unique() {
        use std::sync::Arc;
        use std::thread;

        let sdk = Arc::new(snippets());
        let id = sdk.create_snippet("v1", LanguageHint::Auto, SECRET).unwrap();

        let handles: Vec<_> = (0..6)
            .map(|t| {
                let sdk = Arc::clone(&sdk);
                let id = id.clone();
                thread::spawn(move || {
                    (0..5)
                        .map(|i| {
                            sdk.create_version(&id, &format!("{t}/{i}"), LanguageHint::Auto, SECRET)
                                .unwrap()
                        })
                        .collect::<Vec<u32>>()
                })
            })
            .collect();

        let mut numbers: Vec<u32> = handles.into_iter().flat_map(|h| h.join().unwrap()).collect();
        numbers.sort_unstable();
        assert_eq!(numbers, (2..=31).collect::<Vec<u32>>());
        assert_eq!(sdk.get_snippet(&id).unwrap().unwrap().snippet.latest_version, 31);
    }

    // ---- Retrieval ----

    #[test]
    fn unknown_snippet_is_none() {
        let sdk = snippets();
        assert!(sdk.get_snippet(&PublicId::parse("nothing0").unwrap()).unwrap().is_none());
    }

    #[test]
    fn render_latest_and_specific_version() {
        let sdk = snippets();
        let id = sdk.create_snippet("print(1)\n", LanguageHint::parse("python"), SECRET).unwrap();
        sdk.create_version(&id, "a < b", LanguageHint::parse("plaintext"), SECRET).unwrap();

        let latest = sdk.render_version(&id, None).unwrap();
        assert_eq!(latest.version.version, 2);
        assert_eq!(latest.highlighted.html, "a &lt; b");

        let first = sdk.render_version(&id, Some(1)).unwrap();
        assert_eq!(first.highlighted.language, Some(Language::Python));
        assert!(first.highlighted.html.contains("hl-"));

        assert!(matches!(sdk.render_version(&id, Some(9)), Err(SdkError::NotFound(_))));
    }

    // ---- Comparison ----

    #[test]
    fn compare_scenario() {
        let sdk = snippets();
        let id = sdk.create_snippet("a\nb\nc", LanguageHint::parse("python"), SECRET).unwrap();
        assert_eq!(sdk.create_version(&id, "a\nx\nc", LanguageHint::parse("python"), SECRET).unwrap(), 2);

        let comparison = sdk.compare(&id, 1, 2).unwrap();
        assert_eq!(comparison.from, Some(1));
        assert_eq!(comparison.to, 2);
        assert_eq!(comparison.diff.language, Language::Python);
        assert_eq!(
            rows(&comparison),
            vec![
                DiffRow::equal("a", 1, 1),
                DiffRow::removed("b", 2),
                DiffRow::added("x", 2),
                DiffRow::equal("c", 3, 3),
            ]
        );
    }

    #[test]
    fn compare_with_previous_defaults_to_latest() {
        let sdk = snippets();
        let id = sdk.create_snippet("a\nb\nc", LanguageHint::Auto, SECRET).unwrap();
        sdk.create_version(&id, "a\nx\nc", LanguageHint::Auto, SECRET).unwrap();

        let comparison = sdk.compare_with_previous(&id, None).unwrap();
        assert_eq!(comparison.from, Some(1));
        assert_eq!(comparison.to, 2);
        assert_eq!(comparison.diff.additions(), 1);
        assert_eq!(comparison.diff.deletions(), 1);
    }

    #[test]
    fn first_version_compares_against_empty() {
        let sdk = snippets();
        let id = sdk.create_snippet("one\ntwo\n", LanguageHint::Auto, SECRET).unwrap();
        let comparison = sdk.compare_with_previous(&id, Some(1)).unwrap();
        assert_eq!(comparison.from, None);
        assert!(comparison.diff.rows.iter().all(|r| r.row.kind == ChangeKind::Added));
        assert_eq!(comparison.diff.additions(), 2);
    }

    #[test]
    fn compare_rejects_unknown_versions() {
        let sdk = snippets();
        let id = sdk.create_snippet("a", LanguageHint::Auto, SECRET).unwrap();
        assert!(matches!(sdk.compare(&id, 1, 2), Err(SdkError::NotFound(_))));
        assert!(matches!(sdk.compare_with_previous(&id, Some(0)), Err(SdkError::NotFound(_))));
        let missing = PublicId::parse("missing1").unwrap();
        assert!(matches!(sdk.compare(&missing, 1, 1), Err(SdkError::NotFound(_))));
    }

    #[test]
    fn compare_same_version_is_unchanged() {
        let sdk = snippets();
        let id = sdk.create_snippet("a\nb", LanguageHint::Auto, SECRET).unwrap();
        assert!(sdk.compare(&id, 1, 1).unwrap().diff.is_unchanged());
    }

    // ---- Feedback ----

    #[test]
    fn feedback_round_trip_newest_first() {
        let sdk = snippets();
        let id = sdk.create_snippet("a", LanguageHint::Auto, SECRET).unwrap();
        let version_id = sdk.get_snippet(&id).unwrap().unwrap().versions[0].id;

        sdk.add_feedback(&version_id, "looks good").unwrap();
        sdk.add_feedback(&version_id, "one nit").unwrap();

        let contents: Vec<String> = sdk
            .get_feedback(&version_id)
            .unwrap()
            .into_iter()
            .map(|f| f.content)
            .collect();
        assert_eq!(contents, vec!["one nit", "looks good"]);
    }

    #[test]
    fn feedback_needs_no_secret_but_needs_content() {
        let sdk = Snippets::new(InMemorySnippetStore::new(), AccessGate::unconfigured());
        let (_, version) = sdk
            .store()
            .create_snippet(PublicId::parse("open0000").unwrap(), "a", LanguageHint::Auto)
            .unwrap();
        assert!(sdk.add_feedback(&version.id, "fine").is_ok());
        assert!(matches!(
            sdk.add_feedback(&version.id, "  \n"),
            Err(SdkError::InvalidInput(_))
        ));
    }

    #[test]
    fn feedback_on_unknown_version_is_not_found() {
        let sdk = snippets();
        let err = sdk.add_feedback(&VersionId::new(), "hello").unwrap_err();
        assert!(matches!(err, SdkError::NotFound(_)));
        assert!(sdk.get_feedback(&VersionId::new()).unwrap().is_empty());
    }

    // ---- Backends ----

    #[test]
    fn works_over_file_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snippets.json");
        let id = {
            let store = FileSnippetStore::open(&path).unwrap();
            let sdk = Snippets::new(store, AccessGate::with_secret(SECRET));
            let id = sdk.create_snippet("a\nb\nc", LanguageHint::Auto, SECRET).unwrap();
            sdk.create_version(&id, "a\nx\nc", LanguageHint::Auto, SECRET).unwrap();
            id
        };

        let sdk = Snippets::new(FileSnippetStore::open(&path).unwrap(), AccessGate::unconfigured());
        assert_eq!(sdk.compare(&id, 1, 2).unwrap().diff.additions(), 1);
    }

    #[test]
    fn works_over_shared_store() {
        use std::sync::Arc;

        let store: Arc<dyn SnippetStore> = Arc::new(InMemorySnippetStore::new());
        let sdk = Snippets::new(Arc::clone(&store), AccessGate::with_secret(SECRET));
        let id = sdk.create_snippet("x", LanguageHint::Auto, SECRET).unwrap();
        assert!(store.snippet(&id).unwrap().is_some());
    }

    #[test]
    fn view_serializes() {
        let sdk = snippets();
        let id = sdk.create_snippet("a", LanguageHint::parse("rust"), SECRET).unwrap();
        let view = sdk.get_snippet(&id).unwrap().unwrap();
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["snippet"]["public_id"], id.as_str());
        assert_eq!(json["versions"][0]["language"], "rust");
    }
}
