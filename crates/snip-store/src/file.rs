use std::ffi::OsString;
use std::fs::{self, OpenOptions};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard};
use std::time::SystemTime;

use chrono::Utc;
use snip_types::{FeedbackEntry, LanguageHint, PublicId, Snippet, SnippetId, SnippetVersion, VersionId};
use tempfile::NamedTempFile;

use crate::error::{StoreError, StoreResult};
use crate::state::{Snapshot, StoreState};
use crate::traits::SnippetStore;

/// Snippet store persisted as one JSON snapshot file.
///
/// Any number of handles, in one process or several, may share a file.
/// Writers take an exclusive lock on a `<file>.lock` sidecar, reload the
/// snapshot from disk, apply the change to that copy and rename a temporary
/// file over the snapshot. Readers serve from a cached copy that is reloaded
/// whenever the file on disk changes.
pub struct FileSnippetStore {
    path: PathBuf,
    lock_path: PathBuf,
    cache: RwLock<Cached>,
}

struct Cached {
    state: StoreState,
    stamp: Option<Stamp>,
}

/// Identity of the snapshot file as last seen on disk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Stamp {
    modified: Option<SystemTime>,
    len: u64,
}

impl FileSnippetStore {
    /// Open the snapshot at `path`, starting empty if the file does not exist.
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        let lock_path = lock_path_for(&path);
        let cached = load(&path)?;
        tracing::debug!(
            path = %path.display(),
            snippets = cached.state.snippet_count(),
            "opened snippet store"
        );
        Ok(Self {
            path,
            lock_path,
            cache: RwLock::new(cached),
        })
    }

    /// Location of the snapshot file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of snippets currently stored.
    pub fn len(&self) -> usize {
        self.read().map_or(0, |c| c.state.snippet_count())
    }

    /// Returns `true` if no snippet has been created.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    /// Cached state, reloaded first if another handle rewrote the file.
    fn read(&self) -> StoreResult<RwLockReadGuard<'_, Cached>> {
        let current = stamp(&self.path)?;
        {
            let cached = self.cache.read().map_err(|_| StoreError::Poisoned)?;
            if cached.stamp == current {
                return Ok(cached);
            }
        }
        {
            let mut cached = self.cache.write().map_err(|_| StoreError::Poisoned)?;
            if cached.stamp != current {
                tracing::debug!(path = %self.path.display(), "snapshot changed on disk, reloading");
                *cached = load(&self.path)?;
            }
        }
        self.cache.read().map_err(|_| StoreError::Poisoned)
    }

    /// Apply `op` to the on-disk state under the file lock, persist it, then
    /// publish it to the cache.
    fn commit<T>(&self, op: impl FnOnce(&mut StoreState) -> StoreResult<T>) -> StoreResult<T> {
        let mut cached = self.cache.write().map_err(|_| StoreError::Poisoned)?;
        fs::create_dir_all(self.dir())?;

        let lock_file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&self.lock_path)?;
        let mut lock = fd_lock::RwLock::new(lock_file);
        let _guard = lock.write()?;

        let fresh = load(&self.path)?;
        let mut next = fresh.state.clone();
        let out = match op(&mut next) {
            Ok(out) => out,
            Err(e) => {
                *cached = fresh;
                return Err(e);
            }
        };
        self.persist(&next.to_snapshot())?;
        *cached = Cached {
            state: next,
            stamp: stamp(&self.path)?,
        };
        Ok(out)
    }

    fn persist(&self, snapshot: &Snapshot) -> StoreResult<()> {
        let mut tmp = NamedTempFile::new_in(self.dir())?;
        {
            let mut writer = BufWriter::new(tmp.as_file_mut());
            serde_json::to_writer_pretty(&mut writer, snapshot)?;
            writer.flush()?;
        }
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| StoreError::Io(e.error))?;
        tracing::trace!(path = %self.path.display(), "snapshot written");
        Ok(())
    }
}

fn lock_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("snippets"));
    name.push(".lock");
    path.with_file_name(name)
}

fn stamp(path: &Path) -> StoreResult<Option<Stamp>> {
    match fs::metadata(path) {
        Ok(meta) => Ok(Some(Stamp {
            modified: meta.modified().ok(),
            len: meta.len(),
        })),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

// The stamp is taken before reading so a concurrent rename only causes an
// extra reload later, never a stale cache.
fn load(path: &Path) -> StoreResult<Cached> {
    let stamp = stamp(path)?;
    let state = match fs::read_to_string(path) {
        Ok(text) => {
            let snapshot: Snapshot = serde_json::from_str(&text)?;
            StoreState::from_snapshot(snapshot)?
        }
        Err(e) if e.kind() == ErrorKind::NotFound => StoreState::default(),
        Err(e) => return Err(e.into()),
    };
    Ok(Cached { state, stamp })
}

impl SnippetStore for FileSnippetStore {
    fn create_snippet(
        &self,
        public_id: PublicId,
        code: &str,
        language: LanguageHint,
    ) -> StoreResult<(Snippet, SnippetVersion)> {
        let now = Utc::now();
        self.commit(|state| state.create_snippet(public_id, code, language, now))
    }

    fn append_version(
        &self,
        public_id: &PublicId,
        code: &str,
        language: LanguageHint,
    ) -> StoreResult<SnippetVersion> {
        let now = Utc::now();
        self.commit(|state| state.append_version(public_id, code, language, now))
    }

    fn snippet(&self, public_id: &PublicId) -> StoreResult<Option<Snippet>> {
        Ok(self.read()?.state.snippet(public_id))
    }

    fn versions(&self, snippet_id: &SnippetId) -> StoreResult<Vec<SnippetVersion>> {
        Ok(self.read()?.state.versions(snippet_id))
    }

    fn version(&self, id: &VersionId) -> StoreResult<Option<SnippetVersion>> {
        Ok(self.read()?.state.version(id))
    }

    fn version_by_number(
        &self,
        snippet_id: &SnippetId,
        number: u32,
    ) -> StoreResult<Option<SnippetVersion>> {
        Ok(self.read()?.state.version_by_number(snippet_id, number))
    }

    fn append_feedback(&self, version_id: &VersionId, content: &str) -> StoreResult<FeedbackEntry> {
        let now = Utc::now();
        self.commit(|state| state.append_feedback(version_id, content, now))
    }

    fn feedback(&self, version_id: &VersionId) -> StoreResult<Vec<FeedbackEntry>> {
        Ok(self.read()?.state.feedback(version_id))
    }
}

impl std::fmt::Debug for FileSnippetStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileSnippetStore")
            .field("path", &self.path)
            .field("snippet_count", &self.len())
            .finish()
    }
}
