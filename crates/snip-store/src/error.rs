use snip_types::{PublicId, VersionId};

/// Errors from snippet store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No snippet is shared under this public id.
    #[error("snippet not found: {0}")]
    SnippetNotFound(PublicId),

    /// The referenced version does not exist.
    #[error("version not found: {0}")]
    VersionNotFound(VersionId),

    /// A snippet with this public id already exists.
    #[error("public id already taken: {0}")]
    AlreadyExists(PublicId),

    /// The snippet cannot take another version number.
    #[error("version limit reached for snippet {0}")]
    VersionLimit(PublicId),

    /// Serialization or deserialization failure.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A lock was poisoned by a panicking writer.
    #[error("store lock poisoned")]
    Poisoned,
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
