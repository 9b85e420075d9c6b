use snip_store::StoreError;
use thiserror::Error;

/// Errors surfaced to callers of the snip API.
///
/// Authorization failures carry no detail so responses never reveal how a
/// presented secret differed from the configured one.
#[derive(Debug, Error)]
pub enum SdkError {
    #[error("unauthorized")]
    Unauthorized,

    #[error("publishing is not configured on this server")]
    Misconfigured,

    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("store error: {0}")]
    Store(StoreError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for SdkError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::SnippetNotFound(id) => Self::NotFound(format!("snippet {id}")),
            StoreError::VersionNotFound(id) => Self::NotFound(format!("version {id}")),
            other => Self::Store(other),
        }
    }
}

pub type SdkResult<T> = Result<T, SdkError>;
