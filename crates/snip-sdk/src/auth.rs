//! Shared-secret check for publishing.

use crate::error::{SdkError, SdkResult};

/// Guards write operations with a single shared admin secret.
///
/// The secret is compared by exact string equality. An unset or empty
/// secret means the deployment is misconfigured, and every check fails
/// with [`SdkError::Misconfigured`] rather than letting writes through.
#[derive(Clone, Default)]
pub struct AccessGate {
    secret: Option<String>,
}

impl AccessGate {
    pub fn new(secret: Option<String>) -> Self {
        Self {
            secret: secret.filter(|s| !s.is_empty()),
        }
    }

    pub fn with_secret(secret: impl Into<String>) -> Self {
        Self::new(Some(secret.into()))
    }

    /// A gate with no secret; all checks fail as misconfigured.
    pub fn unconfigured() -> Self {
        Self { secret: None }
    }

    pub fn is_configured(&self) -> bool {
        self.secret.is_some()
    }

    /// Validate a presented secret.
    pub fn check(&self, presented: &str) -> SdkResult<()> {
        match &self.secret {
            None => {
                tracing::error!("publish attempted but no admin secret is configured");
                Err(SdkError::Misconfigured)
            }
            Some(secret) if secret == presented => Ok(()),
            Some(_) => {
                tracing::warn!("rejected publish with invalid secret");
                Err(SdkError::Unauthorized)
            }
        }
    }
}

impl std::fmt::Debug for AccessGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessGate")
            .field("configured", &self.is_configured())
            .finish()
    }
}
