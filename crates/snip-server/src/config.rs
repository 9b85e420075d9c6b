use std::net::{Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ServerError, ServerResult};

/// Environment variable holding the publishing secret.
pub const ENV_ADMIN_PASSWORD: &str = "ADMIN_PASSWORD";
/// Environment variable overriding the listen address.
pub const ENV_BIND: &str = "SNIP_BIND";
/// Environment variable pointing at a JSON snapshot file for persistence.
pub const ENV_DATA: &str = "SNIP_DATA";

/// Server settings.
///
/// Resolved in layers: defaults, then an optional TOML file, then the
/// environment, then whatever the caller (usually CLI flags) sets last.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Snapshot file for the file-backed store; `None` keeps everything in
    /// memory.
    pub data_path: Option<PathBuf>,
    /// Shared secret for publishing. Without it every publish fails as
    /// misconfigured.
    pub admin_password: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from((Ipv4Addr::LOCALHOST, 8787)),
            data_path: None,
            admin_password: None,
        }
    }
}

impl ServerConfig {
    /// Defaults, overlaid with `path` if given, overlaid with the process
    /// environment.
    pub fn load(path: Option<&Path>) -> ServerResult<Self> {
        Self::load_with(path, |key| std::env::var(key).ok())
    }

    /// [`load`](Self::load) with environment variables resolved by `lookup`.
    pub fn load_with(
        path: Option<&Path>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> ServerResult<Self> {
        let mut config = match path {
            Some(path) => {
                let text = std::fs::read_to_string(path)?;
                Self::from_toml_str(&text)?
            }
            None => Self::default(),
        };
        config.apply_env_with(lookup)?;
        Ok(config)
    }

    pub fn from_toml_str(text: &str) -> ServerResult<Self> {
        toml::from_str(text).map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Apply overrides from variables resolved by `lookup`.
    pub fn apply_env_with(&mut self, lookup: impl Fn(&str) -> Option<String>) -> ServerResult<()> {
        if let Some(password) = lookup(ENV_ADMIN_PASSWORD) {
            self.admin_password = Some(password);
        }
        if let Some(bind) = lookup(ENV_BIND) {
            self.bind_addr = bind
                .parse()
                .map_err(|e| ServerError::Config(format!("{ENV_BIND}={bind}: {e}")))?;
        }
        if let Some(data) = lookup(ENV_DATA).filter(|d| !d.is_empty()) {
            self.data_path = Some(PathBuf::from(data));
        }
        Ok(())
    }
}

impl std::fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerConfig")
            .field("bind_addr", &self.bind_addr)
            .field("data_path", &self.data_path)
            .field("admin_password", &self.admin_password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
