//! HTTP server for snip.
//!
//! Exposes snippet publishing, retrieval, highlighted version views, version
//! diffs and anonymous feedback as a JSON API.

pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{ApiError, ServerError, ServerResult};
pub use server::SnipServer;
pub use state::{AppState, SharedSnippets};
