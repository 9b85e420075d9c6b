//! High-level API for snip.
//!
//! Wraps a [`SnippetStore`] with the publishing secret check and the
//! viewing operations (highlighted versions, version comparison). This is
//! the main entry point for the server and the CLI.

pub mod auth;
pub mod error;
pub mod snippets;
pub mod view;

pub use auth::AccessGate;
pub use error::{SdkError, SdkResult};
pub use snippets::Snippets;
pub use view::{RenderedVersion, SnippetView, VersionComparison};

// Re-export key types
pub use snip_diff::{DiffRow, RenderedRow, VersionDiff};
pub use snip_lang::Highlighted;
pub use snip_store::{FileSnippetStore, InMemorySnippetStore, SnippetStore};
pub use snip_types::{
    FeedbackEntry, FeedbackId, Language, LanguageHint, PublicId, Snippet, SnippetId, SnippetVersion,
    VersionId,
};
