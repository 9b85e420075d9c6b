//! Foundation types for snip, a password-gated snippet sharing service.
//!
//! Every other snip crate depends on `snip-types`.
//!
//! # Key Types
//!
//! - [`PublicId`] -- URL-safe slug a snippet is shared under
//! - [`SnippetId`] / [`VersionId`] / [`FeedbackId`] -- UUID v7 record identifiers
//! - [`Language`] -- closed set of registered highlighting grammars
//! - [`LanguageHint`] -- an author's language choice, explicit or `Auto`
//! - [`Snippet`] / [`SnippetVersion`] / [`FeedbackEntry`] -- stored records

pub mod error;
pub mod id;
pub mod language;
pub mod record;

pub use error::TypeError;
pub use id::{FeedbackId, PublicId, SnippetId, VersionId};
pub use language::{Language, LanguageHint};
pub use record::{FeedbackEntry, Snippet, SnippetVersion};
