//! Record storage for snip.
//!
//! Stores snippets, their ordered versions, and feedback entries behind the
//! [`SnippetStore`] trait.
//!
//! # Storage Backends
//!
//! - [`InMemorySnippetStore`] -- `RwLock`-guarded maps for tests and embedding
//! - [`FileSnippetStore`] -- the same state persisted as a JSON snapshot,
//!   shareable between handles and processes through a sidecar file lock
//!
//! # Design Rules
//!
//! 1. Versions and feedback are immutable once written.
//! 2. Version numbers per snippet are exactly `1..=latest_version`: the
//!    read-increment-insert that allocates a number happens under one write
//!    lock (for files, an exclusive lock held across reload and persist), so
//!    concurrent publishes never share a number.
//! 3. A failed write leaves no trace; readers never observe a version
//!    without its snippet's `latest_version` having moved, or vice versa.
//! 4. Feedback always references an existing version.

pub mod error;
pub mod file;
pub mod memory;
mod state;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use file::FileSnippetStore;
pub use memory::InMemorySnippetStore;
pub use state::Snapshot;
pub use traits::SnippetStore;
