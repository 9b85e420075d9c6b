use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid public id {id:?}: {reason}")]
    InvalidPublicId { id: String, reason: String },

    #[error("invalid record id: {0}")]
    InvalidId(String),
}
