//! Engine error types

use amora_domain::StoreError;
use amora_notify::NotifyError;
use thiserror::Error;

/// Errors that can occur during relationship and discovery operations
///
/// Callers map these onto their own transport status codes; no backend
/// diagnostics beyond the wrapped message leak through.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Missing or malformed identifier
    #[error("validation: {0}")]
    Validation(String),

    /// Self-targeting action
    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    /// The relationship already exists
    #[error("conflict: {0}")]
    Conflict(String),

    /// Referenced user or record does not exist
    #[error("not found: {0}")]
    NotFound(String),

    /// The operation needs data the user has not provided
    #[error("precondition failed: {0}")]
    PreconditionFailed(String),

    /// Collaborator failure (storage, notification path)
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for EngineError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(what) => Self::NotFound(what),
            StoreError::Backend(why) => Self::Internal(why),
        }
    }
}

impl From<NotifyError> for EngineError {
    fn from(e: NotifyError) -> Self {
        match e {
            NotifyError::NotFound(what) => Self::NotFound(what),
            NotifyError::Internal(why) => Self::Internal(why),
        }
    }
}
