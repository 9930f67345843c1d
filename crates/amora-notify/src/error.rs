//! Notification error types

use amora_domain::StoreError;
use thiserror::Error;

/// Errors that can occur during notification operations
#[derive(Error, Debug)]
pub enum NotifyError {
    /// The referenced notification does not exist
    #[error("not found: {0}")]
    NotFound(String),

    /// Storage backend failure
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for NotifyError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(what) => Self::NotFound(what),
            StoreError::Backend(why) => Self::Internal(why),
        }
    }
}
