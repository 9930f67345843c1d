//! Realtime error types

use amora_domain::{StoreError, TransportError};
use thiserror::Error;

/// Errors that can occur on the realtime fan-out paths
#[derive(Error, Debug)]
pub enum RealtimeError {
    /// Serialized payload exceeds the configured ceiling
    #[error("payload too large: {size} bytes (limit {limit})")]
    PayloadTooLarge {
        /// Serialized size of the rejected payload
        size: usize,
        /// Configured ceiling in bytes
        limit: usize,
    },

    /// Channel authorization was denied
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Collaborator failure (transport or store)
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<TransportError> for RealtimeError {
    fn from(e: TransportError) -> Self {
        Self::Internal(e.to_string())
    }
}

impl From<StoreError> for RealtimeError {
    fn from(e: StoreError) -> Self {
        Self::Internal(e.to_string())
    }
}

impl From<serde_json::Error> for RealtimeError {
    fn from(e: serde_json::Error) -> Self {
        Self::Internal(format!("serialization: {}", e))
    }
}
