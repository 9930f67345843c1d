//! Collaborator-boundary error types
//!
//! Stores and transports report failures through these two enums; the
//! service crates wrap them into their own typed errors so callers never
//! see backend diagnostics directly.

use thiserror::Error;

/// Errors surfaced by persistence collaborators
#[derive(Error, Debug)]
pub enum StoreError {
    /// The referenced record does not exist
    #[error("not found: {0}")]
    NotFound(String),

    /// Any other backend failure (connection, timeout, corruption)
    #[error("backend failure: {0}")]
    Backend(String),
}

/// Errors surfaced by the realtime transport
#[derive(Error, Debug)]
pub enum TransportError {
    /// The transport refused the subscription or publish
    #[error("authorization denied: {0}")]
    Denied(String),

    /// Any other transport failure
    #[error("transport failure: {0}")]
    Backend(String),
}
