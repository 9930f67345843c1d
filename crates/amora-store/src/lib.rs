//! Amora Storage Layer
//!
//! In-memory implementations of the domain persistence traits, synchronized
//! with tokio locks. Suitable for single-process deployments and as the
//! backing store for the service crates' test suites; a database-backed
//! deployment swaps these out behind the same traits.

#![warn(missing_docs)]

mod directory;
mod interactions;
mod notifications;

pub use directory::MemoryDirectory;
pub use interactions::MemoryInteractions;
pub use notifications::MemoryNotifications;
