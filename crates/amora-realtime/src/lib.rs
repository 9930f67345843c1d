//! Amora Realtime Fan-out
//!
//! Publishes domain events onto per-user channels so connected clients
//! receive live updates without polling. Provides:
//!
//! - One logical channel per user, events discriminated by name
//! - A payload size ceiling enforced before anything reaches the transport
//! - Presence broadcast and status requests fanned out over a user's matches
//! - Private-channel subscription authorization
//! - An explicit connection registry (no ambient global connection map)
//!
//! The transport itself is a trait seam; [`LocalTransport`] ships an
//! in-process implementation backed by a tokio broadcast channel.

#![warn(missing_docs)]

mod channel;
mod config;
mod error;
mod fanout;
mod registry;
mod transport;

pub use channel::user_channel;
pub use config::RealtimeConfig;
pub use error::RealtimeError;
pub use fanout::Fanout;
pub use registry::ConnectionRegistry;
pub use transport::{LocalTransport, PublishedEvent};
