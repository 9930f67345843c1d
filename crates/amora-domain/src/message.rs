//! Chat messages and presence

use crate::user::UserId;
use serde::{Deserialize, Serialize};

/// A chat message in flight between two users
///
/// Persistence of conversation history is out of scope; the engine only
/// sees messages on their way to the realtime channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// The author
    pub sender: UserId,

    /// The user whose channel this is published to
    pub receiver: UserId,

    /// Message body
    pub body: String,

    /// When the sender dispatched it (Unix seconds)
    pub sent_at: u64,
}

/// Presence status broadcast to a user's matches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresenceStatus {
    /// At least one live connection
    Online,
    /// No live connections remain
    Offline,
}

impl PresenceStatus {
    /// Wire value carried in status-change events
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Online => "online",
            Self::Offline => "offline",
        }
    }
}
