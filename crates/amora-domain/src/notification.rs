//! Notifications and their kind-owned message templates

use crate::user::UserId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a notification, based on UUIDv7
///
/// UUIDv7 keeps ids chronologically sortable, which matches the
/// append-mostly lifecycle of the notification feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotificationId(uuid::Uuid);

impl NotificationId {
    /// Generate a new UUIDv7-based id
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7())
    }
}

impl Default for NotificationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The closed set of notification kinds
///
/// Each variant owns its wire name, title, and message template. The
/// template is deliberately deterministic: deduplication compares message
/// strings, so two identical events must render to the identical string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NotificationKind {
    /// Someone liked the recipient's profile
    NewLike,

    /// Reciprocal likes formed a match
    NewMatch,

    /// A chat message arrived
    NewMessage,

    /// A date proposal arrived
    NewDate,

    /// Someone viewed the recipient's profile
    NewSeen,

    /// An incoming call started
    NewCall,

    /// The counterpart ended a call
    StopCall,

    /// The counterpart refused a call
    NewRefusedCall,

    /// A former like (or match) was withdrawn
    NewUnlike,

    /// The recipient was blocked (internal kind, not surfaced by default)
    NewBlock,
}

impl NotificationKind {
    /// Wire name used as the event discriminator on the realtime channel
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NewLike => "new-like",
            Self::NewMatch => "new-match",
            Self::NewMessage => "new-message",
            Self::NewDate => "new-date",
            Self::NewSeen => "new-seen",
            Self::NewCall => "new-call",
            Self::StopCall => "stop-call",
            Self::NewRefusedCall => "new-refused-call",
            Self::NewUnlike => "new-unlike",
            Self::NewBlock => "new-block",
        }
    }

    /// Short human-readable title
    pub fn title(&self) -> &'static str {
        match self {
            Self::NewLike => "New like",
            Self::NewMatch => "New match",
            Self::NewMessage => "New message",
            Self::NewDate => "New date",
            Self::NewSeen => "Profile visit",
            Self::NewCall => "Incoming call",
            Self::StopCall => "Call ended",
            Self::NewRefusedCall => "Call refused",
            Self::NewUnlike => "Unliked",
            Self::NewBlock => "Blocked",
        }
    }

    /// Render the message body for this kind
    ///
    /// Single source of truth for the string the dedupe check compares.
    pub fn message(&self, display_name: &str) -> String {
        match self {
            Self::NewLike => format!("{} liked your profile!", display_name),
            Self::NewMatch => format!("You matched with {}!", display_name),
            Self::NewMessage => format!("{} sent you a message.", display_name),
            Self::NewDate => format!("{} proposed a date.", display_name),
            Self::NewSeen => format!("{} checked out your profile.", display_name),
            Self::NewCall => format!("{} is calling you.", display_name),
            Self::StopCall => format!("{} ended the call.", display_name),
            Self::NewRefusedCall => format!("{} refused your call.", display_name),
            Self::NewUnlike => format!("{} unliked you.", display_name),
            Self::NewBlock => format!("{} blocked you.", display_name),
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fact delivered to one user about another
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    /// Unique identifier
    pub id: NotificationId,

    /// The user this notification is for
    pub recipient: UserId,

    /// The user the notification is about
    pub concerned_user: UserId,

    /// Kind, also the realtime event discriminator
    pub kind: NotificationKind,

    /// Short title from the kind
    pub title: String,

    /// Rendered message body, the dedupe key among unseen notifications
    pub message: String,

    /// Whether the recipient has seen it; flips once, never back
    pub seen: bool,

    /// When this notification was created (Unix seconds)
    pub created_at: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_is_deterministic() {
        let a = NotificationKind::NewLike.message("Sam");
        let b = NotificationKind::NewLike.message("Sam");
        assert_eq!(a, b);
    }

    #[test]
    fn test_kinds_render_distinct_messages() {
        let kinds = [
            NotificationKind::NewLike,
            NotificationKind::NewMatch,
            NotificationKind::NewMessage,
            NotificationKind::NewDate,
            NotificationKind::NewSeen,
            NotificationKind::NewCall,
            NotificationKind::StopCall,
            NotificationKind::NewRefusedCall,
            NotificationKind::NewUnlike,
            NotificationKind::NewBlock,
        ];
        let rendered: std::collections::HashSet<String> =
            kinds.iter().map(|k| k.message("Sam")).collect();
        assert_eq!(rendered.len(), kinds.len());
    }

    #[test]
    fn test_wire_names() {
        assert_eq!(NotificationKind::NewRefusedCall.as_str(), "new-refused-call");
        assert_eq!(NotificationKind::StopCall.as_str(), "stop-call");
    }
}
