//! Interaction edges between users

use crate::user::{pair_key, UserId};
use serde::{Deserialize, Serialize};

/// Kind of a directed relationship edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionKind {
    /// One user likes another (directed)
    Like,

    /// Reciprocal likes collapsed into a symmetric match
    Match,

    /// One user blocks another (directed, orthogonal to like/match)
    Block,
}

/// A relationship edge between two users
///
/// Rows are immutable once created; the unlike/unblock paths delete rather
/// than update. `Match` rows are directed in storage but symmetric in
/// effect: queries must consider both orientations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    /// The user who performed the action
    pub actor: UserId,

    /// The user the action is aimed at
    pub target: UserId,

    /// Edge kind
    pub kind: InteractionKind,

    /// When this edge was created (Unix seconds)
    pub created_at: u64,
}

impl Interaction {
    /// Create a new interaction edge
    pub fn new(actor: UserId, target: UserId, kind: InteractionKind, created_at: u64) -> Self {
        Self {
            actor,
            target,
            kind,
            created_at,
        }
    }

    /// Whether this edge connects the given unordered pair
    pub fn joins(&self, a: UserId, b: UserId) -> bool {
        pair_key(self.actor, self.target) == pair_key(a, b)
    }

    /// Whether the given user sits on either end of this edge
    pub fn involves(&self, user: UserId) -> bool {
        self.actor == user || self.target == user
    }

    /// The other end of the edge relative to `user`
    pub fn counterpart(&self, user: UserId) -> UserId {
        if self.actor == user {
            self.target
        } else {
            self.actor
        }
    }
}
