//! Trait definitions for external collaborators
//!
//! These traits define the boundaries between the engine and its
//! infrastructure. Implementations live in other crates (amora-store ships
//! in-memory ones) or behind whatever database/transport a deployment uses.

use crate::error::{StoreError, TransportError};
use crate::interaction::{Interaction, InteractionKind};
use crate::notification::{Notification, NotificationId, NotificationKind};
use crate::profile::{CandidateQuery, Profile};
use crate::user::{pair_key, UserId};
use async_trait::async_trait;

/// Read/adjust access to the external profile store
#[async_trait]
pub trait ProfileDirectory: Send + Sync {
    /// Fetch a single profile; `Ok(None)` when the user does not exist
    async fn get_user(&self, id: UserId) -> Result<Option<Profile>, StoreError>;

    /// Fetch the broad candidate list, pre-filtered by the hard criteria
    async fn candidates(&self, query: &CandidateQuery) -> Result<Vec<Profile>, StoreError>;

    /// Adjust a user's fame rating by `delta`, returning the updated profile
    async fn adjust_reputation(&self, id: UserId, delta: i32) -> Result<Profile, StoreError>;
}

/// Predicate for querying or deleting interaction rows
///
/// All fields are conjunctive; `None` means "don't care". An empty query
/// matches every row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InteractionQuery {
    /// Restrict to one edge kind
    pub kind: Option<InteractionKind>,

    /// Restrict to edges performed by this user
    pub actor: Option<UserId>,

    /// Restrict to edges aimed at this user
    pub target: Option<UserId>,

    /// Restrict to edges with this user on either end
    pub involving: Option<UserId>,

    /// Restrict to edges joining this unordered pair
    pub pair: Option<(UserId, UserId)>,
}

impl InteractionQuery {
    /// Query one edge kind, any endpoints
    pub fn of_kind(kind: InteractionKind) -> Self {
        Self {
            kind: Some(kind),
            ..Self::default()
        }
    }

    /// Restrict to a given actor
    pub fn by(mut self, actor: UserId) -> Self {
        self.actor = Some(actor);
        self
    }

    /// Restrict to a given target
    pub fn towards(mut self, target: UserId) -> Self {
        self.target = Some(target);
        self
    }

    /// Restrict to edges touching a given user
    pub fn involving(mut self, user: UserId) -> Self {
        self.involving = Some(user);
        self
    }

    /// Restrict to edges joining an unordered pair
    pub fn between(mut self, a: UserId, b: UserId) -> Self {
        self.pair = Some(pair_key(a, b));
        self
    }

    /// Whether an interaction satisfies this predicate
    pub fn matches(&self, interaction: &Interaction) -> bool {
        self.kind.is_none_or(|k| interaction.kind == k)
            && self.actor.is_none_or(|a| interaction.actor == a)
            && self.target.is_none_or(|t| interaction.target == t)
            && self.involving.is_none_or(|u| interaction.involves(u))
            && self.pair.is_none_or(|(a, b)| interaction.joins(a, b))
    }
}

/// Persistence for relationship edges
#[async_trait]
pub trait InteractionStore: Send + Sync {
    /// Persist a new edge
    async fn insert(&self, interaction: Interaction) -> Result<Interaction, StoreError>;

    /// Fetch all edges satisfying the predicate; empty vec when none match
    async fn find(&self, query: &InteractionQuery) -> Result<Vec<Interaction>, StoreError>;

    /// Delete all edges satisfying the predicate, returning the removed count
    async fn delete(&self, query: &InteractionQuery) -> Result<usize, StoreError>;
}

/// Persistence for notifications
#[async_trait]
pub trait NotificationStore: Send + Sync {
    /// Persist a notification
    async fn insert(&self, notification: Notification) -> Result<Notification, StoreError>;

    /// All unseen notifications for a recipient; empty vec when none exist
    async fn find_unseen(&self, recipient: UserId) -> Result<Vec<Notification>, StoreError>;

    /// All notifications of one kind for a recipient, seen or not
    async fn find_by_kind(
        &self,
        recipient: UserId,
        kind: NotificationKind,
    ) -> Result<Vec<Notification>, StoreError>;

    /// Flip every unseen notification to seen, returning the updated set
    async fn mark_all_seen(&self, recipient: UserId) -> Result<Vec<Notification>, StoreError>;

    /// Hard-delete one notification; `NotFound` if absent
    async fn delete(&self, id: NotificationId) -> Result<(), StoreError>;
}

/// The publish/subscribe transport behind the realtime channels
///
/// Channel names are opaque to the transport; payloads arrive already
/// serialized so the engine can enforce its size ceiling before handing
/// them over.
#[async_trait]
pub trait RealtimeTransport: Send + Sync {
    /// Publish one event onto a channel
    async fn publish(&self, channel: &str, event: &str, payload: &str)
        -> Result<(), TransportError>;

    /// Authorize a client connection to subscribe to a private channel
    ///
    /// Returns the signed token the client presents to the transport.
    async fn authorize_subscription(
        &self,
        connection_id: &str,
        channel: &str,
        identity_claims: &str,
    ) -> Result<String, TransportError>;
}
