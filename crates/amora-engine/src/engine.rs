//! Relationship state machine and reputation ledger

use crate::error::EngineError;
use crate::locks::PairLocks;
use amora_domain::traits::{InteractionQuery, InteractionStore, ProfileDirectory};
use amora_domain::{Interaction, InteractionKind, Notification, Profile, UserId};
use amora_notify::Notifier;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, warn};

/// Fame delta applied to the target of a like
pub const REPUTATION_LIKE: i32 = 10;

/// Fame delta applied to the target of a block
pub const REPUTATION_BLOCK: i32 = -10;

/// Fame delta applied to the counterpart of an unlike
pub const REPUTATION_UNLIKE: i32 = -10;

/// Fame delta applied to the target of a report
pub const REPUTATION_REPORT: i32 = -15;

/// Current timestamp in seconds since Unix epoch
fn current_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Result of a like action
#[derive(Debug, Clone, PartialEq)]
pub enum LikeOutcome {
    /// One-sided like recorded; the target was notified
    Liked(Interaction),

    /// The like was reciprocal; a match was formed and both sides notified
    Matched(Interaction),
}

/// The relationship engine
///
/// Stateless between calls apart from the pair-lock map: every operation
/// reads fresh state from the collaborators, and operations on the same
/// unordered pair serialize so the persist/reciprocity-check/notify
/// sequence cannot interleave with a concurrent like or unlike.
pub struct RelationshipEngine {
    directory: Arc<dyn ProfileDirectory>,
    interactions: Arc<dyn InteractionStore>,
    notifier: Arc<Notifier>,
    locks: PairLocks,
}

impl RelationshipEngine {
    /// Create an engine over the given collaborators
    pub fn new(
        directory: Arc<dyn ProfileDirectory>,
        interactions: Arc<dyn InteractionStore>,
        notifier: Arc<Notifier>,
    ) -> Self {
        Self {
            directory,
            interactions,
            notifier,
            locks: PairLocks::new(),
        }
    }

    /// Like another user
    ///
    /// Records the directed like. If the target already likes the actor the
    /// pair becomes a match: a match row is inserted and both sides receive
    /// a match notification. Otherwise the target is notified of the like
    /// and rewarded [`REPUTATION_LIKE`] fame.
    pub async fn like(&self, actor: UserId, target: UserId) -> Result<LikeOutcome, EngineError> {
        self.check_pair(actor, target, "like")?;
        let _guard = self.locks.acquire(actor, target).await;

        let actor_profile = self.require_user(actor).await?;
        let target_profile = self.require_user(target).await?;

        let existing = self
            .interactions
            .find(&InteractionQuery::of_kind(InteractionKind::Like).by(actor).towards(target))
            .await?;
        if !existing.is_empty() {
            return Err(EngineError::Conflict(format!(
                "{} already likes {}",
                actor, target
            )));
        }

        let like = self
            .interactions
            .insert(Interaction::new(actor, target, InteractionKind::Like, current_timestamp()))
            .await?;
        debug!(%actor, %target, "like recorded");

        let reciprocal = self
            .interactions
            .find(&InteractionQuery::of_kind(InteractionKind::Like).by(target).towards(actor))
            .await?;
        if !reciprocal.is_empty() {
            let matched = self
                .record_match(&actor_profile, &target_profile)
                .await?;
            return Ok(LikeOutcome::Matched(matched));
        }

        self.notifier.notify_like(target, &actor_profile).await?;
        self.directory.adjust_reputation(target, REPUTATION_LIKE).await?;
        Ok(LikeOutcome::Liked(like))
    }

    /// Directly form a match between two users
    ///
    /// The path `like` takes once reciprocity is established; exposed for
    /// callers that already hold both sides (and for tests). Does not take
    /// the pair lock; `like` already holds it when it delegates here.
    pub async fn create_match(&self, a: UserId, b: UserId) -> Result<Interaction, EngineError> {
        self.check_pair(a, b, "match")?;
        let profile_a = self.require_user(a).await?;
        let profile_b = self.require_user(b).await?;
        self.record_match(&profile_a, &profile_b).await
    }

    /// Block another user
    ///
    /// Inserts the directed block and applies [`REPUTATION_BLOCK`] to the
    /// target. Existing like/match rows between the pair are left in place;
    /// the match queries and the fan-out paths exclude blocked pairs, so
    /// the relationship goes dark without being destroyed.
    pub async fn block(&self, actor: UserId, target: UserId) -> Result<Interaction, EngineError> {
        self.check_pair(actor, target, "block")?;
        let _guard = self.locks.acquire(actor, target).await;
        self.require_user(target).await?;

        let block = self
            .interactions
            .insert(Interaction::new(actor, target, InteractionKind::Block, current_timestamp()))
            .await?;
        self.directory.adjust_reputation(target, REPUTATION_BLOCK).await?;
        debug!(%actor, %target, "block recorded");
        Ok(block)
    }

    /// Report another user
    ///
    /// A block with a heavier fame penalty: one block row is inserted and
    /// the target loses [`REPUTATION_REPORT`] fame (the report delta, not
    /// the block delta on top of it).
    pub async fn report(&self, actor: UserId, target: UserId) -> Result<Interaction, EngineError> {
        self.check_pair(actor, target, "report")?;
        let _guard = self.locks.acquire(actor, target).await;
        self.require_user(target).await?;

        let block = self
            .interactions
            .insert(Interaction::new(actor, target, InteractionKind::Block, current_timestamp()))
            .await?;
        self.directory.adjust_reputation(target, REPUTATION_REPORT).await?;
        debug!(%actor, %target, "report recorded");
        Ok(block)
    }

    /// Withdraw a like, dissolving any match with it
    ///
    /// If the pair is matched this removes both like rows and the match row;
    /// otherwise only the actor's own like row (if any). Between zero and
    /// three rows legitimately disappear depending on prior state. The
    /// counterpart is notified and loses [`REPUTATION_UNLIKE`] fame.
    ///
    /// Returns the number of rows removed.
    pub async fn unlike(&self, actor: UserId, target: UserId) -> Result<usize, EngineError> {
        self.check_pair(actor, target, "unlike")?;
        let _guard = self.locks.acquire(actor, target).await;

        let actor_profile = self.require_user(actor).await?;
        self.require_user(target).await?;

        let matched = !self
            .interactions
            .find(&InteractionQuery::of_kind(InteractionKind::Match).between(actor, target))
            .await?
            .is_empty();

        let removed = if matched {
            let likes = self
                .interactions
                .delete(&InteractionQuery::of_kind(InteractionKind::Like).between(actor, target))
                .await?;
            let matches = self
                .interactions
                .delete(&InteractionQuery::of_kind(InteractionKind::Match).between(actor, target))
                .await?;
            likes + matches
        } else {
            self.interactions
                .delete(&InteractionQuery::of_kind(InteractionKind::Like).by(actor).towards(target))
                .await?
        };
        if removed > 3 {
            warn!(%actor, %target, removed, "unlike removed more rows than one pair can hold");
        }
        debug!(%actor, %target, removed, "unlike applied");

        self.notifier.notify_unlike(target, &actor_profile).await?;
        self.directory.adjust_reputation(target, REPUTATION_UNLIKE).await?;
        Ok(removed)
    }

    /// Likes the user has given
    pub async fn likes_given(&self, user: UserId) -> Result<Vec<Interaction>, EngineError> {
        Ok(self
            .interactions
            .find(&InteractionQuery::of_kind(InteractionKind::Like).by(user))
            .await?)
    }

    /// Likes the user has received
    pub async fn likes_received(&self, user: UserId) -> Result<Vec<Interaction>, EngineError> {
        Ok(self
            .interactions
            .find(&InteractionQuery::of_kind(InteractionKind::Like).towards(user))
            .await?)
    }

    /// Number of likes the user has received
    pub async fn like_count(&self, user: UserId) -> Result<usize, EngineError> {
        Ok(self.likes_received(user).await?.len())
    }

    /// Current matches of the user
    ///
    /// Symmetric: the same match row is returned for both sides. Pairs where
    /// either side has blocked the other are excluded.
    pub async fn matches(&self, user: UserId) -> Result<Vec<Interaction>, EngineError> {
        let matches = self
            .interactions
            .find(&InteractionQuery::of_kind(InteractionKind::Match).involving(user))
            .await?;
        let blocked: HashSet<UserId> = self.blocked_with(user).await?.into_iter().collect();
        Ok(matches
            .into_iter()
            .filter(|edge| !blocked.contains(&edge.counterpart(user)))
            .collect())
    }

    /// Users the given user shares a block with, in either direction
    pub async fn blocked_with(&self, user: UserId) -> Result<Vec<UserId>, EngineError> {
        let blocks = self
            .interactions
            .find(&InteractionQuery::of_kind(InteractionKind::Block).involving(user))
            .await?;
        let mut seen = HashSet::new();
        Ok(blocks
            .iter()
            .map(|edge| edge.counterpart(user))
            .filter(|id| *id != user && seen.insert(*id))
            .collect())
    }

    /// Profile-view notifications for the user (who looked at them)
    pub async fn profile_views(&self, user: UserId) -> Result<Vec<Notification>, EngineError> {
        Ok(self.notifier.seen_by(user).await?)
    }

    async fn record_match(
        &self,
        actor: &Profile,
        target: &Profile,
    ) -> Result<Interaction, EngineError> {
        let matched = self
            .interactions
            .insert(Interaction::new(
                actor.id,
                target.id,
                InteractionKind::Match,
                current_timestamp(),
            ))
            .await?;
        debug!(actor = %actor.id, target = %target.id, "match formed");

        self.notifier.notify_match(actor.id, target).await?;
        self.notifier.notify_match(target.id, actor).await?;
        Ok(matched)
    }

    async fn require_user(&self, id: UserId) -> Result<Profile, EngineError> {
        self.directory
            .get_user(id)
            .await?
            .ok_or_else(|| EngineError::NotFound(format!("user {}", id)))
    }

    fn check_pair(&self, actor: UserId, target: UserId, action: &str) -> Result<(), EngineError> {
        if actor.value() == 0 || target.value() == 0 {
            return Err(EngineError::Validation(format!(
                "{} requires two user ids",
                action
            )));
        }
        if actor == target {
            return Err(EngineError::InvalidOperation(format!(
                "cannot {} yourself",
                action
            )));
        }
        Ok(())
    }
}
