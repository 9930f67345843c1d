//! Notification creation with unseen-duplicate suppression

use crate::error::NotifyError;
use amora_domain::traits::NotificationStore;
use amora_domain::{Notification, NotificationId, NotificationKind, Profile, UserId};
use amora_realtime::Fanout;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, warn};

/// Current timestamp in seconds since Unix epoch
fn current_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Notification service: dedupe-checked creation, bulk seen transition,
/// reads, and deletion
pub struct Notifier {
    store: Arc<dyn NotificationStore>,
    fanout: Arc<Fanout>,
}

impl Notifier {
    /// Create a notifier over the given store and fan-out
    pub fn new(store: Arc<dyn NotificationStore>, fanout: Arc<Fanout>) -> Self {
        Self { store, fanout }
    }

    /// Create a notification unless an identical unseen one already exists
    ///
    /// Returns `Ok(None)` on the dedupe no-op: an unseen notification with
    /// this exact message is already waiting for the recipient. The realtime
    /// push after insert is best-effort; a publish failure is logged and the
    /// stored notification is still returned.
    pub async fn create(
        &self,
        recipient: UserId,
        concerned_user: UserId,
        kind: NotificationKind,
        message: String,
    ) -> Result<Option<Notification>, NotifyError> {
        let unseen = self.store.find_unseen(recipient).await?;
        if unseen.iter().any(|n| n.message == message) {
            debug!(%recipient, %kind, "identical unseen notification exists, skipping");
            return Ok(None);
        }

        let notification = Notification {
            id: NotificationId::new(),
            recipient,
            concerned_user,
            kind,
            title: kind.title().to_string(),
            message,
            seen: false,
            created_at: current_timestamp(),
        };
        let stored = self.store.insert(notification).await?;

        if let Err(e) = self.fanout.send_notification(&stored).await {
            warn!(%recipient, error = %e, "realtime push failed, notification stored anyway");
        }
        Ok(Some(stored))
    }

    /// Notify `recipient` that `liker` liked their profile
    pub async fn notify_like(
        &self,
        recipient: UserId,
        liker: &Profile,
    ) -> Result<Option<Notification>, NotifyError> {
        self.typed(recipient, NotificationKind::NewLike, liker).await
    }

    /// Notify `recipient` of a new match with `partner`
    pub async fn notify_match(
        &self,
        recipient: UserId,
        partner: &Profile,
    ) -> Result<Option<Notification>, NotifyError> {
        self.typed(recipient, NotificationKind::NewMatch, partner).await
    }

    /// Notify `recipient` of a chat message from `sender`
    pub async fn notify_message(
        &self,
        recipient: UserId,
        sender: &Profile,
    ) -> Result<Option<Notification>, NotifyError> {
        self.typed(recipient, NotificationKind::NewMessage, sender).await
    }

    /// Notify `recipient` of a date proposal from `proposer`
    pub async fn notify_date(
        &self,
        recipient: UserId,
        proposer: &Profile,
    ) -> Result<Option<Notification>, NotifyError> {
        self.typed(recipient, NotificationKind::NewDate, proposer).await
    }

    /// Notify `recipient` that `visitor` viewed their profile
    pub async fn notify_seen(
        &self,
        recipient: UserId,
        visitor: &Profile,
    ) -> Result<Option<Notification>, NotifyError> {
        self.typed(recipient, NotificationKind::NewSeen, visitor).await
    }

    /// Notify `recipient` of an incoming call from `caller`
    pub async fn notify_call(
        &self,
        recipient: UserId,
        caller: &Profile,
    ) -> Result<Option<Notification>, NotifyError> {
        self.typed(recipient, NotificationKind::NewCall, caller).await
    }

    /// Notify `recipient` that `caller` ended the call
    pub async fn notify_stop_call(
        &self,
        recipient: UserId,
        caller: &Profile,
    ) -> Result<Option<Notification>, NotifyError> {
        self.typed(recipient, NotificationKind::StopCall, caller).await
    }

    /// Notify `recipient` that `callee` refused their call
    pub async fn notify_refused_call(
        &self,
        recipient: UserId,
        callee: &Profile,
    ) -> Result<Option<Notification>, NotifyError> {
        self.typed(recipient, NotificationKind::NewRefusedCall, callee).await
    }

    /// Notify `recipient` that `counterpart` withdrew their like
    pub async fn notify_unlike(
        &self,
        recipient: UserId,
        counterpart: &Profile,
    ) -> Result<Option<Notification>, NotifyError> {
        self.typed(recipient, NotificationKind::NewUnlike, counterpart).await
    }

    /// Record a block against `recipient` (internal kind, not surfaced by
    /// the engine's block path)
    pub async fn notify_block(
        &self,
        recipient: UserId,
        blocker: &Profile,
    ) -> Result<Option<Notification>, NotifyError> {
        self.typed(recipient, NotificationKind::NewBlock, blocker).await
    }

    /// All unseen notifications for a user; empty vec when none exist
    pub async fn unseen(&self, user: UserId) -> Result<Vec<Notification>, NotifyError> {
        Ok(self.store.find_unseen(user).await?)
    }

    /// Mark every notification of a user as seen, returning the updated set
    pub async fn mark_all_seen(&self, user: UserId) -> Result<Vec<Notification>, NotifyError> {
        Ok(self.store.mark_all_seen(user).await?)
    }

    /// Hard-delete one notification
    pub async fn delete(&self, id: NotificationId) -> Result<(), NotifyError> {
        Ok(self.store.delete(id).await?)
    }

    /// Profile-view notifications for a user, seen or not
    ///
    /// Backs the engine's `profile_views` query.
    pub async fn seen_by(&self, user: UserId) -> Result<Vec<Notification>, NotifyError> {
        Ok(self
            .store
            .find_by_kind(user, NotificationKind::NewSeen)
            .await?)
    }

    async fn typed(
        &self,
        recipient: UserId,
        kind: NotificationKind,
        concerned: &Profile,
    ) -> Result<Option<Notification>, NotifyError> {
        let message = kind.message(&concerned.display_name);
        self.create(recipient, concerned.id, kind, message).await
    }
}
