//! Event fan-out over per-user channels

use crate::channel::user_channel;
use crate::config::RealtimeConfig;
use crate::error::RealtimeError;
use amora_domain::traits::{InteractionQuery, InteractionStore, RealtimeTransport};
use amora_domain::{ChatMessage, InteractionKind, Notification, PresenceStatus, UserId};
use serde_json::json;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, warn};

/// Realtime fan-out service
///
/// Stateless between calls; match sets are read fresh from the interaction
/// store on every broadcast so presence never leaks to an unmatched or
/// blocked user.
pub struct Fanout {
    transport: Arc<dyn RealtimeTransport>,
    interactions: Arc<dyn InteractionStore>,
    config: RealtimeConfig,
}

impl Fanout {
    /// Create a fan-out service over the given transport and store
    pub fn new(
        transport: Arc<dyn RealtimeTransport>,
        interactions: Arc<dyn InteractionStore>,
        config: RealtimeConfig,
    ) -> Self {
        Self {
            transport,
            interactions,
            config,
        }
    }

    /// Publish a chat message to the receiver's channel
    ///
    /// The serialized payload must fit the configured ceiling; an oversized
    /// message fails before anything reaches the transport.
    pub async fn send_message(&self, message: &ChatMessage) -> Result<(), RealtimeError> {
        let payload = serde_json::to_string(message)?;
        if payload.len() > self.config.max_payload_bytes {
            return Err(RealtimeError::PayloadTooLarge {
                size: payload.len(),
                limit: self.config.max_payload_bytes,
            });
        }
        self.transport
            .publish(&user_channel(message.receiver), "new-message", &payload)
            .await?;
        Ok(())
    }

    /// Publish a stored notification to its recipient's channel
    pub async fn send_notification(&self, notification: &Notification) -> Result<(), RealtimeError> {
        let payload = serde_json::to_string(notification)?;
        self.transport
            .publish(
                &user_channel(notification.recipient),
                "new-notification",
                &payload,
            )
            .await?;
        Ok(())
    }

    /// Publish a presence change for `sender` to one receiver's channel
    pub async fn send_status_change(
        &self,
        sender: UserId,
        receiver: UserId,
        status: PresenceStatus,
    ) -> Result<(), RealtimeError> {
        let payload = json!({ "user": sender, "status": status.as_str() }).to_string();
        self.transport
            .publish(&user_channel(receiver), "status-change", &payload)
            .await?;
        Ok(())
    }

    /// Broadcast a presence change to every current match of `user`
    ///
    /// Delivery is best-effort per recipient: one failed publish is logged
    /// and skipped, never aborting the rest or surfacing as an error.
    pub async fn broadcast_status_change(
        &self,
        user: UserId,
        status: PresenceStatus,
    ) -> Result<(), RealtimeError> {
        let partners = self.match_partners(user).await?;
        debug!(%user, ?status, recipients = partners.len(), "broadcasting presence");
        for partner in partners {
            if let Err(e) = self.send_status_change(user, partner, status).await {
                warn!(%user, %partner, error = %e, "presence publish failed, continuing");
            }
        }
        Ok(())
    }

    /// Ask every current match of `user` to report their presence
    ///
    /// Used to pull fresh presence on demand, e.g. when a conversation list
    /// opens. Same best-effort rule as the presence broadcast.
    pub async fn request_status(&self, user: UserId) -> Result<(), RealtimeError> {
        let partners = self.match_partners(user).await?;
        let payload = json!({ "from": user }).to_string();
        for partner in partners {
            if let Err(e) = self
                .transport
                .publish(&user_channel(partner), "status-request", &payload)
                .await
            {
                warn!(%user, %partner, error = %e, "status request publish failed, continuing");
            }
        }
        Ok(())
    }

    /// Authorize a client connection to subscribe to a private channel
    ///
    /// A user may only subscribe to their own channel; any transport-side
    /// refusal also surfaces as `Forbidden`.
    pub async fn authenticate_channel(
        &self,
        user: UserId,
        connection_id: &str,
        channel: &str,
    ) -> Result<String, RealtimeError> {
        if channel != user_channel(user) {
            return Err(RealtimeError::Forbidden(format!(
                "user {} may not subscribe to {}",
                user, channel
            )));
        }
        let claims = json!({ "user_id": user }).to_string();
        self.transport
            .authorize_subscription(connection_id, channel, &claims)
            .await
            .map_err(|e| RealtimeError::Forbidden(e.to_string()))
    }

    /// Current match partners of `user`, excluding blocked pairs
    async fn match_partners(&self, user: UserId) -> Result<Vec<UserId>, RealtimeError> {
        let matches = self
            .interactions
            .find(&InteractionQuery::of_kind(InteractionKind::Match).involving(user))
            .await?;
        let blocks = self
            .interactions
            .find(&InteractionQuery::of_kind(InteractionKind::Block).involving(user))
            .await?;
        let blocked_with: HashSet<UserId> =
            blocks.iter().map(|edge| edge.counterpart(user)).collect();

        let mut seen = HashSet::new();
        Ok(matches
            .iter()
            .map(|edge| edge.counterpart(user))
            .filter(|partner| !blocked_with.contains(partner) && seen.insert(*partner))
            .collect())
    }
}
