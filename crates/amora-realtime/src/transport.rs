//! In-process transport implementation
//!
//! Backed by a tokio broadcast channel: every published event is fanned to
//! all subscribers, which filter by channel name themselves. Suitable for
//! single-node operation and tests; a hosted pub/sub service would sit
//! behind the same [`RealtimeTransport`] trait in production.

use amora_domain::traits::RealtimeTransport;
use amora_domain::TransportError;
use async_trait::async_trait;
use std::collections::VecDeque;
use tokio::sync::{broadcast, RwLock};
use tracing::debug;

/// Events to buffer per subscriber before lagging kicks in
const DEFAULT_CHANNEL_CAPACITY: usize = 1000;

/// Most recent publishes retained for inspection; older entries are dropped
const RECORD_CAPACITY: usize = 256;

/// One event as it crossed the transport
#[derive(Debug, Clone, PartialEq)]
pub struct PublishedEvent {
    /// Channel the event was addressed to
    pub channel: String,

    /// Event name discriminator
    pub event: String,

    /// Serialized payload
    pub payload: String,
}

/// In-process implementation of [`RealtimeTransport`]
///
/// Live delivery goes through the broadcast channel; a bounded log of the
/// most recent publishes is kept on the side for inspection.
pub struct LocalTransport {
    sender: broadcast::Sender<PublishedEvent>,
    sent: RwLock<VecDeque<PublishedEvent>>,
}

impl LocalTransport {
    /// Create a transport with default buffering
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    /// Create a transport with the given per-subscriber buffer
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender,
            sent: RwLock::new(VecDeque::new()),
        }
    }

    /// Subscribe to every event crossing this transport
    pub fn subscribe(&self) -> broadcast::Receiver<PublishedEvent> {
        self.sender.subscribe()
    }

    /// The most recent published events, oldest first
    pub async fn sent(&self) -> Vec<PublishedEvent> {
        self.sent.read().await.iter().cloned().collect()
    }

    /// The most recent events published to one channel, oldest first
    pub async fn sent_to(&self, channel: &str) -> Vec<PublishedEvent> {
        self.sent
            .read()
            .await
            .iter()
            .filter(|e| e.channel == channel)
            .cloned()
            .collect()
    }
}

impl Default for LocalTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RealtimeTransport for LocalTransport {
    async fn publish(
        &self,
        channel: &str,
        event: &str,
        payload: &str,
    ) -> Result<(), TransportError> {
        let published = PublishedEvent {
            channel: channel.to_string(),
            event: event.to_string(),
            payload: payload.to_string(),
        };
        {
            let mut sent = self.sent.write().await;
            sent.push_back(published.clone());
            while sent.len() > RECORD_CAPACITY {
                sent.pop_front();
            }
        }
        // No subscribers is fine; the event is still recorded
        let receivers = self.sender.send(published).unwrap_or(0);
        debug!(channel, event, receivers, "event published");
        Ok(())
    }

    async fn authorize_subscription(
        &self,
        connection_id: &str,
        channel: &str,
        identity_claims: &str,
    ) -> Result<String, TransportError> {
        if identity_claims.is_empty() {
            return Err(TransportError::Denied("missing identity claims".to_string()));
        }
        Ok(format!("local:{}:{}", connection_id, channel))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_publish_reaches_subscriber() {
        let transport = LocalTransport::new();
        let mut receiver = transport.subscribe();

        transport
            .publish("private-user-1", "new-message", "{}")
            .await
            .unwrap();

        let event = receiver.recv().await.unwrap();
        assert_eq!(event.channel, "private-user-1");
        assert_eq!(event.event, "new-message");
    }

    #[tokio::test]
    async fn test_publish_without_subscribers_is_recorded() {
        let transport = LocalTransport::new();
        transport.publish("private-user-1", "x", "{}").await.unwrap();
        assert_eq!(transport.sent_to("private-user-1").await.len(), 1);
    }

    #[tokio::test]
    async fn test_event_log_is_bounded() {
        let transport = LocalTransport::new();
        for i in 0..RECORD_CAPACITY + 10 {
            transport
                .publish("private-user-1", "new-message", &i.to_string())
                .await
                .unwrap();
        }

        let sent = transport.sent().await;
        assert_eq!(sent.len(), RECORD_CAPACITY);
        // Oldest entries fell off the front
        assert_eq!(sent[0].payload, "10");
    }

    #[tokio::test]
    async fn test_authorize_requires_claims() {
        let transport = LocalTransport::new();
        let denied = transport
            .authorize_subscription("conn-1", "private-user-1", "")
            .await;
        assert!(matches!(denied, Err(TransportError::Denied(_))));

        let token = transport
            .authorize_subscription("conn-1", "private-user-1", r#"{"user_id":1}"#)
            .await
            .unwrap();
        assert!(token.contains("conn-1"));
    }
}
