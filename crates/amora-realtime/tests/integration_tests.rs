//! Integration tests for amora-realtime
//!
//! Exercise the payload ceiling, presence fan-out over the match set, and
//! channel authorization against the in-memory store and transport.

use amora_domain::traits::{InteractionStore, RealtimeTransport};
use amora_domain::{
    ChatMessage, Interaction, InteractionKind, PresenceStatus, TransportError, UserId,
};
use amora_realtime::{user_channel, Fanout, LocalTransport, RealtimeConfig, RealtimeError};
use amora_store::MemoryInteractions;
use async_trait::async_trait;
use std::sync::Arc;

fn fanout_over(
    transport: Arc<dyn RealtimeTransport>,
    interactions: Arc<MemoryInteractions>,
) -> Fanout {
    Fanout::new(transport, interactions, RealtimeConfig::default())
}

fn message_with_total_size(total: usize) -> ChatMessage {
    let empty = ChatMessage {
        sender: UserId(1),
        receiver: UserId(2),
        body: String::new(),
        sent_at: 0,
    };
    let overhead = serde_json::to_string(&empty).unwrap().len();
    ChatMessage {
        body: "a".repeat(total - overhead),
        ..empty
    }
}

async fn insert_match(store: &MemoryInteractions, a: u64, b: u64) {
    store
        .insert(Interaction::new(UserId(a), UserId(b), InteractionKind::Match, 0))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_payload_at_limit_is_published() {
    let transport = Arc::new(LocalTransport::new());
    let interactions = Arc::new(MemoryInteractions::new());
    let fanout = fanout_over(transport.clone(), interactions);

    let message = message_with_total_size(10240);
    assert_eq!(serde_json::to_string(&message).unwrap().len(), 10240);

    fanout.send_message(&message).await.unwrap();
    assert_eq!(transport.sent_to(&user_channel(UserId(2))).await.len(), 1);
}

#[tokio::test]
async fn test_payload_over_limit_is_rejected_before_publish() {
    let transport = Arc::new(LocalTransport::new());
    let interactions = Arc::new(MemoryInteractions::new());
    let fanout = fanout_over(transport.clone(), interactions);

    let message = message_with_total_size(10241);
    let result = fanout.send_message(&message).await;

    assert!(matches!(
        result,
        Err(RealtimeError::PayloadTooLarge { size: 10241, limit: 10240 })
    ));
    assert!(transport.sent().await.is_empty(), "nothing may reach the transport");
}

#[tokio::test]
async fn test_broadcast_reaches_every_match() {
    let transport = Arc::new(LocalTransport::new());
    let interactions = Arc::new(MemoryInteractions::new());
    insert_match(&interactions, 1, 2).await;
    insert_match(&interactions, 3, 1).await;
    let fanout = fanout_over(transport.clone(), interactions);

    fanout
        .broadcast_status_change(UserId(1), PresenceStatus::Online)
        .await
        .unwrap();

    for partner in [UserId(2), UserId(3)] {
        let events = transport.sent_to(&user_channel(partner)).await;
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event, "status-change");
        assert!(events[0].payload.contains("online"));
    }
}

#[tokio::test]
async fn test_broadcast_skips_blocked_matches() {
    let transport = Arc::new(LocalTransport::new());
    let interactions = Arc::new(MemoryInteractions::new());
    insert_match(&interactions, 1, 2).await;
    insert_match(&interactions, 1, 3).await;
    interactions
        .insert(Interaction::new(UserId(3), UserId(1), InteractionKind::Block, 1))
        .await
        .unwrap();
    let fanout = fanout_over(transport.clone(), interactions);

    fanout
        .broadcast_status_change(UserId(1), PresenceStatus::Offline)
        .await
        .unwrap();

    assert_eq!(transport.sent_to(&user_channel(UserId(2))).await.len(), 1);
    assert!(transport.sent_to(&user_channel(UserId(3))).await.is_empty());
}

/// Transport that refuses publishes to one channel, for partial-failure tests
struct FlakyTransport {
    inner: LocalTransport,
    dead_channel: String,
}

#[async_trait]
impl RealtimeTransport for FlakyTransport {
    async fn publish(&self, channel: &str, event: &str, payload: &str)
        -> Result<(), TransportError> {
        if channel == self.dead_channel {
            return Err(TransportError::Backend("connection reset".to_string()));
        }
        self.inner.publish(channel, event, payload).await
    }

    async fn authorize_subscription(
        &self,
        connection_id: &str,
        channel: &str,
        identity_claims: &str,
    ) -> Result<String, TransportError> {
        self.inner
            .authorize_subscription(connection_id, channel, identity_claims)
            .await
    }
}

#[tokio::test]
async fn test_one_failed_publish_does_not_abort_broadcast() {
    let flaky = Arc::new(FlakyTransport {
        inner: LocalTransport::new(),
        dead_channel: user_channel(UserId(2)),
    });
    let interactions = Arc::new(MemoryInteractions::new());
    insert_match(&interactions, 1, 2).await;
    insert_match(&interactions, 1, 3).await;
    insert_match(&interactions, 1, 4).await;
    let fanout = fanout_over(flaky.clone(), interactions);

    // The dead recipient must not take down delivery to the others
    fanout
        .broadcast_status_change(UserId(1), PresenceStatus::Online)
        .await
        .unwrap();

    assert!(flaky.inner.sent_to(&user_channel(UserId(2))).await.is_empty());
    assert_eq!(flaky.inner.sent_to(&user_channel(UserId(3))).await.len(), 1);
    assert_eq!(flaky.inner.sent_to(&user_channel(UserId(4))).await.len(), 1);
}

#[tokio::test]
async fn test_request_status_fans_out() {
    let transport = Arc::new(LocalTransport::new());
    let interactions = Arc::new(MemoryInteractions::new());
    insert_match(&interactions, 1, 2).await;
    insert_match(&interactions, 1, 3).await;
    let fanout = fanout_over(transport.clone(), interactions);

    fanout.request_status(UserId(1)).await.unwrap();

    for partner in [UserId(2), UserId(3)] {
        let events = transport.sent_to(&user_channel(partner)).await;
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event, "status-request");
    }
}

#[tokio::test]
async fn test_authenticate_own_channel_only() {
    let transport = Arc::new(LocalTransport::new());
    let interactions = Arc::new(MemoryInteractions::new());
    let fanout = fanout_over(transport, interactions);

    let token = fanout
        .authenticate_channel(UserId(1), "conn-1", &user_channel(UserId(1)))
        .await
        .unwrap();
    assert!(!token.is_empty());

    let foreign = fanout
        .authenticate_channel(UserId(1), "conn-1", &user_channel(UserId(2)))
        .await;
    assert!(matches!(foreign, Err(RealtimeError::Forbidden(_))));
}
