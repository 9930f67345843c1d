//! Connection registry
//!
//! Tracks which client connections are live per user. This replaces the
//! ambient global connection map pattern: the registry is an explicit value
//! owned by whoever accepts connections, passed where it is needed.

use amora_domain::UserId;
use std::collections::{HashMap, HashSet};
use tokio::sync::RwLock;
use tracing::debug;

/// Live client connections, keyed by user
#[derive(Default)]
pub struct ConnectionRegistry {
    connections: RwLock<HashMap<UserId, HashSet<String>>>,
}

impl ConnectionRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new connection for a user
    ///
    /// Returns `true` when this is the user's first live connection, i.e.
    /// the user just came online and a presence broadcast is due.
    pub async fn connect(&self, user: UserId, connection_id: &str) -> bool {
        let mut connections = self.connections.write().await;
        let entry = connections.entry(user).or_default();
        let was_offline = entry.is_empty();
        entry.insert(connection_id.to_string());
        debug!(%user, connection_id, "connection registered");
        was_offline
    }

    /// Remove a connection for a user
    ///
    /// Returns `true` when it was the user's last live connection, i.e. the
    /// user just went offline.
    pub async fn disconnect(&self, user: UserId, connection_id: &str) -> bool {
        let mut connections = self.connections.write().await;
        let Some(entry) = connections.get_mut(&user) else {
            return false;
        };
        let removed = entry.remove(connection_id);
        let now_offline = removed && entry.is_empty();
        if entry.is_empty() {
            connections.remove(&user);
        }
        debug!(%user, connection_id, "connection removed");
        now_offline
    }

    /// Whether the user has at least one live connection
    pub async fn is_online(&self, user: UserId) -> bool {
        self.connections
            .read()
            .await
            .get(&user)
            .is_some_and(|set| !set.is_empty())
    }

    /// Total live connections across all users
    pub async fn connection_count(&self) -> usize {
        self.connections.read().await.values().map(HashSet::len).sum()
    }
}
