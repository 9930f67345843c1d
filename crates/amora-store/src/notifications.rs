//! In-memory notification store

use amora_domain::traits::NotificationStore;
use amora_domain::{Notification, NotificationId, NotificationKind, StoreError, UserId};
use async_trait::async_trait;
use tokio::sync::RwLock;

/// In-memory implementation of [`NotificationStore`]
#[derive(Default)]
pub struct MemoryNotifications {
    rows: RwLock<Vec<Notification>>,
}

impl MemoryNotifications {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Every notification for a recipient, seen or not
    pub async fn all_for(&self, recipient: UserId) -> Vec<Notification> {
        let rows = self.rows.read().await;
        rows.iter()
            .filter(|n| n.recipient == recipient)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl NotificationStore for MemoryNotifications {
    async fn insert(&self, notification: Notification) -> Result<Notification, StoreError> {
        self.rows.write().await.push(notification.clone());
        Ok(notification)
    }

    async fn find_unseen(&self, recipient: UserId) -> Result<Vec<Notification>, StoreError> {
        let rows = self.rows.read().await;
        Ok(rows
            .iter()
            .filter(|n| n.recipient == recipient && !n.seen)
            .cloned()
            .collect())
    }

    async fn find_by_kind(
        &self,
        recipient: UserId,
        kind: NotificationKind,
    ) -> Result<Vec<Notification>, StoreError> {
        let rows = self.rows.read().await;
        Ok(rows
            .iter()
            .filter(|n| n.recipient == recipient && n.kind == kind)
            .cloned()
            .collect())
    }

    async fn mark_all_seen(&self, recipient: UserId) -> Result<Vec<Notification>, StoreError> {
        let mut rows = self.rows.write().await;
        let mut updated = Vec::new();
        for row in rows.iter_mut().filter(|n| n.recipient == recipient) {
            row.seen = true;
            updated.push(row.clone());
        }
        Ok(updated)
    }

    async fn delete(&self, id: NotificationId) -> Result<(), StoreError> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|n| n.id != id);
        if rows.len() == before {
            return Err(StoreError::NotFound(format!("notification {}", id)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notification(recipient: u64, kind: NotificationKind, message: &str) -> Notification {
        Notification {
            id: NotificationId::new(),
            recipient: UserId(recipient),
            concerned_user: UserId(99),
            kind,
            title: kind.title().to_string(),
            message: message.to_string(),
            seen: false,
            created_at: 0,
        }
    }

    #[tokio::test]
    async fn test_mark_all_seen_empties_unseen() {
        let store = MemoryNotifications::new();
        store
            .insert(notification(1, NotificationKind::NewLike, "a"))
            .await
            .unwrap();
        store
            .insert(notification(1, NotificationKind::NewMatch, "b"))
            .await
            .unwrap();

        let updated = store.mark_all_seen(UserId(1)).await.unwrap();
        assert_eq!(updated.len(), 2);
        assert!(updated.iter().all(|n| n.seen));
        assert!(store.find_unseen(UserId(1)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let store = MemoryNotifications::new();
        let result = store.delete(NotificationId::new()).await;
        assert!(matches!(result, Err(StoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_find_by_kind_includes_seen() {
        let store = MemoryNotifications::new();
        let mut seen = notification(1, NotificationKind::NewSeen, "viewed");
        seen.seen = true;
        store.insert(seen).await.unwrap();

        let views = store
            .find_by_kind(UserId(1), NotificationKind::NewSeen)
            .await
            .unwrap();
        assert_eq!(views.len(), 1);
    }
}
