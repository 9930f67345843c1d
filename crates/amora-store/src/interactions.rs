//! In-memory interaction store

use amora_domain::traits::{InteractionQuery, InteractionStore};
use amora_domain::{Interaction, StoreError};
use async_trait::async_trait;
use tokio::sync::RwLock;

/// In-memory implementation of [`InteractionStore`]
///
/// A plain append log scanned by predicate. Row counts in this system stay
/// small per pair, and the engine's queries are all predicate-shaped, so no
/// indexing is needed here.
#[derive(Default)]
pub struct MemoryInteractions {
    rows: RwLock<Vec<Interaction>>,
}

impl MemoryInteractions {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Total row count, seen by tests
    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    /// Whether the store holds no rows
    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }
}

#[async_trait]
impl InteractionStore for MemoryInteractions {
    async fn insert(&self, interaction: Interaction) -> Result<Interaction, StoreError> {
        self.rows.write().await.push(interaction.clone());
        Ok(interaction)
    }

    async fn find(&self, query: &InteractionQuery) -> Result<Vec<Interaction>, StoreError> {
        let rows = self.rows.read().await;
        Ok(rows.iter().filter(|row| query.matches(row)).cloned().collect())
    }

    async fn delete(&self, query: &InteractionQuery) -> Result<usize, StoreError> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|row| !query.matches(row));
        Ok(before - rows.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use amora_domain::{InteractionKind, UserId};

    #[tokio::test]
    async fn test_find_by_predicate() {
        let store = MemoryInteractions::new();
        store
            .insert(Interaction::new(UserId(1), UserId(2), InteractionKind::Like, 0))
            .await
            .unwrap();
        store
            .insert(Interaction::new(UserId(2), UserId(1), InteractionKind::Like, 1))
            .await
            .unwrap();
        store
            .insert(Interaction::new(UserId(1), UserId(3), InteractionKind::Block, 2))
            .await
            .unwrap();

        let likes_by_1 = store
            .find(&InteractionQuery::of_kind(InteractionKind::Like).by(UserId(1)))
            .await
            .unwrap();
        assert_eq!(likes_by_1.len(), 1);

        let touching_1 = store
            .find(&InteractionQuery::default().involving(UserId(1)))
            .await
            .unwrap();
        assert_eq!(touching_1.len(), 3);
    }

    #[tokio::test]
    async fn test_delete_returns_removed_count() {
        let store = MemoryInteractions::new();
        store
            .insert(Interaction::new(UserId(1), UserId(2), InteractionKind::Like, 0))
            .await
            .unwrap();
        store
            .insert(Interaction::new(UserId(2), UserId(1), InteractionKind::Like, 1))
            .await
            .unwrap();

        let removed = store
            .delete(&InteractionQuery::of_kind(InteractionKind::Like).between(UserId(1), UserId(2)))
            .await
            .unwrap();
        assert_eq!(removed, 2);
        assert!(store.is_empty().await);
    }
}
