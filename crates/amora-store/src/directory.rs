//! In-memory profile directory

use amora_domain::traits::ProfileDirectory;
use amora_domain::{CandidateQuery, Profile, StoreError, UserId};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// In-memory implementation of [`ProfileDirectory`]
///
/// Applies the hard candidate pre-filter itself, the way an external
/// directory would before shipping a candidate list over the wire.
#[derive(Default)]
pub struct MemoryDirectory {
    profiles: RwLock<HashMap<UserId, Profile>>,
}

impl MemoryDirectory {
    /// Create an empty directory
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a profile
    pub async fn upsert(&self, profile: Profile) {
        self.profiles.write().await.insert(profile.id, profile);
    }
}

#[async_trait]
impl ProfileDirectory for MemoryDirectory {
    async fn get_user(&self, id: UserId) -> Result<Option<Profile>, StoreError> {
        Ok(self.profiles.read().await.get(&id).cloned())
    }

    async fn candidates(&self, query: &CandidateQuery) -> Result<Vec<Profile>, StoreError> {
        let profiles = self.profiles.read().await;
        Ok(profiles
            .values()
            .filter(|candidate| query.admits(candidate))
            .cloned()
            .collect())
    }

    async fn adjust_reputation(&self, id: UserId, delta: i32) -> Result<Profile, StoreError> {
        let mut profiles = self.profiles.write().await;
        let profile = profiles
            .get_mut(&id)
            .ok_or_else(|| StoreError::NotFound(format!("user {}", id)))?;
        profile.fame_rating += delta;
        Ok(profile.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use amora_domain::{Gender, LookingFor};

    fn profile(id: u64) -> Profile {
        Profile {
            id: UserId(id),
            display_name: format!("user-{}", id),
            gender: Gender::Other,
            looking_for: LookingFor::Any,
            interests: vec![],
            location: None,
            age: 25,
            age_min: 18,
            age_max: 99,
            fame_rating: 0,
            min_desired_rating: 0,
            profile_complete: true,
        }
    }

    #[tokio::test]
    async fn test_adjust_reputation_accumulates() {
        let dir = MemoryDirectory::new();
        dir.upsert(profile(1)).await;

        dir.adjust_reputation(UserId(1), 10).await.unwrap();
        let updated = dir.adjust_reputation(UserId(1), -15).await.unwrap();
        assert_eq!(updated.fame_rating, -5);
    }

    #[tokio::test]
    async fn test_adjust_reputation_missing_user() {
        let dir = MemoryDirectory::new();
        let result = dir.adjust_reputation(UserId(7), 10).await;
        assert!(matches!(result, Err(StoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_candidates_never_include_requester() {
        let dir = MemoryDirectory::new();
        dir.upsert(profile(1)).await;
        dir.upsert(profile(2)).await;

        let query = CandidateQuery::from_profile(&profile(1));
        let found = dir.candidates(&query).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, UserId(2));
    }
}
