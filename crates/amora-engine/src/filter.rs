//! Candidate discovery
//!
//! Combines the directory's hard-filtered candidate list with the exclusion
//! sets derived from the interaction store and the soft compatibility
//! predicates (shared interest, known location, distance radius).

use crate::config::FilterConfig;
use crate::error::EngineError;
use amora_domain::geo::haversine_km;
use amora_domain::traits::{InteractionQuery, InteractionStore, ProfileDirectory};
use amora_domain::{CandidateQuery, InteractionKind, Profile, UserId};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

/// A candidate surviving all filters
#[derive(Debug, Clone, PartialEq)]
pub struct PotentialMatch {
    /// The candidate's profile
    pub profile: Profile,

    /// Great-circle distance to the requesting user, in kilometers
    pub distance_km: f64,

    /// Whether this candidate already likes the requesting user
    ///
    /// Lets the caller give "liked you" treatment without revealing the
    /// like as a match.
    pub liked_me: bool,
}

/// Candidate filter over the profile directory and interaction store
pub struct CandidateFilter {
    directory: Arc<dyn ProfileDirectory>,
    interactions: Arc<dyn InteractionStore>,
    config: FilterConfig,
}

impl CandidateFilter {
    /// Create a filter over the given collaborators
    pub fn new(
        directory: Arc<dyn ProfileDirectory>,
        interactions: Arc<dyn InteractionStore>,
        config: FilterConfig,
    ) -> Self {
        Self {
            directory,
            interactions,
            config,
        }
    }

    /// Compute the potential-match set for a user
    ///
    /// Fails with `PreconditionFailed` when the user has no stored location:
    /// candidates cannot be ranked by distance without one. Output order is
    /// unspecified.
    pub async fn potential_matches(
        &self,
        user: UserId,
    ) -> Result<Vec<PotentialMatch>, EngineError> {
        let profile = self
            .directory
            .get_user(user)
            .await?
            .ok_or_else(|| EngineError::NotFound(format!("user {}", user)))?;
        let Some(origin) = profile.location else {
            return Err(EngineError::PreconditionFailed(format!(
                "user {} has no location on file",
                user
            )));
        };

        let candidates = self
            .directory
            .candidates(&CandidateQuery::from_profile(&profile))
            .await?;
        let excluded = self.exclusion_set(user).await?;
        let liked_me = self.likers_of(user).await?;

        let survivors: Vec<PotentialMatch> = candidates
            .into_iter()
            .filter(|candidate| !excluded.contains(&candidate.id))
            .filter(|candidate| candidate.shares_interest_with(&profile))
            .filter_map(|candidate| {
                let location = candidate.location?;
                let distance_km = haversine_km(origin, location);
                (distance_km <= self.config.match_radius_km).then(|| PotentialMatch {
                    liked_me: liked_me.contains(&candidate.id),
                    profile: candidate,
                    distance_km,
                })
            })
            .collect();

        debug!(%user, count = survivors.len(), "potential matches computed");
        Ok(survivors)
    }

    /// Ids excluded from discovery: anyone on either end of the user's given
    /// likes, and anyone sharing a block with the user in either direction
    async fn exclusion_set(&self, user: UserId) -> Result<HashSet<UserId>, EngineError> {
        let likes_given = self
            .interactions
            .find(&InteractionQuery::of_kind(InteractionKind::Like).by(user))
            .await?;
        let blocks = self
            .interactions
            .find(&InteractionQuery::of_kind(InteractionKind::Block).involving(user))
            .await?;

        Ok(likes_given
            .iter()
            .chain(blocks.iter())
            .flat_map(|edge| [edge.actor, edge.target])
            .filter(|id| *id != user)
            .collect())
    }

    /// Ids of users who already like `user`
    async fn likers_of(&self, user: UserId) -> Result<HashSet<UserId>, EngineError> {
        let likes_received = self
            .interactions
            .find(&InteractionQuery::of_kind(InteractionKind::Like).towards(user))
            .await?;
        Ok(likes_received.iter().map(|edge| edge.actor).collect())
    }
}
