//! The profile slice the core reads
//!
//! Full profiles (pictures, biography, location history) live with the
//! external profile store; the engine only needs the fields that drive
//! matching, filtering, and reputation.

use crate::geo::GeoPoint;
use crate::user::UserId;
use serde::{Deserialize, Serialize};

/// Declared gender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    /// Male
    Male,
    /// Female
    Female,
    /// Any other self-description
    Other,
}

/// Orientation preference: which genders a user wants to see
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LookingFor {
    /// Interested in men
    Men,
    /// Interested in women
    Women,
    /// No gender restriction
    Any,
}

impl LookingFor {
    /// Whether this preference accepts the given gender
    pub fn accepts(&self, gender: Gender) -> bool {
        match self {
            Self::Men => gender == Gender::Male,
            Self::Women => gender == Gender::Female,
            Self::Any => true,
        }
    }
}

/// The fields of a user profile the engine reads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// User id
    pub id: UserId,

    /// Name interpolated into notification messages
    pub display_name: String,

    /// Declared gender
    pub gender: Gender,

    /// Orientation preference
    pub looking_for: LookingFor,

    /// Declared interests (tags)
    pub interests: Vec<String>,

    /// Last known location, if the user shared one
    pub location: Option<GeoPoint>,

    /// Age in years
    pub age: u8,

    /// Youngest age the user wants to see
    pub age_min: u8,

    /// Oldest age the user wants to see
    pub age_max: u8,

    /// Reputation score, adjusted by social actions
    pub fame_rating: i32,

    /// Minimum fame rating the user wants candidates to have
    pub min_desired_rating: i32,

    /// Whether the profile passed the completeness checklist
    pub profile_complete: bool,
}

impl Profile {
    /// Whether this profile shares at least one interest with `other`
    pub fn shares_interest_with(&self, other: &Profile) -> bool {
        self.interests
            .iter()
            .any(|tag| other.interests.iter().any(|t| t == tag))
    }
}

/// Hard pre-filter criteria handed to the profile directory
///
/// Everything here is evaluated server-side by the directory before the
/// candidate list ever reaches the engine; the soft filters (interests,
/// distance, exclusion sets) are the engine's job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateQuery {
    /// The requesting user, always excluded from results
    pub for_user: UserId,

    /// Requesting user's gender (candidates must accept it)
    pub gender: Gender,

    /// Requesting user's preference (must accept the candidate's gender)
    pub looking_for: LookingFor,

    /// Requesting user's age (must fall inside the candidate's range)
    pub age: u8,

    /// Requesting user's fame rating (must satisfy the candidate's minimum)
    pub rating: i32,

    /// Minimum fame rating the requesting user will accept
    pub min_desired_rating: i32,
}

impl CandidateQuery {
    /// Build the query from the requesting user's profile
    pub fn from_profile(profile: &Profile) -> Self {
        Self {
            for_user: profile.id,
            gender: profile.gender,
            looking_for: profile.looking_for,
            age: profile.age,
            rating: profile.fame_rating,
            min_desired_rating: profile.min_desired_rating,
        }
    }

    /// Whether a candidate passes the hard pre-filter
    pub fn admits(&self, candidate: &Profile) -> bool {
        candidate.id != self.for_user
            && candidate.profile_complete
            && candidate.looking_for.accepts(self.gender)
            && self.looking_for.accepts(candidate.gender)
            && (candidate.age_min..=candidate.age_max).contains(&self.age)
            && candidate.min_desired_rating <= self.rating
            && candidate.fame_rating >= self.min_desired_rating
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(id: u64) -> Profile {
        Profile {
            id: UserId(id),
            display_name: format!("user-{}", id),
            gender: Gender::Female,
            looking_for: LookingFor::Any,
            interests: vec!["music".to_string()],
            location: None,
            age: 30,
            age_min: 18,
            age_max: 99,
            fame_rating: 50,
            min_desired_rating: 0,
            profile_complete: true,
        }
    }

    #[test]
    fn test_looking_for_accepts() {
        assert!(LookingFor::Men.accepts(Gender::Male));
        assert!(!LookingFor::Men.accepts(Gender::Female));
        assert!(LookingFor::Any.accepts(Gender::Other));
    }

    #[test]
    fn test_shared_interests() {
        let a = profile(1);
        let mut b = profile(2);
        assert!(a.shares_interest_with(&b));
        b.interests = vec!["chess".to_string()];
        assert!(!a.shares_interest_with(&b));
    }

    #[test]
    fn test_candidate_query_excludes_self_and_incomplete() {
        let me = profile(1);
        let query = CandidateQuery::from_profile(&me);
        assert!(!query.admits(&me));

        let mut other = profile(2);
        assert!(query.admits(&other));
        other.profile_complete = false;
        assert!(!query.admits(&other));
    }

    #[test]
    fn test_candidate_query_age_bracket() {
        let me = profile(1);
        let query = CandidateQuery::from_profile(&me);

        let mut other = profile(2);
        other.age_min = 18;
        other.age_max = 25;
        // The requesting user is 30, outside the candidate's declared range
        assert!(!query.admits(&other));
    }

    #[test]
    fn test_candidate_query_rating_floors() {
        let mut me = profile(1);
        me.min_desired_rating = 60;
        let query = CandidateQuery::from_profile(&me);

        let other = profile(2); // rating 50 < 60
        assert!(!query.admits(&other));
    }
}
