//! User identifiers and pair normalization

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a user
///
/// The external profile store issues numeric ids; the core only moves them
/// around, so a thin newtype is enough.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct UserId(pub u64);

impl UserId {
    /// Get the raw numeric value
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for UserId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// Normalize an unordered user pair to `(min, max)`
///
/// Match rows are symmetric in effect and pair-level serialization needs a
/// single key per pair regardless of which side acts first.
pub fn pair_key(a: UserId, b: UserId) -> (UserId, UserId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
