//! Pair-level serialization
//!
//! Concurrent like/unlike calls on the same two users would otherwise
//! interleave their read-modify-write sequences (duplicate match creation,
//! lost unlike). Each unordered pair maps to one keyed mutex so those
//! sequences serialize per pair while distinct pairs stay independent.

use amora_domain::{pair_key, UserId};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Keyed mutex map over unordered user pairs
#[derive(Default)]
pub(crate) struct PairLocks {
    locks: Mutex<HashMap<(UserId, UserId), Arc<Mutex<()>>>>,
}

impl PairLocks {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Acquire the lock for the unordered pair `(a, b)`
    ///
    /// The guard must be held across the whole persist/reciprocity/notify
    /// sequence of one operation. Idle entries (no guard or waiter holds a
    /// clone of the Arc, so the map owns the only reference) are swept out
    /// here, keeping the map proportional to in-flight pairs.
    pub(crate) async fn acquire(&self, a: UserId, b: UserId) -> OwnedMutexGuard<()> {
        let lock = {
            let mut map = self.locks.lock().await;
            map.retain(|_, lock| Arc::strong_count(lock) > 1);
            map.entry(pair_key(a, b))
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone()
        };
        lock.lock_owned().await
    }

    /// Number of pairs currently tracked
    #[cfg(test)]
    pub(crate) async fn pair_count(&self) -> usize {
        self.locks.lock().await.len()
    }
}
