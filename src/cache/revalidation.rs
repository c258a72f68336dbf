use super::key::*;

use {
    parking_lot::Mutex,
    std::{collections::*, sync::Arc},
};

//
// RevalidationSet
//

/// Keys with a background recomputation in flight.
///
/// Used to make sure there is at most one background recomputation per key.
#[derive(Clone, Debug, Default)]
pub struct RevalidationSet {
    keys: Arc<Mutex<HashSet<CacheKey>>>,
}

impl RevalidationSet {
    /// Claim a key.
    ///
    /// Returns [None] if the key is already claimed. The key is released when the guard is
    /// dropped.
    pub fn claim(&self, key: &CacheKey) -> Option<RevalidationGuard> {
        if self.keys.lock().insert(key.clone()) {
            Some(RevalidationGuard {
                keys: self.keys.clone(),
                key: key.clone(),
            })
        } else {
            None
        }
    }

    /// Whether a key is claimed.
    pub fn is_claimed(&self, key: &CacheKey) -> bool {
        self.keys.lock().contains(key)
    }
}

//
// RevalidationGuard
//

/// Releases its key from the [RevalidationSet] when dropped.
#[derive(Debug)]
pub struct RevalidationGuard {
    keys: Arc<Mutex<HashSet<CacheKey>>>,
    key: CacheKey,
}

impl Drop for RevalidationGuard {
    fn drop(&mut self) {
        self.keys.lock().remove(&self.key);
    }
}
