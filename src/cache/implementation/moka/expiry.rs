use super::super::super::{entry::*, key::*};

use {duration_str::HumanFormat, moka::*, std::time::*};

//
// CachedEntryExpiry
//

/// Moka [Expiry] for [CachedEntry].
///
/// Entries are kept for their [CacheLife::lifetime](super::super::super::CacheLife::lifetime),
/// counted from when their value was computed rather than from when they were stored. Lives
/// without an expiration are kept until evicted for capacity.
pub struct CachedEntryExpiry;

impl CachedEntryExpiry {
    fn remaining(entry: &CachedEntryRef) -> Option<Duration> {
        entry
            .life
            .lifetime()
            .map(|lifetime| lifetime.saturating_sub(entry.age()))
    }

    fn log(action: &str, cache_key: &CacheKey, remaining: Option<Duration>) {
        match remaining {
            Some(remaining) => {
                tracing::debug!("{} {} for {}", action, cache_key, remaining.human_format())
            }
            None => tracing::debug!("{} {} forever", action, cache_key),
        }
    }
}

impl Expiry<CacheKey, CachedEntryRef> for CachedEntryExpiry {
    fn expire_after_create(
        &self,
        cache_key: &CacheKey,
        entry: &CachedEntryRef,
        _created_at: Instant,
    ) -> Option<Duration> {
        let remaining = Self::remaining(entry);
        Self::log("storing", cache_key, remaining);
        remaining
    }

    fn expire_after_update(
        &self,
        cache_key: &CacheKey,
        entry: &CachedEntryRef,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        let remaining = Self::remaining(entry);
        Self::log("updating", cache_key, remaining);
        remaining
    }
}

#[cfg(test)]
mod tests {
    use {
        super::{super::super::super::life::*, *},
        serde_json::json,
        std::sync::*,
    };

    fn entry(life: CacheLife) -> CachedEntryRef {
        Arc::new(CachedEntry::new(CachedValue::Data(json!(1)), life, Default::default()))
    }

    #[test]
    fn kept_until_expire() {
        let remaining = CachedEntryExpiry::remaining(&entry(CacheLife::HOURS)).expect("remaining");
        assert!(remaining > Duration::from_secs(23 * 60 * 60));
        assert!(remaining <= Duration::from_secs(24 * 60 * 60));

        assert_eq!(CachedEntryExpiry::remaining(&entry(CacheLife::DEFAULT)), None);
        assert_eq!(CachedEntryExpiry::remaining(&entry(CacheLife::MAX)), None);
    }
}
