use super::{life::*, response::*, tags::*, weight::*};

use {
    chrono::*,
    serde_json::Value,
    std::{
        sync::{atomic::*, *},
        time::{Duration, Instant},
    },
};

/// Common reference type for [CachedEntry].
pub type CachedEntryRef = Arc<CachedEntry>;

//
// CachedValue
//

/// Cached value.
#[derive(Clone, Debug)]
pub enum CachedValue {
    /// Serialized function result.
    Data(Value),

    /// Page response.
    Response(CachedResponse),
}

impl CacheWeight for CachedValue {
    fn cache_weight(&self) -> usize {
        match self {
            Self::Data(value) => value.cache_weight(),
            Self::Response(response) => response.cache_weight(),
        }
    }
}

//
// CachedEntry
//

/// Cache entry.
#[derive(Debug)]
pub struct CachedEntry {
    /// Value.
    pub value: CachedValue,

    /// Life.
    pub life: CacheLife,

    /// Tags.
    pub tags: Tags,

    /// When the value was computed.
    pub created: Instant,

    /// When the value was computed (wall clock).
    pub timestamp: DateTime<Utc>,

    revalidation_requested: AtomicBool,
}

impl CachedEntry {
    /// Constructor.
    pub fn new(value: CachedValue, life: CacheLife, tags: Tags) -> Self {
        Self::new_at(value, life, tags, Instant::now(), Utc::now())
    }

    /// Constructor with explicit creation time.
    pub fn new_at(
        value: CachedValue,
        life: CacheLife,
        tags: Tags,
        created: Instant,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            value,
            life,
            tags,
            created,
            timestamp,
            revalidation_requested: AtomicBool::new(false),
        }
    }

    /// Age.
    pub fn age(&self) -> Duration {
        self.created.elapsed()
    }

    /// Freshness now.
    pub fn freshness(&self) -> Freshness {
        self.freshness_at(Instant::now())
    }

    /// Freshness at an instant.
    ///
    /// Once revalidation was requested we are at best [Stale](Freshness::Stale).
    pub fn freshness_at(&self, now: Instant) -> Freshness {
        let freshness = self.life.freshness(now.saturating_duration_since(self.created));
        if freshness == Freshness::Fresh && self.revalidation_requested.load(Ordering::Acquire) {
            Freshness::Stale
        } else {
            freshness
        }
    }

    /// Mark as stale.
    pub fn request_revalidation(&self) {
        self.revalidation_requested.store(true, Ordering::Release);
    }

    /// Whether revalidation was requested.
    pub fn revalidation_requested(&self) -> bool {
        self.revalidation_requested.load(Ordering::Acquire)
    }
}

impl CacheWeight for CachedEntry {
    fn cache_weight(&self) -> usize {
        const SELF_SIZE: usize = size_of::<CachedEntry>();
        SELF_SIZE + self.value.cache_weight() + self.tags.cache_weight()
    }
}

#[cfg(test)]
mod tests {
    use {super::*, serde_json::json};

    fn entry(age: Duration) -> CachedEntry {
        let now = Instant::now();
        CachedEntry::new_at(
            CachedValue::Data(json!(1)),
            CacheLife::from_secs(10, 20, 60),
            Tags::default(),
            now.checked_sub(age).unwrap_or(now),
            Utc::now(),
        )
    }

    #[test]
    fn freshness_follows_age() {
        assert_eq!(entry(Duration::ZERO).freshness(), Freshness::Fresh);
        assert_eq!(entry(Duration::from_secs(15)).freshness(), Freshness::Stale);
        assert_eq!(entry(Duration::from_secs(45)).freshness(), Freshness::Stale);
        assert_eq!(entry(Duration::from_secs(61)).freshness(), Freshness::Expired);
    }

    #[test]
    fn revalidation_request_makes_fresh_entry_stale() {
        let entry = entry(Duration::ZERO);
        entry.request_revalidation();
        assert!(entry.revalidation_requested());
        assert_eq!(entry.freshness(), Freshness::Stale);
    }
}
