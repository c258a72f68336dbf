use super::{
    super::super::{cache::*, entry::*, error::*, key::*, tags::*},
    builder::*,
    index::*,
};

use moka::notification::*;

//
// MokaCacheImplementation
//

/// Moka cache implementation.
///
/// Moka handles storage, expiry, and capacity. We add a [TagIndex] on the side, which is kept in
/// sync via the eviction listener.
#[derive(Clone)]
pub struct MokaCacheImplementation {
    entries: moka::future::Cache<CacheKey, CachedEntryRef>,
    index: TagIndex,
}

impl MokaCacheImplementation {
    /// Constructor.
    ///
    /// The builder should already have been configured with
    /// [for_cache_entries](ForCacheEntries::for_cache_entries).
    pub fn new(builder: MokaCacheBuilder) -> Self {
        let index = TagIndex::default();

        let listener_index = index.clone();
        let entries = builder
            .eviction_listener(move |key, entry: CachedEntryRef, cause| {
                tracing::debug!("evict ({:?}): {}", cause, key);
                // The replacement has already been indexed
                if !matches!(cause, RemovalCause::Replaced) {
                    listener_index.remove(&key, &entry.tags);
                }
            })
            .build();

        Self { entries, index }
    }

    /// Constructor with a maximum capacity (in total entry weight).
    pub fn with_capacity(name: &str, max_capacity: u64) -> Self {
        Self::new(
            moka::future::Cache::builder()
                .name(name)
                .for_cache_entries()
                .max_capacity(max_capacity),
        )
    }

    /// Number of entries.
    ///
    /// Note that this is an approximation, as Moka applies some operations lazily.
    pub fn entry_count(&self) -> u64 {
        self.entries.entry_count()
    }

    /// Apply pending maintenance (expiry, eviction notifications).
    pub async fn run_pending_tasks(&self) {
        self.entries.run_pending_tasks().await
    }

    /// Tag index.
    pub fn index(&self) -> &TagIndex {
        &self.index
    }
}

impl Cache for MokaCacheImplementation {
    async fn get(&self, key: &CacheKey) -> Option<CachedEntryRef> {
        self.entries.get(key).await
    }

    async fn put(&self, key: CacheKey, entry: CachedEntryRef) {
        self.index.add(&key, &entry.tags);
        self.entries.insert(key, entry).await
    }

    async fn invalidate(&self, key: &CacheKey) {
        self.entries.invalidate(key).await
    }

    async fn invalidate_all(&self) {
        self.entries.invalidate_all();
        self.index.clear();
    }

    async fn revalidate_tag(&self, tag: &str, mode: RevalidateMode) -> Result<usize, CacheError> {
        validate_tag(tag)?;

        let mut count = 0;
        for key in self.index.keys(tag) {
            match self.entries.get(&key).await {
                Some(entry) if entry.tags.contains(tag) => {
                    match mode {
                        RevalidateMode::Max => entry.request_revalidation(),
                        RevalidateMode::Expire => self.entries.invalidate(&key).await,
                    }
                    count += 1;
                }

                _ => self.index.forget(tag, &key),
            }
        }

        tracing::info!("revalidated tag {:?} ({}): {} entries", tag, mode, count);
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::{super::super::super::life::*, *};

    use {serde_json::json, std::sync::*};

    fn entry(tags: &[&str]) -> CachedEntryRef {
        Arc::new(CachedEntry::new(
            CachedValue::Data(json!({"hello": "world"})),
            CacheLife::HOURS,
            tags.iter().copied().collect(),
        ))
    }

    fn key(name: &str) -> CacheKey {
        CacheKey::function("test", vec![name.into()])
    }

    #[tokio::test]
    async fn put_and_get() {
        let cache = MokaCacheImplementation::with_capacity("test", 1024 * 1024);
        cache.put(key("a"), entry(&[])).await;
        assert!(cache.get(&key("a")).await.is_some());
        assert!(cache.get(&key("b")).await.is_none());

        cache.invalidate(&key("a")).await;
        assert!(cache.get(&key("a")).await.is_none());
    }

    #[tokio::test]
    async fn revalidate_max_marks_only_tagged_entries() {
        let cache = MokaCacheImplementation::with_capacity("test", 1024 * 1024);
        cache.put(key("user"), entry(&["user-123", "all-data"])).await;
        cache.put(key("product"), entry(&["product-456", "all-data"])).await;

        let count = cache
            .revalidate_tag("user-123", RevalidateMode::Max)
            .await
            .expect("revalidate");
        assert_eq!(count, 1);

        let user = cache.get(&key("user")).await.expect("user");
        assert!(user.revalidation_requested());
        assert_eq!(user.freshness(), Freshness::Stale);

        let product = cache.get(&key("product")).await.expect("product");
        assert_eq!(product.freshness(), Freshness::Fresh);
    }

    #[tokio::test]
    async fn revalidate_expire_removes_entries() {
        let cache = MokaCacheImplementation::with_capacity("test", 1024 * 1024);
        cache.put(key("user"), entry(&["user-123", "all-data"])).await;
        cache.put(key("product"), entry(&["product-456", "all-data"])).await;

        let count = cache
            .revalidate_tag("all-data", RevalidateMode::Expire)
            .await
            .expect("revalidate");
        assert_eq!(count, 2);
        assert!(cache.get(&key("user")).await.is_none());
        assert!(cache.get(&key("product")).await.is_none());
    }

    #[tokio::test]
    async fn replaced_entries_keep_only_current_tags() {
        let cache = MokaCacheImplementation::with_capacity("test", 1024 * 1024);
        cache.put(key("a"), entry(&["old"])).await;
        cache.put(key("a"), entry(&["new"])).await;
        cache.run_pending_tasks().await;

        let old = cache.revalidate_tag("old", RevalidateMode::Max).await;
        assert_eq!(old.expect("revalidate"), 0);
        let new = cache.revalidate_tag("new", RevalidateMode::Max).await;
        assert_eq!(new.expect("revalidate"), 1);
    }

    #[tokio::test]
    async fn unknown_tag_is_not_an_error() {
        let cache = MokaCacheImplementation::with_capacity("test", 1024 * 1024);
        let count = cache.revalidate_tag("nothing", RevalidateMode::Max).await;
        assert_eq!(count.expect("revalidate"), 0);
    }

    #[tokio::test]
    async fn invalid_tag_is_an_error() {
        let cache = MokaCacheImplementation::with_capacity("test", 1024 * 1024);
        assert!(cache.revalidate_tag("", RevalidateMode::Max).await.is_err());
        assert!(cache.revalidate_tag(&"x".repeat(300), RevalidateMode::Max).await.is_err());
    }
}
