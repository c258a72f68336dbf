use super::{
    super::super::{entry::*, key::*},
    expiry::*,
    weigher::*,
};

/// Moka cache builder for our entries.
pub type MokaCacheBuilder = moka::future::CacheBuilder<
    CacheKey,
    CachedEntryRef,
    moka::future::Cache<CacheKey, CachedEntryRef>,
>;

//
// ForCacheEntries
//

/// Add support for [CachedEntry] weigher and [Expiry](moka::Expiry).
pub trait ForCacheEntries
where
    Self: Sized,
{
    /// Add support for [CachedEntry] weigher and [Expiry](moka::Expiry).
    fn for_cache_entries(self) -> Self;
}

impl ForCacheEntries for MokaCacheBuilder {
    fn for_cache_entries(self) -> Self {
        self.weigher(weigher).expire_after(CachedEntryExpiry)
    }
}
