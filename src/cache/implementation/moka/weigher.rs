use super::super::super::{entry::*, key::*, weight::*};

/// Moka cache entry weigher.
pub fn weigher(cache_key: &CacheKey, entry: &CachedEntryRef) -> u32 {
    let weight = cache_key.cache_weight() + entry.cache_weight();
    let weight = weight.try_into().unwrap_or(u32::MAX);
    tracing::debug!("weight {} for {}", weight, cache_key);
    weight
}
