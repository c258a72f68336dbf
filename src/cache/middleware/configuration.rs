use super::{super::configuration::*, hooks::*};

//
// MiddlewareCachingConfiguration
//

/// Middleware caching configuration.
pub struct MiddlewareCachingConfiguration<CacheT> {
    /// Cache.
    pub cache: Option<CacheT>,

    /// Cacheable by request (hook).
    pub cacheable_by_request: Option<CacheableHook>,

    /// Cacheable by response (hook).
    pub cacheable_by_response: Option<CacheableHook>,

    /// Cache key (hook).
    pub cache_key: Option<CacheKeyHook>,

    /// Inner configuration.
    pub inner: CachingConfiguration,
}

impl<CacheT> Default for MiddlewareCachingConfiguration<CacheT> {
    fn default() -> Self {
        Self {
            cache: None,
            cacheable_by_request: None,
            cacheable_by_response: None,
            cache_key: None,
            inner: CachingConfiguration::default(),
        }
    }
}

impl<CacheT> Clone for MiddlewareCachingConfiguration<CacheT>
where
    CacheT: Clone,
{
    fn clone(&self) -> Self {
        Self {
            cache: self.cache.clone(),
            cacheable_by_request: self.cacheable_by_request.clone(),
            cacheable_by_response: self.cacheable_by_response.clone(),
            cache_key: self.cache_key.clone(),
            inner: self.inner.clone(),
        }
    }
}
