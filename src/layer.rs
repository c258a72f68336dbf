use super::{
    cache::{middleware::*, *},
    service::*,
};

use {std::sync::*, tower::*};

//
// CachingLayer
//

/// HTTP page caching layer with stale-while-revalidate.
///
/// This layer configures and installs a [CachingService].
///
/// Usage notes
/// ===========
///
/// 1. Caching is "opt-in" per response. A handler asks for its response to be cached by setting
///    the `XX-Cache-Life` header to a preset name (e.g. "hours") or to a
///    `"<stale>, <revalidate>, <expire>"` triple (e.g. "5m, 10m, 1h" or "5m, 10m, never"). See
///    [CacheHeaders::with_cache_life]. Alternatively, provide a [default_life](Self::default_life)
///    or a [cache_life](Self::cache_life) hook.
///
/// 2. Responses can be tagged via the `XX-Cache-Tags` header (comma-separated). Tagged pages are
///    revalidated by [Cache::revalidate_tag] together with tagged function results.
///
/// 3. Set `XX-Cache` to "false" to skip caching.
///
/// 4. All these control headers are removed before sending the response downstream.
///
/// Request handling
/// ================
///
/// 1. A request arrives. Only `GET` and `HEAD` are cacheable, after which the
///    [cacheable_by_request](Self::cacheable_by_request) hook has one last chance to skip
///    caching.
///
/// 2. If we have a fresh cached response we send it with `X-Cache: HIT`. If the client sent
///    `If-Modified-Since` and the entry is not newer, we send a 304 (Not Modified) instead.
///
/// 3. If we have a stale cached response we send it with `X-Cache: STALE` and replay the request
///    against the inner service in the background. At most one replay per cache key is in
///    flight. If the replay fails (or is not cacheable) the stale entry is kept.
///
/// 4. Otherwise we call the inner service. If the response is cacheable (success status, no
///    `Content-Range`, body not larger than
///    [max_cacheable_body_size](Self::max_cacheable_body_size), and a cache life) we store it and
///    send it with `X-Cache: MISS`.
pub struct CachingLayer<CacheT> {
    caching: MiddlewareCachingConfiguration<CacheT>,
    revalidations: RevalidationSet,
}

impl<CacheT> CachingLayer<CacheT>
where
    CacheT: Cache,
{
    /// Constructor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable cache.
    ///
    /// Not enabled by default.
    pub fn cache(mut self, cache: CacheT) -> Self {
        self.caching.cache = Some(cache);
        self
    }

    /// Maximum size in bytes of response bodies to cache.
    ///
    /// The default is 1 MiB.
    pub fn max_cacheable_body_size(mut self, max_cacheable_body_size: usize) -> Self {
        self.caching.inner.max_body_size = max_cacheable_body_size;
        self
    }

    /// Life for responses that do not have an `XX-Cache-Life` header (and for which the
    /// [cache_life](Self::cache_life) hook returns [None]).
    ///
    /// [None] by default, meaning such responses are not cached.
    pub fn default_life(mut self, default_life: CacheLife) -> Self {
        self.caching.inner.default_life = Some(default_life);
        self
    }

    /// Provide a hook to get a response's cache life.
    ///
    /// Will only be called if an `XX-Cache-Life` response header is *not* provided.
    ///
    /// Note that the headers are *response* headers.
    ///
    /// [None] by default.
    pub fn cache_life(
        mut self,
        cache_life: impl Fn(CacheLifeHookContext) -> Option<CacheLife> + 'static + Send + Sync,
    ) -> Self {
        self.caching.inner.cache_life = Some(Arc::new(Box::new(cache_life)));
        self
    }

    /// Provide a hook to test whether a request is cacheable.
    ///
    /// Will only be called after all internal conditions are met, giving you one last chance to
    /// prevent caching.
    ///
    /// Note that the headers are *request* headers.
    ///
    /// [None] by default.
    pub fn cacheable_by_request(
        mut self,
        cacheable_by_request: impl Fn(CacheableHookContext) -> bool + 'static + Send + Sync,
    ) -> Self {
        self.caching.cacheable_by_request = Some(Arc::new(Box::new(cacheable_by_request)));
        self
    }

    /// Provide a hook to test whether an upstream response is cacheable.
    ///
    /// Will only be called after all internal conditions are met, giving you one last chance to
    /// prevent caching.
    ///
    /// Note that the headers are *response* headers. This hook is called *after* we get the
    /// upstream response but *before* we read its body.
    ///
    /// [None] by default.
    pub fn cacheable_by_response(
        mut self,
        cacheable_by_response: impl Fn(CacheableHookContext) -> bool + 'static + Send + Sync,
    ) -> Self {
        self.caching.cacheable_by_response = Some(Arc::new(Box::new(cacheable_by_response)));
        self
    }

    /// Provide a hook to update the cache key, e.g. to add a scope for content negotiation.
    ///
    /// [None] by default.
    pub fn cache_key(
        mut self,
        cache_key: impl Fn(CacheKeyHookContext) + 'static + Send + Sync,
    ) -> Self {
        self.caching.cache_key = Some(Arc::new(Box::new(cache_key)));
        self
    }
}

impl<CacheT> Default for CachingLayer<CacheT> {
    fn default() -> Self {
        Self {
            caching: Default::default(),
            revalidations: Default::default(),
        }
    }
}

impl<CacheT> Clone for CachingLayer<CacheT>
where
    CacheT: Clone,
{
    fn clone(&self) -> Self {
        Self {
            caching: self.caching.clone(),
            revalidations: self.revalidations.clone(),
        }
    }
}

impl<InnerServiceT, CacheT> Layer<InnerServiceT> for CachingLayer<CacheT>
where
    CacheT: Cache,
{
    type Service = CachingService<InnerServiceT, CacheT>;

    fn layer(&self, inner_service: InnerServiceT) -> Self::Service {
        CachingService::new(inner_service, self.caching.clone(), self.revalidations.clone())
    }
}
