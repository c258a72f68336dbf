use super::super::key::*;

use {axum::body::*, http::*, std::sync::*};

/// Hook to check if a request or a response is cacheable.
pub type CacheableHook = Arc<Box<dyn Fn(CacheableHookContext) -> bool + Send + Sync>>;

/// Hook to update a request's cache key.
pub type CacheKeyHook = Arc<Box<dyn Fn(CacheKeyHookContext) + Send + Sync>>;

//
// CacheableHookContext
//

/// Context for [CacheableHook].
#[derive(Clone, Debug)]
pub struct CacheableHookContext<'this> {
    /// URI.
    pub uri: &'this Uri,

    /// Headers.
    pub headers: &'this HeaderMap,
}

impl<'this> CacheableHookContext<'this> {
    /// Constructor.
    pub fn new(uri: &'this Uri, headers: &'this HeaderMap) -> Self {
        Self { uri, headers }
    }
}

//
// CacheKeyHookContext
//

/// Context for [CacheKeyHook].
#[derive(Debug)]
pub struct CacheKeyHookContext<'this> {
    /// Cache key.
    pub cache_key: &'this mut CacheKey,

    /// Request.
    pub request: &'this Request<Body>,
}

impl<'this> CacheKeyHookContext<'this> {
    /// Constructor.
    pub fn new(cache_key: &'this mut CacheKey, request: &'this Request<Body>) -> Self {
        Self { cache_key, request }
    }
}
