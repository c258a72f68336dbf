use super::life::*;

use {http::*, std::sync::*};

/// Hook to get a response's cache life.
pub type CacheLifeHook = Arc<Box<dyn Fn(CacheLifeHookContext) -> Option<CacheLife> + Send + Sync>>;

//
// CacheLifeHookContext
//

/// Context for [CacheLifeHook].
pub struct CacheLifeHookContext<'this> {
    /// URI.
    pub uri: &'this Uri,

    /// Headers.
    pub headers: &'this HeaderMap,
}

impl<'this> CacheLifeHookContext<'this> {
    /// Constructor.
    pub fn new(uri: &'this Uri, headers: &'this HeaderMap) -> Self {
        Self { uri, headers }
    }
}
