use super::{super::key::*, configuration::*, hooks::*};

use {
    axum::body::*,
    chrono::{DateTime, Utc},
    http::{header::*, *},
};

//
// CacheableRequest
//

/// Cacheable request.
pub trait CacheableRequest {
    /// May call `cacheable_by_request` hook.
    fn should_skip_cache<CacheT>(
        &self,
        configuration: &MiddlewareCachingConfiguration<CacheT>,
    ) -> bool;

    /// May call `cache_key` hook.
    fn cache_key_with_hook<CacheT>(
        &self,
        configuration: &MiddlewareCachingConfiguration<CacheT>,
    ) -> CacheKey;

    /// Whether a response last modified at `timestamp` is newer than the client's
    /// `If-Modified-Since`.
    ///
    /// True if the client didn't send `If-Modified-Since` (or it can't be parsed).
    fn modified_since(&self, timestamp: &DateTime<Utc>) -> bool;

    /// A new request with the same method, URI, and headers, but no body and no conditionals.
    fn replay(&self) -> Request<Body>;
}

impl CacheableRequest for Request<Body> {
    fn should_skip_cache<CacheT>(
        &self,
        configuration: &MiddlewareCachingConfiguration<CacheT>,
    ) -> bool {
        let mut skip_cache = if configuration.cache.is_some() {
            let method = self.method();
            if (method == Method::GET) || (method == Method::HEAD) {
                false
            } else {
                tracing::debug!("skip (method {})", method);
                true
            }
        } else {
            tracing::debug!("skip (disabled)");
            true
        };

        if !skip_cache
            && let Some(cacheable) = &configuration.cacheable_by_request
            && !cacheable(CacheableHookContext::new(self.uri(), self.headers()))
        {
            tracing::debug!("skip (cacheable_by_request=false)");
            skip_cache = true;
        }

        skip_cache
    }

    fn cache_key_with_hook<CacheT>(
        &self,
        configuration: &MiddlewareCachingConfiguration<CacheT>,
    ) -> CacheKey {
        let mut cache_key = CacheKey::for_request(self.method(), self.uri());

        if let Some(cache_key_hook) = &configuration.cache_key {
            cache_key_hook(CacheKeyHookContext::new(&mut cache_key, self));
        }

        cache_key
    }

    fn modified_since(&self, timestamp: &DateTime<Utc>) -> bool {
        let if_modified_since = self
            .headers()
            .get(IF_MODIFIED_SINCE)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| DateTime::parse_from_rfc2822(value).ok());

        match if_modified_since {
            // HTTP dates have a resolution of one second
            Some(if_modified_since) => timestamp.timestamp() > if_modified_since.timestamp(),
            None => true,
        }
    }

    fn replay(&self) -> Request<Body> {
        let mut request = Request::new(Body::empty());
        *request.method_mut() = self.method().clone();
        *request.uri_mut() = self.uri().clone();
        *request.version_mut() = self.version();
        *request.headers_mut() = self.headers().clone();
        request.headers_mut().remove(IF_MODIFIED_SINCE);
        request.headers_mut().remove(IF_NONE_MATCH);
        request
    }
}
