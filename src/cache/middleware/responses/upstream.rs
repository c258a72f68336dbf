use super::super::{
    super::{hooks::*, life::*, tags::*},
    configuration::*,
    headers::*,
    hooks::*,
};

use {
    http::{header::*, *},
    kutil::http::*,
};

//
// UpstreamResponse
//

/// Upstream response.
pub trait UpstreamResponse {
    /// Check if we should skip the cache.
    ///
    /// Also returns the value of `Content-Length` if available.
    ///
    /// If the response passes all our checks then we turn to the hook to give it one last chance
    /// to skip the cache.
    fn should_skip_cache<CacheT>(
        &self,
        uri: &Uri,
        configuration: &MiddlewareCachingConfiguration<CacheT>,
    ) -> (bool, Option<usize>);

    /// The cache life and tags the response asks for.
    ///
    /// The life comes from the `XX-Cache-Life` header, else from the `cache_life` hook, else from
    /// the configured default. [None] if there is no life, in which case the response must not be
    /// cached.
    fn cache_directives<CacheT>(
        &self,
        uri: &Uri,
        configuration: &MiddlewareCachingConfiguration<CacheT>,
    ) -> Option<(CacheLife, Tags)>;
}

impl<ResponseBodyT> UpstreamResponse for Response<ResponseBodyT> {
    fn should_skip_cache<CacheT>(
        &self,
        uri: &Uri,
        configuration: &MiddlewareCachingConfiguration<CacheT>,
    ) -> (bool, Option<usize>) {
        let headers = self.headers();
        let status = self.status();

        let mut skip_cache = if !headers.xx_cache(true) {
            tracing::debug!("skip ({}=false)", XX_CACHE);
            (true, None)
        } else if !status.is_success() {
            tracing::debug!("skip (status={})", status.as_u16());
            (true, None)
        } else if headers.contains_key(CONTENT_RANGE) {
            tracing::debug!("skip (range)");
            (true, None)
        } else {
            match headers.content_length() {
                Some(content_length) => {
                    if content_length > configuration.inner.max_body_size {
                        tracing::debug!("skip (Content-Length too big)");
                        (true, Some(content_length))
                    } else {
                        (false, Some(content_length))
                    }
                }

                None => (false, None),
            }
        };

        if !skip_cache.0
            && let Some(cacheable) = &configuration.cacheable_by_response
            && !cacheable(CacheableHookContext::new(uri, headers))
        {
            tracing::debug!("skip (cacheable_by_response=false)");
            skip_cache.0 = true;
        }

        skip_cache
    }

    fn cache_directives<CacheT>(
        &self,
        uri: &Uri,
        configuration: &MiddlewareCachingConfiguration<CacheT>,
    ) -> Option<(CacheLife, Tags)> {
        let headers = self.headers();

        let life = match headers.get(XX_CACHE_LIFE).map(|value| value.to_str()) {
            Some(Ok(value)) => match value.parse::<CacheLife>() {
                Ok(life) => Some(life),
                Err(error) => {
                    tracing::warn!("ignoring {}: {}", XX_CACHE_LIFE, error);
                    None
                }
            },

            Some(Err(error)) => {
                tracing::warn!("ignoring {}: {}", XX_CACHE_LIFE, error);
                None
            }

            None => configuration
                .inner
                .cache_life
                .as_ref()
                .and_then(|cache_life| cache_life(CacheLifeHookContext::new(uri, headers)))
                .or(configuration.inner.default_life),
        };

        let Some(life) = life else {
            tracing::debug!("skip (no cache life)");
            return None;
        };

        let tags = headers
            .get(XX_CACHE_TAGS)
            .and_then(|value| value.to_str().ok())
            .map(Tags::parse_list)
            .unwrap_or_default();

        Some((life, tags))
    }
}
