use super::cache::{middleware::*, *};

use {
    axum::body::*,
    http::{request::*, response::*, uri::*},
    kutil::std::future::*,
    std::{fmt, mem, result::Result, sync::*, task::*},
    tower::*,
};

//
// CachingService
//

/// HTTP page caching service with stale-while-revalidate.
///
/// You will often be using [CachingLayer](super::CachingLayer) rather than this service directly,
/// thus this service's functionality is documented there.
pub struct CachingService<InnerServiceT, CacheT> {
    inner_service: InnerServiceT,
    caching: MiddlewareCachingConfiguration<CacheT>,
    revalidations: RevalidationSet,
}

impl<InnerServiceT, CacheT> CachingService<InnerServiceT, CacheT>
where
    CacheT: Cache,
{
    /// Constructor.
    pub fn new(
        inner_service: InnerServiceT,
        caching: MiddlewareCachingConfiguration<CacheT>,
        revalidations: RevalidationSet,
    ) -> Self {
        Self {
            inner_service,
            caching,
            revalidations,
        }
    }

    // Clone while keeping `inner_service`.
    //
    // See: https://docs.rs/tower/latest/tower/trait.Service.html#be-careful-when-cloning-inner-services
    fn clone_and_keep_inner_service(&mut self) -> Self
    where
        InnerServiceT: Clone,
    {
        let mut clone = self.clone();
        clone.inner_service = mem::replace(&mut self.inner_service, clone.inner_service);
        clone
    }

    // Handle request.
    async fn handle(
        mut self,
        request: Request<Body>,
    ) -> Result<Response<Body>, InnerServiceT::Error>
    where
        InnerServiceT: 'static + Service<Request<Body>, Response = Response<Body>> + Clone + Send,
        InnerServiceT::Future: Send,
        InnerServiceT::Error: 'static + fmt::Display + Send,
    {
        let cache = match &self.caching.cache {
            Some(cache) if !request.should_skip_cache(&self.caching) => cache.clone(),

            _ => {
                return self.inner_service.call(request).await.map(|mut upstream_response| {
                    remove_control_headers(upstream_response.headers_mut());
                    upstream_response
                });
            }
        };

        let cache_key = request.cache_key_with_hook(&self.caching);

        if let Some(entry) = cache.get(&cache_key).await {
            let status = match entry.freshness() {
                Freshness::Fresh => Some(CacheStatus::Hit),
                Freshness::Stale => Some(CacheStatus::Stale),
                Freshness::Expired => None,
            };

            if let Some(status) = status
                && let Some(cached_response) = entry.to_cached_response(status)
            {
                if status == CacheStatus::Stale {
                    self.revalidate_in_background(cache, cache_key, request.replay());
                }

                return Ok(if request.modified_since(&entry.timestamp) {
                    tracing::debug!("{} ({})", status, request.uri());
                    cached_response
                } else {
                    tracing::debug!("{} (not modified) ({})", status, request.uri());
                    entry.to_not_modified_response(status)
                });
            }
        }

        // Capture request data before moving the request to the inner service
        let uri = request.uri().clone();

        let upstream_response = self.inner_service.call(request).await?;

        Ok(store_upstream_response(&cache, cache_key, &uri, upstream_response, &self.caching)
            .await)
    }

    // Replay the request against the inner service and store the result.
    //
    // The stale entry stays in place until the replay succeeds.
    fn revalidate_in_background(&self, cache: CacheT, cache_key: CacheKey, request: Request<Body>)
    where
        InnerServiceT: 'static + Service<Request<Body>, Response = Response<Body>> + Clone + Send,
        InnerServiceT::Future: Send,
        InnerServiceT::Error: 'static + fmt::Display + Send,
    {
        let Some(guard) = self.revalidations.claim(&cache_key) else {
            tracing::debug!("already revalidating: {}", cache_key);
            return;
        };

        let inner_service = self.inner_service.clone();
        let caching = self.caching.clone();

        tokio::spawn(async move {
            let _guard = guard;
            tracing::info!("revalidating: {}", cache_key);

            let uri = request.uri().clone();
            match inner_service.oneshot(request).await {
                Ok(upstream_response) => {
                    store_upstream_response(
                        &cache,
                        cache_key,
                        &uri,
                        upstream_response,
                        &caching,
                    )
                    .await;
                }

                Err(error) => tracing::error!(
                    "revalidation failed, keeping stale entry: {} {}",
                    cache_key,
                    error
                ),
            }
        });
    }
}

impl<InnerServiceT, CacheT> Clone for CachingService<InnerServiceT, CacheT>
where
    InnerServiceT: Clone,
    CacheT: Cache,
{
    fn clone(&self) -> Self {
        Self {
            inner_service: self.inner_service.clone(),
            caching: self.caching.clone(),
            revalidations: self.revalidations.clone(),
        }
    }
}

impl<InnerServiceT, CacheT> Service<Request<Body>> for CachingService<InnerServiceT, CacheT>
where
    InnerServiceT: 'static + Service<Request<Body>, Response = Response<Body>> + Clone + Send,
    InnerServiceT::Future: Send,
    InnerServiceT::Error: 'static + fmt::Display + Send,
    CacheT: Cache,
{
    type Response = Response<Body>;
    type Error = InnerServiceT::Error;
    type Future = CapturedFuture<Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, context: &mut Context) -> Poll<Result<(), Self::Error>> {
        self.inner_service.poll_ready(context)
    }

    fn call(&mut self, request: Request<Body>) -> Self::Future {
        let cloned_self = self.clone_and_keep_inner_service();
        capture_async! { cloned_self.handle(request).await }
    }
}

// Store the upstream response if it is cacheable.
//
// Returns the response to send downstream, which never has control headers.
async fn store_upstream_response<CacheT>(
    cache: &CacheT,
    cache_key: CacheKey,
    uri: &Uri,
    mut upstream_response: Response<Body>,
    caching: &MiddlewareCachingConfiguration<CacheT>,
) -> Response<Body>
where
    CacheT: Cache,
{
    let (skip_cache, _content_length) = upstream_response.should_skip_cache(uri, caching);
    let directives = if skip_cache {
        None
    } else {
        upstream_response.cache_directives(uri, caching)
    };

    let Some((life, tags)) = directives else {
        remove_control_headers(upstream_response.headers_mut());
        return upstream_response;
    };

    let (mut parts, body) = upstream_response.into_parts();
    remove_control_headers(&mut parts.headers);

    let bytes = match to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(error) => {
            tracing::error!("could not read upstream body: {} {}", cache_key, error);
            let mut response = Response::new(Body::empty());
            *response.status_mut() = http::StatusCode::INTERNAL_SERVER_ERROR;
            return response;
        }
    };

    if bytes.len() > caching.inner.max_body_size {
        tracing::debug!("skip (body too big): {}", cache_key);
        return Response::from_parts(parts, Body::from(bytes));
    }

    let cached_response = CachedResponse::new(parts.status, parts.headers, bytes);
    let entry = CachedEntry::new(CachedValue::Response(cached_response.clone()), life, tags);
    let response = to_fresh_response(&cached_response, &entry);

    tracing::info!("store ({}): {}", life, cache_key);
    cache.put(cache_key, Arc::new(entry)).await;

    response
}
