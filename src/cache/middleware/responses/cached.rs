use super::super::{
    super::{entry::*, memo::*, response::*},
    headers::*,
};

use {
    axum::body::*,
    chrono::{DateTime, Utc},
    http::{header::*, *},
};

/// HTTP date format (RFC 9110 IMF-fixdate).
pub const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Format an HTTP date.
pub fn http_date(timestamp: &DateTime<Utc>) -> String {
    timestamp.format(HTTP_DATE_FORMAT).to_string()
}

//
// CachedEntryResponse
//

/// Serve a cached entry.
pub trait CachedEntryResponse {
    /// The cached response with the `X-Cache`, `Cache-Control`, `Last-Modified`, and `Age` headers.
    ///
    /// [None] if the entry isn't a response.
    fn to_cached_response(&self, status: CacheStatus) -> Option<Response<Body>>;

    /// A "304 Not Modified" response for the entry.
    fn to_not_modified_response(&self, status: CacheStatus) -> Response<Body>;
}

impl CachedEntryResponse for CachedEntry {
    fn to_cached_response(&self, status: CacheStatus) -> Option<Response<Body>> {
        let CachedValue::Response(cached) = &self.value else {
            return None;
        };

        let mut response = cached.to_response();
        add_cache_headers(response.headers_mut(), self, status);
        Some(response)
    }

    fn to_not_modified_response(&self, status: CacheStatus) -> Response<Body> {
        let mut response = Response::new(Body::empty());
        *response.status_mut() = StatusCode::NOT_MODIFIED;
        add_cache_headers(response.headers_mut(), self, status);
        response
    }
}

/// A freshly computed response that is about to be cached.
///
/// Gets the same headers as a cached hit.
pub fn to_fresh_response(cached: &CachedResponse, entry: &CachedEntry) -> Response<Body> {
    let mut response = cached.to_response();
    add_cache_headers(response.headers_mut(), entry, CacheStatus::Miss);
    response
}

fn add_cache_headers(headers: &mut HeaderMap, entry: &CachedEntry, status: CacheStatus) {
    remove_control_headers(headers);

    headers.insert(X_CACHE, HeaderValue::from_static(status.as_str()));

    if let Ok(cache_control) = HeaderValue::from_str(&entry.life.cache_control()) {
        headers.insert(CACHE_CONTROL, cache_control);
    }

    if let Ok(last_modified) = HeaderValue::from_str(&http_date(&entry.timestamp)) {
        headers.insert(LAST_MODIFIED, last_modified);
    }

    headers.insert(AGE, HeaderValue::from(entry.age().as_secs()));
}
