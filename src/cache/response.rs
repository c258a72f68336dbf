use super::weight::*;

use {
    axum::body::*,
    http::{header::*, *},
};

//
// CachedResponse
//

/// Cached HTTP response.
///
/// The body is stored whole; we do not cache partial or streaming responses.
#[derive(Clone, Debug)]
pub struct CachedResponse {
    /// Status.
    pub status: StatusCode,

    /// Headers.
    pub headers: HeaderMap,

    /// Body.
    pub body: Bytes,
}

impl CachedResponse {
    /// Constructor.
    pub fn new(status: StatusCode, headers: HeaderMap, body: Bytes) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// To a [Response].
    ///
    /// `Content-Length` is set from the body unless the upstream already set it. (A response to
    /// `HEAD` has an empty body but keeps the `Content-Length` of the `GET`.)
    pub fn to_response(&self) -> Response<Body> {
        let mut response = Response::new(Body::from(self.body.clone()));
        *response.status_mut() = self.status;
        *response.headers_mut() = self.headers.clone();
        response
            .headers_mut()
            .entry(CONTENT_LENGTH)
            .or_insert_with(|| HeaderValue::from(self.body.len()));
        response
    }
}

impl CacheWeight for CachedResponse {
    fn cache_weight(&self) -> usize {
        const SELF_SIZE: usize = size_of::<CachedResponse>();

        let mut size = SELF_SIZE + self.body.len();
        for (name, value) in &self.headers {
            size += name.as_str().len() + value.len();
        }

        size
    }
}
