use super::super::{life::*, tags::*};

use {
    axum::response::{IntoResponse, Response},
    http::header::*,
    kutil::http::*,
};

/// Response header with the cache life: a preset name or a `"<stale>, <revalidate>, <expire>"`
/// triple.
pub const XX_CACHE_LIFE: HeaderName = HeaderName::from_static("xx-cache-life");

/// Response header with comma-separated cache tags.
pub const XX_CACHE_TAGS: HeaderName = HeaderName::from_static("xx-cache-tags");

/// Response header telling the client how the response was obtained.
pub const X_CACHE: HeaderName = HeaderName::from_static("x-cache");

/// Remove the headers that control the caching middleware. They never leave it.
pub fn remove_control_headers(headers: &mut HeaderMap) {
    headers.remove(XX_CACHE);
    headers.remove(XX_CACHE_LIFE);
    headers.remove(XX_CACHE_TAGS);
}

/// Header value for a cache life.
pub fn cache_life_header_value(life: &CacheLife) -> String {
    match life.preset_name() {
        Some(preset) => preset.into(),
        None => {
            let expire = life
                .expire
                .map(|expire| format!("{}ms", expire.as_millis()))
                .unwrap_or_else(|| "never".into());
            format!("{}ms, {}ms, {}", life.stale.as_millis(), life.revalidate.as_millis(), expire)
        }
    }
}

//
// CacheHeaders
//

/// Caching control for handler responses.
///
/// These set headers that are read (and removed) by the
/// [CachingLayer](crate::CachingLayer).
pub trait CacheHeaders<IntoResponseT>
where
    Self: Sized,
    IntoResponseT: IntoResponse,
{
    /// Set `XX-Cache` header to "false".
    fn do_not_cache(self) -> Response;

    /// Set `XX-Cache-Life` header.
    fn with_cache_life(self, life: &CacheLife) -> Response;

    /// Set `XX-Cache-Tags` header.
    fn with_cache_tags(self, tags: &Tags) -> Response;
}

impl<IntoResponseT> CacheHeaders<IntoResponseT> for IntoResponseT
where
    IntoResponseT: IntoResponse,
{
    fn do_not_cache(self) -> Response {
        let mut response = self.into_response();
        response.headers_mut().set_bool_value(XX_CACHE, false);
        response
    }

    fn with_cache_life(self, life: &CacheLife) -> Response {
        let mut response = self.into_response();
        match HeaderValue::from_str(&cache_life_header_value(life)) {
            Ok(value) => {
                response.headers_mut().insert(XX_CACHE_LIFE, value);
            }

            Err(error) => tracing::error!("cache life in HTTP header: {}", error),
        }
        response
    }

    fn with_cache_tags(self, tags: &Tags) -> Response {
        let mut response = self.into_response();
        if !tags.is_empty() {
            match HeaderValue::from_str(&tags.to_list()) {
                Ok(value) => {
                    response.headers_mut().insert(XX_CACHE_TAGS, value);
                }

                Err(error) => tracing::error!("cache tags in HTTP header: {}", error),
            }
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header<'own>(headers: &'own HeaderMap, name: &HeaderName) -> Option<&'own str> {
        headers.get(name).and_then(|value| value.to_str().ok())
    }

    #[test]
    fn life_header_round_trip_for_custom_lives() {
        let life = CacheLife::from_secs(300, 600, 3600);
        let value = cache_life_header_value(&life);
        assert_eq!(value, "300000ms, 600000ms, 3600000ms");
        assert_eq!(value.parse::<CacheLife>().expect("parse"), life);
        assert_eq!(cache_life_header_value(&CacheLife::HOURS), "hours");
    }

    #[test]
    fn handler_headers() {
        let tags: Tags = ["a", "b"].into_iter().collect();
        let response = "hello".with_cache_life(&CacheLife::DAYS).with_cache_tags(&tags);
        assert_eq!(header(response.headers(), &XX_CACHE_LIFE), Some("days"));
        assert_eq!(header(response.headers(), &XX_CACHE_TAGS), Some("a,b"));

        let mut headers = response.headers().clone();
        remove_control_headers(&mut headers);
        assert!(headers.get(XX_CACHE_LIFE).is_none());
        assert!(headers.get(XX_CACHE_TAGS).is_none());
    }
}
