use {
    axum::{Router, body::*, extract::State, response::Response, routing::*},
    cocktail_cache::{
        cache::{implementation::moka::*, middleware::*, *},
        *,
    },
    http::*,
    std::{
        sync::{atomic::*, *},
        time::Duration,
    },
    tower::*,
};

type Counter = Arc<AtomicUsize>;

fn cache() -> MokaCacheImplementation {
    MokaCacheImplementation::with_capacity("test", 1024 * 1024)
}

// The first response goes stale quickly, later ones last for hours.
async fn quickly_stale(State(counter): State<Counter>) -> Response {
    let count = counter.fetch_add(1, Ordering::SeqCst) + 1;
    let life = if count == 1 {
        "200ms, 30s, never".parse::<CacheLife>().expect("life")
    } else {
        CacheLife::HOURS
    };
    format!("version {}", count).with_cache_life(&life)
}

async fn tagged(State(counter): State<Counter>) -> Response {
    let count = counter.fetch_add(1, Ordering::SeqCst) + 1;
    let tags: Tags = ["page"].into_iter().collect();
    format!("version {}", count)
        .with_cache_life(&CacheLife::HOURS)
        .with_cache_tags(&tags)
}

async fn big(State(counter): State<Counter>) -> Response {
    counter.fetch_add(1, Ordering::SeqCst);
    "this body is too big to cache".with_cache_life(&CacheLife::HOURS)
}

async fn opted_out(State(counter): State<Counter>) -> Response {
    counter.fetch_add(1, Ordering::SeqCst);
    "hello".with_cache_life(&CacheLife::HOURS).do_not_cache()
}

async fn plain(State(counter): State<Counter>) -> String {
    counter.fetch_add(1, Ordering::SeqCst);
    "hello".into()
}

fn router(cache: MokaCacheImplementation, counter: Counter) -> Router {
    Router::default()
        .route("/stale", get(quickly_stale))
        .route("/tagged", get(tagged))
        .route("/big", get(big))
        .route("/opted-out", get(opted_out))
        .route("/plain", get(plain))
        .with_state(counter)
        .layer(CachingLayer::new().cache(cache).max_cacheable_body_size(16))
}

async fn get_uri(router: &Router, uri: &str) -> (Option<String>, String) {
    let request = Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request");
    let response = router.clone().oneshot(request).await.expect("oneshot");
    let (parts, body) = response.into_parts();
    let bytes = to_bytes(body, usize::MAX).await.expect("body");
    let x_cache = parts
        .headers
        .get(X_CACHE)
        .and_then(|value| value.to_str().ok())
        .map(String::from);
    assert!(parts.headers.get(XX_CACHE_LIFE).is_none());
    assert!(parts.headers.get(XX_CACHE_TAGS).is_none());
    (x_cache, String::from_utf8_lossy(&bytes).into_owned())
}

// Wait for a background revalidation to store a new version.
async fn wait_for_hit(router: &Router, uri: &str) -> String {
    for _ in 0..200 {
        if let (Some(x_cache), body) = get_uri(router, uri).await
            && x_cache == "HIT"
        {
            return body;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("no HIT for {}", uri);
}

#[tokio::test]
async fn stale_while_revalidate() {
    let counter = Counter::default();
    let router = router(cache(), counter.clone());

    assert_eq!(get_uri(&router, "/stale").await, (Some("MISS".into()), "version 1".into()));
    assert_eq!(get_uri(&router, "/stale").await, (Some("HIT".into()), "version 1".into()));

    tokio::time::sleep(Duration::from_millis(300)).await;

    assert_eq!(get_uri(&router, "/stale").await, (Some("STALE".into()), "version 1".into()));
    assert_eq!(wait_for_hit(&router, "/stale").await, "version 2");
    assert_eq!(counter.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn revalidate_tagged_page() {
    let cache = cache();
    let counter = Counter::default();
    let router = router(cache.clone(), counter.clone());

    assert_eq!(get_uri(&router, "/tagged").await, (Some("MISS".into()), "version 1".into()));

    assert_eq!(cache.revalidate_tag("page", RevalidateMode::Max).await.expect("revalidate"), 1);
    assert_eq!(get_uri(&router, "/tagged").await, (Some("STALE".into()), "version 1".into()));
    assert_eq!(wait_for_hit(&router, "/tagged").await, "version 2");

    let count = cache.revalidate_tag("page", RevalidateMode::Expire).await;
    assert_eq!(count.expect("revalidate"), 1);
    assert_eq!(get_uri(&router, "/tagged").await, (Some("MISS".into()), "version 3".into()));

    let count = cache.revalidate_tag("nothing", RevalidateMode::Expire).await;
    assert_eq!(count.expect("revalidate"), 0);
}

#[tokio::test]
async fn big_body_is_not_cached() {
    let counter = Counter::default();
    let router = router(cache(), counter.clone());

    for _ in 0..2 {
        let (x_cache, body) = get_uri(&router, "/big").await;
        assert_eq!(x_cache, None);
        assert_eq!(body, "this body is too big to cache");
    }
    assert_eq!(counter.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn opt_out() {
    let counter = Counter::default();
    let router = router(cache(), counter.clone());

    for _ in 0..2 {
        assert_eq!(get_uri(&router, "/opted-out").await, (None, "hello".into()));
    }
    assert_eq!(counter.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn no_life_no_cache() {
    let counter = Counter::default();
    let router = router(cache(), counter.clone());

    for _ in 0..2 {
        assert_eq!(get_uri(&router, "/plain").await, (None, "hello".into()));
    }
    assert_eq!(counter.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn no_cache_configured() {
    let counter = Counter::default();
    let router = Router::default()
        .route("/tagged", get(tagged))
        .with_state(counter.clone())
        .layer(CachingLayer::<MokaCacheImplementation>::new());

    for expected in ["version 1", "version 2"] {
        assert_eq!(get_uri(&router, "/tagged").await, (None, expected.into()));
    }
}

async fn get_with_header(
    router: &Router,
    uri: &str,
    name: HeaderName,
    value: &'static str,
) -> Option<String> {
    let request = Request::builder()
        .uri(uri)
        .header(name, value)
        .body(Body::empty())
        .expect("request");
    let response = router.clone().oneshot(request).await.expect("oneshot");
    response
        .headers()
        .get(X_CACHE)
        .and_then(|value| value.to_str().ok())
        .map(String::from)
}

#[tokio::test]
async fn hooks() {
    let counter = Counter::default();
    let router = Router::default()
        .route("/plain", get(plain))
        .route("/other", get(plain))
        .with_state(counter.clone())
        .layer(
            CachingLayer::new()
                .cache(cache())
                .cache_life(|context| {
                    (context.uri.path() == "/plain").then_some(CacheLife::MINUTES)
                })
                .cacheable_by_request(|context| {
                    !context.headers.contains_key(header::AUTHORIZATION)
                })
                .cacheable_by_response(|context| context.uri.query() != Some("nocache"))
                .cache_key(|context| {
                    if let Some(language) = context
                        .request
                        .headers()
                        .get(header::ACCEPT_LANGUAGE)
                        .and_then(|value| value.to_str().ok())
                    {
                        *context.cache_key = context.cache_key.clone().with_scope(language);
                    }
                }),
        );

    // cache_life
    assert_eq!(get_uri(&router, "/plain").await.0.as_deref(), Some("MISS"));
    assert_eq!(get_uri(&router, "/plain").await.0.as_deref(), Some("HIT"));
    assert_eq!(get_uri(&router, "/other").await.0, None);

    // cacheable_by_request
    assert_eq!(get_with_header(&router, "/plain", header::AUTHORIZATION, "secret").await, None);

    // cacheable_by_response
    assert_eq!(get_uri(&router, "/plain?nocache").await.0, None);
    assert_eq!(get_uri(&router, "/plain?nocache").await.0, None);

    // cache_key
    for expected in ["MISS", "HIT"] {
        let x_cache = get_with_header(&router, "/plain", header::ACCEPT_LANGUAGE, "fr").await;
        assert_eq!(x_cache.as_deref(), Some(expected));
    }
}

#[tokio::test]
async fn default_life() {
    let counter = Counter::default();
    let router = Router::default()
        .route("/plain", get(plain))
        .with_state(counter.clone())
        .layer(CachingLayer::new().cache(cache()).default_life(CacheLife::SECONDS));

    assert_eq!(get_uri(&router, "/plain").await, (Some("MISS".into()), "hello".into()));
    assert_eq!(get_uri(&router, "/plain").await, (Some("HIT".into()), "hello".into()));
    assert_eq!(counter.load(Ordering::SeqCst), 1);
}
