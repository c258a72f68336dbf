#![allow(dead_code)]

use {
    axum::{
        Json, Router,
        body::*,
        extract::{Query, State},
        response::{IntoResponse, Response},
        routing::*,
    },
    cocktail_cache::{app::*, *},
    http::{header::*, *},
    serde_json::{Value, json},
    std::{
        collections::*,
        sync::{atomic::*, *},
    },
    tokio::net::*,
    tower::*,
};

/// Base URL that must never be contacted.
pub const UNUSED_API: &str = "http://127.0.0.1:9";

/// App router with the cocktail API at `cocktail_api`.
pub fn app(cocktail_api: &str) -> Router {
    let configuration = Configuration {
        cocktail_api: cocktail_api.into(),
        ..Default::default()
    };
    router(AppState::new(&configuration).expect("state"))
}

/// Send a request and read the whole response.
pub async fn send(router: &Router, request: Request<Body>) -> (StatusCode, HeaderMap, String) {
    let response = router.clone().oneshot(request).await.expect("oneshot");
    let (parts, body) = response.into_parts();
    let bytes = to_bytes(body, usize::MAX).await.expect("body");
    (parts.status, parts.headers, String::from_utf8_lossy(&bytes).into_owned())
}

/// GET.
pub async fn get_uri(router: &Router, uri: &str) -> (StatusCode, HeaderMap, String) {
    send(router, request(Method::GET, uri)).await
}

/// POST.
pub async fn post_uri(router: &Router, uri: &str) -> (StatusCode, HeaderMap, String) {
    send(router, request(Method::POST, uri)).await
}

/// Request without a body.
pub fn request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

/// Parse a JSON body.
pub fn json_body(body: &str) -> Value {
    serde_json::from_str(body).expect("JSON")
}

/// Header as string.
pub fn header<'headers>(headers: &'headers HeaderMap, name: &str) -> Option<&'headers str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

//
// StubApi
//

/// A local stand-in for TheCocktailDB.
///
/// Knows the Margarita (11007). ID 500 is a server error. Everything else is not found.
pub struct StubApi {
    /// Base URL.
    pub base_url: String,

    /// Number of lookups so far.
    pub lookups: Arc<AtomicUsize>,
}

impl StubApi {
    /// Start serving.
    pub async fn start() -> Self {
        let lookups = Arc::new(AtomicUsize::new(0));

        let router = Router::new()
            .route("/lookup.php", get(lookup))
            .with_state(lookups.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let address = listener.local_addr().expect("address");
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("serve");
        });

        Self { base_url: format!("http://{}", address), lookups }
    }

    /// Number of lookups so far.
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

async fn lookup(
    State(lookups): State<Arc<AtomicUsize>>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    lookups.fetch_add(1, Ordering::SeqCst);

    match query.get("i").map(String::as_str) {
        Some("11007") => Json(json!({
            "drinks": [{
                "idDrink": "11007",
                "strDrink": "Margarita",
                "strCategory": "Ordinary Drink",
                "strAlcoholic": "Alcoholic",
                "strGlass": "Cocktail glass",
                "strInstructions": "Shake with ice.",
                "strDrinkThumb": "https://example.com/margarita.jpg",
                "strIngredient1": "Tequila",
                "strIngredient2": "Lime juice",
                "strIngredient3": null,
                "strMeasure1": " 1 1/2 oz ",
                "strMeasure2": null,
                "strMeasure3": null
            }]
        }))
        .into_response(),

        Some("500") => StatusCode::INTERNAL_SERVER_ERROR.into_response(),

        _ => Json(json!({ "drinks": null })).into_response(),
    }
}

/// Value of `If-Modified-Since` for a `Last-Modified`.
pub fn if_modified_since(uri: &str, last_modified: &str) -> Request<Body> {
    let mut request = request(Method::GET, uri);
    let value = HeaderValue::from_str(last_modified).expect("header");
    request.headers_mut().insert(IF_MODIFIED_SINCE, value);
    request
}
