mod common;

use {common::*, http::*};

#[tokio::test]
async fn missing_tag_is_bad_request() {
    let router = app(UNUSED_API);

    let (status, headers, body) = post_uri(&router, "/api/revalidate").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json_body(&body)["error"], "Missing 'tag' query parameter");
    assert!(header(&headers, "x-cache").is_none());

    let (status, _, body) = post_uri(&router, "/api/revalidate?tag=").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json_body(&body)["error"].is_string());
}

#[tokio::test]
async fn revalidate_tag() {
    let router = app(UNUSED_API);

    let (status, _, body) = post_uri(&router, "/api/revalidate?tag=foo").await;
    assert_eq!(status, StatusCode::OK);

    let body = json_body(&body);
    assert_eq!(body["success"], true);
    assert!(body["message"].as_str().expect("message").contains("foo"));
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn first_tag_wins() {
    let router = app(UNUSED_API);

    let (status, _, body) = post_uri(&router, "/api/revalidate?tag=a&tag=b").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_body(&body)["message"], "Revalidated tag: a");

    let (status, _, body) = post_uri(&router, "/api/revalidate?tag=&tag=b").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json_body(&body)["error"], "Missing 'tag' query parameter");
}

#[tokio::test]
async fn malformed_query_is_still_json() {
    let router = app(UNUSED_API);

    let (status, _, body) = post_uri(&router, "/api/revalidate?tag=%FF%FE&profile=%C0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json_body(&body)["error"].is_string());
}

#[tokio::test]
async fn profiles() {
    let router = app(UNUSED_API);

    let (status, _, _) = post_uri(&router, "/api/revalidate?tag=foo&profile=expire").await;
    assert_eq!(status, StatusCode::OK);

    let (status, _, body) = post_uri(&router, "/api/revalidate?tag=foo&profile=sometimes").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json_body(&body)["error"].is_string());
}

#[tokio::test]
async fn failure_to_revalidate() {
    let router = app(UNUSED_API);

    let uri = format!("/api/revalidate?tag={}", "x".repeat(300));
    let (status, _, body) = post_uri(&router, &uri).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let body = json_body(&body);
    assert_eq!(body["error"], "Failed to revalidate");
    assert!(body["details"].as_str().expect("details").contains("invalid tag"));
}

#[tokio::test]
async fn usage() {
    let router = app(UNUSED_API);

    let (status, _, body) = get_uri(&router, "/api/revalidate").await;
    assert_eq!(status, StatusCode::OK);

    let body = json_body(&body);
    assert_eq!(body["usage"]["method"], "POST");
    assert_eq!(body["usage"]["url"], "/api/revalidate?tag=<cache-tag>");
    assert!(body["availableTags"].as_array().is_some_and(|tags| !tags.is_empty()));
}
