use std::collections::HashMap;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use content_flow_backend::{request_context::PageOutcome, routes, AppConfig, AppState};
use serde_json::json;
use tower::ServiceExt;
use wiremock::{
    matchers::{method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

fn config_for(server: &MockServer) -> AppConfig {
    let vars: HashMap<&str, String> = HashMap::from([
        ("CONTENT_API_BASE", server.uri()),
        ("SEOBOT_API_KEY", "integration-key".to_string()),
        ("SITE_BASE_URL", "https://site.test".to_string()),
    ]);
    AppConfig::from_lookup(|key| vars.get(key).cloned()).expect("config")
}

fn app_for(server: &MockServer) -> Router {
    let state = AppState::new(&config_for(server)).expect("state");
    routes::create_router(state)
}

async fn get(app: Router, uri: &str) -> (StatusCode, axum::http::HeaderMap, String) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).expect("request"))
        .await
        .expect("response");
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
    (status, headers, String::from_utf8_lossy(&bytes).into_owned())
}

async fn outcome_of(app: Router, request: Request<Body>) -> (StatusCode, Option<PageOutcome>) {
    let response = app.oneshot(request).await.expect("response");
    (response.status(), response.extensions().get::<PageOutcome>().cloned())
}

fn article_json(slug: &str) -> serde_json::Value {
    json!({
        "id": format!("id-{slug}"),
        "slug": slug,
        "headline": format!("About {slug}"),
        "metaDescription": "desc",
        "html": "<p>trusted body</p>",
        "image": "https://img.test/hero.png",
        "tags": [{ "slug": "go", "title": "Go" }],
        "createdAt": "2024-01-02T00:00:00Z",
        "relatedPosts": []
    })
}

#[tokio::test]
async fn listing_renders_requested_window() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/articles"))
        .and(query_param("key", "integration-key"))
        .and(query_param("page", "1"))
        .and(query_param("limit", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "total": 25, "articles": [article_json("alpha")] }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (status, headers, body) = get(app_for(&server), "/blog?page=2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers.get(header::CACHE_CONTROL).expect("cache header"), "no-store");
    assert!(body.contains("2 / 3"));
    assert!(body.contains(r#"href="/blog/alpha""#));
    assert!(body.contains("Published 2 Jan 2024"));
}

#[tokio::test]
async fn junk_page_parameter_falls_back_to_first_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/articles"))
        .and(query_param("page", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "total": 3, "articles": [] }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (status, _, body) = get(app_for(&server), "/blog?page=-7").await;
    assert_eq!(status, StatusCode::OK);
    assert!(!body.contains("class=\"pagination\""));
}

#[tokio::test]
async fn detail_renders_metadata_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/article"))
        .and(query_param("slug", "alpha"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": article_json("alpha") })))
        .expect(2)
        .mount(&server)
        .await;

    let (status, _, body) = get(app_for(&server), "/blog/alpha").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<title>About alpha</title>"));
    assert!(body.contains(r#"<meta property="og:url" content="https://site.test/blog/alpha" />"#));
    assert!(body.contains("<p>trusted body</p>"));
    assert!(!body.contains("Related posts"));
}

#[tokio::test]
async fn unknown_slug_is_plain_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/article"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": null })))
        .mount(&server)
        .await;

    let (status, _, body) = get(app_for(&server), "/blog/missing-slug").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("This page could not be found"));
}

#[tokio::test]
async fn not_found_response_records_the_missing_slug() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/article"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": null })))
        .mount(&server)
        .await;

    let request = Request::builder()
        .uri("/blog/missing-slug")
        .header("x-request-id", "edge-42")
        .body(Body::empty())
        .expect("request");
    let response = app_for(&server).oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(response.headers().get("x-request-id").expect("echoed id"), "edge-42");
    assert_eq!(
        response.extensions().get::<PageOutcome>(),
        Some(&PageOutcome::MissingArticle {
            slug: "missing-slug".to_string()
        })
    );

    let unrouted = Request::builder().uri("/nowhere").body(Body::empty()).expect("request");
    let (status, outcome) = outcome_of(app_for(&server), unrouted).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(outcome, None);
}

#[tokio::test]
async fn error_response_records_the_requested_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let request = Request::builder().uri("/blog?page=3").body(Body::empty()).expect("request");
    let (status, outcome) = outcome_of(app_for(&server), request).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        outcome,
        Some(PageOutcome::Failed {
            page: "blog listing",
            target: Some("3".to_string())
        })
    );

    let request = Request::builder().uri("/blog/alpha").body(Body::empty()).expect("request");
    let (_, outcome) = outcome_of(app_for(&server), request).await;
    assert_eq!(
        outcome,
        Some(PageOutcome::Failed {
            page: "blog article",
            target: Some("alpha".to_string())
        })
    );
}

#[tokio::test]
async fn upstream_outage_is_generic_error_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let (status, _, body) = get(app_for(&server), "/blog").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.contains("Something went wrong"));
    assert!(!body.contains("503"));
}

#[tokio::test]
async fn sitemap_and_robots_are_served() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/articles"))
        .and(query_param("page", "0"))
        .and(query_param("limit", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "total": 40, "articles": [article_json("alpha"), article_json("_meta")] }
        })))
        .mount(&server)
        .await;

    let app = app_for(&server);
    let (status, headers, xml) = get(app.clone(), "/sitemap.xml").await;
    assert_eq!(status, StatusCode::OK);
    assert!(headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .starts_with("application/xml"));
    assert!(xml.contains("<loc>https://site.test/docs</loc>"));
    assert!(xml.contains("<loc>https://site.test/blog/alpha</loc>"));
    assert!(!xml.contains("_meta"));

    let (status, _, robots) = get(app, "/robots.txt").await;
    assert_eq!(status, StatusCode::OK);
    assert!(robots.contains("Sitemap: https://site.test/sitemap.xml"));
}

#[tokio::test]
async fn root_redirects_to_docs() {
    let server = MockServer::start().await;
    let (status, headers, _) = get(app_for(&server), "/").await;
    assert_eq!(status, StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(headers.get(header::LOCATION).expect("location"), "/docs");
}

#[test]
fn state_without_api_key_fails_fast() {
    let config = AppConfig::from_lookup(|_| None).expect("config");
    assert!(AppState::new(&config).is_err());
}
