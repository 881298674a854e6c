use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use tower::ServiceExt;

use murmur::api::{self, paths};
use murmur::membership::Registry;
use murmur::settings::RotationOrder;

const LOCAL: &str = "127.0.0.1:7000";

fn registry() -> Arc<Registry> {
    Arc::new(Registry::new(
        LOCAL,
        Some("127.0.0.1:7001".to_string()),
        RotationOrder::Insertion,
    ))
}

fn gossip_request(body: impl Into<Body>, content_type: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(paths::GOSSIP)
        .header(header::CONTENT_TYPE, content_type)
        .body(body.into())
        .unwrap()
}

#[tokio::test]
async fn test_gossip_merges_members() {
    let registry = registry();
    let response = api::api(registry.clone())
        .oneshot(gossip_request(
            r#"{"127.0.0.1:7001":{},"127.0.0.1:7002":{}}"#,
            "application/json",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(registry.len().unwrap(), 3);
    assert!(registry.contains("127.0.0.1:7002").unwrap());
    assert_eq!(
        registry.rotation().unwrap(),
        vec!["127.0.0.1:7001", "127.0.0.1:7002"]
    );
}

#[tokio::test]
async fn test_gossip_accepts_any_content_type() {
    let registry = registry();
    let response = api::api(registry.clone())
        .oneshot(gossip_request(r#"{"127.0.0.1:7003":{}}"#, "json"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(registry.contains("127.0.0.1:7003").unwrap());
}

#[tokio::test]
async fn test_repeated_gossip_is_idempotent() {
    let registry = registry();
    let body = r#"{"127.0.0.1:7000":{},"127.0.0.1:7002":{}}"#;

    for _ in 0..3 {
        let response = api::api(registry.clone())
            .oneshot(gossip_request(body, "application/json"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
    assert_eq!(registry.len().unwrap(), 3);
}

#[tokio::test]
async fn test_malformed_gossip_is_rejected() {
    let registry = registry();
    let before = registry.snapshot().unwrap();

    for body in [
        "this is not json",
        r#"["127.0.0.1:7002"]"#,
        r#"{"127.0.0.1:7002":{}"#,
        r#"{"":{}}"#,
        "",
    ] {
        let response = api::api(registry.clone())
            .oneshot(gossip_request(body, "application/json"))
            .await
            .unwrap();
        assert_eq!(
            response.status(),
            StatusCode::BAD_REQUEST,
            "body {:?} should be rejected",
            body
        );
    }
    assert_eq!(registry.snapshot().unwrap(), before);
}

#[tokio::test]
async fn test_oversized_gossip_is_rejected() {
    let registry = registry();
    let huge = format!(r#"{{"{}":{{}}}}"#, "x".repeat(api::MAX_GOSSIP_BODY_BYTES + 1));

    let response = api::api(registry.clone())
        .oneshot(gossip_request(huge, "application/json"))
        .await
        .unwrap();

    assert!(response.status().is_client_error());
    assert_eq!(registry.len().unwrap(), 2);
}

#[tokio::test]
async fn test_only_post_gossip_is_routed() {
    let response = api::api(registry())
        .oneshot(
            Request::builder()
                .method(Method::GET)
                .uri(paths::GOSSIP)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);

    let response = api::api(registry())
        .oneshot(
            Request::builder()
                .method(Method::GET)
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
