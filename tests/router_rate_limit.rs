mod common;

use axum::body::Body;
use axum::extract::ConnectInfo;
use axum::http::{Request, StatusCode, header};
use serde_json::Value;
use std::net::SocketAddr;
use tower::ServiceExt;

use geo_locator::api::middleware::rate_limit::TOO_MANY_REQUESTS_MESSAGE;
use geo_locator::config::Config;
use geo_locator::routes::app_router;

fn config(per_second: u64, burst: u32) -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        ipstack_access_key: "test-key".to_string(),
        ipstack_base_url: "http://api.ipstack.com".to_string(),
        provider_timeout_seconds: 10,
        resolver_timeout_seconds: 5,
        listen_addr: "127.0.0.1:3000".to_string(),
        log_level: "info".to_string(),
        log_format: "text".to_string(),
        rate_limit_per_second: per_second,
        rate_limit_burst: burst,
        db_max_connections: 1,
        db_connect_timeout: 5,
    }
}

fn request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .extension(ConnectInfo(SocketAddr::from(([127, 0, 0, 1], 40000))))
        .body(Body::empty())
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_throttled_request_gets_json_error() {
    let ctx = common::create_test_context().await;
    let app = app_router(ctx.state.clone(), &config(1, 1)).unwrap();

    let uri = format!("/geo?ip={}", common::GOOGLE_IP);

    let first = app.clone().oneshot(request("GET", &uri)).await.unwrap();
    assert_eq!(first.status(), StatusCode::NOT_FOUND);

    let second = app.clone().oneshot(request("GET", &uri)).await.unwrap();
    assert_eq!(second.status(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(second.headers()[header::CONTENT_TYPE], "application/json");

    let body = json_body(second).await;
    assert_eq!(body["message"], TOO_MANY_REQUESTS_MESSAGE);
    assert_eq!(body.as_object().unwrap().len(), 1);
}

#[tokio::test]
async fn test_health_is_not_throttled() {
    let ctx = common::create_test_context().await;
    let app = app_router(ctx.state.clone(), &config(1, 1)).unwrap();

    for _ in 0..3 {
        let response = app.clone().oneshot(request("GET", "/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}

#[tokio::test]
async fn test_trailing_slash_is_normalized() {
    let ctx = common::create_test_context().await;
    let app = app_router(ctx.state.clone(), &config(5, 50)).unwrap();

    let response = app
        .oneshot(request("DELETE", &format!("/geo/?ip={}", common::GITHUB_IP)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        json_body(response).await["message"],
        "Location for given ip/url not found"
    );
}
