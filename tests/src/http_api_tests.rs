//! HTTP surface tests: routing, status mapping, auth and response shape.

use anyhow::Result;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use cast_relayer::create_router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use crate::utils::{build_state, test_config, FakeHub, FakeRegistry, RAW_KEY_HEX, TEST_MNEMONIC};

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Result<Value> {
    let bytes = response.into_body().collect().await?.to_bytes();
    Ok(serde_json::from_slice(&bytes)?)
}

fn app(hub: Arc<FakeHub>, registry: Arc<FakeRegistry>) -> axum::Router {
    create_router(build_state(test_config(), hub, registry))
}

#[tokio::test]
async fn test_publish_with_existing_key() -> Result<()> {
    let hub = Arc::new(FakeHub::default());
    let registry = Arc::new(FakeRegistry::default());
    let response = app(hub.clone(), registry.clone())
        .oneshot(post_json(
            "/",
            json!({"data": {"text": "hello world"}, "fid": 42, "signerPrivateKey": RAW_KEY_HEX}),
        ))
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await?;
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Cast published successfully");
    assert!(body.get("signerPrivateKey").is_none());
    let hash = body["messageHash"].as_str().unwrap();
    assert_eq!(hash.len(), 2 + 40);
    assert_eq!(hub.submissions().len(), 1);
    assert_eq!(registry.network_calls(), 0);
    Ok(())
}

#[tokio::test]
async fn test_casts_route_is_an_alias() -> Result<()> {
    let hub = Arc::new(FakeHub::default());
    let response = app(hub.clone(), Arc::new(FakeRegistry::default()))
        .oneshot(post_json(
            "/casts",
            json!({"data": {"text": "alias"}, "fid": 42, "signerPrivateKey": RAW_KEY_HEX}),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(hub.submissions().len(), 1);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_publish_with_mnemonic_returns_new_key() -> Result<()> {
    let hub = Arc::new(FakeHub::default());
    let registry = Arc::new(FakeRegistry::default());
    let response = app(hub.clone(), registry.clone())
        .oneshot(post_json(
            "/",
            json!({"data": {"text": "first"}, "fid": 977, "mnemonic": TEST_MNEMONIC}),
        ))
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await?;
    let private_key = body["signerPrivateKey"].as_str().unwrap();
    assert!(private_key.starts_with("0x"));
    assert_eq!(private_key.len(), 2 + 64);
    assert_eq!(registry.network_calls(), 3);
    Ok(())
}

#[tokio::test]
async fn test_missing_signing_material_is_bad_request() -> Result<()> {
    let hub = Arc::new(FakeHub::default());
    let registry = Arc::new(FakeRegistry::default());
    let response = app(hub.clone(), registry.clone())
        .oneshot(post_json("/", json!({"data": {"text": "hi"}, "fid": 1})))
        .await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await?;
    assert_eq!(body["success"], false);
    assert_eq!(body["kind"], "configuration");
    assert_eq!(body["error"], "Either signerPrivateKey or mnemonic must be provided");
    assert!(hub.submissions().is_empty());
    assert_eq!(registry.network_calls(), 0);
    Ok(())
}

#[tokio::test]
async fn test_invalid_cast_is_unprocessable() -> Result<()> {
    let hub = Arc::new(FakeHub::default());
    let response = app(hub.clone(), Arc::new(FakeRegistry::default()))
        .oneshot(post_json(
            "/",
            json!({"data": {"text": "x", "embeds": [{}]}, "fid": 1, "signerPrivateKey": RAW_KEY_HEX}),
        ))
        .await?;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await?;
    assert_eq!(body["kind"], "message_construction");
    assert!(hub.submissions().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_hub_failure_is_bad_gateway() -> Result<()> {
    let hub = Arc::new(FakeHub::rejecting("Unavailable: connection refused"));
    let response = app(hub, Arc::new(FakeRegistry::default()))
        .oneshot(post_json(
            "/",
            json!({"data": {"text": "hi"}, "fid": 1, "signerPrivateKey": RAW_KEY_HEX}),
        ))
        .await?;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = body_json(response).await?;
    assert_eq!(body["kind"], "submission");
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_chain_failure_is_service_unavailable() -> Result<()> {
    let hub = Arc::new(FakeHub::default());
    let response = app(hub.clone(), Arc::new(FakeRegistry::reverting()))
        .oneshot(post_json(
            "/",
            json!({"data": {"text": "hi"}, "fid": 977, "mnemonic": TEST_MNEMONIC}),
        ))
        .await?;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert!(hub.submissions().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() -> Result<()> {
    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))?;
    let response = app(Arc::new(FakeHub::default()), Arc::new(FakeRegistry::default()))
        .oneshot(request)
        .await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await?;
    assert_eq!(body["kind"], "invalid_request");
    Ok(())
}

#[tokio::test]
async fn test_api_key_required_when_configured() -> Result<()> {
    let mut config = test_config();
    config.api_key = Some("s3cret".into());
    let hub = Arc::new(FakeHub::default());
    let state = build_state(config, hub.clone(), Arc::new(FakeRegistry::default()));
    let payload = json!({"data": {"text": "hi"}, "fid": 1, "signerPrivateKey": RAW_KEY_HEX});

    let denied = create_router(state.clone())
        .oneshot(post_json("/", payload.clone()))
        .await?;
    assert_eq!(denied.status(), StatusCode::UNAUTHORIZED);
    assert!(hub.submissions().is_empty());

    let mut request = post_json("/", payload);
    request
        .headers_mut()
        .insert("authorization", "Bearer s3cret".parse()?);
    let allowed = create_router(state).oneshot(request).await?;
    assert_eq!(allowed.status(), StatusCode::OK);
    assert_eq!(hub.submissions().len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_health_reports_hub_and_network() -> Result<()> {
    let response = app(Arc::new(FakeHub::default()), Arc::new(FakeRegistry::default()))
        .oneshot(Request::builder().uri("/health").body(Body::empty())?)
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await?;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["hub"], "fake-hub:2283");
    assert_eq!(body["network"], "mainnet");
    Ok(())
}

#[tokio::test]
async fn test_metrics_and_request_id() -> Result<()> {
    let request = Request::builder()
        .uri("/metrics")
        .header("x-request-id", "req-123")
        .body(Body::empty())?;
    let response = app(Arc::new(FakeHub::default()), Arc::new(FakeRegistry::default()))
        .oneshot(request)
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["x-request-id"], "req-123");
    let bytes = response.into_body().collect().await?.to_bytes();
    let text = String::from_utf8(bytes.to_vec())?;
    assert!(text.contains("relayer_casts_total"));
    Ok(())
}
