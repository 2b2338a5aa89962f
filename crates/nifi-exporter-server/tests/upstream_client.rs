#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

mod common;

use std::time::Duration;

use axum::{
    http::{HeaderMap, StatusCode},
    routing::get,
    Json, Router,
};
use serde_json::json;

use nifi_exporter_core::status::Endpoint;
use nifi_exporter_core::ErrorKind;
use nifi_exporter_server::upstream::{NifiApi, StatusSource, UpstreamClient};

const TIMEOUT: Duration = Duration::from_millis(300);

async fn upstream() -> String {
    let app = Router::new()
        .route("/ok", get(|| async { Json(json!({"controllerStatus": {"activeThreadCount": 2}})) }))
        .route("/garbage", get(|| async { "<html>login</html>" }))
        .route("/boom", get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }))
        .route(
            "/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(3)).await;
                Json(json!({}))
            }),
        )
        .route(
            "/auth",
            get(|headers: HeaderMap| async move {
                let auth = headers
                    .get("authorization")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("")
                    .to_string();
                Json(json!({ "authorization": auth }))
            }),
        );
    format!("http://{}", common::serve(app).await)
}

#[tokio::test]
async fn parses_json_body() {
    let base = upstream().await;
    let client = UpstreamClient::new(None).unwrap();
    let doc = client.fetch_json(&format!("{base}/ok"), TIMEOUT).await.unwrap();
    assert_eq!(doc["controllerStatus"]["activeThreadCount"], 2);
}

#[tokio::test]
async fn non_2xx_is_http_status_error() {
    let base = upstream().await;
    let client = UpstreamClient::new(None).unwrap();
    let err = client.fetch_json(&format!("{base}/boom"), TIMEOUT).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::HttpStatus);
    assert!(err.to_string().contains("500"));

    let err = client.fetch_json(&format!("{base}/nope"), TIMEOUT).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::HttpStatus);
}

#[tokio::test]
async fn non_json_body_is_decode_error() {
    let base = upstream().await;
    let client = UpstreamClient::new(None).unwrap();
    let err = client.fetch_json(&format!("{base}/garbage"), TIMEOUT).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Decode);
}

#[tokio::test]
async fn slow_upstream_is_timeout_error() {
    let base = upstream().await;
    let client = UpstreamClient::new(None).unwrap();
    let started = std::time::Instant::now();
    let err = client.fetch_json(&format!("{base}/slow"), TIMEOUT).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Timeout);
    assert!(started.elapsed() < Duration::from_secs(2));
}

#[tokio::test]
async fn refused_port_is_connection_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = UpstreamClient::new(None).unwrap();
    let err = client
        .fetch_json(&format!("http://{addr}/ok"), TIMEOUT)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Connection);
}

#[tokio::test]
async fn bearer_token_is_sent() {
    let base = upstream().await;
    let client = UpstreamClient::new(Some("s3cret".into())).unwrap();
    let doc = client.fetch_json(&format!("{base}/auth"), TIMEOUT).await.unwrap();
    assert_eq!(doc["authorization"], "Bearer s3cret");

    let client = UpstreamClient::new(None).unwrap();
    let doc = client.fetch_json(&format!("{base}/auth"), TIMEOUT).await.unwrap();
    assert_eq!(doc["authorization"], "");
}

#[tokio::test]
async fn nifi_api_hits_both_status_paths() {
    let addr = common::fake_nifi(common::controller_doc(), common::root_group_doc()).await;
    let api = NifiApi::with_client(
        UpstreamClient::new(None).unwrap(),
        &format!("http://{addr}/"),
        TIMEOUT,
    );
    assert_eq!(api.base_url(), format!("http://{addr}"));

    let doc = api.fetch(Endpoint::Controller).await.unwrap();
    assert_eq!(doc["controllerStatus"]["runningCount"], 87);
    let doc = api.fetch(Endpoint::RootProcessGroup).await.unwrap();
    assert_eq!(doc["processGroupStatus"]["aggregateSnapshot"]["flowFilesSent"], 310);
}
