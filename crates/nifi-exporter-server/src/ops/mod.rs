//! HTTP handlers.
//!
//! - `/`        : static landing page, read from disk on every request
//! - `/metrics` : Prometheus text format
//! - `/healthz` : liveness
//! - `/readyz`  : readiness (503 when draining)
//!
//! Handlers only read the registry; none of them waits on the poll loop.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use bytes::Bytes;

use nifi_exporter_core::error::ExporterError;

use crate::app_state::AppState;
use crate::error::HttpError;

pub const METRICS_CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";
pub const INDEX_CONTENT_TYPE: &str = "text/html";

pub async fn index(State(state): State<AppState>) -> Result<Response, HttpError> {
    let path = state.index_path();
    let body = tokio::fs::read(path).await.map_err(|e| {
        tracing::warn!(path, error = %e, "index page read failed");
        ExporterError::AssetRead {
            path: path.to_string(),
            reason: e.to_string(),
        }
    })?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, INDEX_CONTENT_TYPE)],
        Bytes::from(body),
    )
        .into_response())
}

pub async fn metrics(State(state): State<AppState>) -> Response {
    let body = state.metrics().render();

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, METRICS_CONTENT_TYPE)],
        body,
    )
        .into_response()
}

pub async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

pub async fn readyz(State(state): State<AppState>) -> impl IntoResponse {
    if state.is_draining() {
        (StatusCode::SERVICE_UNAVAILABLE, "draining")
    } else {
        (StatusCode::OK, "ready")
    }
}

pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "not found")
}
