//! HTTP mapping for exporter errors (non-metrics handlers).

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use nifi_exporter_core::error::ExporterError;

/// Wrapper so handlers can `?` an `ExporterError` into a response.
///
/// No handler fetches upstream on the request path, so every error that
/// reaches here is the exporter's own fault and maps to 500.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct HttpError(#[from] pub ExporterError);

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": self.0.kind().as_str(),
            "message": self.0.to_string(),
        }));
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}
