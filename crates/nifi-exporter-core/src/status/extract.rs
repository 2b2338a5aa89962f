use serde_json::Value;

use super::{gauges_for, Endpoint};
use crate::error::{ExporterError, Result};

/// Map a parsed endpoint document onto `(gauge name, value)` pairs.
///
/// Every gauge fed by `endpoint` is returned. Numbers are taken as-is, numeric
/// strings are parsed and booleans read as `1.0`/`0.0`. A missing nested
/// object, a missing key, or any other value reads as `0.0`. Only a top level
/// that is not a JSON object is rejected.
pub fn extract(endpoint: Endpoint, doc: &Value) -> Result<Vec<(&'static str, f64)>> {
    if !doc.is_object() {
        return Err(ExporterError::Decode(format!(
            "{} status is not a JSON object",
            endpoint.label()
        )));
    }

    let status = doc.pointer(endpoint.status_pointer());
    if status.is_none() {
        tracing::debug!(
            endpoint = endpoint.label(),
            pointer = endpoint.status_pointer(),
            "status object missing, reading zeros"
        );
    }
    Ok(gauges_for(endpoint)
        .filter_map(|g| g.source.map(|s| (g.name, read_number(status, s.field))))
        .collect())
}

fn read_number(status: Option<&Value>, field: &str) -> f64 {
    status.and_then(|s| s.get(field)).and_then(coerce).unwrap_or(0.0)
}

fn coerce(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }
}
