//! Upstream status model.
//!
//! This module hosts the fixed contract between the NiFi REST API and the
//! exported metric set:
//! - `endpoint`: the two status endpoints polled each cycle.
//! - `catalog`: the statically declared gauges and the JSON field each reads.
//! - `extract`: defensive mapping of a parsed document onto gauge values.
//!
//! Extraction is panic-free: missing or non-numeric fields read as zero, and
//! only a document that is not a JSON object is reported as `ExporterError`.

pub mod catalog;
pub mod endpoint;
pub mod extract;

pub use catalog::{gauges_for, FieldSource, GaugeSpec, GAUGES, UP_GAUGE};
pub use endpoint::Endpoint;
pub use extract::extract;
