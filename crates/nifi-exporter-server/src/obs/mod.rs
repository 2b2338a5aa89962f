//! In-process metrics.
//!
//! The fixed NiFi gauge set plus the exporter's own scrape counters, stored as
//! atomics and rendered by the `/metrics` handler.

pub mod metrics;

pub use metrics::MetricRegistry;
