//! Upstream NiFi access.
//!
//! `UpstreamClient` is the raw bounded-timeout JSON GET; `StatusSource` is the
//! seam the collector polls through, with `NifiApi` as the HTTP implementation.

pub mod client;

pub use client::{NifiApi, StatusSource, UpstreamClient};
