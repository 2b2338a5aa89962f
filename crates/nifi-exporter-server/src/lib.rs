//! NiFi exporter server library entry.
//!
//! This crate wires the upstream client, collector, scheduler, metric
//! registry and HTTP routes into the exporter. It is intended to be consumed
//! by the binary (`main.rs`) and by integration tests.

pub mod app_state;
pub mod collect;
pub mod config;
pub mod error;
pub mod obs;
pub mod ops;
pub mod router;
pub mod upstream;
