//! Top-level facade crate for the NiFi exporter.
//!
//! Re-exports core types and the server library so users can depend on a single crate.

pub mod core {
    pub use nifi_exporter_core::*;
}

pub mod server {
    pub use nifi_exporter_server::*;
}
