//! NiFi exporter core: upstream status model, fixed gauge catalog, and errors.
//!
//! This crate defines the contract between the NiFi REST API and the exported
//! metric set. It carries no transport or runtime dependencies so the mapping
//! can be tested on plain JSON fixtures.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `ExporterError`/`Result` so the poll
//! loop never dies on malformed upstream payloads.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod status;

/// Shared result type.
pub use error::{ErrorKind, ExporterError, Result};
