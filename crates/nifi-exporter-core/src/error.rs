//! Shared error type across the exporter crates.

use thiserror::Error;

/// Stable error codes, used as metric label values and in HTTP error bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Upstream unreachable or connection refused.
    Connection,
    /// Upstream call exceeded its time bound.
    Timeout,
    /// Upstream answered with a non-2xx status.
    HttpStatus,
    /// Upstream body was not the JSON we expect.
    Decode,
    /// Static landing page could not be read.
    AssetRead,
    /// Invalid configuration.
    Config,
    /// A gauge name outside the fixed metric set.
    UnknownGauge,
    /// Listener could not be bound.
    Bind,
    /// Anything else.
    Internal,
}

impl ErrorKind {
    /// String representation used in labels and JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Connection => "connection",
            ErrorKind::Timeout => "timeout",
            ErrorKind::HttpStatus => "http_status",
            ErrorKind::Decode => "decode",
            ErrorKind::AssetRead => "asset_read",
            ErrorKind::Config => "config",
            ErrorKind::UnknownGauge => "unknown_gauge",
            ErrorKind::Bind => "bind",
            ErrorKind::Internal => "internal",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, ExporterError>;

/// Unified error type used by core and server.
#[derive(Debug, Error)]
pub enum ExporterError {
    #[error("connection to {url} failed: {reason}")]
    Connection { url: String, reason: String },
    #[error("request to {url} timed out")]
    Timeout { url: String },
    #[error("{url} returned HTTP {status}")]
    HttpStatus { url: String, status: u16 },
    #[error("decode failed: {0}")]
    Decode(String),
    #[error("cannot read asset {path}: {reason}")]
    AssetRead { path: String, reason: String },
    #[error("invalid config: {0}")]
    Config(String),
    #[error("unknown gauge: {0}")]
    UnknownGauge(String),
    #[error("cannot bind {addr}: {reason}")]
    Bind { addr: String, reason: String },
    #[error("internal: {0}")]
    Internal(String),
}

impl ExporterError {
    /// Map to a stable code.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ExporterError::Connection { .. } => ErrorKind::Connection,
            ExporterError::Timeout { .. } => ErrorKind::Timeout,
            ExporterError::HttpStatus { .. } => ErrorKind::HttpStatus,
            ExporterError::Decode(_) => ErrorKind::Decode,
            ExporterError::AssetRead { .. } => ErrorKind::AssetRead,
            ExporterError::Config(_) => ErrorKind::Config,
            ExporterError::UnknownGauge(_) => ErrorKind::UnknownGauge,
            ExporterError::Bind { .. } => ErrorKind::Bind,
            ExporterError::Internal(_) => ErrorKind::Internal,
        }
    }
}
