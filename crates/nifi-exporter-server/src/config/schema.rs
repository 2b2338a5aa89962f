use std::net::SocketAddr;
use std::time::Duration;

use serde::Deserialize;
use nifi_exporter_core::error::{ExporterError, Result};

/// Environment variable overriding `upstream.base_url`.
pub const ENV_NIFI_URL: &str = "NIFI_URL";

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExporterConfig {
    pub version: u32,

    #[serde(default)]
    pub upstream: UpstreamSection,

    #[serde(default)]
    pub exporter: ExporterSection,

    #[serde(default)]
    pub collector: CollectorSection,
}

impl Default for ExporterConfig {
    fn default() -> Self {
        Self {
            version: 1,
            upstream: UpstreamSection::default(),
            exporter: ExporterSection::default(),
            collector: CollectorSection::default(),
        }
    }
}

impl ExporterConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(ExporterError::Config(format!(
                "unsupported config version {}",
                self.version
            )));
        }

        self.upstream.validate()?;
        self.exporter.validate()?;
        self.collector.validate()?;

        Ok(())
    }

    /// Apply environment overrides. `lookup` is `std::env::var(..).ok()` in production.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_NIFI_URL).filter(|u| !u.trim().is_empty()) {
            self.upstream.base_url = url.trim().to_string();
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpstreamSection {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Sent as `Authorization: Bearer <token>` when set.
    #[serde(default)]
    pub bearer_token: Option<String>,
}

impl Default for UpstreamSection {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
            bearer_token: None,
        }
    }
}

impl UpstreamSection {
    pub fn validate(&self) -> Result<()> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ExporterError::Config(
                "upstream.base_url must start with http:// or https://".into(),
            ));
        }
        if !(100..=120000).contains(&self.timeout_ms) {
            return Err(ExporterError::Config(
                "upstream.timeout_ms must be between 100 and 120000".into(),
            ));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExporterSection {
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Static landing page served at `/`.
    #[serde(default = "default_index_path")]
    pub index_path: String,
}

impl Default for ExporterSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            index_path: default_index_path(),
        }
    }
}

impl ExporterSection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr()?;
        if self.index_path.trim().is_empty() {
            return Err(ExporterError::Config("exporter.index_path must not be empty".into()));
        }
        Ok(())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|e| {
            ExporterError::Config(format!("exporter.listen must be a valid SocketAddr: {e}"))
        })
    }
}

/// What a failing endpoint does to the rest of its cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureIsolation {
    /// Stop at the first failing endpoint.
    #[default]
    ShortCircuit,
    /// Fetch every endpoint; each success still updates its gauges.
    Independent,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CollectorSection {
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,

    #[serde(default)]
    pub isolation: FailureIsolation,
}

impl Default for CollectorSection {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
            isolation: FailureIsolation::default(),
        }
    }
}

impl CollectorSection {
    pub fn validate(&self) -> Result<()> {
        if !(100..=3_600_000).contains(&self.interval_ms) {
            return Err(ExporterError::Config(
                "collector.interval_ms must be between 100 and 3600000".into(),
            ));
        }
        Ok(())
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

fn default_base_url() -> String {
    "http://nifi-hostname:8080".into()
}
fn default_timeout_ms() -> u64 {
    10000
}
fn default_listen() -> String {
    "0.0.0.0:9100".into()
}
fn default_index_path() -> String {
    "index.html".into()
}
fn default_interval_ms() -> u64 {
    5000
}
