//! Exporter config loader (strict parsing).
//!
//! Without a config file every section takes its defaults; `NIFI_URL` then
//! overrides the upstream base URL either way.

pub mod schema;

use std::fs;

use nifi_exporter_core::error::{ExporterError, Result};

pub use schema::{
    CollectorSection, ExporterConfig, ExporterSection, FailureIsolation, UpstreamSection,
    ENV_NIFI_URL,
};

/// Environment variable naming an optional YAML config file.
pub const ENV_CONFIG_PATH: &str = "NIFI_EXPORTER_CONFIG";

pub fn load_from_file(path: &str) -> Result<ExporterConfig> {
    let cfg = parse_file(path)?;
    cfg.validate()?;
    Ok(cfg)
}

pub fn load_from_str(s: &str) -> Result<ExporterConfig> {
    let cfg = parse_str(s)?;
    cfg.validate()?;
    Ok(cfg)
}

/// Strict parse without range validation; callers validate once overrides are in.
fn parse_str(s: &str) -> Result<ExporterConfig> {
    serde_yaml::from_str(s).map_err(|e| ExporterError::Config(format!("invalid yaml: {e}")))
}

fn parse_file(path: &str) -> Result<ExporterConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| ExporterError::Config(format!("read config {path} failed: {e}")))?;
    parse_str(&s)
}

/// Resolve the effective config from the process environment.
pub fn load_from_env() -> Result<ExporterConfig> {
    load_with(|k| std::env::var(k).ok())
}

/// Resolve the effective config through `lookup`: optional file named by
/// `NIFI_EXPORTER_CONFIG`, then env overrides, then one validation pass.
pub fn load_with<F>(lookup: F) -> Result<ExporterConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let mut cfg = match lookup(ENV_CONFIG_PATH) {
        Some(path) if !path.trim().is_empty() => parse_file(path.trim())?,
        _ => ExporterConfig::default(),
    };
    cfg.apply_env_overrides(&lookup);
    cfg.validate()?;
    Ok(cfg)
}
