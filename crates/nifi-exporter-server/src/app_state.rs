//! Shared application state for the exporter.
//!
//! The registry is constructed here once and handed by `Arc` to both the
//! HTTP handlers and the poll loop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use nifi_exporter_core::error::Result;

use crate::collect::{Collector, Scheduler};
use crate::config::ExporterConfig;
use crate::obs::MetricRegistry;
use crate::upstream::{NifiApi, StatusSource};

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
    metrics: Arc<MetricRegistry>,
}

struct AppStateInner {
    cfg: ExporterConfig,
    draining: AtomicBool,
}

impl AppState {
    pub fn new(cfg: ExporterConfig) -> Self {
        Self::with_metrics(cfg, Arc::new(MetricRegistry::new()))
    }

    pub fn with_metrics(cfg: ExporterConfig, metrics: Arc<MetricRegistry>) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                cfg,
                draining: AtomicBool::new(false),
            }),
            metrics,
        }
    }

    pub fn cfg(&self) -> &ExporterConfig {
        &self.inner.cfg
    }

    pub fn metrics(&self) -> Arc<MetricRegistry> {
        Arc::clone(&self.metrics)
    }

    pub fn index_path(&self) -> &str {
        &self.inner.cfg.exporter.index_path
    }

    /// Mark draining state.
    pub fn set_draining(&self) {
        self.inner.draining.store(true, Ordering::Relaxed);
    }

    /// Return whether draining is active.
    pub fn is_draining(&self) -> bool {
        self.inner.draining.load(Ordering::Relaxed)
    }

    /// Poll loop over `source`, sharing this state's registry.
    pub fn scheduler_with(&self, source: Arc<dyn StatusSource>) -> Scheduler {
        let collector = Collector::new(source, self.metrics(), self.cfg().collector.isolation);
        Scheduler::new(collector, self.cfg().collector.interval())
    }

    /// Poll loop against the configured NiFi API.
    pub fn scheduler(&self) -> Result<Scheduler> {
        let api = NifiApi::new(&self.cfg().upstream)?;
        Ok(self.scheduler_with(Arc::new(api)))
    }
}
