use std::sync::Arc;
use std::time::Instant;

use futures_util::future::join_all;
use serde_json::Value;
use tracing::{debug, warn};

use nifi_exporter_core::error::{ErrorKind, Result};
use nifi_exporter_core::status::{extract, Endpoint, UP_GAUGE};

use crate::config::FailureIsolation;
use crate::obs::MetricRegistry;
use crate::upstream::StatusSource;

/// Outcome of one poll cycle.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CycleReport {
    /// Endpoints that failed, in visiting order.
    pub failures: Vec<(Endpoint, ErrorKind)>,
    /// Endpoints never fetched because an earlier one failed.
    pub skipped: Vec<Endpoint>,
}

impl CycleReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Runs poll cycles against a `StatusSource` and writes the registry.
///
/// Upstream errors stop here: they turn into `nifi_api_up 0`, a warning and a
/// scrape-error count. Gauges keep their last good value on failure.
pub struct Collector {
    source: Arc<dyn StatusSource>,
    metrics: Arc<MetricRegistry>,
    isolation: FailureIsolation,
}

impl Collector {
    pub fn new(
        source: Arc<dyn StatusSource>,
        metrics: Arc<MetricRegistry>,
        isolation: FailureIsolation,
    ) -> Self {
        Self {
            source,
            metrics,
            isolation,
        }
    }

    /// One full cycle. Never fails; the report says what happened.
    pub async fn collect(&self) -> CycleReport {
        let report = match self.isolation {
            FailureIsolation::ShortCircuit => self.collect_in_order().await,
            FailureIsolation::Independent => self.collect_all().await,
        };

        let (up, outcome) = if report.is_success() {
            (1.0, "success")
        } else {
            (0.0, "failure")
        };
        if let Err(e) = self.metrics.set(UP_GAUGE, up) {
            warn!(error = %e, "availability gauge missing from registry");
        }
        self.metrics.cycles.inc(&[("outcome", outcome)]);

        if report.is_success() {
            debug!("poll cycle succeeded");
        } else {
            debug!(failed = report.failures.len(), skipped = report.skipped.len(), "poll cycle failed");
        }
        report
    }

    /// Visit endpoints in order and stop at the first failure.
    async fn collect_in_order(&self) -> CycleReport {
        let mut report = CycleReport::default();
        for (i, &endpoint) in Endpoint::ALL.iter().enumerate() {
            if let Err(kind) = self.scrape(endpoint).await {
                report.failures.push((endpoint, kind));
                report.skipped = Endpoint::ALL[i + 1..].to_vec();
                break;
            }
        }
        report
    }

    /// Fetch every endpoint concurrently; failures don't block the others.
    async fn collect_all(&self) -> CycleReport {
        let results = join_all(Endpoint::ALL.iter().map(|&e| self.scrape(e))).await;
        let failures = Endpoint::ALL
            .iter()
            .zip(results)
            .filter_map(|(&endpoint, r)| r.err().map(|kind| (endpoint, kind)))
            .collect();
        CycleReport {
            failures,
            skipped: Vec::new(),
        }
    }

    async fn scrape(&self, endpoint: Endpoint) -> std::result::Result<(), ErrorKind> {
        let labels = [("endpoint", endpoint.label())];

        let started = Instant::now();
        let fetched = self.source.fetch(endpoint).await;
        self.metrics.scrape_duration.observe(&labels, started.elapsed());

        match fetched.and_then(|doc| self.apply(endpoint, &doc)) {
            Ok(()) => Ok(()),
            Err(e) => {
                let kind = e.kind();
                self.metrics
                    .scrape_errors
                    .inc(&[("endpoint", endpoint.label()), ("kind", kind.as_str())]);
                warn!(endpoint = endpoint.label(), kind = kind.as_str(), error = %e, "error collecting metrics");
                Err(kind)
            }
        }
    }

    /// Extract first, then write; a rejected document leaves gauges untouched.
    fn apply(&self, endpoint: Endpoint, doc: &Value) -> Result<()> {
        for (name, value) in extract(endpoint, doc)? {
            self.metrics.set(name, value)?;
        }
        Ok(())
    }
}
