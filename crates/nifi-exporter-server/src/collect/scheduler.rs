use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use super::Collector;

/// Runs the collector forever: cycle, then sleep `interval` from cycle end.
///
/// No jitter and no drift correction. The only exit is the shutdown signal
/// (a `true` value or a dropped sender), which also abandons an in-flight cycle.
pub struct Scheduler {
    collector: Collector,
    interval: Duration,
}

impl Scheduler {
    pub fn new(collector: Collector, interval: Duration) -> Self {
        Self {
            collector,
            interval,
        }
    }

    pub fn spawn(self, shutdown: watch::Receiver<bool>) -> JoinHandle<()> {
        tokio::spawn(self.run(shutdown))
    }

    /// Wait for a spawned loop to finish. Returns `false` when the task
    /// panicked or was cancelled; that outcome is logged, not propagated.
    pub async fn join(handle: JoinHandle<()>) -> bool {
        match handle.await {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "poll loop ended abnormally");
                false
            }
        }
    }

    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        let interval_ms = u64::try_from(self.interval.as_millis()).unwrap_or(u64::MAX);
        info!(interval_ms, "poll loop started");

        loop {
            if *shutdown.borrow() {
                break;
            }

            tokio::select! {
                _ = self.collector.collect() => {}
                _ = shutdown.changed() => break,
            }

            tokio::select! {
                _ = tokio::time::sleep(self.interval) => {}
                _ = shutdown.changed() => break,
            }
        }

        info!("poll loop stopped");
    }
}
