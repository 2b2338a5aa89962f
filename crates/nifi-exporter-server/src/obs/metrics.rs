//! Metric registry for the exporter.
//!
//! The NiFi gauges are a fixed set built once from the core catalog: each value
//! is an `f64` stored as bits in an `AtomicU64`, so a render never observes a
//! torn value. Values of different gauges may come from different cycles.
//!
//! Self-observability vectors keep the labelled `DashMap` design: labels are
//! flattened into sorted key vectors and rows are sorted at render time so the
//! exposition is deterministic. Histogram buckets are fixed in microseconds.

use dashmap::DashMap;
use std::collections::HashMap;
use std::fmt::Write;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use nifi_exporter_core::error::{ExporterError, Result};
use nifi_exporter_core::status::{GaugeSpec, GAUGES};

/// Helper to escape label values.
fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

/// HELP text escaping (quotes are legal there).
fn escape_help(v: &str) -> String {
    v.replace('\\', "\\\\").replace('\n', "\\n")
}

fn format_value(v: f64) -> String {
    if v.is_nan() {
        "NaN".into()
    } else if v.is_infinite() {
        if v > 0.0 { "+Inf".into() } else { "-Inf".into() }
    } else {
        v.to_string()
    }
}

fn label_key(labels: &[(&str, &str)]) -> Vec<(String, String)> {
    let mut key: Vec<(String, String)> = labels
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    key.sort();
    key
}

fn label_str(key: &[(String, String)]) -> String {
    key.iter()
        .map(|(k, v)| format!("{}=\"{}\"", k, escape_label(v)))
        .collect::<Vec<_>>()
        .join(",")
}

/// A single named gauge.
pub struct Gauge {
    spec: &'static GaugeSpec,
    bits: AtomicU64,
}

impl Gauge {
    fn new(spec: &'static GaugeSpec) -> Self {
        Self {
            spec,
            bits: AtomicU64::new(0f64.to_bits()),
        }
    }

    pub fn name(&self) -> &'static str {
        self.spec.name
    }

    pub fn set(&self, v: f64) {
        self.bits.store(v.to_bits(), Ordering::Relaxed);
    }

    pub fn get(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::Relaxed))
    }

    fn render(&self, out: &mut String) {
        let name = self.spec.name;
        let _ = writeln!(out, "# HELP {} {}", name, escape_help(self.spec.help));
        let _ = writeln!(out, "# TYPE {} gauge", name);
        let _ = writeln!(out, "{} {}", name, format_value(self.get()));
    }
}

#[derive(Default)]
pub struct CounterVec {
    map: DashMap<Vec<(String, String)>, AtomicU64>,
}

impl CounterVec {
    /// Increment by 1.
    pub fn inc(&self, labels: &[(&str, &str)]) {
        self.add(labels, 1);
    }

    /// Increment by an arbitrary value.
    pub fn add(&self, labels: &[(&str, &str)], v: u64) {
        let counter = self.map.entry(label_key(labels)).or_insert_with(|| AtomicU64::new(0));
        counter.fetch_add(v, Ordering::Relaxed);
    }

    /// Current value for one label set (0 if never touched).
    pub fn get(&self, labels: &[(&str, &str)]) -> u64 {
        self.map
            .get(&label_key(labels))
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    /// Render in Prometheus text exposition format.
    fn render(&self, name: &str, help: &str, out: &mut String) {
        let _ = writeln!(out, "# HELP {} {}", name, escape_help(help));
        let _ = writeln!(out, "# TYPE {} counter", name);
        let mut rows: Vec<(String, u64)> = self
            .map
            .iter()
            .map(|r| (label_str(r.key()), r.value().load(Ordering::Relaxed)))
            .collect();
        rows.sort();
        for (labels, val) in rows {
            let _ = writeln!(out, "{}{{{}}} {}", name, labels, val);
        }
    }
}

// Fixed Buckets in Microseconds (µs)
// 1ms, 5ms, 10ms, 50ms, 100ms, 500ms, 1s, 5s, 10s
const BUCKETS_MICROS: [u64; 9] = [
    1_000, 5_000, 10_000, 50_000, 100_000, 500_000, 1_000_000, 5_000_000, 10_000_000,
];

#[derive(Default)]
struct AtomicHistogram {
    count: AtomicU64,
    sum: AtomicU64,
    buckets: [AtomicU64; 9],
}

#[derive(Default)]
pub struct HistogramVec {
    map: DashMap<Vec<(String, String)>, AtomicHistogram>,
}

impl HistogramVec {
    /// Observe a duration and increment cumulative buckets (microsecond scale).
    pub fn observe(&self, labels: &[(&str, &str)], duration: Duration) {
        let hist = self.map.entry(label_key(labels)).or_insert_with(AtomicHistogram::default);
        let micros = u64::try_from(duration.as_micros()).unwrap_or(u64::MAX);

        hist.count.fetch_add(1, Ordering::Relaxed);
        hist.sum.fetch_add(micros, Ordering::Relaxed);

        for (i, &b) in BUCKETS_MICROS.iter().enumerate() {
            if micros <= b {
                hist.buckets[i].fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    /// Number of observations for one label set.
    pub fn count(&self, labels: &[(&str, &str)]) -> u64 {
        self.map
            .get(&label_key(labels))
            .map(|h| h.count.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    /// Render in Prometheus text exposition format (unit: microseconds).
    fn render(&self, name: &str, help: &str, out: &mut String) {
        let _ = writeln!(out, "# HELP {} {}", name, escape_help(help));
        let _ = writeln!(out, "# TYPE {} histogram", name);

        let mut keys: Vec<Vec<(String, String)>> = self.map.iter().map(|r| r.key().clone()).collect();
        keys.sort();

        for key in keys {
            let Some(hist) = self.map.get(&key) else { continue };
            let labels = label_str(&key);
            let prefix = if labels.is_empty() { String::new() } else { format!("{},", labels) };

            for (i, &le) in BUCKETS_MICROS.iter().enumerate() {
                let count = hist.buckets[i].load(Ordering::Relaxed);
                let _ = writeln!(out, "{}_bucket{{{}le=\"{}\"}} {}", name, prefix, le, count);
            }
            let count = hist.count.load(Ordering::Relaxed);
            let _ = writeln!(out, "{}_bucket{{{}le=\"+Inf\"}} {}", name, prefix, count);

            let sum = hist.sum.load(Ordering::Relaxed);
            let _ = writeln!(out, "{}_sum{{{}}} {}", name, labels, sum);
            let _ = writeln!(out, "{}_count{{{}}} {}", name, labels, count);
        }
    }
}

/// Current NiFi gauges plus the exporter's own counters.
pub struct MetricRegistry {
    gauges: Vec<Gauge>,
    index: HashMap<&'static str, usize>,
    pub scrape_errors: CounterVec,
    pub scrape_duration: HistogramVec, // In Microseconds
    pub cycles: CounterVec,
}

impl Default for MetricRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricRegistry {
    /// Build the registry from the fixed catalog. All gauges start at 0.
    pub fn new() -> Self {
        let gauges: Vec<Gauge> = GAUGES.iter().map(Gauge::new).collect();
        let index = gauges.iter().enumerate().map(|(i, g)| (g.name(), i)).collect();
        Self {
            gauges,
            index,
            scrape_errors: CounterVec::default(),
            scrape_duration: HistogramVec::default(),
            cycles: CounterVec::default(),
        }
    }

    fn gauge(&self, name: &str) -> Result<&Gauge> {
        self.index
            .get(name)
            .map(|&i| &self.gauges[i])
            .ok_or_else(|| ExporterError::UnknownGauge(name.to_string()))
    }

    /// Overwrite a gauge. The metric set is fixed: unknown names are rejected.
    pub fn set(&self, name: &str, value: f64) -> Result<()> {
        self.gauge(name)?.set(value);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Result<f64> {
        self.gauge(name).map(Gauge::get)
    }

    pub fn gauge_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.gauges.iter().map(Gauge::name)
    }

    /// Render everything in Prometheus text exposition format, catalog order first.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(4096);
        for g in &self.gauges {
            g.render(&mut out);
        }
        self.scrape_errors.render(
            "nifi_exporter_scrape_errors_total",
            "Failed upstream fetches by endpoint and error kind",
            &mut out,
        );
        self.scrape_duration.render(
            "nifi_exporter_scrape_duration_micros",
            "Upstream fetch latency in microseconds",
            &mut out,
        );
        self.cycles.render(
            "nifi_exporter_cycles_total",
            "Completed poll cycles by outcome",
            &mut out,
        );
        out
    }
}
