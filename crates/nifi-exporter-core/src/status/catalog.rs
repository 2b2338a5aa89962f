//! The fixed metric set.
//!
//! Declared once; the registry is built from `GAUGES` and never grows. Every
//! name the collector writes must appear here.

use super::Endpoint;

/// Name of the availability gauge (1 = last cycle succeeded).
pub const UP_GAUGE: &str = "nifi_api_up";

/// Where a gauge's value comes from upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSource {
    pub endpoint: Endpoint,
    /// Key inside the endpoint's nested status object.
    pub field: &'static str,
}

/// Static description of one exported gauge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GaugeSpec {
    pub name: &'static str,
    pub help: &'static str,
    /// `None` for gauges the collector computes itself (availability).
    pub source: Option<FieldSource>,
}

const fn controller(name: &'static str, field: &'static str, help: &'static str) -> GaugeSpec {
    GaugeSpec {
        name,
        help,
        source: Some(FieldSource {
            endpoint: Endpoint::Controller,
            field,
        }),
    }
}

const fn root_group(name: &'static str, field: &'static str, help: &'static str) -> GaugeSpec {
    GaugeSpec {
        name,
        help,
        source: Some(FieldSource {
            endpoint: Endpoint::RootProcessGroup,
            field,
        }),
    }
}

/// All exported gauges, in exposition order.
pub const GAUGES: &[GaugeSpec] = &[
    controller("nifi_active_thread_count", "activeThreadCount", "Number of active threads in NiFi"),
    controller("nifi_terminated_thread_count", "terminatedThreadCount", "Number of terminated threads in NiFi"),
    controller("nifi_files_queued", "flowFilesQueued", "Number of flow files queued in NiFi"),
    controller("nifi_bytes_queued", "bytesQueued", "Number of bytes queued in NiFi"),
    controller("nifi_running_count", "runningCount", "Number of running components in NiFi"),
    controller("nifi_stopped_count", "stoppedCount", "Number of stopped components in NiFi"),
    controller("nifi_invalid_count", "invalidCount", "Number of invalid components in NiFi"),
    controller("nifi_disabled_count", "disabledCount", "Number of disabled components in NiFi"),
    controller("nifi_active_remote_port_count", "activeRemotePortCount", "Number of active remote ports in NiFi"),
    controller("nifi_inactive_remote_port_count", "inactiveRemotePortCount", "Number of inactive remote ports in NiFi"),
    controller("nifi_up_to_date_count", "upToDateCount", "Number of up-to-date components in NiFi"),
    controller("nifi_locally_modified_count", "locallyModifiedCount", "Number of locally modified components in NiFi"),
    controller("nifi_stale_count", "staleCount", "Number of stale components in NiFi"),
    controller("nifi_locally_modified_and_stale_count", "locallyModifiedAndStaleCount", "Number of locally modified and stale components in NiFi"),
    controller("nifi_sync_failure_count", "syncFailureCount", "Number of sync failure components in NiFi"),
    root_group("nifi_process_group_flowfiles_received", "flowFilesReceived", "Number of flowfiles received by the process group"),
    root_group("nifi_process_group_flowfiles_sent", "flowFilesSent", "Number of flowfiles sent by the process group"),
    root_group("nifi_process_group_flowfiles_queued", "flowFilesQueued", "Number of flowfiles queued in the process group"),
    GaugeSpec {
        name: UP_GAUGE,
        help: "Whether the NiFi API is up (1) or down (0)",
        source: None,
    },
];

/// Gauges fed by one endpoint, in catalog order.
pub fn gauges_for(endpoint: Endpoint) -> impl Iterator<Item = &'static GaugeSpec> {
    GAUGES
        .iter()
        .filter(move |g| g.source.is_some_and(|s| s.endpoint == endpoint))
}
