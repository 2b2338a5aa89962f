/// A polled NiFi status endpoint. Cycles visit them in `Endpoint::ALL` order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// `/nifi-api/flow/status`
    Controller,
    /// `/nifi-api/flow/process-groups/root/status`
    RootProcessGroup,
}

impl Endpoint {
    pub const ALL: [Endpoint; 2] = [Endpoint::Controller, Endpoint::RootProcessGroup];

    /// Path below the configured base URL.
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Controller => "/nifi-api/flow/status",
            Endpoint::RootProcessGroup => "/nifi-api/flow/process-groups/root/status",
        }
    }

    /// JSON pointer to the nested object holding the counters.
    pub fn status_pointer(self) -> &'static str {
        match self {
            Endpoint::Controller => "/controllerStatus",
            Endpoint::RootProcessGroup => "/processGroupStatus/aggregateSnapshot",
        }
    }

    /// Short name used in logs and metric labels.
    pub fn label(self) -> &'static str {
        match self {
            Endpoint::Controller => "controller",
            Endpoint::RootProcessGroup => "root_process_group",
        }
    }

    /// Full URL for this endpoint. Trailing slashes on `base` are ignored.
    pub fn url(self, base: &str) -> String {
        format!("{}{}", base.trim_end_matches('/'), self.path())
    }
}
