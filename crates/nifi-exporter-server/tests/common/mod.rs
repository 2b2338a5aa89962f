//! Shared fakes for the exporter integration tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]
#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::{routing::get, Json, Router};
use serde_json::{json, Value};
use tokio::time::Instant;

use nifi_exporter_core::error::{ErrorKind, ExporterError, Result};
use nifi_exporter_core::status::Endpoint;
use nifi_exporter_server::upstream::StatusSource;

/// Build an upstream-style error of the given kind.
pub fn error_of(kind: ErrorKind, endpoint: Endpoint) -> ExporterError {
    let url = endpoint.url("http://nifi.test");
    match kind {
        ErrorKind::Connection => ExporterError::Connection {
            url,
            reason: "connection refused".into(),
        },
        ErrorKind::Timeout => ExporterError::Timeout { url },
        ErrorKind::HttpStatus => ExporterError::HttpStatus { url, status: 503 },
        ErrorKind::Decode => ExporterError::Decode("expected value at line 1 column 1".into()),
        other => ExporterError::Internal(format!("unexpected kind {}", other.as_str())),
    }
}

/// Scripted `StatusSource`: each endpoint answers with a fixed document or error.
///
/// A fetch can also be made slow (`delay_each`) or never complete (`hang`).
#[derive(Default)]
pub struct FakeSource {
    replies: Mutex<HashMap<Endpoint, std::result::Result<Value, ErrorKind>>>,
    calls: Mutex<Vec<Endpoint>>,
    started: Mutex<Vec<(Endpoint, Instant)>>,
    fetches: AtomicUsize,
    delay: Mutex<Option<Duration>>,
    hang: AtomicBool,
}

impl FakeSource {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn reply(&self, endpoint: Endpoint, doc: Value) {
        self.replies.lock().unwrap().insert(endpoint, Ok(doc));
    }

    pub fn fail(&self, endpoint: Endpoint, kind: ErrorKind) {
        self.replies.lock().unwrap().insert(endpoint, Err(kind));
    }

    /// Every fetch sleeps `d` (tokio time) before answering.
    pub fn delay_each(&self, d: Duration) {
        *self.delay.lock().unwrap() = Some(d);
    }

    /// Every fetch from now on stays pending forever.
    pub fn hang(&self) {
        self.hang.store(true, Ordering::SeqCst);
    }

    /// Instants at which fetches of `endpoint` began.
    pub fn started_at(&self, endpoint: Endpoint) -> Vec<Instant> {
        self.started
            .lock()
            .unwrap()
            .iter()
            .filter(|(e, _)| *e == endpoint)
            .map(|(_, t)| *t)
            .collect()
    }

    pub fn calls(&self) -> Vec<Endpoint> {
        self.calls.lock().unwrap().clone()
    }

    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StatusSource for FakeSource {
    async fn fetch(&self, endpoint: Endpoint) -> Result<Value> {
        self.calls.lock().unwrap().push(endpoint);
        self.started.lock().unwrap().push((endpoint, Instant::now()));
        self.fetches.fetch_add(1, Ordering::SeqCst);

        if self.hang.load(Ordering::SeqCst) {
            std::future::pending::<()>().await;
        }
        let delay = *self.delay.lock().unwrap();
        if let Some(d) = delay {
            tokio::time::sleep(d).await;
        }

        let reply = self.replies.lock().unwrap().get(&endpoint).cloned();
        match reply {
            Some(Ok(doc)) => Ok(doc),
            Some(Err(kind)) => Err(error_of(kind, endpoint)),
            None => Err(error_of(ErrorKind::Connection, endpoint)),
        }
    }
}

pub fn controller_doc() -> Value {
    json!({
        "controllerStatus": {
            "activeThreadCount": 12,
            "terminatedThreadCount": 1,
            "flowFilesQueued": 4096,
            "bytesQueued": 1572864,
            "runningCount": 87,
            "stoppedCount": 9,
            "invalidCount": 2,
            "disabledCount": 4,
            "activeRemotePortCount": 3,
            "inactiveRemotePortCount": 1,
            "upToDateCount": 5,
            "locallyModifiedCount": 2,
            "staleCount": 1,
            "locallyModifiedAndStaleCount": 0,
            "syncFailureCount": 6
        }
    })
}

pub fn root_group_doc() -> Value {
    json!({
        "processGroupStatus": {
            "id": "root",
            "aggregateSnapshot": {
                "flowFilesReceived": 950,
                "flowFilesSent": 310,
                "flowFilesQueued": 42
            }
        }
    })
}

/// Serve `app` on an ephemeral localhost port.
pub async fn serve(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// A fake NiFi answering both status endpoints with fixed documents.
pub async fn fake_nifi(controller: Value, root_group: Value) -> SocketAddr {
    let app = Router::new()
        .route(
            Endpoint::Controller.path(),
            get(move || {
                let doc = controller.clone();
                async move { Json(doc) }
            }),
        )
        .route(
            Endpoint::RootProcessGroup.path(),
            get(move || {
                let doc = root_group.clone();
                async move { Json(doc) }
            }),
        );
    serve(app).await
}
