//! NiFi exporter
//!
//! - Polls `{NIFI_URL}/nifi-api/flow/status` and the root process group status
//! - Serves the gauges at `/metrics` and a static page at `/`
//! - Poll loop and HTTP server run concurrently until SIGINT/SIGTERM

use std::process::ExitCode;

use tokio::sync::watch;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use nifi_exporter_core::error::{ExporterError, Result};
use nifi_exporter_server::{app_state::AppState, collect::Scheduler, config, router};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(kind = e.kind().as_str(), error = %e, "nifi-exporter failed");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let cfg = config::load_from_env()?;
    let listen = cfg.exporter.listen_addr()?;

    let state = AppState::new(cfg);
    let scheduler = state.scheduler()?;

    // Bind before polling starts: a taken port aborts startup.
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| ExporterError::Bind {
            addr: listen.to_string(),
            reason: e.to_string(),
        })?;

    tracing::info!(%listen, "server started");
    tracing::info!(upstream = %state.cfg().upstream.base_url, "collecting metrics");

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let poller = scheduler.spawn(shutdown_rx);

    let app = router::build_router(state.clone());
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(state, shutdown_tx))
        .await
        .map_err(|e| ExporterError::Internal(format!("server failed: {e}")))?;

    Scheduler::join(poller).await;
    tracing::info!("nifi-exporter stopped");
    Ok(())
}

async fn shutdown_signal(state: AppState, shutdown_tx: watch::Sender<bool>) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "cannot listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "cannot listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("signal received, starting graceful shutdown");
    state.set_draining();
    let _ = shutdown_tx.send(true);
}
