//! Enphase Envoy Forwarder
//!
//! Scrapes the local status pages of an Enphase Envoy solar gateway and
//! publishes the parsed values as a fixed set of sensors.
//!
//! # Architecture
//!
//! A refresh task runs one cycle per interval: fetch `/home` and
//! `/production`, extract each page, merge the results into a snapshot and
//! swap it in. A publisher task reports every new snapshot.
//!
//! # Features
//!
//! - Automatic retry on task failure
//! - Graceful shutdown on SIGTERM/SIGINT
//! - Configurable refresh interval
//! - Timeout protection for hung cycles

mod config;
mod envoy;
mod error;
mod model;
mod sensor;

#[cfg(test)]
mod test_utils;

use crate::envoy::Coordinator;
use std::future::IntoFuture;
use std::sync::Arc;
use tokio::signal::ctrl_c;
use tokio::signal::unix::{signal, SignalKind};
use tokio::task::JoinError;
use tokio::time;
use tokio::time::{sleep, Duration};

/// Application entry point.
///
/// Initializes configuration, builds the coordinator and sensors, and manages
/// the main event loop with signal handling for graceful shutdown.
#[tokio::main]
async fn main() {
    let app_config = config::load_app_config().expect("Failed to load AppConfig");
    tracing_subscriber::fmt()
        .with_max_level(app_config.log_level())
        .init();

    let collector_config =
        Arc::new(config::load_collector_config().expect("Failed to load CollectorConfig"));
    let envoy_config = config::load_envoy_config().expect("Failed to load EnvoyConfig");

    let client = Arc::new(envoy::Client::new());
    let coordinator = Arc::new(Coordinator::new(client, &envoy_config));
    tracing::info!("Scraping Envoy at {}", coordinator.base_url());

    let sensors = sensor::envoy_sensors(&envoy_config.host);
    sensor::spawn_publisher(&coordinator, sensors);

    // Recreated by the main loop whenever the previous cycle ends
    let create_refresh = || -> tokio::task::JoinHandle<()> {
        let config = Arc::clone(&collector_config);
        tokio::spawn(create_refresh_task(
            Arc::clone(&coordinator),
            Duration::from_secs(config.interval_sec),
            "envoy_refresh",
            config.task_timeout_sec,
        ))
    };
    let mut refresh_task = create_refresh();

    let mut sig_term = signal(SignalKind::terminate()).expect("Failed to register SIGTERM handler");
    tracing::info!("Running... Press Ctrl-C or send SIGTERM to terminate.");
    loop {
        tokio::select! {
            _ = sig_term.recv() => {
                tracing::info!("Received SIGTERM. Exiting...");
                break;
            }
            _ = ctrl_c() => {
                tracing::info!("Received SIGINT. Exiting...");
                break;
            }
            result = &mut refresh_task => {
                handle_task_result("envoy_refresh", result);
                refresh_task = create_refresh();
            }
        }
    }
}

/// Bounds one refresh cycle, fetches and extraction included, by
/// `timeout_seconds`.
///
/// An overrun is logged and the cycle dropped; the held snapshot is left as
/// it was.
async fn with_timeout<F>(task_name: &'static str, future: F, timeout_seconds: u64)
where
    F: IntoFuture,
{
    let timeout_duration = Duration::from_secs(timeout_seconds);

    match time::timeout(timeout_duration, future).await {
        Ok(_) => {}
        Err(_) => tracing::error!(
            "Refresh cycle ({}) timed out after {} seconds.",
            task_name,
            timeout_seconds
        ),
    }
}

/// Runs a single refresh cycle, then sleeps for `interval`.
///
/// A failed cycle is logged with its reason; the previous snapshot stays in
/// place and the next task retries.
async fn create_refresh_task(
    coordinator: Arc<Coordinator>,
    interval: Duration,
    task_name: &'static str,
    timeout_seconds: u64,
) {
    with_timeout(
        task_name,
        async {
            match coordinator.refresh().await {
                Ok(snapshot) => tracing::debug!(
                    "Refresh cycle ({}) collected {} metrics",
                    task_name,
                    snapshot.len()
                ),
                Err(e) => tracing::error!("Refresh cycle ({}) failed: {}", task_name, e.reason()),
            }
        },
        timeout_seconds,
    )
    .await;
    sleep(interval).await;
}

/// Handles the result of a tokio task, logging success or failure.
///
/// Failures (panics, cancellation) are logged at error level before the main
/// loop restarts the task.
fn handle_task_result(task_name: &str, result: Result<(), JoinError>) {
    match result {
        Ok(_) => {
            tracing::debug!("Task {} completed.", task_name);
        }
        Err(e) => {
            tracing::error!("Task {} failed: {:?}", task_name, e);
        }
    }
}
