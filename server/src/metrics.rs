//! Service metrics.
//!
//! # Exported Metrics
//!
//! ## Counters
//! - `motive_store_calls_total{operation}` - Calls sent to the store by kind
//!   (insert, update, delete, select, rpc)
//! - `motive_outcomes_total{operation,outcome}` - Operation results by
//!   outcome (success, validation, not_found, store, unexpected_format,
//!   exception)

use metrics::describe_counter;
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};
use std::net::SocketAddr;

/// Register all metric descriptions.
///
/// Call once at startup, after a recorder is installed.
pub fn register_metrics() {
    describe_counter!(
        "motive_store_calls_total",
        "Total number of calls sent to the store, by operation"
    );
    describe_counter!(
        "motive_outcomes_total",
        "Total number of operation outcomes, by operation and outcome"
    );

    tracing::debug!("Metrics registered");
}

/// Install the Prometheus recorder with an HTTP listener on `address`.
///
/// Must be called from within a Tokio runtime.
///
/// # Errors
///
/// Returns [`BuildError`] if a recorder is already installed or the listener
/// cannot be created.
pub fn install_exporter(address: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new()
        .with_http_listener(address)
        .install()?;

    tracing::info!(%address, "Prometheus metrics available at /metrics");
    Ok(())
}
