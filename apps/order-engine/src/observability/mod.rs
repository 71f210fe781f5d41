//! Observability
//!
//! Prometheus metrics recorder plus tracing subscriber setup. Metrics
//! are exposed at `/metrics` on the main HTTP port.

use std::sync::OnceLock;

use metrics::describe_counter;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing_subscriber::EnvFilter;

static PROMETHEUS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Initialize the Prometheus metrics recorder.
///
/// Idempotent; later calls return the handle installed by the first.
///
/// # Panics
///
/// Panics if the recorder cannot be installed.
pub fn init_metrics() -> PrometheusHandle {
    PROMETHEUS_HANDLE
        .get_or_init(|| {
            let handle = PrometheusBuilder::new()
                .install_recorder()
                .expect("failed to install Prometheus recorder");
            register_metrics();
            handle
        })
        .clone()
}

/// Render the current metrics snapshot in Prometheus text format.
///
/// Returns an empty string if metrics were never initialized, which
/// keeps the `/metrics` endpoint harmless in tests.
#[must_use]
pub fn render_metrics() -> String {
    PROMETHEUS_HANDLE
        .get()
        .map(PrometheusHandle::render)
        .unwrap_or_default()
}

fn register_metrics() {
    describe_counter!("orders_placed_total", "Orders successfully committed");
    describe_counter!(
        "checkout_commit_failures_total",
        "Checkouts aborted because the order header insert failed"
    );
    describe_counter!(
        "checkout_partial_commits_total",
        "Checkouts whose header landed but later steps failed"
    );
    describe_counter!(
        "notifications_fanned_out_total",
        "Notification records created by order fan-out"
    );
    describe_counter!(
        "notification_dispatch_failures_total",
        "Order side-effect dispatches that failed"
    );
    describe_counter!(
        "realtime_order_events_total",
        "Order events published to the change feed"
    );
    describe_counter!(
        "realtime_stock_deltas_total",
        "Stock deltas published to the change feed"
    );
    describe_counter!(
        "realtime_notifications_total",
        "Notifications published to the change feed"
    );
}

/// Initialize the tracing subscriber from `RUST_LOG`, defaulting to
/// `info` for this crate.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("order_engine=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
