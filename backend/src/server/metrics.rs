//! Prometheus middleware construction.

use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};

/// Build the Prometheus middleware exposing `/metrics`.
pub(crate) fn build() -> std::io::Result<PrometheusMetrics> {
    PrometheusMetricsBuilder::new("duelground")
        .endpoint("/metrics")
        .build()
        .map_err(|e| std::io::Error::other(format!("prometheus setup failed: {e}")))
}
