//! Shared application state

use std::sync::Arc;

use mediaguard_analysis::AnalysisEngine;
use metrics_exporter_prometheus::PrometheusHandle;

use crate::config::ConfigStatus;

/// State shared across all requests.
///
/// Everything here is immutable after startup; handlers only read it.
#[derive(Clone)]
pub struct AppState {
    /// Analysis engine driving the upstream calls
    pub engine: Arc<AnalysisEngine>,

    /// Non-secret configuration snapshot for the UI
    pub config_status: Arc<ConfigStatus>,

    /// Prometheus metrics handle for rendering
    pub metrics_handle: PrometheusHandle,
}

impl AppState {
    pub fn new(
        engine: AnalysisEngine,
        config_status: ConfigStatus,
        metrics_handle: PrometheusHandle,
    ) -> Self {
        Self {
            engine: Arc::new(engine),
            config_status: Arc::new(config_status),
            metrics_handle,
        }
    }
}
