//! MediaGuard
//!
//! Web UI that forwards uploaded images and text to cloud moderation
//! services and maps their responses to a safety label.

use std::net::SocketAddr;

use anyhow::Result;
use clap::Parser;
use mediaguard_analysis::AnalysisEngine;
use mediaguard_policy::RiskPolicy;
use mediaguard_server::cli::{Cli, Commands};
use mediaguard_server::config::{ConfigStatus, ServerConfig};
use mediaguard_server::server::run_server;
use mediaguard_server::state::AppState;
use metrics_exporter_prometheus::PrometheusHandle;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            address,
            port,
            config,
            policy,
            verbose,
        } => {
            init_logging(verbose);

            info!("Starting MediaGuard");

            let config = ServerConfig::load(&config)?;
            let services = config.resolve()?;
            info!(
                "Image moderation configured; text sentiment {}",
                if services.language.is_some() {
                    "enabled"
                } else {
                    "disabled"
                }
            );

            let policy = load_policy(&policy)?;
            let metrics_handle = init_metrics()?;

            let config_status = ConfigStatus::new(&services, &policy);
            let engine = AnalysisEngine::new(services.content_safety, services.language, policy)?;
            let state = AppState::new(engine, config_status, metrics_handle);

            let addr: SocketAddr = format!("{}:{}", address, port).parse()?;
            info!("Open http://{} in your browser", addr);

            run_server(state, addr).await?;
        }
    }

    Ok(())
}

/// Load the risk policy, falling back to default thresholds
fn load_policy(path: &str) -> Result<RiskPolicy> {
    if std::path::Path::new(path).exists() {
        let policy = RiskPolicy::from_file(path)?;
        info!("Loaded risk policy from: {}", path);
        Ok(policy)
    } else {
        info!("Policy file not found, using default thresholds: {}", path);
        Ok(RiskPolicy::default())
    }
}

/// Initialize tracing/logging
fn init_logging(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        "mediaguard_server=debug,mediaguard_analysis=debug,tower_http=debug"
    } else {
        "mediaguard_server=info,mediaguard_analysis=info,tower_http=warn"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Initialize the metrics exporter and return the handle for rendering
fn init_metrics() -> Result<PrometheusHandle> {
    use metrics_exporter_prometheus::PrometheusBuilder;

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("Failed to install metrics: {e}"))?;

    metrics::describe_counter!(
        "mediaguard_requests_total",
        "Total number of analysis requests received"
    );
    metrics::describe_counter!(
        "mediaguard_analyses_total",
        "Completed analyses by result label"
    );
    metrics::describe_counter!(
        "mediaguard_upstream_failures_total",
        "Upstream service call failures by kind"
    );
    metrics::describe_histogram!(
        "mediaguard_analysis_latency_ms",
        metrics::Unit::Milliseconds,
        "End-to-end analysis latency in milliseconds"
    );

    info!("Metrics exporter initialized");
    Ok(handle)
}
