//! MediaGuard Server
//!
//! Serves the upload page, the analysis API, and the operational endpoints:
//!
//! - `GET /` upload page (embedded assets)
//! - `POST /api/analyze` multipart submission, answered with an analysis report
//! - `GET /api/health` liveness
//! - `GET /api/config` non-secret configuration status for the UI
//! - `GET /metrics` Prometheus exposition

pub mod cli;
pub mod config;
pub mod server;
pub mod state;

pub use cli::{Cli, Commands};
pub use config::{ConfigStatus, ResolvedServices, ServerConfig, ServiceConfig};
pub use server::{build_app, run_server, MAX_UPLOAD_BYTES};
pub use state::AppState;
