//! MediaGuard Core
//!
//! Core types and error handling shared across MediaGuard components.
//!
//! This crate provides:
//! - The four-value risk label and the analysis report returned to callers
//! - The parsed moderation-signal structure produced by schema parsing
//! - Error types covering the upstream-call failure taxonomy

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{clamp_unit, AnalysisReport, CategorySignals, RiskLabel};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::types::{clamp_unit, AnalysisReport, CategorySignals, RiskLabel};
}
