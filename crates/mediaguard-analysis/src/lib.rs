//! MediaGuard Analysis
//!
//! Typed clients for the upstream moderation services and the engine that
//! turns a user submission into an [`AnalysisReport`](mediaguard_core::AnalysisReport):
//!
//! - [`ContentSafetyClient`]: image moderation (raw bytes in, category scores out)
//! - [`LanguageClient`]: text sentiment (negative-sentiment confidence as a signal)
//! - [`AnalysisEngine`]: calls the configured services, merges their signals,
//!   and applies the risk policy
//!
//! The engine never surfaces an error to its caller: every upstream failure
//! (transport, non-2xx status, unexpected schema) is normalized into a report
//! labeled `analysis_failed`, with the failure detail attached for diagnostics.

pub mod client;
pub mod content_safety;
pub mod engine;
pub mod language;

pub use client::ServiceCredentials;
pub use content_safety::ContentSafetyClient;
pub use engine::{AnalysisEngine, AnalysisInput, UPSTREAM_TIMEOUT_SECS};
pub use language::{LanguageClient, MAX_TEXT_CHARS, NEGATIVE_SENTIMENT_CATEGORY};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::client::ServiceCredentials;
    pub use crate::content_safety::ContentSafetyClient;
    pub use crate::engine::{AnalysisEngine, AnalysisInput};
    pub use crate::language::LanguageClient;
}
