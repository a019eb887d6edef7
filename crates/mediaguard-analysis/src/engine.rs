//! Analysis engine
//!
//! The engine owns the upstream clients and the risk policy. `analyze` is the
//! single entry point: it runs the configured services over a submission,
//! merges their category signals, and maps the overall risk to a label.
//!
//! Failure discipline: `analyze` is total. Any upstream failure becomes a
//! report labeled `analysis_failed` carrying the failure detail; the caller
//! never needs fault handling of its own and never receives a guessed label.

use std::time::{Duration, Instant};

use bytes::Bytes;
use mediaguard_core::{AnalysisReport, CategorySignals, Error, Result};
use mediaguard_policy::{risk_from_signals, RiskPolicy};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::client::ServiceCredentials;
use crate::content_safety::ContentSafetyClient;
use crate::language::LanguageClient;

/// Timeout applied to every upstream call
pub const UPSTREAM_TIMEOUT_SECS: u64 = 30;

/// One user submission: optional image bytes plus optional text.
#[derive(Debug, Clone, Default)]
pub struct AnalysisInput {
    /// Raw image bytes, exactly as uploaded
    pub image: Option<Bytes>,
    /// Free-form text to score
    pub text: Option<String>,
}

impl AnalysisInput {
    /// Submission holding only an image
    pub fn image(image: impl Into<Bytes>) -> Self {
        Self {
            image: Some(image.into()),
            text: None,
        }
    }

    /// Submission holding only text
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            image: None,
            text: Some(text.into()),
        }
    }

    /// Submission holding both inputs
    pub fn new(image: impl Into<Bytes>, text: impl Into<String>) -> Self {
        Self {
            image: Some(image.into()),
            text: Some(text.into()),
        }
    }

    /// True when the submission carries nothing to analyze
    pub fn is_empty(&self) -> bool {
        let no_image = self.image.as_ref().map_or(true, |image| image.is_empty());
        let no_text = self
            .text
            .as_deref()
            .map_or(true, |text| text.trim().is_empty());
        no_image && no_text
    }
}

/// Orchestrates the upstream calls for one submission and maps the merged
/// signals to an [`AnalysisReport`].
pub struct AnalysisEngine {
    content_safety: ContentSafetyClient,
    language: Option<LanguageClient>,
    policy: RiskPolicy,
}

impl AnalysisEngine {
    /// Build an engine from service credentials and a risk policy.
    ///
    /// The content-safety service is required; the language service is
    /// optional and text submissions fail while it is unconfigured.
    pub fn new(
        content_safety: ServiceCredentials,
        language: Option<ServiceCredentials>,
        policy: RiskPolicy,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(UPSTREAM_TIMEOUT_SECS))
            .build()
            .map_err(|e| Error::config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            content_safety: ContentSafetyClient::new(http.clone(), content_safety),
            language: language.map(|credentials| LanguageClient::new(http, credentials)),
            policy,
        })
    }

    /// True when the optional text service is configured
    pub fn language_configured(&self) -> bool {
        self.language.is_some()
    }

    /// The risk policy this engine classifies with
    pub fn policy(&self) -> &RiskPolicy {
        &self.policy
    }

    /// Analyze one submission.
    ///
    /// Stateless: identical inputs against identical upstream behavior yield
    /// identical reports.
    pub async fn analyze(&self, input: AnalysisInput) -> AnalysisReport {
        let analysis_id = Uuid::new_v4();
        let started = Instant::now();

        let report = match self.run(&input).await {
            Ok((risk, categories)) => {
                let label = self.policy.classify(risk);
                AnalysisReport::classified(label, risk, categories)
            }
            Err(err) => {
                warn!(%analysis_id, error = %err, "analysis failed");
                metrics::counter!("mediaguard_upstream_failures_total", "kind" => err.kind())
                    .increment(1);
                AnalysisReport::failed(err.to_string())
            }
        };

        let elapsed = started.elapsed();
        metrics::histogram!("mediaguard_analysis_latency_ms").record(elapsed.as_secs_f64() * 1000.0);
        metrics::counter!("mediaguard_analyses_total", "label" => report.label.as_str())
            .increment(1);

        info!(
            %analysis_id,
            label = %report.label,
            elapsed_ms = elapsed.as_millis() as u64,
            "analysis complete"
        );

        report
    }

    /// Fallible inner path; `analyze` converts errors into the failure label.
    async fn run(&self, input: &AnalysisInput) -> Result<(f32, CategorySignals)> {
        let image = input.image.as_ref().filter(|image| !image.is_empty());
        let text = input
            .text
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty());

        if image.is_none() && text.is_none() {
            return Err(Error::invalid_input("no content submitted for analysis"));
        }

        let mut risk = 0.0_f32;
        let mut categories = CategorySignals::new();

        if let Some(image) = image {
            let signals = self.content_safety.analyze_image(image.clone()).await?;
            risk = risk.max(risk_from_signals(&signals));
            debug!(image_risk = risk, signals = signals.len(), "image signals parsed");
            categories.extend(signals);
        }

        // Text signals land second so they win category-name collisions.
        if let Some(text) = text {
            let language = self.language.as_ref().ok_or_else(|| {
                Error::config("text submitted but the language service is not configured")
            })?;
            let signals = language.analyze_text(text).await?;
            risk = risk.max(risk_from_signals(&signals));
            debug!(overall_risk = risk, "text signals parsed");
            categories.extend(signals);
        }

        Ok((risk, categories))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_emptiness() {
        assert!(AnalysisInput::default().is_empty());
        assert!(AnalysisInput::text("   ").is_empty());
        assert!(AnalysisInput::image(Vec::new()).is_empty());
        assert!(!AnalysisInput::text("check this").is_empty());
        assert!(!AnalysisInput::image(vec![0xFF, 0xD8]).is_empty());
    }
}
