//! Core types for MediaGuard

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Parsed moderation signals: category name mapped to a score in `[0.0, 1.0]`.
///
/// Schema parsing flattens one level of nested upstream categories into
/// dot-joined names (`"adult.score"`) and turns boolean flags into 1.0 / 0.0,
/// so the policy layer only ever sees this shape.
pub type CategorySignals = BTreeMap<String, f32>;

/// Clamp a raw score into the unit interval.
///
/// NaN clamps to 0.0 so a nonsense upstream value can never push a risk
/// assessment above the thresholds.
pub fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// The outcome label of a content analysis.
///
/// Exactly four values exist; there is no partial or uncertain state beyond
/// `AnalysisFailed`, which is reserved for upstream-call failures and is never
/// produced by threshold classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLabel {
    /// No signal reached the sensitive threshold
    Safe,

    /// At least one signal reached the sensitive threshold
    Sensitive,

    /// At least one signal reached the unsafe threshold
    Unsafe,

    /// The upstream call failed; no content judgement was made
    AnalysisFailed,
}

impl RiskLabel {
    /// Wire/display form of the label
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Safe => "safe",
            Self::Sensitive => "sensitive",
            Self::Unsafe => "unsafe",
            Self::AnalysisFailed => "analysis_failed",
        }
    }

    /// Whether this label is an actual content judgement (not a failure)
    pub fn is_content_label(&self) -> bool {
        !matches!(self, Self::AnalysisFailed)
    }
}

impl fmt::Display for RiskLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a single content analysis.
///
/// Constructed once per call, immutable after construction, and discarded
/// after rendering; nothing is persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Classification outcome
    pub label: RiskLabel,

    /// Overall risk in `[0.0, 1.0]`; present iff classification succeeded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk: Option<f32>,

    /// Per-category signal scores that produced the label
    #[serde(default, skip_serializing_if = "CategorySignals::is_empty")]
    pub categories: CategorySignals,

    /// Raw upstream error or response detail, failure case only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostic: Option<String>,
}

impl AnalysisReport {
    /// Build a successful report carrying a content label
    pub fn classified(label: RiskLabel, risk: f32, categories: CategorySignals) -> Self {
        Self {
            label,
            risk: Some(clamp_unit(risk)),
            categories,
            diagnostic: None,
        }
    }

    /// Build a failure report; the label is always `analysis_failed`
    pub fn failed(diagnostic: impl Into<String>) -> Self {
        Self {
            label: RiskLabel::AnalysisFailed,
            risk: None,
            categories: CategorySignals::new(),
            diagnostic: Some(diagnostic.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_unit_bounds() {
        assert_eq!(clamp_unit(0.5), 0.5);
        assert_eq!(clamp_unit(-0.2), 0.0);
        assert_eq!(clamp_unit(1.7), 1.0);
        assert_eq!(clamp_unit(f32::NEG_INFINITY), 0.0);
        assert_eq!(clamp_unit(f32::INFINITY), 1.0);
    }

    #[test]
    fn test_clamp_unit_nan() {
        assert_eq!(clamp_unit(f32::NAN), 0.0);
    }

    #[test]
    fn test_label_wire_form() {
        assert_eq!(
            serde_json::to_string(&RiskLabel::Safe).unwrap(),
            "\"safe\""
        );
        assert_eq!(
            serde_json::to_string(&RiskLabel::Unsafe).unwrap(),
            "\"unsafe\""
        );
        assert_eq!(
            serde_json::to_string(&RiskLabel::AnalysisFailed).unwrap(),
            "\"analysis_failed\""
        );

        let label: RiskLabel = serde_json::from_str("\"sensitive\"").unwrap();
        assert_eq!(label, RiskLabel::Sensitive);
    }

    #[test]
    fn test_label_display_matches_wire_form() {
        for label in [
            RiskLabel::Safe,
            RiskLabel::Sensitive,
            RiskLabel::Unsafe,
            RiskLabel::AnalysisFailed,
        ] {
            assert_eq!(label.to_string(), label.as_str());
        }
    }

    #[test]
    fn test_classified_report_clamps_risk() {
        let report = AnalysisReport::classified(RiskLabel::Unsafe, 1.4, CategorySignals::new());
        assert_eq!(report.risk, Some(1.0));
        assert!(report.diagnostic.is_none());
    }

    #[test]
    fn test_failed_report_has_no_risk() {
        let report = AnalysisReport::failed("upstream status 500");
        assert_eq!(report.label, RiskLabel::AnalysisFailed);
        assert_eq!(report.risk, None);
        assert!(report.categories.is_empty());
        assert_eq!(report.diagnostic.as_deref(), Some("upstream status 500"));
    }

    #[test]
    fn test_report_json_shape() {
        let mut categories = CategorySignals::new();
        categories.insert("adult".to_string(), 0.12);

        let report = AnalysisReport::classified(RiskLabel::Safe, 0.12, categories);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["label"], "safe");
        assert!(json.get("diagnostic").is_none());

        let failed = AnalysisReport::failed("boom");
        let json = serde_json::to_value(&failed).unwrap();
        assert_eq!(json["label"], "analysis_failed");
        assert!(json.get("risk").is_none());
        assert!(json.get("categories").is_none());
    }
}
