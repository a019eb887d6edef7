//! Risk policy definition and threshold classification

use mediaguard_core::{clamp_unit, CategorySignals, Error, Result, RiskLabel};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Threshold policy mapping an overall risk score to a content label.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskPolicy {
    /// Risk at or above this value classifies as `unsafe`
    #[serde(default = "default_unsafe_threshold")]
    pub unsafe_threshold: f32,

    /// Risk at or above this value (but below `unsafe_threshold`)
    /// classifies as `sensitive`
    #[serde(default = "default_sensitive_threshold")]
    pub sensitive_threshold: f32,
}

impl RiskPolicy {
    /// Load a policy from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let policy: Self = serde_yaml::from_str(yaml)
            .map_err(|e| Error::config(format!("invalid policy: {e}")))?;
        policy.validate()?;
        Ok(policy)
    }

    /// Load a policy from a file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Check that both thresholds lie in the unit interval and are ordered
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("unsafe_threshold", self.unsafe_threshold),
            ("sensitive_threshold", self.sensitive_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::config(format!(
                    "{name} must lie in [0.0, 1.0], got {value}"
                )));
            }
        }

        if self.sensitive_threshold > self.unsafe_threshold {
            return Err(Error::config(format!(
                "sensitive_threshold ({}) must not exceed unsafe_threshold ({})",
                self.sensitive_threshold, self.unsafe_threshold
            )));
        }

        Ok(())
    }

    /// Classify an overall risk score.
    ///
    /// Total over all of `f32`: the score is clamped into the unit interval
    /// first (NaN clamps to 0.0), so every input maps to exactly one of
    /// `Safe`, `Sensitive`, `Unsafe`. `AnalysisFailed` is never produced
    /// here; it is reserved for upstream-call failures.
    pub fn classify(&self, risk: f32) -> RiskLabel {
        let risk = clamp_unit(risk);

        if risk >= self.unsafe_threshold {
            RiskLabel::Unsafe
        } else if risk >= self.sensitive_threshold {
            RiskLabel::Sensitive
        } else {
            RiskLabel::Safe
        }
    }
}

impl Default for RiskPolicy {
    fn default() -> Self {
        Self {
            unsafe_threshold: default_unsafe_threshold(),
            sensitive_threshold: default_sensitive_threshold(),
        }
    }
}

/// Overall risk of a parsed signal map: the largest category score, clamped.
///
/// An empty map carries no signal and scores 0.0.
pub fn risk_from_signals(signals: &CategorySignals) -> f32 {
    signals
        .values()
        .copied()
        .fold(0.0_f32, |acc, score| acc.max(clamp_unit(score)))
}

fn default_unsafe_threshold() -> f32 {
    0.7
}

fn default_sensitive_threshold() -> f32 {
    0.3
}
