//! MediaGuard Policy
//!
//! The pure mapping from parsed moderation signals to a risk label.
//!
//! Risk extraction and threshold classification live here, away from any
//! network code, so the mapping stays independently testable: given a
//! [`CategorySignals`](mediaguard_core::CategorySignals) value, the outcome is
//! a deterministic function of the policy thresholds and nothing else.
//!
//! Policies are defined in YAML:
//!
//! ```yaml
//! unsafe_threshold: 0.7
//! sensitive_threshold: 0.3
//! ```

pub mod policy;

pub use policy::{risk_from_signals, RiskPolicy};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::policy::{risk_from_signals, RiskPolicy};
}
