//! Server configuration
//!
//! Upstream credentials come from a YAML file, the process environment, or
//! both; the environment wins. The image moderation service is required at
//! startup. The text sentiment service is optional but all-or-nothing: a
//! partially configured service is a startup error, not a service that
//! silently half-works.

use std::path::Path;

use mediaguard_analysis::ServiceCredentials;
use mediaguard_core::{Error, Result};
use mediaguard_policy::RiskPolicy;
use serde::{Deserialize, Serialize};
use url::Url;

/// Environment prefix for the image moderation service
pub const CONTENT_SAFETY_ENV_PREFIX: &str = "AZURE_CONTENT_SAFETY";

/// Environment prefix for the text sentiment service
pub const LANGUAGE_ENV_PREFIX: &str = "AZURE_LANGUAGE";

/// Server configuration as loaded, before validation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Image moderation service (required)
    #[serde(default)]
    pub content_safety: ServiceConfig,

    /// Text sentiment service (optional)
    #[serde(default)]
    pub language: ServiceConfig,
}

/// One upstream service as loaded; fields may still be missing
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
}

impl ServerConfig {
    /// Load from a YAML file if it exists, then apply environment overrides
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            serde_yaml::from_str(&content).map_err(|e| {
                Error::config(format!("invalid config file {}: {e}", path.display()))
            })?
        } else {
            Self::default()
        };

        config.apply_env_overrides(|name| std::env::var(name).ok());
        Ok(config)
    }

    /// Apply environment overrides through a lookup function.
    ///
    /// Blank values count as unset.
    pub fn apply_env_overrides(&mut self, get: impl Fn(&str) -> Option<String>) {
        self.content_safety.apply_env(CONTENT_SAFETY_ENV_PREFIX, &get);
        self.language.apply_env(LANGUAGE_ENV_PREFIX, &get);
    }

    /// Validate and resolve into upstream credentials.
    pub fn resolve(&self) -> Result<ResolvedServices> {
        let content_safety = self
            .content_safety
            .credentials(CONTENT_SAFETY_ENV_PREFIX)?
            .ok_or_else(|| {
                Error::config(format!(
                    "image moderation service is not configured: set \
                     {CONTENT_SAFETY_ENV_PREFIX}_ENDPOINT, _KEY and _REGION"
                ))
            })?;

        let language = self.language.credentials(LANGUAGE_ENV_PREFIX)?;

        Ok(ResolvedServices {
            content_safety,
            language,
        })
    }
}

impl ServiceConfig {
    fn apply_env(&mut self, prefix: &str, get: &impl Fn(&str) -> Option<String>) {
        let clean = |value: Option<String>| value.filter(|v| !v.trim().is_empty());

        if let Some(endpoint) = clean(get(&format!("{prefix}_ENDPOINT"))) {
            self.endpoint = Some(endpoint);
        }
        if let Some(key) = clean(get(&format!("{prefix}_KEY"))) {
            self.key = Some(key);
        }
        if let Some(region) = clean(get(&format!("{prefix}_REGION"))) {
            self.region = Some(region);
        }
    }

    fn credentials(&self, prefix: &str) -> Result<Option<ServiceCredentials>> {
        match (&self.endpoint, &self.key, &self.region) {
            (None, None, None) => Ok(None),
            (Some(endpoint), Some(key), Some(region)) => {
                validate_endpoint(endpoint)?;
                Ok(Some(ServiceCredentials::new(endpoint, key, region)))
            }
            _ => {
                let mut missing = Vec::new();
                if self.endpoint.is_none() {
                    missing.push(format!("{prefix}_ENDPOINT"));
                }
                if self.key.is_none() {
                    missing.push(format!("{prefix}_KEY"));
                }
                if self.region.is_none() {
                    missing.push(format!("{prefix}_REGION"));
                }
                Err(Error::config(format!(
                    "incomplete service configuration, missing: {}",
                    missing.join(", ")
                )))
            }
        }
    }
}

impl std::fmt::Debug for ServiceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceConfig")
            .field("endpoint", &self.endpoint)
            .field("key", &self.key.as_ref().map(|_| "***"))
            .field("region", &self.region)
            .finish()
    }
}

/// Fully validated upstream credentials
#[derive(Debug, Clone)]
pub struct ResolvedServices {
    pub content_safety: ServiceCredentials,
    pub language: Option<ServiceCredentials>,
}

/// Endpoints must be absolute http(s) URLs
fn validate_endpoint(endpoint: &str) -> Result<()> {
    let url = Url::parse(endpoint)
        .map_err(|e| Error::config(format!("invalid endpoint URL `{endpoint}`: {e}")))?;

    match url.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(Error::config(format!(
            "endpoint scheme `{scheme}` is not supported, use http or https"
        ))),
    }
}

// ============================================================================
// Non-secret status for the UI
// ============================================================================

/// Configuration snapshot served at `/api/config`; never carries secrets
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigStatus {
    pub image_service: ServiceStatus,
    pub text_service: ServiceStatus,
    pub unsafe_threshold: f32,
    pub sensitive_threshold: f32,
}

/// Presence of one upstream service, endpoint reduced to its host
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceStatus {
    pub configured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
}

impl ConfigStatus {
    pub fn new(services: &ResolvedServices, policy: &RiskPolicy) -> Self {
        Self {
            image_service: ServiceStatus::of(Some(&services.content_safety)),
            text_service: ServiceStatus::of(services.language.as_ref()),
            unsafe_threshold: policy.unsafe_threshold,
            sensitive_threshold: policy.sensitive_threshold,
        }
    }
}

impl ServiceStatus {
    fn of(credentials: Option<&ServiceCredentials>) -> Self {
        match credentials {
            Some(credentials) => Self {
                configured: true,
                host: Url::parse(&credentials.endpoint)
                    .ok()
                    .and_then(|url| url.host_str().map(str::to_string)),
            },
            None => Self {
                configured: false,
                host: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_config() -> ServerConfig {
        ServerConfig {
            content_safety: ServiceConfig {
                endpoint: Some("https://cs.example.com/moderate".to_string()),
                key: Some("cs-key".to_string()),
                region: Some("westeurope".to_string()),
            },
            language: ServiceConfig::default(),
        }
    }

    #[test]
    fn test_default_config_fails_resolution() {
        let err = ServerConfig::default().resolve().unwrap_err();
        assert!(err.to_string().contains("AZURE_CONTENT_SAFETY"));
    }

    #[test]
    fn test_resolve_without_language_service() {
        let services = full_config().resolve().unwrap();
        assert_eq!(services.content_safety.endpoint, "https://cs.example.com/moderate");
        assert!(services.language.is_none());
    }

    #[test]
    fn test_env_overrides_file_values() {
        let mut config = full_config();
        config.apply_env_overrides(|name| match name {
            "AZURE_CONTENT_SAFETY_KEY" => Some("env-key".to_string()),
            _ => None,
        });

        let services = config.resolve().unwrap();
        assert_eq!(services.content_safety.key, "env-key");
        assert_eq!(services.content_safety.region, "westeurope");
    }

    #[test]
    fn test_blank_env_values_are_ignored() {
        let mut config = full_config();
        config.apply_env_overrides(|name| match name {
            "AZURE_CONTENT_SAFETY_KEY" => Some("   ".to_string()),
            _ => None,
        });

        let services = config.resolve().unwrap();
        assert_eq!(services.content_safety.key, "cs-key");
    }

    #[test]
    fn test_language_service_from_env() {
        let mut config = full_config();
        config.apply_env_overrides(|name| match name {
            "AZURE_LANGUAGE_ENDPOINT" => Some("https://lang.example.com/sentiment".to_string()),
            "AZURE_LANGUAGE_KEY" => Some("lang-key".to_string()),
            "AZURE_LANGUAGE_REGION" => Some("westeurope".to_string()),
            _ => None,
        });

        let services = config.resolve().unwrap();
        let language = services.language.unwrap();
        assert_eq!(language.key, "lang-key");
    }

    #[test]
    fn test_partial_language_config_is_startup_error() {
        let mut config = full_config();
        config.language.endpoint = Some("https://lang.example.com".to_string());

        let err = config.resolve().unwrap_err();
        let message = err.to_string();
        assert!(message.contains("AZURE_LANGUAGE_KEY"));
        assert!(message.contains("AZURE_LANGUAGE_REGION"));
        assert!(!message.contains("AZURE_LANGUAGE_ENDPOINT"));
    }

    #[test]
    fn test_invalid_endpoint_is_rejected() {
        let mut config = full_config();
        config.content_safety.endpoint = Some("not a url".to_string());
        assert!(config.resolve().is_err());

        config.content_safety.endpoint = Some("ftp://cs.example.com".to_string());
        let err = config.resolve().unwrap_err();
        assert!(err.to_string().contains("ftp"));
    }

    #[test]
    fn test_load_from_yaml_file() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "content_safety:\n  endpoint: https://cs.example.com/moderate\n  key: file-key\n  region: northeurope"
        )
        .unwrap();

        let config = ServerConfig::load(file.path()).unwrap();
        assert_eq!(config.content_safety.key.as_deref(), Some("file-key"));
        assert_eq!(config.content_safety.region.as_deref(), Some("northeurope"));
    }

    #[test]
    fn test_missing_config_file_falls_back_to_defaults() {
        let config = ServerConfig::load("/nonexistent/mediaguard.yaml").unwrap();
        assert!(config.content_safety.endpoint.is_none());
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = full_config();
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("cs-key"));
        assert!(rendered.contains("cs.example.com"));
    }

    #[test]
    fn test_config_status_reduces_endpoints_to_hosts() {
        let services = full_config().resolve().unwrap();
        let status = ConfigStatus::new(&services, &RiskPolicy::default());

        assert!(status.image_service.configured);
        assert_eq!(status.image_service.host.as_deref(), Some("cs.example.com"));
        assert!(!status.text_service.configured);
        assert_eq!(status.text_service.host, None);
        assert_eq!(status.unsafe_threshold, 0.7);
    }
}
