//! Shared plumbing for the upstream service clients
//!
//! Both Azure services authenticate the same way (subscription key and region
//! headers) and share the failure taxonomy: transport errors, non-2xx
//! statuses, and bodies that fail to parse.

use std::fmt;

use mediaguard_core::{Error, Result};

/// Header carrying the static API key
pub const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";

/// Header carrying the service region
pub const SUBSCRIPTION_REGION_HEADER: &str = "Ocp-Apim-Subscription-Region";

/// Longest upstream body kept in error details and report diagnostics
const MAX_DETAIL_BYTES: usize = 2048;

/// Connection details for one upstream service.
#[derive(Clone)]
pub struct ServiceCredentials {
    /// Full endpoint URL the request is posted to
    pub endpoint: String,
    /// Static API key, sent as a request header
    pub key: String,
    /// Service region, sent as a request header
    pub region: String,
}

impl ServiceCredentials {
    /// Create credentials for an upstream service
    pub fn new(
        endpoint: impl Into<String>,
        key: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            key: key.into(),
            region: region.into(),
        }
    }
}

impl fmt::Debug for ServiceCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceCredentials")
            .field("endpoint", &self.endpoint)
            .field("key", &"***")
            .field("region", &self.region)
            .finish()
    }
}

/// Send a prepared request and return the response body on a 2xx status.
///
/// Transport failures map to [`Error::Network`], non-2xx statuses to
/// [`Error::HttpStatus`] with the truncated body as detail.
pub(crate) async fn send_checked(request: reqwest::RequestBuilder) -> Result<String> {
    let response = request.send().await.map_err(transport_error)?;
    let status = response.status();
    let body = response.text().await.map_err(transport_error)?;

    if !status.is_success() {
        return Err(Error::http_status(status.as_u16(), truncate_detail(&body)));
    }

    Ok(body)
}

fn transport_error(err: reqwest::Error) -> Error {
    if err.is_timeout() {
        Error::network(format!("request timed out: {err}"))
    } else if err.is_connect() {
        Error::network(format!("connection failed: {err}"))
    } else {
        Error::network(err.to_string())
    }
}

/// Trim an upstream body down to a size safe to carry in diagnostics
pub(crate) fn truncate_detail(body: &str) -> String {
    let body = body.trim();
    if body.len() <= MAX_DETAIL_BYTES {
        return body.to_string();
    }

    let mut end = MAX_DETAIL_BYTES;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}... ({} bytes total)", &body[..end], body.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_key() {
        let credentials = ServiceCredentials::new(
            "https://example.cognitiveservices.azure.com/moderate",
            "secret-key",
            "westeurope",
        );

        let rendered = format!("{credentials:?}");
        assert!(rendered.contains("example.cognitiveservices.azure.com"));
        assert!(rendered.contains("westeurope"));
        assert!(!rendered.contains("secret-key"));
    }

    #[test]
    fn test_truncate_detail_short_body() {
        assert_eq!(truncate_detail("  {\"ok\": true}  "), "{\"ok\": true}");
    }

    #[test]
    fn test_truncate_detail_long_body() {
        let body = "x".repeat(10_000);
        let detail = truncate_detail(&body);

        assert!(detail.len() < body.len());
        assert!(detail.starts_with("xxxx"));
        assert!(detail.ends_with("(10000 bytes total)"));
    }

    #[test]
    fn test_truncate_detail_respects_char_boundaries() {
        // 2048 is not a char boundary in a string of 3-byte chars
        let body = "\u{20AC}".repeat(1_000);
        let detail = truncate_detail(&body);
        assert!(detail.ends_with("(3000 bytes total)"));
    }
}
