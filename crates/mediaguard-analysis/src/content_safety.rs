//! Image moderation client
//!
//! Posts raw image bytes to the content-safety endpoint and parses the
//! response into category signals:
//! ```text
//! {"categories": {"adult": 0.82, "racy": {"score": 0.4}, "gore": false}}
//! ```
//! Scores clamp into the unit interval, boolean flags become 1.0 / 0.0, and
//! one level of nested objects flattens to dot-joined names (`racy.score`).
//! Anything else is a schema violation.

use bytes::Bytes;
use mediaguard_core::{clamp_unit, CategorySignals, Error, Result};
use serde_json::Value;
use tracing::debug;

use crate::client::{
    send_checked, truncate_detail, ServiceCredentials, SUBSCRIPTION_KEY_HEADER,
    SUBSCRIPTION_REGION_HEADER,
};

/// Client for the upstream image moderation service
#[derive(Debug, Clone)]
pub struct ContentSafetyClient {
    http: reqwest::Client,
    credentials: ServiceCredentials,
}

impl ContentSafetyClient {
    /// Create a client against the configured endpoint
    pub fn new(http: reqwest::Client, credentials: ServiceCredentials) -> Self {
        Self { http, credentials }
    }

    /// Submit raw image bytes and return the parsed category signals.
    ///
    /// The bytes go out unmodified as the request body; format validation is
    /// delegated to the service.
    pub async fn analyze_image(&self, image: Bytes) -> Result<CategorySignals> {
        debug!(bytes = image.len(), "posting image for moderation");

        let request = self
            .http
            .post(&self.credentials.endpoint)
            .header(SUBSCRIPTION_KEY_HEADER, &self.credentials.key)
            .header(SUBSCRIPTION_REGION_HEADER, &self.credentials.region)
            .header(reqwest::header::CONTENT_TYPE, "application/octet-stream")
            .body(image);

        let body = send_checked(request).await?;
        parse_categories(&body)
    }
}

/// Parse a moderation response body into category signals.
///
/// The body must be a JSON object with a `categories` object member. An empty
/// `categories` object is a valid benign response.
fn parse_categories(body: &str) -> Result<CategorySignals> {
    let data: Value = serde_json::from_str(body).map_err(|e| {
        Error::schema(format!("invalid JSON ({e}): {}", truncate_detail(body)))
    })?;

    let categories = data.get("categories").ok_or_else(|| {
        Error::schema(format!(
            "missing `categories` member: {}",
            truncate_detail(body)
        ))
    })?;

    let Value::Object(categories) = categories else {
        return Err(Error::schema(format!(
            "`categories` is not an object: {}",
            truncate_detail(body)
        )));
    };

    let mut signals = CategorySignals::new();
    for (name, value) in categories {
        match value {
            Value::Object(nested) => {
                for (sub_name, leaf) in nested {
                    let name = format!("{name}.{sub_name}");
                    let score = leaf_score(&name, leaf)?;
                    signals.insert(name, score);
                }
            }
            leaf => {
                signals.insert(name.clone(), leaf_score(name, leaf)?);
            }
        }
    }

    Ok(signals)
}

/// Interpret one category leaf: a number in [0, 1] or a boolean flag
fn leaf_score(name: &str, value: &Value) -> Result<f32> {
    match value {
        Value::Number(number) => {
            let score = number.as_f64().ok_or_else(|| {
                Error::schema(format!("category `{name}` score is out of range"))
            })?;
            Ok(clamp_unit(score as f32))
        }
        Value::Bool(flag) => Ok(if *flag { 1.0 } else { 0.0 }),
        other => Err(Error::schema(format!(
            "category `{name}` has a non-numeric score: {other}"
        ))),
    }
}
