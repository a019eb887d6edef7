//! Text sentiment client
//!
//! Posts text to the language endpoint in the documents format:
//! ```text
//! {"documents": [{"id": "1", "language": "en", "text": "..."}]}
//! ```
//! The negative-sentiment confidence of the first returned document becomes
//! the `negative_sentiment` category signal.

use mediaguard_core::{clamp_unit, CategorySignals, Error, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::client::{
    send_checked, truncate_detail, ServiceCredentials, SUBSCRIPTION_KEY_HEADER,
    SUBSCRIPTION_REGION_HEADER,
};

/// Category name the text risk is surfaced under
pub const NEGATIVE_SENTIMENT_CATEGORY: &str = "negative_sentiment";

/// Longest text the service accepts; longer submissions are truncated
pub const MAX_TEXT_CHARS: usize = 5_000;

/// Client for the upstream text sentiment service
#[derive(Debug, Clone)]
pub struct LanguageClient {
    http: reqwest::Client,
    credentials: ServiceCredentials,
}

impl LanguageClient {
    /// Create a client against the configured endpoint
    pub fn new(http: reqwest::Client, credentials: ServiceCredentials) -> Self {
        Self { http, credentials }
    }

    /// Submit text for sentiment scoring and return the parsed signal.
    pub async fn analyze_text(&self, text: &str) -> Result<CategorySignals> {
        let text = truncate_chars(text, MAX_TEXT_CHARS);
        debug!(chars = text.chars().count(), "posting text for sentiment scoring");

        let payload = SentimentRequest {
            documents: vec![SentimentDocument {
                id: "1",
                language: "en",
                text,
            }],
        };

        let request = self
            .http
            .post(&self.credentials.endpoint)
            .header(SUBSCRIPTION_KEY_HEADER, &self.credentials.key)
            .header(SUBSCRIPTION_REGION_HEADER, &self.credentials.region)
            .json(&payload);

        let body = send_checked(request).await?;
        parse_sentiment(&body)
    }
}

/// Truncate to a character count, never splitting a code point
fn truncate_chars(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((index, _)) => &text[..index],
        None => text,
    }
}

/// Parse a sentiment response body into the negative-sentiment signal.
fn parse_sentiment(body: &str) -> Result<CategorySignals> {
    let response: SentimentResponse = serde_json::from_str(body).map_err(|e| {
        Error::schema(format!(
            "unexpected sentiment response ({e}): {}",
            truncate_detail(body)
        ))
    })?;

    let document = response.documents.first().ok_or_else(|| {
        Error::schema(format!(
            "sentiment response has no documents: {}",
            truncate_detail(body)
        ))
    })?;

    let negative = clamp_unit(document.confidence_scores.negative);

    let mut signals = CategorySignals::new();
    signals.insert(NEGATIVE_SENTIMENT_CATEGORY.to_string(), negative);
    Ok(signals)
}

// =============================================================================
// Wire structures
// =============================================================================

#[derive(Debug, Serialize)]
struct SentimentRequest<'a> {
    documents: Vec<SentimentDocument<'a>>,
}

#[derive(Debug, Serialize)]
struct SentimentDocument<'a> {
    id: &'a str,
    language: &'a str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct SentimentResponse {
    documents: Vec<SentimentResult>,
}

#[derive(Debug, Deserialize)]
struct SentimentResult {
    #[serde(rename = "confidenceScores")]
    confidence_scores: ConfidenceScores,
}

#[derive(Debug, Deserialize)]
struct ConfidenceScores {
    negative: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sentiment_response() {
        let body = r#"{
            "documents": [
                {"id": "1", "confidenceScores": {"positive": 0.1, "neutral": 0.25, "negative": 0.65}}
            ]
        }"#;

        let signals = parse_sentiment(body).unwrap();
        assert_eq!(signals.len(), 1);
        assert_eq!(signals[NEGATIVE_SENTIMENT_CATEGORY], 0.65);
    }

    #[test]
    fn test_parse_sentiment_clamps_score() {
        let body = r#"{"documents": [{"id": "1", "confidenceScores": {"negative": 1.8}}]}"#;
        let signals = parse_sentiment(body).unwrap();
        assert_eq!(signals[NEGATIVE_SENTIMENT_CATEGORY], 1.0);
    }

    #[test]
    fn test_empty_documents_is_schema_error() {
        let err = parse_sentiment(r#"{"documents": []}"#).unwrap_err();
        assert!(matches!(err, Error::Schema(_)));
    }

    #[test]
    fn test_missing_scores_is_schema_error() {
        let err = parse_sentiment(r#"{"documents": [{"id": "1"}]}"#).unwrap_err();
        assert!(matches!(err, Error::Schema(_)));

        let err = parse_sentiment(r#"{"foo": "bar"}"#).unwrap_err();
        assert!(matches!(err, Error::Schema(_)));
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("short", 5_000), "short");
        assert_eq!(truncate_chars("abcdef", 3), "abc");

        let long = "a".repeat(6_000);
        assert_eq!(truncate_chars(&long, MAX_TEXT_CHARS).len(), 5_000);
    }

    #[test]
    fn test_truncate_chars_counts_code_points() {
        let text = "\u{20AC}".repeat(10);
        let truncated = truncate_chars(&text, 4);
        assert_eq!(truncated.chars().count(), 4);
        assert_eq!(truncated.len(), 12);
    }

    #[test]
    fn test_request_payload_shape() {
        let payload = SentimentRequest {
            documents: vec![SentimentDocument {
                id: "1",
                language: "en",
                text: "hello",
            }],
        };

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["documents"][0]["id"], "1");
        assert_eq!(json["documents"][0]["language"], "en");
        assert_eq!(json["documents"][0]["text"], "hello");
    }
}
