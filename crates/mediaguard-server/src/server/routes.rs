use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use mediaguard_analysis::AnalysisInput;
use tracing::debug;

use crate::state::AppState;

// ============================================================================
// Health and status endpoints
// ============================================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

pub async fn get_config(State(state): State<AppState>) -> impl IntoResponse {
    let status = state.config_status.as_ref().clone();
    Json(status)
}

pub async fn metrics(State(state): State<AppState>) -> String {
    state.metrics_handle.render()
}

// ============================================================================
// Analysis endpoint
// ============================================================================

/// Analyze an uploaded submission.
///
/// Accepts multipart fields `image` (file) and `text`; at least one must be
/// present. A submission with neither is rejected with 422. Everything else
/// answers 200 with a report; upstream failures surface as the
/// `analysis_failed` label inside the report, not as an HTTP error.
pub async fn analyze(State(state): State<AppState>, multipart: Multipart) -> Response {
    metrics::counter!("mediaguard_requests_total").increment(1);

    let input = match read_submission(multipart).await {
        Ok(input) => input,
        Err(err) => {
            debug!(error = %err, "rejecting malformed upload");
            return reject(format!("malformed upload: {err}"));
        }
    };

    if input.is_empty() {
        return reject("provide an image, text, or both".to_string());
    }

    let report = state.engine.analyze(input).await;
    Json(report).into_response()
}

/// Pull the known fields out of the multipart stream; unknown fields are
/// skipped.
async fn read_submission(
    mut multipart: Multipart,
) -> Result<AnalysisInput, axum::extract::multipart::MultipartError> {
    let mut input = AnalysisInput::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "image" => input.image = Some(field.bytes().await?),
            "text" => input.text = Some(field.text().await?),
            _ => {}
        }
    }

    Ok(input)
}

fn reject(detail: String) -> Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(serde_json::json!({ "error": detail })),
    )
        .into_response()
}
