use crate::dtos::{DaySummaryResponse, PatientVisit};
use crate::error::SummaryError;
use crate::prompt::{build_prompt, SYSTEM_INSTRUCTION};
use crate::services::{metrics, CompletionParams};
use crate::startup::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Extension, Json,
};
use service_core::error::AppError;
use service_core::middleware::tracing::RequestId;
use std::time::Instant;
use validator::Validate;

/// `POST /api/generate-day-summary`
pub async fn generate_day_summary(
    State(state): State<AppState>,
    request_id: Option<Extension<RequestId>>,
    payload: Result<Json<Vec<PatientVisit>>, JsonRejection>,
) -> Result<Json<DaySummaryResponse>, AppError> {
    let request_id = request_id
        .map(|Extension(id)| id.0)
        .unwrap_or_else(|| "-".to_string());

    match summarize(&state, &request_id, payload).await {
        Ok(summary) => {
            metrics::record_summary_request("success");
            Ok(Json(DaySummaryResponse { summary }))
        }
        Err(e) => {
            metrics::record_summary_request(e.outcome());
            match &e {
                SummaryError::Validation(msg) | SummaryError::PayloadTooLarge(msg) => {
                    tracing::warn!(request_id = %request_id, error = %msg, "Rejected visit payload");
                }
                SummaryError::Upstream(provider_error) => {
                    metrics::record_provider_error(state.provider.name(), provider_error.kind());
                    tracing::error!(
                        request_id = %request_id,
                        error = %provider_error,
                        "Day summary generation failed"
                    );
                }
            }
            Err(e.into())
        }
    }
}

async fn summarize(
    state: &AppState,
    request_id: &str,
    payload: Result<Json<Vec<PatientVisit>>, JsonRejection>,
) -> Result<String, SummaryError> {
    let Json(visits) = payload.map_err(reject_payload)?;
    validate_visits(&visits, state.config.http.max_visits_per_request)?;

    let prompt = build_prompt(&visits);
    let params = CompletionParams {
        temperature: state.config.openai.temperature,
        max_tokens: state.config.openai.max_tokens,
    };

    tracing::info!(
        request_id = %request_id,
        visit_count = visits.len(),
        prompt_len = prompt.len(),
        model = %state.provider.model(),
        "Generating day summary"
    );

    let started = Instant::now();
    let completion = state
        .provider
        .complete(SYSTEM_INSTRUCTION, &prompt, &params)
        .await;
    metrics::record_provider_latency(
        state.provider.name(),
        state.provider.model(),
        started.elapsed().as_secs_f64(),
    );
    let completion = completion?;

    metrics::record_tokens(
        state.provider.model(),
        completion.input_tokens,
        completion.output_tokens,
    );
    tracing::info!(
        request_id = %request_id,
        input_tokens = ?completion.input_tokens,
        output_tokens = ?completion.output_tokens,
        "Day summary generated"
    );

    Ok(completion.text)
}

fn reject_payload(rejection: JsonRejection) -> SummaryError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        SummaryError::PayloadTooLarge(rejection.body_text())
    } else {
        SummaryError::Validation(rejection.body_text())
    }
}

fn validate_visits(visits: &[PatientVisit], max_visits: usize) -> Result<(), SummaryError> {
    if visits.len() > max_visits {
        return Err(SummaryError::Validation(format!(
            "Too many visits: {} (maximum {})",
            visits.len(),
            max_visits
        )));
    }

    for (index, visit) in visits.iter().enumerate() {
        visit.validate().map_err(|e| {
            SummaryError::Validation(format!("visit[{}]: {}", index, e).replace('\n', "; "))
        })?;
    }

    Ok(())
}
