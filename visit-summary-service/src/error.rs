//! Failures of the day summary operation.

use crate::services::ProviderError;
use service_core::error::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SummaryError {
    /// The request body could not be accepted: bad JSON, wrong shape, failed
    /// field validation or too many visits.
    #[error("{0}")]
    Validation(String),

    /// The body went over the configured size limit while being read.
    #[error("{0}")]
    PayloadTooLarge(String),

    /// The model call failed.
    #[error("Model service error: {0}")]
    Upstream(#[from] ProviderError),
}

impl SummaryError {
    /// Label for the `summary_requests_total` outcome.
    pub fn outcome(&self) -> &'static str {
        match self {
            SummaryError::Validation(_) => "validation_error",
            SummaryError::PayloadTooLarge(_) => "payload_too_large",
            SummaryError::Upstream(_) => "upstream_error",
        }
    }
}

impl From<SummaryError> for AppError {
    fn from(err: SummaryError) -> Self {
        match err {
            SummaryError::Validation(msg) => AppError::UnprocessableEntity(msg),
            SummaryError::PayloadTooLarge(msg) => AppError::PayloadTooLarge(msg),
            SummaryError::Upstream(e) => AppError::UpstreamError(e.to_string()),
        }
    }
}
