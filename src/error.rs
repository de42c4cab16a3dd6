// src/error.rs
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::message::{ErrorBody, ErrorResponse, Meta};
use crate::services::governor::AdmissionError;
use crate::services::upstream::UpstreamError;

/// Everything the chat pipeline can fail with. The mapping to status code,
/// error code, and client message is total: each variant lands on exactly one
/// row and depends on nothing but the variant itself.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Admission(#[from] AdmissionError),
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Admission(AdmissionError::RateLimited) => StatusCode::TOO_MANY_REQUESTS,
            AppError::Admission(_) => StatusCode::BAD_REQUEST,
            AppError::Upstream(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Stable machine-readable code; clients branch on this, never on the
    /// message text.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Admission(AdmissionError::EmptyMessage) => "EMPTY_MESSAGE",
            AppError::Admission(AdmissionError::MessageTooLong { .. }) => "MESSAGE_TOO_LONG",
            AppError::Admission(AdmissionError::RateLimited) => "RATE_LIMITED",
            AppError::Upstream(UpstreamError::EmptyResponse) => "EMPTY_UPSTREAM_RESPONSE",
            AppError::Upstream(UpstreamError::Unavailable { .. }) => "UPSTREAM_UNAVAILABLE",
        }
    }

    // Client-facing text. Upstream detail stays in the logs; rate-limited
    // callers learn nothing about the throttle's internals.
    fn client_message(&self) -> String {
        match self {
            AppError::Admission(AdmissionError::RateLimited) => {
                "Too many requests. Please try again shortly.".to_string()
            }
            AppError::Admission(e) => e.to_string(),
            AppError::Upstream(_) => {
                "The assistant is temporarily unavailable. Please try again later.".to_string()
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Upstream(e) => tracing::error!(error = %e, "upstream call failed"),
            AppError::Admission(e) => tracing::warn!(error = %e, "request rejected"),
        }
        let body = ErrorResponse {
            meta: Meta::new(),
            error: ErrorBody {
                code: self.code(),
                message: self.client_message(),
            },
        };
        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_variants() -> Vec<AppError> {
        vec![
            AdmissionError::EmptyMessage.into(),
            AdmissionError::MessageTooLong { limit: 500 }.into(),
            AdmissionError::RateLimited.into(),
            UpstreamError::EmptyResponse.into(),
            UpstreamError::Unavailable {
                detail: "status 500".to_string(),
            }
            .into(),
        ]
    }

    #[test]
    fn every_variant_maps_to_one_status_and_code() {
        let expected = [
            (StatusCode::BAD_REQUEST, "EMPTY_MESSAGE"),
            (StatusCode::BAD_REQUEST, "MESSAGE_TOO_LONG"),
            (StatusCode::TOO_MANY_REQUESTS, "RATE_LIMITED"),
            (StatusCode::SERVICE_UNAVAILABLE, "EMPTY_UPSTREAM_RESPONSE"),
            (StatusCode::SERVICE_UNAVAILABLE, "UPSTREAM_UNAVAILABLE"),
        ];
        for (err, (status, code)) in all_variants().into_iter().zip(expected) {
            assert_eq!(err.status(), status);
            assert_eq!(err.code(), code);
        }
    }

    #[test]
    fn upstream_detail_never_reaches_the_client() {
        let err: AppError = UpstreamError::Unavailable {
            detail: "status 500: secret internals".to_string(),
        }
        .into();
        assert!(!err.client_message().contains("secret"));
    }

    #[test]
    fn rate_limited_message_carries_no_timing_state() {
        let err: AppError = AdmissionError::RateLimited.into();
        let msg = err.client_message();
        assert!(!msg.contains("12"));
        assert!(msg.to_lowercase().contains("try again"));
    }
}
