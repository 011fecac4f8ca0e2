//! Application error types.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use echo_core::models::{EchoRequestError, ErrorResponse};
use thiserror::Error;

use crate::services::gemini::UpstreamError;

/// Convenience alias for handler return types.
pub type AppResult<T> = Result<T, AppError>;

/// `error` field of every 500 that is not a misconfiguration.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error.";

/// Application-level errors with HTTP status mapping.
#[derive(Debug, Error)]
pub enum AppError {
    /// The caller sent something unusable.
    #[error("{0}")]
    Validation(String),

    /// The operator has to fix the deployment.
    #[error("{0}")]
    Misconfigured(String),

    /// The generative API failed or answered garbage.
    #[error("{0}")]
    Upstream(String),

    #[error("{0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Misconfigured(_) | AppError::Upstream(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// JSON body for this error. `details` is only filled for upstream and
    /// internal failures, and only when `expose_details` is set.
    pub fn body(&self, expose_details: bool) -> ErrorResponse {
        match self {
            AppError::Validation(m) | AppError::Misconfigured(m) => ErrorResponse {
                error: m.clone(),
                details: None,
            },
            AppError::Upstream(m) | AppError::Internal(m) => ErrorResponse {
                error: INTERNAL_ERROR_MESSAGE.to_string(),
                details: expose_details.then(|| m.clone()),
            },
        }
    }

    /// Build the response, optionally withholding `details`.
    pub fn into_response_with(self, expose_details: bool) -> Response {
        (self.status(), Json(self.body(expose_details))).into_response()
    }
}

/// Withholds `details`. Handlers that honour `EXPOSE_ERROR_DETAILS` go
/// through [`AppError::into_response_with`] instead.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.into_response_with(false)
    }
}

impl From<EchoRequestError> for AppError {
    fn from(e: EchoRequestError) -> Self {
        AppError::Validation(e.to_string())
    }
}

impl From<UpstreamError> for AppError {
    fn from(e: UpstreamError) -> Self {
        AppError::Upstream(e.to_string())
    }
}
