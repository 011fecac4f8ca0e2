//! Echo endpoint — answers a query in the voice of the chosen persona.
//!
//! `POST /api/echo` validates the body, resolves the persona prompt, makes a
//! single upstream call and returns the generated text.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::response::{IntoResponse, Response};
use echo_core::models::{EchoRequestBody, EchoResponse};
use tracing::{error, info};

use crate::AppState;
use crate::error::{AppError, AppResult};
use crate::services::gemini;

/// Returned when no upstream credential is configured.
pub const MISSING_API_KEY_MESSAGE: &str =
    "API key is not set. Please set the API_KEY environment variable.";

/// `POST /api/echo` — generate a persona-flavoured reply.
pub async fn echo_handler(
    State(state): State<AppState>,
    body: Result<Json<EchoRequestBody>, JsonRejection>,
) -> Response {
    match echo(&state, body).await {
        Ok(reply) => Json(reply).into_response(),
        Err(e) => {
            if e.status().is_server_error() {
                error!(error = %e, "echo request failed");
            }
            e.into_response_with(state.config.expose_error_details)
        }
    }
}

async fn echo(
    state: &AppState,
    body: Result<Json<EchoRequestBody>, JsonRejection>,
) -> AppResult<EchoResponse> {
    let Json(body) = body.map_err(|e| AppError::Validation(e.body_text()))?;
    let request = body.validate()?;

    let api_key = state
        .config
        .api_key
        .as_deref()
        .ok_or_else(|| AppError::Misconfigured(MISSING_API_KEY_MESSAGE.into()))?;

    info!(persona = %request.persona, query_len = request.query.len(), "echo request");

    let response = gemini::generate(
        &state.http,
        &state.config,
        api_key,
        &request.query,
        request.persona.prompt(),
    )
    .await?;

    Ok(EchoResponse { response })
}
