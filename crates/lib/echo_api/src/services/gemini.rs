//! Generative API client.
//!
//! One `generateContent` POST per call, authenticated with the `key` query
//! parameter. No retries: a failure is reported to the caller as-is.

use echo_core::gemini::{self, GenerateContentRequest};
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error};

use crate::config::ApiConfig;

/// Errors from the upstream call.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("Upstream request failed: {0}")]
    Transport(String),

    /// Non-2xx status. Carries the reason phrase only; the body stays in the
    /// server log.
    #[error("API error: {reason}")]
    Status { status: u16, reason: String },

    #[error("Upstream response parse error: {0}")]
    Decode(String),
}

/// Ask the upstream model to answer `query` under `system_prompt`.
///
/// Returns the generated text, or the fallback text when the envelope has
/// none.
pub async fn generate(
    client: &Client,
    config: &ApiConfig,
    api_key: &str,
    query: &str,
    system_prompt: &str,
) -> Result<String, UpstreamError> {
    let url = config.generate_url();
    debug!(url = %url, model = %config.upstream_model, "calling generative API");

    // The URL carries the credential, so errors are reported without it.
    let resp = client
        .post(&url)
        .query(&[("key", api_key)])
        .json(&GenerateContentRequest::new(query, system_prompt))
        .send()
        .await
        .map_err(|e| UpstreamError::Transport(e.without_url().to_string()))?;

    let status = resp.status();
    if !status.is_success() {
        let body = resp
            .text()
            .await
            .unwrap_or_else(|_| "<no body>".to_string());
        error!(status = status.as_u16(), body = %body, "generative API error");
        return Err(UpstreamError::Status {
            status: status.as_u16(),
            reason: status
                .canonical_reason()
                .map(str::to_string)
                .unwrap_or_else(|| status.as_str().to_string()),
        });
    }

    let envelope: Value = resp
        .json()
        .await
        .map_err(|e| UpstreamError::Decode(e.without_url().to_string()))?;

    Ok(gemini::generated_text(&envelope).to_string())
}
