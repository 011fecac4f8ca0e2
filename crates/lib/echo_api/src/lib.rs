//! # echo_api
//!
//! HTTP API library for Echo Chamber.

pub mod config;
pub mod error;
pub mod handlers;
pub mod services;

use std::any::Any as PanicPayload;

use axum::Router;
use axum::response::Response;
use axum::routing::post;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::config::ApiConfig;
use crate::error::AppError;
use crate::handlers::echo;

/// Path of the echo endpoint.
pub const POST_API_ECHO: &str = "/api/echo";

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// API configuration.
    pub config: ApiConfig,
    /// Outbound HTTP client for the generative API.
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }
}

/// Builds the Axum router with all routes and shared state.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let expose_details = state.config.expose_error_details;

    Router::new()
        .route(POST_API_ECHO, post(echo::echo_handler))
        .layer(CatchPanicLayer::custom(
            move |payload: Box<dyn PanicPayload + Send + 'static>| {
                panic_response(payload, expose_details)
            },
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// A handler panicked: log it and answer like any other internal error.
fn panic_response(
    payload: Box<dyn PanicPayload + Send + 'static>,
    expose_details: bool,
) -> Response {
    let message = if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "handler panicked".to_string()
    };
    error!(panic = %message, "handler panicked");
    AppError::Internal(message).into_response_with(expose_details)
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use super::*;

    async fn body_json(resp: Response) -> serde_json::Value {
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .expect("read body");
        serde_json::from_slice(&body).expect("parse JSON")
    }

    #[tokio::test]
    async fn panics_become_internal_errors() {
        let resp = panic_response(Box::new("boom"), true);
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let json = body_json(resp).await;
        assert_eq!(json["error"], "Internal server error.");
        assert_eq!(json["details"], "boom");
    }

    #[tokio::test]
    async fn panic_details_follow_config() {
        let resp = panic_response(Box::new(String::from("secret")), false);
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(resp).await,
            serde_json::json!({ "error": "Internal server error." })
        );
    }
}
