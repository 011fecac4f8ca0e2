//! Proxy client.

use echo_core::chat::RequestFailure;
use echo_core::models::{EchoRequest, EchoResponse};
use gloo_net::http::Request;

/// POST `request` to the echo endpoint at `url`.
///
/// Transport problems, non-2xx statuses and undecodable bodies all come back
/// as a [`RequestFailure`]; none of them are retried.
pub async fn post_echo(url: &str, request: &EchoRequest) -> Result<EchoResponse, RequestFailure> {
    let resp = Request::post(url)
        .json(request)
        .map_err(|e| RequestFailure::Network(e.to_string()))?
        .send()
        .await
        .map_err(|e| RequestFailure::Network(e.to_string()))?;

    if !resp.ok() {
        return Err(RequestFailure::Status(resp.status()));
    }

    resp.json::<EchoResponse>()
        .await
        .map_err(|e| RequestFailure::Network(e.to_string()))
}
