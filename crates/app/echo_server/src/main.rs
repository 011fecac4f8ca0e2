//! Echo Chamber API server binary.
//!
//! Serves `POST /api/echo` and, with `--static-dir`, the browser frontend
//! from the same origin.

use std::path::PathBuf;

use clap::Parser;
use echo_api::config::{ApiConfig, DEFAULT_BIND_HOST, DEFAULT_PORT};
use tower_http::services::ServeDir;
use tracing::{info, warn};

/// CLI arguments for the API server.
#[derive(Parser, Debug)]
#[command(name = "echo_server", version, about = "Echo Chamber persona chat proxy")]
struct Args {
    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Host to bind.
    #[arg(long, env = "BIND_HOST", default_value = DEFAULT_BIND_HOST)]
    host: String,

    /// Credential for the generative API.
    ///
    /// Requests are answered with a 500 until this is set.
    #[arg(long, env = "API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Directory with the built frontend (index.html and the wasm bundle).
    #[arg(long, env = "STATIC_DIR")]
    static_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,echo_api=debug,echo_core=debug".into()),
        )
        .init();

    let args = Args::parse();

    let mut config = ApiConfig::from_env()?;
    config.bind_addr = format!("{}:{}", args.host, args.port);
    if let Some(key) = args.api_key.filter(|key| !key.is_empty()) {
        config.api_key = Some(key);
    }

    if config.api_key.is_none() {
        warn!("API_KEY is not set; echo requests will fail until it is configured");
    }
    info!(
        upstream = %config.generate_url(),
        expose_error_details = config.expose_error_details,
        "starting echo_server"
    );

    let bind_addr = config.bind_addr.clone();
    let mut app = echo_api::router(echo_api::AppState::new(config));
    if let Some(dir) = &args.static_dir {
        info!(dir = %dir.display(), "serving static frontend");
        app = app.fallback_service(ServeDir::new(dir));
    }

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    let local_addr = listener.local_addr()?;
    info!(addr = %local_addr, "REST API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutdown signal received");
        })
        .await?;

    Ok(())
}
