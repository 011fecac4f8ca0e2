//! API server configuration.

use thiserror::Error;
use url::Url;

/// Default listen port.
pub const DEFAULT_PORT: u16 = 3000;
/// Default listen host.
pub const DEFAULT_BIND_HOST: &str = "0.0.0.0";
/// Default upstream API base.
pub const DEFAULT_UPSTREAM_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
/// Default upstream model.
pub const DEFAULT_UPSTREAM_MODEL: &str = "gemini-2.5-flash-preview-05-20";

/// Errors raised while reading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },

    #[error("Invalid upstream URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Configuration for the API server.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Address to bind the HTTP listener (e.g. "0.0.0.0:3000").
    pub bind_addr: String,
    /// Upstream credential. Checked per request, so the server starts
    /// without one and answers 500 until it is set.
    pub api_key: Option<String>,
    /// Base URL of the generative API, without a trailing slash.
    pub upstream_base_url: Url,
    /// Model id used in the generate path.
    pub upstream_model: String,
    /// Whether 500 bodies carry a `details` field.
    pub expose_error_details: bool,
}

impl ApiConfig {
    /// Reads configuration from environment variables with sensible defaults.
    ///
    /// | Variable               | Default                                             |
    /// |------------------------|-----------------------------------------------------|
    /// | `API_KEY`              | unset                                               |
    /// | `PORT`                 | `3000`                                              |
    /// | `BIND_HOST`            | `0.0.0.0`                                           |
    /// | `UPSTREAM_BASE_URL`    | `https://generativelanguage.googleapis.com/v1beta`  |
    /// | `UPSTREAM_MODEL`       | `gemini-2.5-flash-preview-05-20`                    |
    /// | `EXPOSE_ERROR_DETAILS` | `true`                                              |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`ApiConfig::from_env`], reading through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = match lookup("PORT") {
            Some(value) => value
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::Invalid { name: "PORT", value })?,
            None => DEFAULT_PORT,
        };
        let host = lookup("BIND_HOST").unwrap_or_else(|| DEFAULT_BIND_HOST.into());

        let base = lookup("UPSTREAM_BASE_URL").unwrap_or_else(|| DEFAULT_UPSTREAM_BASE_URL.into());
        let upstream_base_url = Url::parse(base.trim_end_matches('/'))?;

        let expose_error_details = match lookup("EXPOSE_ERROR_DETAILS") {
            Some(value) => parse_bool(&value).ok_or(ConfigError::Invalid {
                name: "EXPOSE_ERROR_DETAILS",
                value,
            })?,
            None => true,
        };

        Ok(Self {
            bind_addr: format!("{host}:{port}"),
            api_key: lookup("API_KEY").filter(|key| !key.is_empty()),
            upstream_base_url,
            upstream_model: lookup("UPSTREAM_MODEL")
                .unwrap_or_else(|| DEFAULT_UPSTREAM_MODEL.into()),
            expose_error_details,
        })
    }

    /// `{base}/models/{model}:generateContent`, without the credential.
    pub fn generate_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.upstream_base_url.as_str().trim_end_matches('/'),
            self.upstream_model
        )
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
