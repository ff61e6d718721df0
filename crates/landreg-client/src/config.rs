//! Collaborator endpoint configuration.
//!
//! Base URLs for the four collaborator services plus a shared bearer token
//! and request timeout. Loaded from the environment in deployments, built
//! explicitly in tests.

use url::Url;

/// Configuration for the HTTP collaborator clients.
///
/// `Debug` redacts `api_token`.
#[derive(Clone)]
pub struct ClientConfig {
    /// Document blob store.
    pub document_store_url: Url,
    /// Content-addressed publish service.
    pub publish_url: Url,
    /// Ledger gateway.
    pub ledger_url: Url,
    /// Access-controlled private reference store.
    pub private_store_url: Url,
    /// Bearer token sent to every collaborator.
    pub api_token: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("document_store_url", &self.document_store_url)
            .field("publish_url", &self.publish_url)
            .field("ledger_url", &self.ledger_url)
            .field("private_store_url", &self.private_store_url)
            .field("api_token", &"[REDACTED]")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// - `LANDREG_DOCUMENT_STORE_URL` (default `http://127.0.0.1:8101`)
    /// - `LANDREG_PUBLISH_URL` (default `http://127.0.0.1:8102`)
    /// - `LANDREG_LEDGER_URL` (default `http://127.0.0.1:8103`)
    /// - `LANDREG_PRIVATE_STORE_URL` (default `http://127.0.0.1:8104`)
    /// - `LANDREG_API_TOKEN` (required)
    /// - `LANDREG_TIMEOUT_SECS` (default 30)
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_token = std::env::var("LANDREG_API_TOKEN").map_err(|_| ConfigError::MissingToken)?;

        Ok(Self {
            document_store_url: env_url("LANDREG_DOCUMENT_STORE_URL", "http://127.0.0.1:8101")?,
            publish_url: env_url("LANDREG_PUBLISH_URL", "http://127.0.0.1:8102")?,
            ledger_url: env_url("LANDREG_LEDGER_URL", "http://127.0.0.1:8103")?,
            private_store_url: env_url("LANDREG_PRIVATE_STORE_URL", "http://127.0.0.1:8104")?,
            api_token,
            timeout_secs: std::env::var("LANDREG_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30),
        })
    }

    /// Point all four collaborators at one host. Used against a single mock
    /// server in tests.
    pub fn single_host(base: &str, token: &str) -> Result<Self, ConfigError> {
        let url = Url::parse(base).map_err(|e| ConfigError::InvalidUrl(base.to_string(), e.to_string()))?;
        Ok(Self {
            document_store_url: url.clone(),
            publish_url: url.clone(),
            ledger_url: url.clone(),
            private_store_url: url,
            api_token: token.to_string(),
            timeout_secs: 5,
        })
    }
}

fn env_url(var: &str, default: &str) -> Result<Url, ConfigError> {
    let raw = std::env::var(var).unwrap_or_else(|_| default.to_string());
    Url::parse(&raw).map_err(|e| ConfigError::InvalidUrl(var.to_string(), e.to_string()))
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("LANDREG_API_TOKEN environment variable is required")]
    MissingToken,
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
}
