//! Shared HTTP plumbing for the collaborator clients.
//!
//! One `reqwest::Client` (bearer auth, timeout) is built per configuration
//! and cloned into every collaborator. Requests are sent once; there is no
//! retry layer.

use std::time::Duration;

use serde::de::DeserializeOwned;
use url::Url;

use crate::config::{ClientConfig, ConfigError};
use crate::error::CollaboratorError;

pub(crate) fn build_client(config: &ClientConfig) -> Result<reqwest::Client, CollaboratorError> {
    let mut headers = reqwest::header::HeaderMap::new();
    headers.insert(
        reqwest::header::AUTHORIZATION,
        reqwest::header::HeaderValue::from_str(&format!("Bearer {}", config.api_token))
            .map_err(|_| CollaboratorError::Config(ConfigError::MissingToken))?,
    );
    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .default_headers(headers)
        .build()
        .map_err(|source| CollaboratorError::Http {
            endpoint: "client_init".into(),
            source,
        })
}

/// Append path segments to a base URL. Segments are percent-encoded, so a
/// parcel identifier can be used as one segment.
pub(crate) fn endpoint(base: &Url, segments: &[&str]) -> Result<Url, CollaboratorError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| CollaboratorError::InvalidEndpoint {
            base: base.to_string(),
            reason: "URL cannot be a base".into(),
        })?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Send a request and decode a JSON reply. Non-2xx becomes `Api`.
pub(crate) async fn send_json<T: DeserializeOwned>(
    request: reqwest::RequestBuilder,
    operation: &str,
) -> Result<T, CollaboratorError> {
    let resp = request.send().await.map_err(|source| CollaboratorError::Http {
        endpoint: operation.to_string(),
        source,
    })?;

    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        tracing::warn!(operation, status = status.as_u16(), "collaborator call failed");
        return Err(CollaboratorError::Api {
            endpoint: operation.to_string(),
            status: status.as_u16(),
            body,
        });
    }

    resp.json::<T>()
        .await
        .map_err(|source| CollaboratorError::Deserialization {
            endpoint: operation.to_string(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_appends_segments() {
        let base = Url::parse("http://ledger.local/api/").unwrap();
        let url = endpoint(&base, &["parcels"]).unwrap();
        assert_eq!(url.as_str(), "http://ledger.local/api/parcels");
    }

    #[test]
    fn endpoint_encodes_segment_separators() {
        let base = Url::parse("http://ledger.local").unwrap();
        let url = endpoint(&base, &["parcels", "a/b", "transfer"]).unwrap();
        assert_eq!(url.path(), "/parcels/a%2Fb/transfer");
    }

    #[test]
    fn endpoint_rejects_non_base_urls() {
        let base = Url::parse("mailto:registry@example.lk").unwrap();
        assert!(endpoint(&base, &["parcels"]).is_err());
    }
}
