//! Content publish contract and HTTP client.
//!
//! `POST {base}/content` with the public-metadata tier as JSON.
//! Reply: `{"contentId": "...", "uri": "..."}`.

use async_trait::async_trait;
use landreg_tier::PublicMetadataTier;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::CollaboratorError;
use crate::http::{endpoint, send_json};

/// Identifier and retrieval URI of published content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishReceipt {
    pub content_id: String,
    pub uri: String,
}

/// A content-addressed store for public metadata.
#[async_trait]
pub trait ContentPublisher: Send + Sync {
    async fn publish(&self, metadata: &PublicMetadataTier) -> Result<PublishReceipt, CollaboratorError>;
}

/// HTTP client for the publish service.
#[derive(Debug, Clone)]
pub struct HttpContentPublisher {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpContentPublisher {
    pub(crate) fn new(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }
}

#[async_trait]
impl ContentPublisher for HttpContentPublisher {
    async fn publish(&self, metadata: &PublicMetadataTier) -> Result<PublishReceipt, CollaboratorError> {
        let url = endpoint(&self.base_url, &["content"])?;
        tracing::debug!(parcel_id = %metadata.parcel_id, "publishing public metadata");
        send_json(self.http.post(url).json(metadata), "content.publish").await
    }
}
