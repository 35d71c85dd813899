//! Feed API client
//!
//! [`FeedSource`] is the seam the pager drives; [`NeynarClient`] implements it
//! over HTTP. Tests substitute in-memory sources.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::config::ApiConfig;
use crate::error::{ApiError, ConfigError, FeedExportError, Result};

use super::model::PageResult;

const FEED_PATH: &str = "/v2/farcaster/feed";

/// Parameters of one page request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedRequest {
    /// Channel to filter the feed by
    pub channel_id: String,
    /// Continuation token from the previous page
    pub cursor: Option<String>,
    /// Number of casts per page
    pub limit: u32,
}

/// Anything that can serve pages of a channel feed
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Fetch one page
    ///
    /// # Arguments
    /// * `request` - Channel, cursor and page size
    ///
    /// # Returns
    /// * `Result<PageResult>` - The page, or the API failure
    async fn fetch_page(&self, request: &FeedRequest) -> Result<PageResult>;
}

/// HTTP client for the Neynar feed API
pub struct NeynarClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

/// Error body returned by the API on failures
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

impl NeynarClient {
    /// Create a client for the given API configuration and credential
    ///
    /// # Errors
    /// Returns error if the credential is empty or the HTTP client cannot be built
    pub fn new(config: &ApiConfig, api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ConfigError::MissingField("api key".to_string()).into());
        }

        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .user_agent(concat!("farcaster-feed-export/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FeedExportError::Generic(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, FEED_PATH)
    }

    /// Turn a non-success response into an [`ApiError`]
    async fn error_from_response(response: reqwest::Response) -> ApiError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.message)
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("unknown error")
                    .to_string()
            });

        match status.as_u16() {
            401 | 403 => ApiError::Unauthorized(message),
            code => ApiError::RequestFailed {
                status: code,
                message,
            },
        }
    }
}

#[async_trait]
impl FeedSource for NeynarClient {
    async fn fetch_page(&self, request: &FeedRequest) -> Result<PageResult> {
        let limit = request.limit.to_string();
        let mut query: Vec<(&str, &str)> = vec![
            ("feed_type", "filter"),
            ("filter_type", "channel_id"),
            ("channel_id", request.channel_id.as_str()),
            ("limit", limit.as_str()),
        ];
        if let Some(cursor) = request.cursor.as_deref() {
            query.push(("cursor", cursor));
        }

        debug!(
            "Requesting feed page for channel '{}' (cursor: {})",
            request.channel_id,
            request.cursor.as_deref().unwrap_or("none")
        );

        let response = self
            .http
            .get(self.endpoint())
            .header("x-api-key", &self.api_key)
            .header(reqwest::header::ACCEPT, "application/json")
            .query(&query)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await.into());
        }

        let page = response
            .json::<PageResult>()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))?;

        debug!("Received {} casts", page.casts.len());
        Ok(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_api_key_rejected() {
        let result = NeynarClient::new(&ApiConfig::default(), "  ");
        assert!(matches!(
            result,
            Err(FeedExportError::Config(ConfigError::MissingField(_)))
        ));
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let config = ApiConfig {
            base_url: "http://localhost:9000/".to_string(),
            ..ApiConfig::default()
        };
        let client = NeynarClient::new(&config, "key").unwrap();
        assert_eq!(client.endpoint(), "http://localhost:9000/v2/farcaster/feed");
    }
}
