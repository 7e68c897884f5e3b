//! Paper feed API client.
//!
//! Provides an async HTTP client for the two feed endpoints:
//! - `GET /papers` for the ranked paper list
//! - `POST /save_paper` for saving a paper by id
//!
//! Every call is a single request. Nothing is retried or cached.

use reqwest::Client;

use crate::config::{Config, api};
use crate::error::{ClientError, ClientResult};
use crate::models::{Paper, SaveRequest, SaveResponse};

/// Paper feed API client.
#[derive(Clone)]
pub struct PaperFeedClient {
    /// HTTP client.
    client: Client,

    /// `GET` target for the paper list.
    papers_url: url::Url,

    /// `POST` target for saving.
    save_paper_url: url::Url,
}

impl PaperFeedClient {
    /// Create a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the base URL is invalid or HTTP client initialization fails.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static("application/json"),
        );

        let mut builder = Client::builder()
            .default_headers(headers)
            .connect_timeout(config.connect_timeout)
            .pool_max_idle_per_host(api::MAX_KEEPALIVE)
            .pool_idle_timeout(api::KEEPALIVE_EXPIRY)
            .gzip(true);

        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            papers_url: config.papers_url()?,
            save_paper_url: config.save_paper_url()?,
        })
    }

    /// Fetch the current ranked paper list.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Status`] on a non-success status, and transport
    /// or parse errors otherwise.
    pub async fn fetch_papers(&self) -> ClientResult<Vec<Paper>> {
        let response = self.client.get(self.papers_url.clone()).send().await?;
        let response = Self::handle_response(response).await?;

        let bytes = response.bytes().await?;
        let papers: Vec<Paper> = serde_json::from_slice(&bytes)?;

        tracing::debug!(count = papers.len(), "Decoded paper list");
        Ok(papers)
    }

    /// Ask the server to save a paper.
    ///
    /// The status code is not inspected: the server reports application-level
    /// failures (including unknown ids) in the body, so any body that decodes
    /// as a [`SaveResponse`] is returned as-is.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure or an undecodable body.
    pub async fn save_paper(&self, paper_id: &str) -> ClientResult<SaveResponse> {
        let body = serde_json::to_vec(&SaveRequest::new(paper_id))?;

        let response = self
            .client
            .post(self.save_paper_url.clone())
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        let bytes = response.bytes().await?;

        match serde_json::from_slice::<SaveResponse>(&bytes) {
            Ok(save) => {
                tracing::debug!(status = status.as_u16(), success = save.success, "Save answered");
                Ok(save)
            }
            Err(e) if !status.is_success() => {
                tracing::debug!(status = status.as_u16(), error = %e, "Undecodable error body");
                Err(ClientError::status(status.as_u16(), String::from_utf8_lossy(&bytes)))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Base URL the paper list is read from.
    #[must_use]
    pub fn papers_url(&self) -> &url::Url {
        &self.papers_url
    }

    /// Handle response status codes for read requests.
    async fn handle_response(response: reqwest::Response) -> ClientResult<reqwest::Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        Err(ClientError::status(status.as_u16(), text))
    }
}

impl std::fmt::Debug for PaperFeedClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaperFeedClient")
            .field("papers_url", &self.papers_url.as_str())
            .field("save_paper_url", &self.save_paper_url.as_str())
            .finish()
    }
}
