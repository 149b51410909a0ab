//! HTTP client for the hive's ratio endpoints.

use leftright_core::community::CommunityStat;
use leftright_protocol::{ErrorResponse, RatioResponse, SubmitRatioRequest};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Hive unreachable: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Hive answered {status}: {message}")]
    Rejected { status: StatusCode, message: String },
}

pub struct HiveClient {
    client: Client,
    base_url: String,
}

impl HiveClient {
    /// Uses reqwest's transport defaults, which set no overall request timeout.
    pub fn new(base_url: &str) -> Self {
        Self::from_client(Client::new(), base_url)
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::from_client(client, base_url))
    }

    fn from_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn ratio_url(&self, layout: &str) -> String {
        format!("{}/api/ratio/{}", self.base_url, layout)
    }

    pub async fn get_ratio(&self, layout: &str) -> Result<RatioResponse, ClientError> {
        let resp = self.client.get(self.ratio_url(layout)).send().await?;
        Self::read(resp).await
    }

    pub async fn submit_ratio(&self, layout: &str, ratio: f64) -> Result<RatioResponse, ClientError> {
        let resp = self
            .client
            .post(self.ratio_url(layout))
            .json(&SubmitRatioRequest { ratio })
            .send()
            .await?;
        Self::read(resp).await
    }

    pub async fn list_ratios(&self) -> Result<Vec<RatioResponse>, ClientError> {
        let resp = self
            .client
            .get(format!("{}/api/ratio", self.base_url))
            .send()
            .await?;
        Self::read(resp).await
    }

    async fn read<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ClientError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp.json().await?);
        }

        let message = match resp.json::<ErrorResponse>().await {
            Ok(body) => body.message.unwrap_or(body.error),
            Err(_) => status.canonical_reason().unwrap_or("unknown").to_string(),
        };
        Err(ClientError::Rejected { status, message })
    }

    /// Submits `ratio` if there is one, falling back to a plain read when the
    /// submission fails. `None` means the hive could not be reached at all.
    pub async fn compare(&self, layout: &str, ratio: Option<f64>) -> Option<CommunityStat> {
        if let Some(r) = ratio {
            match self.submit_ratio(layout, r).await {
                Ok(resp) => return Some(resp.into()),
                Err(e) => warn!("⚠️  Submission failed ({}), reading current average", e),
            }
        }

        match self.get_ratio(layout).await {
            Ok(resp) => Some(resp.into()),
            Err(e) => {
                debug!("Community average unavailable: {}", e);
                None
            }
        }
    }
}
