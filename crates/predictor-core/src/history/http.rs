//! HTTP History Client
//!
//! One `GET <base-url>/<plan>` per fetch. No headers, no retries.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use tracing::debug;

use super::HistoryClient;
use crate::config::PredictorConfig;
use crate::error::{PredictorError, Result};
use crate::model::InvestmentHistory;

pub struct HttpHistoryClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpHistoryClient {
    pub fn new(config: &PredictorConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| PredictorError::unknown_from("Unknown error", e))?;

        Ok(Self {
            client,
            base_url: format!("{}/", config.base_url.trim_end_matches('/')),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the request URL for a plan.
    ///
    /// The identifier must be a single, non-empty path segment.
    pub fn history_url(&self, plan: &str) -> Result<Url> {
        let raw = format!("{}{plan}", self.base_url);
        let malformed = |reason: &str| PredictorError::MalformedUrl {
            url: raw.clone(),
            reason: reason.into(),
        };

        if plan.is_empty() {
            return Err(malformed("empty plan identifier"));
        }
        if plan.chars().any(breaks_path_segment) {
            return Err(malformed("plan identifier contains URL-breaking characters"));
        }
        // Dot segments would be normalised away, moving the request off `<base>/<plan>`
        if plan == "." || plan == ".." {
            return Err(malformed("plan identifier is a dot segment"));
        }

        let url = Url::parse(&raw).map_err(|e| malformed(&e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(malformed("unsupported scheme"));
        }
        Ok(url)
    }

    fn classify(url: &Url, err: reqwest::Error) -> PredictorError {
        if err.is_builder() {
            PredictorError::MalformedUrl {
                url: url.to_string(),
                reason: err.to_string(),
            }
        } else if err.is_connect()
            || err.is_timeout()
            || err.is_request()
            || err.is_body()
            || err.is_decode()
        {
            PredictorError::IoError {
                url: url.to_string(),
                source: err,
            }
        } else {
            PredictorError::unknown_from("Unknown error", err)
        }
    }
}

fn breaks_path_segment(c: char) -> bool {
    matches!(c, '/' | '\\' | '?' | '#' | '%') || c.is_whitespace() || c.is_control()
}

#[async_trait]
impl HistoryClient for HttpHistoryClient {
    async fn fetch_history(&self, plan: &str) -> Result<InvestmentHistory> {
        let url = self.history_url(plan)?;
        debug!(%url, "fetching investment history");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| Self::classify(&url, e))?;

        let status = response.status();
        debug!(%url, %status, "history response");
        if status != StatusCode::OK {
            // Dropping the response releases the connection without reading the body
            return Err(PredictorError::StatusNotOk {
                url: url.to_string(),
                status,
            });
        }

        let body = response.text().await.map_err(|e| Self::classify(&url, e))?;

        serde_json::from_str(&body).map_err(|source| PredictorError::InvalidJson {
            url: url.to_string(),
            source,
        })
    }

    fn name(&self) -> &str {
        "HttpHistory"
    }
}
