//! HTTP fetcher implementation
//!
//! Builds the shared HTTP client and classifies the outcome of each
//! detail-page fetch. The pipeline decides what a failure means; this
//! module only says what kind of failure it was.

use crate::config::HttpConfig;
use reqwest::Client;
use std::time::Duration;

/// Result of a detail-page fetch
#[derive(Debug)]
pub enum FetchOutcome {
    /// Successfully fetched the page
    Success {
        /// Page body content
        body: String,
    },

    /// The server answered with a non-success status
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// The request exceeded the client timeout
    Timeout,

    /// Network error (connection refused, reset, DNS failure, ...)
    NetworkError {
        /// Error description
        error: String,
    },
}

impl FetchOutcome {
    /// Human-readable cause for any failure outcome; `None` for success
    pub fn failure_cause(&self) -> Option<String> {
        match self {
            FetchOutcome::Success { .. } => None,
            FetchOutcome::HttpError { status_code } => Some(format!("HTTP {}", status_code)),
            FetchOutcome::Timeout => Some("request timed out".to_string()),
            FetchOutcome::NetworkError { error } => Some(error.clone()),
        }
    }
}

/// Builds the HTTP client used for every index and detail fetch
///
/// The detail-fetch timeout from the configuration applies to the whole
/// request, connection included.
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(Duration::from_secs(config.fetch_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a page and classifies the outcome
///
/// Never returns an error: every failure mode maps to a `FetchOutcome`
/// variant so the caller can treat them uniformly as transient.
pub async fn fetch_page(client: &Client, url: &str) -> FetchOutcome {
    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => {
            if e.is_timeout() {
                return FetchOutcome::Timeout;
            }
            return FetchOutcome::NetworkError {
                error: e.to_string(),
            };
        }
    };

    let status = response.status();
    if !status.is_success() {
        return FetchOutcome::HttpError {
            status_code: status.as_u16(),
        };
    }

    match response.text().await {
        Ok(body) => FetchOutcome::Success { body },
        Err(e) => {
            if e.is_timeout() {
                FetchOutcome::Timeout
            } else {
                FetchOutcome::NetworkError {
                    error: e.to_string(),
                }
            }
        }
    }
}
