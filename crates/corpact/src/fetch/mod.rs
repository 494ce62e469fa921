//! Resilient download of the corporate actions CSV.
//!
//! A fetch opens a private [`session`], warms it with navigational requests,
//! then asks the data API for a date range. Failed attempts are retried with
//! fixed pauses:
//!
//! - HTTP 401: the landing page is revisited to refresh cookies, then a
//!   short bootstrap pause.
//! - any other non-2xx, a transport error, or an HTML page where CSV was
//!   expected: the longer retry backoff.
//!
//! When every attempt fails the last error is returned inside
//! [`FetchError::Exhausted`].

pub mod config;
mod session;

use chrono::NaiveDate;
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use tracing::{info, warn};

use crate::error::{FetchError, FetchResult};
use session::Session;

pub use config::{Endpoints, FetchConfig, DEFAULT_SEGMENT};

/// Number of leading characters inspected by the CSV sanity check.
const SNIFF_CHARS: usize = 128;

/// The date range and market segment to download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetQuery {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub segment: String,
}

impl DatasetQuery {
    /// Query the default `equities` segment.
    pub fn new(from: NaiveDate, to: NaiveDate) -> Self {
        Self {
            from,
            to,
            segment: DEFAULT_SEGMENT.to_string(),
        }
    }

    pub fn with_segment(mut self, segment: impl Into<String>) -> Self {
        self.segment = segment.into();
        self
    }
}

/// True when a response is an HTML page rather than CSV: the content type
/// mentions html and the start of the body has no comma.
pub fn looks_like_html_error(content_type: &str, body: &[u8]) -> bool {
    if !content_type.to_ascii_lowercase().contains("html") {
        return false;
    }
    let text = String::from_utf8_lossy(body);
    !text.chars().take(SNIFF_CHARS).any(|c| c == ',')
}

/// Downloads the dataset according to a [`FetchConfig`].
#[derive(Debug, Clone, Default)]
pub struct Fetcher {
    config: FetchConfig,
}

impl Fetcher {
    pub fn new(config: FetchConfig) -> Self {
        Self { config }
    }

    /// Fetch the CSV bytes for `query`.
    ///
    /// Bootstrap failures are returned immediately. Data request failures are
    /// retried up to `max_retries` times.
    pub async fn fetch(&self, query: &DatasetQuery) -> FetchResult<Vec<u8>> {
        let session = Session::open(&self.config)?;
        info!(
            segment = %query.segment,
            from = %query.from,
            to = %query.to,
            "bootstrapping session"
        );
        session.bootstrap().await?;

        let attempts = self.config.max_retries.max(1);
        let mut attempt = 0u32;
        loop {
            attempt += 1;
            let (error, pause) = match self.attempt(&session, query, attempt).await {
                Ok(bytes) => {
                    info!(attempt, bytes = bytes.len(), "dataset downloaded");
                    return Ok(bytes);
                }
                Err(failure) => failure,
            };

            warn!(
                attempt,
                attempts,
                transient = error.is_transient(),
                error = %error,
                "dataset request failed"
            );
            if attempt >= attempts {
                return Err(FetchError::Exhausted {
                    attempts,
                    last: Box::new(error),
                });
            }
            tokio::time::sleep(pause).await;
        }
    }

    /// One data request. On failure returns the error and how long to pause
    /// before the next attempt.
    async fn attempt(
        &self,
        session: &Session,
        query: &DatasetQuery,
        attempt: u32,
    ) -> Result<Vec<u8>, (FetchError, std::time::Duration)> {
        let backoff = self.config.retry_backoff;
        let transport = |source| (FetchError::Transport { attempt, source }, backoff);

        let resp = session.request_dataset(query).await.map_err(transport)?;
        let status = resp.status();

        if status == StatusCode::UNAUTHORIZED {
            session.rewarm().await.map_err(transport)?;
            return Err((
                FetchError::Unauthorized { attempt },
                self.config.bootstrap_pause,
            ));
        }
        if !status.is_success() {
            return Err((
                FetchError::Status {
                    status: status.as_u16(),
                    attempt,
                },
                backoff,
            ));
        }

        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();
        let body = resp.bytes().await.map_err(transport)?;

        if looks_like_html_error(&content_type, &body) {
            return Err((
                FetchError::InvalidResponse {
                    content_type,
                    attempt,
                },
                backoff,
            ));
        }
        Ok(body.to_vec())
    }
}
