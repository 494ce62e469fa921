//! Browser-like HTTP session with a private cookie jar.
//!
//! The remote service only answers data requests from clients that carry the
//! tracking cookies it hands out on ordinary page views. A [`Session`] owns
//! the only copy of that state: it is created per fetch, warmed with plain
//! navigational requests, and dropped when the fetch ends. Cookies are never
//! set by hand; duplicated or forged cookies get the client rejected.

use std::time::Duration;

use reqwest::header::{
    HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONNECTION, REFERER,
};
use tracing::debug;

use super::config::{Endpoints, FetchConfig};
use super::DatasetQuery;
use crate::dates::format_request_date;
use crate::error::{FetchError, FetchResult};

const NAVIGATION_ACCEPT: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";
const DATA_ACCEPT: &str = "text/csv,application/octet-stream;q=0.9,*/*;q=0.8";
const ACCEPT_LANGUAGE_VALUE: &str = "en-US,en;q=0.9";

pub(crate) struct Session {
    client: reqwest::Client,
    endpoints: Endpoints,
    bootstrap_pause: Duration,
    bootstrap_timeout: Duration,
    data_timeout: Duration,
}

impl Session {
    /// Build a fresh client with an empty cookie jar.
    pub(crate) fn open(config: &FetchConfig) -> FetchResult<Self> {
        let endpoints = Endpoints::resolve(config)?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(NAVIGATION_ACCEPT));
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(ACCEPT_LANGUAGE_VALUE));
        headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));

        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .cookie_store(true)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(FetchError::Client)?;

        Ok(Self {
            client,
            endpoints,
            bootstrap_pause: config.bootstrap_pause,
            bootstrap_timeout: config.bootstrap_timeout,
            data_timeout: config.data_timeout,
        })
    }

    /// Visit the landing page and the listing page, pausing after each.
    ///
    /// Any failure here is fatal: without the warm-up cookies the data
    /// request cannot succeed.
    pub(crate) async fn bootstrap(&self) -> FetchResult<()> {
        for url in [&self.endpoints.base, &self.endpoints.listing] {
            let resp = self
                .client
                .get(url.clone())
                .timeout(self.bootstrap_timeout)
                .send()
                .await
                .map_err(|source| FetchError::Bootstrap {
                    url: url.to_string(),
                    source,
                })?;

            let status = resp.status();
            if !status.is_success() {
                return Err(FetchError::BootstrapStatus {
                    url: url.to_string(),
                    status: status.as_u16(),
                });
            }
            debug!(url = %url, status = status.as_u16(), "bootstrap request ok");
            tokio::time::sleep(self.bootstrap_pause).await;
        }
        Ok(())
    }

    /// Revisit the landing page to refresh cookies after a 401.
    ///
    /// The status is not checked; only the cookies matter.
    pub(crate) async fn rewarm(&self) -> Result<(), reqwest::Error> {
        let resp = self
            .client
            .get(self.endpoints.base.clone())
            .timeout(self.bootstrap_timeout)
            .send()
            .await?;
        debug!(status = resp.status().as_u16(), "session re-warmed");
        Ok(())
    }

    /// Issue the dataset request. Redirects are followed by the client.
    pub(crate) async fn request_dataset(
        &self,
        query: &DatasetQuery,
    ) -> Result<reqwest::Response, reqwest::Error> {
        let from_date = format_request_date(query.from);
        let to_date = format_request_date(query.to);
        self.client
            .get(self.endpoints.api.clone())
            .query(&[
                ("index", query.segment.as_str()),
                ("from_date", from_date.as_str()),
                ("to_date", to_date.as_str()),
                ("csv", "true"),
            ])
            .header(REFERER, self.endpoints.listing.as_str())
            .header(ACCEPT, DATA_ACCEPT)
            .timeout(self.data_timeout)
            .send()
            .await
    }
}
