//! Fetcher configuration and endpoint resolution.

use std::time::Duration;

use url::Url;

use crate::error::FetchResult;

pub const DEFAULT_BASE_URL: &str = "https://www.nseindia.com";
pub const DEFAULT_LISTING_PATH: &str = "/companies-listing/corporate-filings-actions";
pub const DEFAULT_API_PATH: &str = "/api/corporates-CorporateActions";
pub const DEFAULT_SEGMENT: &str = "equities";
pub const DEFAULT_MAX_RETRIES: u32 = 3;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
                                      AppleWebKit/537.36 (KHTML, like Gecko) \
                                      Chrome/127.0 Safari/537.36";

/// Settings for one fetch run.
///
/// Paths are joined onto `base_url`; an absolute URL in `listing_path` or
/// `api_path` replaces the base entirely.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub base_url: String,
    pub listing_path: String,
    pub api_path: String,
    pub user_agent: String,
    /// Attempts at the data request before giving up. Values below 1 are
    /// treated as 1.
    pub max_retries: u32,
    /// Pause after every bootstrap request.
    pub bootstrap_pause: Duration,
    /// Pause after a failed data request (other than HTTP 401).
    pub retry_backoff: Duration,
    pub bootstrap_timeout: Duration,
    pub data_timeout: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            listing_path: DEFAULT_LISTING_PATH.to_string(),
            api_path: DEFAULT_API_PATH.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_retries: DEFAULT_MAX_RETRIES,
            bootstrap_pause: Duration::from_millis(800),
            retry_backoff: Duration::from_millis(1200),
            bootstrap_timeout: Duration::from_secs(20),
            data_timeout: Duration::from_secs(30),
        }
    }
}

impl FetchConfig {
    /// Same endpoints and identity, no pauses. Used against local mock servers.
    pub fn without_pauses(mut self) -> Self {
        self.bootstrap_pause = Duration::ZERO;
        self.retry_backoff = Duration::ZERO;
        self
    }
}

/// Fully resolved URLs for the landing page, listing page, and data API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub base: Url,
    pub listing: Url,
    pub api: Url,
}

impl Endpoints {
    pub fn resolve(config: &FetchConfig) -> FetchResult<Self> {
        let base = Url::parse(&config.base_url)?;
        let listing = base.join(&config.listing_path)?;
        let api = base.join(&config.api_path)?;
        Ok(Self { base, listing, api })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_endpoints() {
        let endpoints = Endpoints::resolve(&FetchConfig::default()).unwrap();
        assert_eq!(endpoints.base.as_str(), "https://www.nseindia.com/");
        assert_eq!(
            endpoints.listing.as_str(),
            "https://www.nseindia.com/companies-listing/corporate-filings-actions"
        );
        assert_eq!(
            endpoints.api.as_str(),
            "https://www.nseindia.com/api/corporates-CorporateActions"
        );
    }

    #[test]
    fn test_absolute_api_path_overrides_base() {
        let config = FetchConfig {
            api_path: "http://127.0.0.1:9/api/actions".to_string(),
            ..FetchConfig::default()
        };
        let endpoints = Endpoints::resolve(&config).unwrap();
        assert_eq!(endpoints.api.as_str(), "http://127.0.0.1:9/api/actions");
    }

    #[test]
    fn test_invalid_base_url() {
        let config = FetchConfig {
            base_url: "not a url".to_string(),
            ..FetchConfig::default()
        };
        assert!(Endpoints::resolve(&config).is_err());
    }

    #[test]
    fn test_without_pauses() {
        let config = FetchConfig::default().without_pauses();
        assert_eq!(config.bootstrap_pause, Duration::ZERO);
        assert_eq!(config.retry_backoff, Duration::ZERO);
        assert_eq!(config.max_retries, 3);
    }
}
