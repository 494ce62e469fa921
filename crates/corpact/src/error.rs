//! Error types for fetching, classifying, and writing reports.

/// Errors raised while acquiring the raw dataset.
#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    #[error("Invalid endpoint URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Bootstrap request to {url} failed: {source}")]
    Bootstrap {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Bootstrap request to {url} returned HTTP {status}")]
    BootstrapStatus { url: String, status: u16 },

    #[error("Unauthorized (HTTP 401) on attempt {attempt}")]
    Unauthorized { attempt: u32 },

    #[error("HTTP {status} on attempt {attempt}")]
    Status { status: u16, attempt: u32 },

    #[error("Unexpected non-CSV response on attempt {attempt} (content-type: {content_type})")]
    InvalidResponse { content_type: String, attempt: u32 },

    #[error("Transport error on attempt {attempt}: {source}")]
    Transport {
        attempt: u32,
        #[source]
        source: reqwest::Error,
    },

    #[error("Gave up after {attempts} attempts")]
    Exhausted {
        attempts: u32,
        #[source]
        last: Box<FetchError>,
    },
}

impl FetchError {
    /// Whether the retry loop may try again after this error.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            FetchError::Unauthorized { .. }
                | FetchError::Status { .. }
                | FetchError::InvalidResponse { .. }
                | FetchError::Transport { .. }
        )
    }
}

/// Errors raised while reading and classifying source rows.
#[derive(thiserror::Error, Debug)]
pub enum ClassifyError {
    #[error("Malformed {field} {value:?} for record {symbol} (row {row}): expected DD-Mon-YYYY")]
    DataFormat {
        row: usize,
        symbol: String,
        field: &'static str,
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing required column: {0}")]
    MissingColumn(&'static str),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while writing or reading report files.
#[derive(thiserror::Error, Debug)]
pub enum ReportError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Template error: {0}")]
    Template(#[from] askama::Error),
}

pub type FetchResult<T> = Result<T, FetchError>;
pub type ClassifyResult<T> = Result<T, ClassifyError>;
pub type ReportResult<T> = Result<T, ReportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        assert!(FetchError::Unauthorized { attempt: 1 }.is_transient());
        assert!(FetchError::Status {
            status: 503,
            attempt: 2
        }
        .is_transient());
        assert!(!FetchError::BootstrapStatus {
            url: "https://example.com".into(),
            status: 403
        }
        .is_transient());
    }

    #[test]
    fn test_exhausted_keeps_last_error_as_source() {
        let err = FetchError::Exhausted {
            attempts: 3,
            last: Box::new(FetchError::Status {
                status: 503,
                attempt: 3,
            }),
        };
        let source = std::error::Error::source(&err).expect("has source");
        assert_eq!(source.to_string(), "HTTP 503 on attempt 3");
        assert!(err.to_string().contains("3 attempts"));
    }
}
