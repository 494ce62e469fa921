//! Corpact: fetch, classify, and report upcoming corporate actions.
//!
//! The [`fetch`] module downloads the raw CSV from a bot-wary data source;
//! [`classify`] turns its rows into dividends, bonuses, splits and other
//! actions; [`report`] writes the JSON document and the HTML page.

pub mod classify;
pub mod dates;
pub mod error;
pub mod fetch;
pub mod report;
pub mod source;
pub mod types;

pub use classify::{classify_batch, classify_csv, classify_purpose, Verdict};
pub use error::{ClassifyError, FetchError, ReportError};
pub use fetch::{DatasetQuery, FetchConfig, Fetcher};
pub use report::{write_reports, ActionsDocument};
pub use source::{load_records, parse_records};
pub use types::*;
