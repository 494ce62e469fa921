//! Date handling for source (`DD-Mon-YYYY`) and request (`DD-MM-YYYY`) formats.

use chrono::NaiveDate;

use crate::types::PLACEHOLDER;

/// Date format used by the source dataset, e.g. `15-Aug-2025`.
pub const SOURCE_DATE_FORMAT: &str = "%d-%b-%Y";

/// Date format expected by the data endpoint's query string.
pub const REQUEST_DATE_FORMAT: &str = "%d-%m-%Y";

/// Parse a source date cell.
///
/// Empty cells and the `-` placeholder are `Ok(None)`. Anything else must
/// match [`SOURCE_DATE_FORMAT`].
pub fn parse_source_date(raw: &str) -> Result<Option<NaiveDate>, chrono::ParseError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == PLACEHOLDER {
        return Ok(None);
    }
    NaiveDate::parse_from_str(trimmed, SOURCE_DATE_FORMAT).map(Some)
}

/// Format a date for the `from_date` / `to_date` query parameters.
pub fn format_request_date(date: NaiveDate) -> String {
    date.format(REQUEST_DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::iso_or_empty;

    fn to_iso(raw: &str) -> Result<String, chrono::ParseError> {
        Ok(iso_or_empty(parse_source_date(raw)?))
    }

    #[test]
    fn test_to_iso_source_format() {
        assert_eq!(to_iso("15-Aug-2025").unwrap(), "2025-08-15");
        assert_eq!(to_iso(" 01-Jan-2026 ").unwrap(), "2026-01-01");
    }

    #[test]
    fn test_placeholder_and_empty_are_empty() {
        assert_eq!(to_iso("-").unwrap(), "");
        assert_eq!(to_iso("").unwrap(), "");
        assert_eq!(to_iso("   ").unwrap(), "");
    }

    #[test]
    fn test_malformed_dates_are_errors() {
        assert!(to_iso("2025-08-15").is_err());
        assert!(to_iso("15/08/2025").is_err());
        assert!(to_iso("31-Feb-2025").is_err());
        assert!(to_iso("soon").is_err());
    }

    #[test]
    fn test_request_date_format() {
        let d = NaiveDate::from_ymd_opt(2025, 8, 5).unwrap();
        assert_eq!(format_request_date(d), "05-08-2025");
    }
}
