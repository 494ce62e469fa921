//! Reader for the corporate actions CSV.
//!
//! Columns are located by header name, so extra columns and reordering are
//! tolerated. `SYMBOL` and `PURPOSE` are required; the rest read as empty
//! when absent.

use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::debug;

use crate::error::{ClassifyError, ClassifyResult};
use crate::types::RawActionRecord;

pub const COL_SYMBOL: &str = "SYMBOL";
pub const COL_COMPANY_NAME: &str = "COMPANY NAME";
pub const COL_PURPOSE: &str = "PURPOSE";
pub const COL_EX_DATE: &str = "EX-DATE";
pub const COL_RECORD_DATE: &str = "RECORD DATE";

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

struct Columns {
    symbol: usize,
    company_name: Option<usize>,
    purpose: usize,
    ex_date: Option<usize>,
    record_date: Option<usize>,
}

impl Columns {
    fn locate(headers: &StringRecord) -> ClassifyResult<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.eq_ignore_ascii_case(name))
        };
        Ok(Self {
            symbol: find(COL_SYMBOL).ok_or(ClassifyError::MissingColumn(COL_SYMBOL))?,
            company_name: find(COL_COMPANY_NAME),
            purpose: find(COL_PURPOSE).ok_or(ClassifyError::MissingColumn(COL_PURPOSE))?,
            ex_date: find(COL_EX_DATE),
            record_date: find(COL_RECORD_DATE),
        })
    }

    fn extract(&self, row: &StringRecord) -> RawActionRecord {
        let cell = |idx: Option<usize>| {
            idx.and_then(|i| row.get(i))
                .map(str::to_string)
                .unwrap_or_default()
        };
        RawActionRecord {
            symbol: cell(Some(self.symbol)),
            company_name: cell(self.company_name),
            purpose: cell(Some(self.purpose)),
            ex_date: cell(self.ex_date),
            record_date: cell(self.record_date),
        }
    }
}

/// Parse records from any reader yielding CSV text. Fields and headers are
/// trimmed by the reader; rows with every cell empty are skipped.
pub fn read_records<R: Read>(reader: R) -> ClassifyResult<Vec<RawActionRecord>> {
    let mut csv = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let columns = Columns::locate(csv.headers()?)?;

    let mut records = Vec::new();
    for row in csv.records() {
        let row = row?;
        if row.iter().all(str::is_empty) {
            debug!(
                line = row.position().map(|p| p.line()),
                "skipping blank row"
            );
            continue;
        }
        records.push(columns.extract(&row));
    }
    Ok(records)
}

/// Parse records from raw CSV bytes, such as a fetched response body.
pub fn parse_records(bytes: &[u8]) -> ClassifyResult<Vec<RawActionRecord>> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    read_records(bytes)
}

/// Parse records from a CSV file on disk.
pub fn load_records(path: &Path) -> ClassifyResult<Vec<RawActionRecord>> {
    let bytes = std::fs::read(path)?;
    parse_records(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\u{FEFF}\"SYMBOL\",\"COMPANY NAME\",\"SERIES\",\"PURPOSE\",\"FACE VALUE\",\"EX-DATE\",\"RECORD DATE\"\n\
\"ABC\",\"Abc Industries Limited\",\"EQ\",\"Interim Dividend - Rs 2.50 Per Share\",\"10\",\"15-Aug-2025\",\"15-Aug-2025\"\n\
\"XYZ \",\" Xyz Ltd\",\"EQ\",\"Bonus 1:2\",\"1\",\"-\",\"-\"\n";

    #[test]
    fn test_parse_named_columns_and_bom() {
        let records = parse_records(SAMPLE.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].symbol, "ABC");
        assert_eq!(records[0].company_name, "Abc Industries Limited");
        assert_eq!(records[0].purpose, "Interim Dividend - Rs 2.50 Per Share");
        assert_eq!(records[0].ex_date, "15-Aug-2025");
        assert_eq!(records[1].symbol, "XYZ");
        assert_eq!(records[1].company_name, "Xyz Ltd");
        assert_eq!(records[1].record_date, "-");
    }

    #[test]
    fn test_optional_columns_default_empty() {
        let csv = "SYMBOL,PURPOSE\nABC,Bonus 1:1\n";
        let records = parse_records(csv.as_bytes()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].company_name, "");
        assert_eq!(records[0].ex_date, "");
    }

    #[test]
    fn test_missing_required_column() {
        let csv = "SYMBOL,COMPANY NAME\nABC,Abc\n";
        assert!(matches!(
            parse_records(csv.as_bytes()),
            Err(ClassifyError::MissingColumn("PURPOSE"))
        ));
    }

    #[test]
    fn test_short_rows_and_blank_lines_tolerated() {
        let csv = "SYMBOL,PURPOSE,EX-DATE\nABC,Dividend\n,,\n  , ,  \nDEF,Bonus 1:1,01-Sep-2025\n";
        let records = parse_records(csv.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].ex_date, "");
        assert_eq!(records[1].ex_date, "01-Sep-2025");
    }

    #[test]
    fn test_fields_trimmed_by_reader() {
        let csv = " SYMBOL , PURPOSE \n ABC ,  Rights 1:4  \n";
        let records = parse_records(csv.as_bytes()).unwrap();
        assert_eq!(records[0].symbol, "ABC");
        assert_eq!(records[0].purpose, "Rights 1:4");
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("actions.csv");
        std::fs::write(&path, SAMPLE).unwrap();
        let records = load_records(&path).unwrap();
        assert_eq!(records.len(), 2);
    }
}
