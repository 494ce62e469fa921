//! The JSON interchange document.
//!
//! Every value is a pre-formatted string; dates are `YYYY-MM-DD` or empty.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ReportError, ReportResult};
use crate::types::{ActionCategory, ClassifiedAction, ClassifiedActions, PLACEHOLDER, SPLIT_ACTION_LABEL};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DividendRow {
    pub name: String,
    pub symbol: String,
    pub amount: String,
    pub cat: String,
    pub ex: String,
    pub rec: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusRow {
    pub name: String,
    pub symbol: String,
    pub ratio: String,
    pub ex: String,
    pub rec: String,
}

/// Row shape shared by splits and other actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRow {
    pub name: String,
    pub symbol: String,
    pub action: String,
    pub from: String,
    pub to: String,
    pub ex: String,
    pub rec: String,
}

/// Top-level document: four groups in report order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionsDocument {
    pub dividends: Vec<DividendRow>,
    pub bonuses: Vec<BonusRow>,
    pub splits: Vec<ActionRow>,
    pub others: Vec<ActionRow>,
}

impl ActionsDocument {
    pub fn to_json_pretty(&self) -> ReportResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the document as pretty-printed UTF-8 JSON.
    pub fn write_to_file(&self, path: &Path) -> ReportResult<()> {
        let json = self.to_json_pretty()?;
        super::write_file(path, json.as_bytes())
    }

    pub fn read_from_file(path: &Path) -> ReportResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| ReportError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Ok(serde_json::from_str(&text)?)
    }
}

impl From<&ClassifiedActions> for ActionsDocument {
    fn from(actions: &ClassifiedActions) -> Self {
        Self {
            dividends: actions.dividends.iter().filter_map(dividend_row).collect(),
            bonuses: actions.bonuses.iter().filter_map(bonus_row).collect(),
            splits: actions.splits.iter().filter_map(action_row).collect(),
            others: actions.others.iter().filter_map(action_row).collect(),
        }
    }
}

fn dividend_row(a: &ClassifiedAction) -> Option<DividendRow> {
    let ActionCategory::Dividend { kind, amount } = &a.category else {
        return None;
    };
    Some(DividendRow {
        name: a.name.clone(),
        symbol: a.symbol.clone(),
        amount: amount.clone(),
        cat: kind.label().to_string(),
        ex: a.ex_iso(),
        rec: a.record_iso(),
    })
}

fn bonus_row(a: &ClassifiedAction) -> Option<BonusRow> {
    let ActionCategory::Bonus { ratio } = &a.category else {
        return None;
    };
    Some(BonusRow {
        name: a.name.clone(),
        symbol: a.symbol.clone(),
        ratio: ratio.clone(),
        ex: a.ex_iso(),
        rec: a.record_iso(),
    })
}

fn action_row(a: &ClassifiedAction) -> Option<ActionRow> {
    let (action, from, to) = match &a.category {
        ActionCategory::Split {
            from_value,
            to_value,
        } => (
            SPLIT_ACTION_LABEL.to_string(),
            from_value.clone(),
            to_value.clone(),
        ),
        ActionCategory::Other { description } => (
            description.clone(),
            PLACEHOLDER.to_string(),
            PLACEHOLDER.to_string(),
        ),
        _ => return None,
    };
    Some(ActionRow {
        name: a.name.clone(),
        symbol: a.symbol.clone(),
        action,
        from,
        to,
        ex: a.ex_iso(),
        rec: a.record_iso(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DividendKind;
    use chrono::NaiveDate;
    use serde_json::{json, Value};

    fn sample() -> ClassifiedActions {
        let mut actions = ClassifiedActions::default();
        actions.push(ClassifiedAction {
            name: "Abc Ltd".into(),
            symbol: "ABC".into(),
            category: ActionCategory::Dividend {
                kind: DividendKind::Unspecified,
                amount: "\u{20B9}2.50".into(),
            },
            ex_date: NaiveDate::from_ymd_opt(2025, 8, 15),
            record_date: None,
        });
        actions.push(ClassifiedAction {
            name: "Def Ltd".into(),
            symbol: "DEF".into(),
            category: ActionCategory::Split {
                from_value: "\u{20B9}10".into(),
                to_value: "\u{20B9}2".into(),
            },
            ex_date: None,
            record_date: NaiveDate::from_ymd_opt(2025, 9, 1),
        });
        actions.push(ClassifiedAction {
            name: "Ghi Ltd".into(),
            symbol: "GHI".into(),
            category: ActionCategory::Other {
                description: "Rights 1:5".into(),
            },
            ex_date: None,
            record_date: None,
        });
        actions
    }

    #[test]
    fn test_document_shape() {
        let doc = ActionsDocument::from(&sample());
        let value: Value = serde_json::from_str(&doc.to_json_pretty().unwrap()).unwrap();
        assert_eq!(
            value,
            json!({
                "dividends": [{
                    "name": "Abc Ltd", "symbol": "ABC", "amount": "\u{20B9}2.50",
                    "cat": "-", "ex": "2025-08-15", "rec": ""
                }],
                "bonuses": [],
                "splits": [{
                    "name": "Def Ltd", "symbol": "DEF", "action": "Face Value Split",
                    "from": "\u{20B9}10", "to": "\u{20B9}2", "ex": "", "rec": "2025-09-01"
                }],
                "others": [{
                    "name": "Ghi Ltd", "symbol": "GHI", "action": "Rights 1:5",
                    "from": "-", "to": "-", "ex": "", "rec": ""
                }]
            })
        );
    }

    #[test]
    fn test_write_and_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("corporate_actions.json");
        let doc = ActionsDocument::from(&sample());
        doc.write_to_file(&path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\n  \"dividends\""));
        assert_eq!(ActionsDocument::read_from_file(&path).unwrap(), doc);
    }

    #[test]
    fn test_read_missing_file_names_path() {
        let err = ActionsDocument::read_from_file(Path::new("/nonexistent/actions.json"))
            .unwrap_err();
        assert!(err.to_string().contains("/nonexistent/actions.json"));
    }
}
