//! Domain types: raw source rows, action categories, and classified output.

use chrono::NaiveDate;

/// Placeholder used by the source and the report for "no value".
pub const PLACEHOLDER: &str = "-";

/// Currency sign prefixed to every amount the classifier extracts.
pub const CURRENCY_SIGN: char = '\u{20B9}';

/// Label given to every split in the report.
pub const SPLIT_ACTION_LABEL: &str = "Face Value Split";

/// One row of the corporate actions dataset, as read from the source CSV.
///
/// All fields are trimmed. Dates are still in the source format
/// (`DD-Mon-YYYY`, `-`, or empty).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawActionRecord {
    pub symbol: String,
    pub company_name: String,
    pub purpose: String,
    pub ex_date: String,
    pub record_date: String,
}

/// Sub-type of a dividend announcement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DividendKind {
    Interim,
    Final,
    Special,
    Unspecified,
}

impl DividendKind {
    /// Report label; `-` for [`DividendKind::Unspecified`].
    pub fn label(self) -> &'static str {
        match self {
            DividendKind::Interim => "Interim",
            DividendKind::Final => "Final",
            DividendKind::Special => "Special",
            DividendKind::Unspecified => PLACEHOLDER,
        }
    }
}

/// The single category a surviving record is assigned to.
///
/// Currency values are pre-formatted strings (`₹2.50`) or [`PLACEHOLDER`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionCategory {
    Dividend { kind: DividendKind, amount: String },
    Bonus { ratio: String },
    Split { from_value: String, to_value: String },
    Other { description: String },
}

/// Which of the four output groups a category belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionGroup {
    Dividends,
    Bonuses,
    Splits,
    Others,
}

impl ActionCategory {
    pub fn group(&self) -> ActionGroup {
        match self {
            ActionCategory::Dividend { .. } => ActionGroup::Dividends,
            ActionCategory::Bonus { .. } => ActionGroup::Bonuses,
            ActionCategory::Split { .. } => ActionGroup::Splits,
            ActionCategory::Other { .. } => ActionGroup::Others,
        }
    }
}

/// A record after classification and date normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedAction {
    pub name: String,
    pub symbol: String,
    pub category: ActionCategory,
    pub ex_date: Option<NaiveDate>,
    pub record_date: Option<NaiveDate>,
}

impl ClassifiedAction {
    /// Ex-date as `YYYY-MM-DD`, or an empty string.
    pub fn ex_iso(&self) -> String {
        iso_or_empty(self.ex_date)
    }

    /// Record date as `YYYY-MM-DD`, or an empty string.
    pub fn record_iso(&self) -> String {
        iso_or_empty(self.record_date)
    }
}

/// Format an optional date the way the report expects it.
pub fn iso_or_empty(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

/// Classified records partitioned into the four report groups.
///
/// Each group is ordered by ex-date ascending with undated records last.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifiedActions {
    pub dividends: Vec<ClassifiedAction>,
    pub bonuses: Vec<ClassifiedAction>,
    pub splits: Vec<ClassifiedAction>,
    pub others: Vec<ClassifiedAction>,
}

impl ClassifiedActions {
    /// Route an action into the group matching its category.
    pub fn push(&mut self, action: ClassifiedAction) {
        match action.category.group() {
            ActionGroup::Dividends => self.dividends.push(action),
            ActionGroup::Bonuses => self.bonuses.push(action),
            ActionGroup::Splits => self.splits.push(action),
            ActionGroup::Others => self.others.push(action),
        }
    }

    /// Sort every group: dated records first, ascending; undated after, in
    /// their original order.
    pub fn sort(&mut self) {
        for group in [
            &mut self.dividends,
            &mut self.bonuses,
            &mut self.splits,
            &mut self.others,
        ] {
            group.sort_by_key(|a| (a.ex_date.is_none(), a.ex_date));
        }
    }

    /// Total number of records across all groups.
    pub fn len(&self) -> usize {
        self.dividends.len() + self.bonuses.len() + self.splits.len() + self.others.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
