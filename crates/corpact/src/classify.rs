//! Purpose-text classification.
//!
//! Each record's free-text purpose is run through an ordered table of rules.
//! The first rule that returns a verdict wins, so the table order is the
//! priority order: interest payments are dropped, then bonus, split,
//! rights, dividend. Anything left over becomes an "other" action.
//!
//! All matching is case-insensitive. Rules are pure functions of the text
//! and can be exercised on their own through [`RULES`].

use std::sync::OnceLock;

use regex::Regex;
use tracing::{debug, info};

use crate::dates::parse_source_date;
use crate::error::{ClassifyError, ClassifyResult};
use crate::source::parse_records;
use crate::types::{
    ActionCategory, ClassifiedAction, ClassifiedActions, DividendKind, RawActionRecord,
    CURRENCY_SIGN, PLACEHOLDER,
};

/// Outcome of classifying one purpose string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// The record is excluded from every output group.
    Drop,
    Assign(ActionCategory),
}

/// A named classification rule. `apply` returns `None` when the rule does
/// not fire for the given purpose text.
#[derive(Clone, Copy)]
pub struct Rule {
    pub name: &'static str,
    pub apply: fn(&str) -> Option<Verdict>,
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule").field("name", &self.name).finish()
    }
}

/// Rules in priority order. Text that no rule claims falls through to
/// [`other_rule`].
pub const RULES: &[Rule] = &[
    Rule {
        name: "interest",
        apply: interest_rule,
    },
    Rule {
        name: "bonus",
        apply: bonus_rule,
    },
    Rule {
        name: "split",
        apply: split_rule,
    },
    Rule {
        name: "rights",
        apply: rights_rule,
    },
    Rule {
        name: "dividend",
        apply: dividend_rule,
    },
];

// ── Patterns ────────────────────────────────────────────────────────────────

fn bonus_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\bbonus\s+(\d+)\s*:\s*(\d+)").expect("bonus regex is valid"))
}

fn split_values_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?i)\bfrom\s*(?:rs?|re|\x{20B9})\.?\s*([0-9]+(?:\.[0-9]+)?).+?\bto\s*(?:rs?|re|\x{20B9})\.?\s*([0-9]+(?:\.[0-9]+)?)",
        )
        .expect("split values regex is valid")
    })
}

fn amount_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)\bR(?:s|e)\s*\.?\s*([0-9]+(?:\.[0-9]+)?)").expect("amount regex is valid")
    })
}

fn currency(value: &str) -> String {
    format!("{CURRENCY_SIGN}{value}")
}

// ── Rules ───────────────────────────────────────────────────────────────────

/// Interest payments are not corporate actions for this report.
pub fn interest_rule(purpose: &str) -> Option<Verdict> {
    purpose
        .to_lowercase()
        .contains("interest payment")
        .then_some(Verdict::Drop)
}

/// `Bonus N:M` anywhere in the text.
pub fn bonus_rule(purpose: &str) -> Option<Verdict> {
    let caps = bonus_re().captures(purpose)?;
    Some(Verdict::Assign(ActionCategory::Bonus {
        ratio: format!("{}:{}", &caps[1], &caps[2]),
    }))
}

/// Face value splits and sub-divisions, with `From Rs X ... To Rs Y` values
/// when present.
pub fn split_rule(purpose: &str) -> Option<Verdict> {
    let lower = purpose.to_lowercase();
    if !(lower.contains("split") || lower.contains("sub-division")) {
        return None;
    }

    let (from_value, to_value) = match split_values_re().captures(purpose) {
        Some(caps) => (currency(&caps[1]), currency(&caps[2])),
        None => (PLACEHOLDER.to_string(), PLACEHOLDER.to_string()),
    };
    Some(Verdict::Assign(ActionCategory::Split {
        from_value,
        to_value,
    }))
}

/// Rights issues are reported verbatim under "other".
pub fn rights_rule(purpose: &str) -> Option<Verdict> {
    purpose
        .to_lowercase()
        .starts_with("rights")
        .then(|| {
            Verdict::Assign(ActionCategory::Other {
                description: purpose.to_string(),
            })
        })
}

/// Dividends, with sub-type and per-share amount when stated.
pub fn dividend_rule(purpose: &str) -> Option<Verdict> {
    let lower = purpose.to_lowercase();
    if !lower.contains("dividend") {
        return None;
    }

    let kind = [
        ("interim", DividendKind::Interim),
        ("final", DividendKind::Final),
        ("special", DividendKind::Special),
    ]
    .into_iter()
    .find(|(word, _)| lower.contains(*word))
    .map(|(_, kind)| kind)
    .unwrap_or(DividendKind::Unspecified);

    let amount = amount_re()
        .captures(purpose)
        .map(|caps| currency(&caps[1]))
        .unwrap_or_else(|| PLACEHOLDER.to_string());

    Some(Verdict::Assign(ActionCategory::Dividend { kind, amount }))
}

/// Catch-all: the purpose text itself, or `Other` when it is empty.
pub fn other_rule(purpose: &str) -> Verdict {
    let description = if purpose.is_empty() {
        "Other".to_string()
    } else {
        purpose.to_string()
    };
    Verdict::Assign(ActionCategory::Other { description })
}

/// Classify one purpose string.
pub fn classify_purpose(purpose: &str) -> Verdict {
    RULES
        .iter()
        .find_map(|rule| (rule.apply)(purpose))
        .unwrap_or_else(|| other_rule(purpose))
}

// ── Records ─────────────────────────────────────────────────────────────────

/// Classify a single source record.
///
/// `row` is the 1-based data row index, used only for error context. Dates
/// are validated before the purpose is looked at, so a dropped record with
/// a malformed date still fails.
pub fn classify_record(
    row: usize,
    record: &RawActionRecord,
) -> ClassifyResult<Option<ClassifiedAction>> {
    let date = |field: &'static str, value: &str| {
        parse_source_date(value).map_err(|source| ClassifyError::DataFormat {
            row,
            symbol: record.symbol.clone(),
            field,
            value: value.to_string(),
            source,
        })
    };
    let ex_date = date("EX-DATE", &record.ex_date)?;
    let record_date = date("RECORD DATE", &record.record_date)?;

    let category = match classify_purpose(&record.purpose) {
        Verdict::Drop => {
            debug!(symbol = %record.symbol, purpose = %record.purpose, "dropping record");
            return Ok(None);
        }
        Verdict::Assign(category) => category,
    };

    let name = if record.company_name.is_empty() {
        record.symbol.clone()
    } else {
        record.company_name.clone()
    };

    Ok(Some(ClassifiedAction {
        name,
        symbol: record.symbol.clone(),
        category,
        ex_date,
        record_date,
    }))
}

/// Classify a batch, partition it into groups, and sort each group.
///
/// Stops at the first malformed record; no partial result is returned.
pub fn classify_batch<I>(records: I) -> ClassifyResult<ClassifiedActions>
where
    I: IntoIterator<Item = RawActionRecord>,
{
    let mut actions = ClassifiedActions::default();
    let mut dropped = 0usize;

    for (idx, record) in records.into_iter().enumerate() {
        match classify_record(idx + 1, &record)? {
            Some(action) => actions.push(action),
            None => dropped += 1,
        }
    }
    actions.sort();

    info!(
        dividends = actions.dividends.len(),
        bonuses = actions.bonuses.len(),
        splits = actions.splits.len(),
        others = actions.others.len(),
        dropped,
        "classified corporate actions"
    );
    Ok(actions)
}

/// Parse raw CSV bytes and classify every row.
pub fn classify_csv(bytes: &[u8]) -> ClassifyResult<ClassifiedActions> {
    classify_batch(parse_records(bytes)?)
}
