//! Human-readable summaries printed after a command finishes.

use corpact::ActionsDocument;

/// One-line count of each report group.
pub fn summary(doc: &ActionsDocument) -> String {
    format!(
        "{} dividends, {} bonus issues, {} splits, {} others",
        doc.dividends.len(),
        doc.bonuses.len(),
        doc.splits.len(),
        doc.others.len()
    )
}
