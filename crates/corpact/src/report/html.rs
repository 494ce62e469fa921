//! Self-contained HTML report.
//!
//! The page layout lives in `templates/report.html`. Stylesheet and script
//! are embedded at compile time so the page has no external assets. The
//! script handles search, column sort, the 7-day ex-date highlight, and CSV
//! export on the client.

use std::path::Path;

use askama::Template;

use super::json::ActionsDocument;
use crate::error::ReportResult;

const REPORT_CSS: &str = include_str!("assets/report.css");
const REPORT_JS: &str = include_str!("assets/report.js");

pub const PAGE_TITLE: &str = "Upcoming Corporate Actions";

const DIVIDEND_HEADINGS: &[&str] = &[
    "Company",
    "Type",
    "Amount",
    "Category",
    "Ex-Date",
    "Record Date",
];
const BONUS_HEADINGS: &[&str] = &["Company", "Ratio", "Ex-Date", "Record Date"];
const SPLIT_HEADINGS: &[&str] = &["Company", "Action", "From", "To", "Ex-Date", "Record Date"];

/// One captioned table. Cells are escaped by the template.
struct Table {
    caption: &'static str,
    headings: &'static [&'static str],
    rows: Vec<Vec<String>>,
}

#[derive(Template)]
#[template(path = "report.html")]
struct ReportPage<'a> {
    title: &'a str,
    css: &'a str,
    js: &'a str,
    tables: Vec<Table>,
}

fn company(name: &str, symbol: &str) -> String {
    format!("{name} ({symbol})")
}

fn tables(doc: &ActionsDocument) -> Vec<Table> {
    let dividends = doc
        .dividends
        .iter()
        .map(|d| {
            vec![
                company(&d.name, &d.symbol),
                "Dividend".to_string(),
                d.amount.clone(),
                d.cat.clone(),
                d.ex.clone(),
                d.rec.clone(),
            ]
        })
        .collect();

    let bonuses = doc
        .bonuses
        .iter()
        .map(|b| {
            vec![
                company(&b.name, &b.symbol),
                b.ratio.clone(),
                b.ex.clone(),
                b.rec.clone(),
            ]
        })
        .collect();

    // split rows first, then the rest
    let splits_and_others = doc
        .splits
        .iter()
        .chain(doc.others.iter())
        .map(|s| {
            vec![
                company(&s.name, &s.symbol),
                s.action.clone(),
                s.from.clone(),
                s.to.clone(),
                s.ex.clone(),
                s.rec.clone(),
            ]
        })
        .collect();

    vec![
        Table {
            caption: "Dividends",
            headings: DIVIDEND_HEADINGS,
            rows: dividends,
        },
        Table {
            caption: "Bonus Issues",
            headings: BONUS_HEADINGS,
            rows: bonuses,
        },
        Table {
            caption: "Splits & Others",
            headings: SPLIT_HEADINGS,
            rows: splits_and_others,
        },
    ]
}

/// Render the full report page.
pub fn render(doc: &ActionsDocument) -> ReportResult<String> {
    let page = ReportPage {
        title: PAGE_TITLE,
        css: REPORT_CSS,
        js: REPORT_JS,
        tables: tables(doc),
    };
    Ok(page.render()?)
}

/// Render and write the report page.
pub fn write_to_file(doc: &ActionsDocument, path: &Path) -> ReportResult<()> {
    super::write_file(path, render(doc)?.as_bytes())
}
