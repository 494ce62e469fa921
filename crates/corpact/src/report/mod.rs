//! Report writers: the JSON interchange document and the HTML page.

pub mod html;
pub mod json;

use std::path::Path;

use tracing::info;

use crate::error::{ReportError, ReportResult};
use crate::types::ClassifiedActions;

pub use json::{ActionRow, ActionsDocument, BonusRow, DividendRow};

/// Write bytes to `path`, creating parent directories as needed.
pub(crate) fn write_file(path: &Path, contents: &[u8]) -> ReportResult<()> {
    let io_err = |source| ReportError::Io {
        path: path.display().to_string(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    std::fs::write(path, contents).map_err(io_err)
}

/// Write the JSON document and the HTML page for a classified batch.
pub fn write_reports(
    actions: &ClassifiedActions,
    json_path: &Path,
    html_path: &Path,
) -> ReportResult<ActionsDocument> {
    let doc = ActionsDocument::from(actions);
    doc.write_to_file(json_path)?;
    html::write_to_file(&doc, html_path)?;
    info!(
        json = %json_path.display(),
        html = %html_path.display(),
        records = actions.len(),
        "reports written"
    );
    Ok(doc)
}
