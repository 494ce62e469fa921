//! `corpact build`: classify a raw CSV and write the JSON and HTML reports.

use std::path::Path;

use anyhow::{Context, Result};
use corpact::{classify_batch, load_records, write_reports, ActionsDocument, ClassifiedActions};

use crate::config::PipelineConfig;

/// Write both reports for an already classified batch.
pub fn write(config: &PipelineConfig, actions: &ClassifiedActions) -> Result<ActionsDocument> {
    let json_path = config.json_path();
    let html_path = config.html_path();
    write_reports(actions, &json_path, &html_path).context("failed to write reports")
}

/// Run the build command. Reads `input`, or the configured CSV path.
pub fn run(config: &PipelineConfig, input: Option<&Path>) -> Result<ActionsDocument> {
    let csv_path = input
        .map(Path::to_path_buf)
        .unwrap_or_else(|| config.csv_path());

    let records = load_records(&csv_path)
        .with_context(|| format!("failed to read {}", csv_path.display()))?;
    let actions = classify_batch(records)
        .with_context(|| format!("failed to classify {}", csv_path.display()))?;
    write(config, &actions)
}
