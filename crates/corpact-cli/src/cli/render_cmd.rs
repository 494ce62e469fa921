//! `corpact render`: regenerate the HTML page from an existing JSON document.

use std::path::Path;

use anyhow::{Context, Result};
use corpact::report::html;
use corpact::ActionsDocument;

use crate::config::PipelineConfig;

pub fn run(config: &PipelineConfig, json: Option<&Path>) -> Result<ActionsDocument> {
    let json_path = json
        .map(Path::to_path_buf)
        .unwrap_or_else(|| config.json_path());
    let doc = ActionsDocument::read_from_file(&json_path)
        .with_context(|| format!("failed to load {}", json_path.display()))?;

    let html_path = config.html_path();
    html::write_to_file(&doc, &html_path)
        .with_context(|| format!("failed to write {}", html_path.display()))?;
    Ok(doc)
}
