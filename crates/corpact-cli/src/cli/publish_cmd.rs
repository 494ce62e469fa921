//! `corpact publish`: commit and push the generated reports.

use std::path::Path;

use anyhow::{Context, Result};

use crate::config::{today, PipelineConfig};
use crate::publish::GitPublisher;

pub fn run(config: &PipelineConfig) -> Result<()> {
    let publisher = GitPublisher::locate(&config.out_dir)?;
    let files = [Path::new(&config.html_file), Path::new(&config.json_file)];
    publisher
        .publish(&files, today())
        .context("failed to publish reports")
}
