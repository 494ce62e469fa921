//! `corpact run`: fetch, classify, write, and optionally publish in one go.

use anyhow::{Context, Result};
use corpact::{classify_csv, ActionsDocument, DatasetQuery, FetchConfig};
use tracing::info;

use super::{build_cmd, fetch_cmd, publish_cmd};
use crate::config::PipelineConfig;

/// Run the whole pipeline. Reports are only written once every record has
/// been classified.
pub async fn run(
    config: &PipelineConfig,
    fetch: FetchConfig,
    query: &DatasetQuery,
    publish: bool,
) -> Result<ActionsDocument> {
    let bytes = fetch_cmd::download(fetch, query).await?;
    fetch_cmd::save_csv(&config.csv_path(), &bytes)?;

    let actions = classify_csv(&bytes).context("failed to classify fetched dataset")?;
    let doc = build_cmd::write(config, &actions)?;

    if publish {
        publish_cmd::run(config)?;
    } else {
        info!("skipping publish");
    }
    Ok(doc)
}
