//! `corpact fetch`: download the raw corporate actions CSV.

use std::path::PathBuf;

use anyhow::{Context, Result};
use corpact::{DatasetQuery, FetchConfig, Fetcher};
use tracing::info;

use crate::config::PipelineConfig;

/// Fetch the dataset and return its bytes without touching the filesystem.
pub async fn download(fetch: FetchConfig, query: &DatasetQuery) -> Result<Vec<u8>> {
    Fetcher::new(fetch)
        .fetch(query)
        .await
        .with_context(|| {
            format!(
                "failed to fetch corporate actions for {} to {}",
                query.from, query.to
            )
        })
}

/// Write raw CSV bytes to `path`, creating the output directory.
pub fn save_csv(path: &std::path::Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("failed to write {}", path.display()))?;
    info!(path = %path.display(), bytes = bytes.len(), "raw CSV saved");
    Ok(())
}

/// Run the fetch command. `out` overrides the configured CSV location.
pub async fn run(
    config: &PipelineConfig,
    fetch: FetchConfig,
    query: &DatasetQuery,
    out: Option<PathBuf>,
) -> Result<PathBuf> {
    let bytes = download(fetch, query).await?;
    let path = out.unwrap_or_else(|| config.csv_path());
    save_csv(&path, &bytes)?;
    Ok(path)
}
