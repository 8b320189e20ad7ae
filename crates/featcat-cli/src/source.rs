//! Feature data acquisition
//!
//! The catalog comes from a spreadsheet-backed endpoint when one is
//! configured, and from the bundled static JSON file otherwise. Any failure
//! of the remote source falls back to the static file; only a static-file
//! failure is fatal.

use std::{fs::File, io::BufReader, path::Path, time::Duration};

use anyhow::Context;
use featcat_catalog::FeatureCatalog;

const REMOTE_TIMEOUT: Duration = Duration::from_secs(10);

/// Loads the catalog, preferring `source_url` when it is set.
pub fn load_catalog(source_url: Option<&str>, data_path: &Path) -> anyhow::Result<FeatureCatalog> {
    if let Some(url) = source_url.filter(|url| !url.trim().is_empty()) {
        match fetch_remote(url) {
            Ok(catalog) => {
                tracing::info!(url, count = catalog.len(), "loaded features from remote source");
                return Ok(catalog);
            }
            Err(err) => {
                let error = format!("{err:#}");
                tracing::warn!(url, %error, "remote source failed, falling back to static file");
            }
        }
    }

    let catalog = load_static(data_path).context("Failed to load features")?;
    tracing::info!(
        path = %data_path.display(),
        count = catalog.len(),
        "loaded features from static file"
    );
    Ok(catalog)
}

fn fetch_remote(url: &str) -> anyhow::Result<FeatureCatalog> {
    let client = reqwest::blocking::Client::builder()
        .timeout(REMOTE_TIMEOUT)
        .build()
        .context("Failed to build HTTP client")?;

    let body = client
        .get(url)
        .send()
        .with_context(|| format!("Failed to fetch {url}"))?
        .error_for_status()
        .with_context(|| format!("Remote source returned an error status: {url}"))?
        .text()
        .with_context(|| format!("Failed to read response body from {url}"))?;

    FeatureCatalog::from_json_str(&body)
        .with_context(|| format!("Failed to parse feature payload from {url}"))
}

fn load_static(path: &Path) -> anyhow::Result<FeatureCatalog> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open features file: {}", path.display()))?;
    FeatureCatalog::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse features JSON file: {}", path.display()))
}
