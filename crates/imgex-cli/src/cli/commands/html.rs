//! `imgex html` – localize images in one HTML file.

use std::path::Path;

use anyhow::{Context, Result};
use imgex_core::{ExtractorConfig, ImageExtractor};

use super::report_failures;

pub async fn run_html(cfg: ExtractorConfig, file: &Path, route: Option<&str>) -> Result<usize> {
    let extractor = ImageExtractor::new(cfg)?;
    extractor.ensure_asset_dir()?;

    let html = tokio::fs::read_to_string(file)
        .await
        .with_context(|| format!("read page: {}", file.display()))?;
    let route = route
        .map(str::to_string)
        .unwrap_or_else(|| file.display().to_string());

    let outcome = extractor.process_html(&route, &html).await;
    if outcome.changed() {
        tokio::fs::write(file, outcome.html.as_bytes())
            .await
            .with_context(|| format!("write page: {}", file.display()))?;
    }

    println!(
        "{}: {} of {} images localized, {} references rewritten",
        route, outcome.localized, outcome.found, outcome.replaced
    );
    report_failures(&outcome.failures);
    Ok(outcome.failures.len())
}
