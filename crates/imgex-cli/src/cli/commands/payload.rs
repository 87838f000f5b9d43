//! `imgex payload` – localize images in one payload file.

use std::path::Path;

use anyhow::Result;
use imgex_core::{ExtractorConfig, ImageExtractor};

use super::report_failures;

pub async fn run_payload(cfg: ExtractorConfig, file: &Path) -> Result<usize> {
    let extractor = ImageExtractor::new(cfg)?;
    extractor.ensure_asset_dir()?;

    let outcome = extractor.process_payload_file(file).await?;
    println!(
        "{}: {} of {} images localized, {} links rewritten",
        file.display(),
        outcome.localized,
        outcome.found,
        outcome.replaced
    );
    report_failures(&outcome.failures);
    Ok(outcome.failures.len())
}
