//! `imgex site` – localize a whole generated site.

use anyhow::Result;
use imgex_core::site::process_site;
use imgex_core::{ExtractorConfig, ImageExtractor};

pub async fn run_site(cfg: ExtractorConfig) -> Result<usize> {
    let root = cfg.output_dir.clone();
    let extractor = ImageExtractor::new(cfg)?;
    let summary = process_site(&extractor, &root).await?;

    println!(
        "{} of {} pages rewritten ({} images, {} references), {} of {} payloads rewritten ({} links)",
        summary.pages_rewritten,
        summary.pages_scanned,
        summary.images_localized,
        summary.references_replaced,
        summary.payloads_rewritten,
        summary.payloads_scanned,
        summary.links_replaced,
    );
    if summary.failures > 0 {
        println!("{} images left remote (see log)", summary.failures);
    }
    if summary.file_errors > 0 {
        println!("{} files could not be processed (see log)", summary.file_errors);
    }
    Ok(summary.failures)
}
