//! `imgex name` – print the local name for an image URL.

use anyhow::{Context, Result};
use imgex_core::url_model::RemoteUrl;
use imgex_core::{ExtractorConfig, ImageExtractor};

pub fn run_name(cfg: ExtractorConfig, url: &str) -> Result<()> {
    let remote = RemoteUrl::parse(url).with_context(|| format!("invalid URL: {}", url))?;
    let extractor = ImageExtractor::new(cfg)?;
    println!("{}", extractor.downloader().local_name(&remote));
    Ok(())
}
