//! Per-page and per-payload pipelines.
//!
//! [`ImageExtractor`] bundles the run configuration, the compiled URL patterns
//! and the shared [`AssetDownloader`]. Pages and payloads processed through
//! the same extractor share the run-scoped download cache.

mod page;
mod payload;

pub use page::PageOutcome;
pub use payload::PayloadOutcome;

use anyhow::{Context, Result};

use crate::config::ExtractorConfig;
use crate::downloader::AssetDownloader;
use crate::extract::ImagePatterns;

#[derive(Debug, Clone)]
pub struct ImageExtractor {
    config: ExtractorConfig,
    patterns: ImagePatterns,
    downloader: AssetDownloader,
}

impl ImageExtractor {
    pub fn new(config: ExtractorConfig) -> Result<Self> {
        config.validate()?;
        let patterns = ImagePatterns::new(&config.normalized_extensions())
            .context("build image URL patterns")?;
        let downloader = AssetDownloader::from_config(&config);
        Ok(Self {
            config,
            patterns,
            downloader,
        })
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    pub fn patterns(&self) -> &ImagePatterns {
        &self.patterns
    }

    pub fn downloader(&self) -> &AssetDownloader {
        &self.downloader
    }

    /// Creates the asset directory if missing. Must run before any fetch.
    pub fn ensure_asset_dir(&self) -> Result<()> {
        let dir = self.downloader.asset_dir();
        std::fs::create_dir_all(dir)
            .with_context(|| format!("create asset dir: {}", dir.display()))?;
        Ok(())
    }
}
