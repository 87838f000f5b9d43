//! Payload pipeline: same download step, payload-specific extraction and
//! rewriting.

use std::path::Path;

use anyhow::{Context, Result};

use crate::downloader::DownloadFailure;
use crate::extract::extract_payload_urls;
use crate::rewrite::rewrite_payload;

use super::ImageExtractor;

/// Result of processing one payload.
#[derive(Debug)]
pub struct PayloadOutcome {
    pub text: String,
    pub found: usize,
    pub localized: usize,
    /// Occurrences rewritten; reported in the log line.
    pub replaced: usize,
    pub failures: Vec<DownloadFailure>,
}

impl PayloadOutcome {
    pub fn changed(&self) -> bool {
        self.replaced > 0
    }
}

impl ImageExtractor {
    /// Localizes every remote image in payload text.
    pub async fn rewrite_payload_text(&self, text: &str) -> PayloadOutcome {
        let urls = extract_payload_urls(text, &self.patterns);
        let found = urls.len();
        if urls.is_empty() {
            return PayloadOutcome {
                text: text.to_string(),
                found: 0,
                localized: 0,
                replaced: 0,
                failures: Vec::new(),
            };
        }

        let report = self.downloader.download_all(urls).await;
        let rewritten = rewrite_payload(
            text,
            &report.assets,
            self.config.router_prefix(),
            self.config.public_prefix(),
        );
        tracing::info!("replaced {} image links in this payload", rewritten.replaced);

        PayloadOutcome {
            text: rewritten.text,
            found,
            localized: report.assets.len(),
            replaced: rewritten.replaced,
            failures: report.failures,
        }
    }

    /// Reads a payload file, localizes its images and writes it back in
    /// place. The file is left untouched when it references no images.
    pub async fn process_payload_file(&self, path: &Path) -> Result<PayloadOutcome> {
        let text = match tokio::fs::read_to_string(path).await {
            Ok(t) => t,
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "cannot read payload");
                return Err(e).with_context(|| format!("read payload: {}", path.display()));
            }
        };

        let outcome = self.rewrite_payload_text(&text).await;
        if outcome.found == 0 {
            return Ok(outcome);
        }

        if let Err(e) = tokio::fs::write(path, outcome.text.as_bytes()).await {
            tracing::error!(path = %path.display(), error = %e, "cannot write payload");
            return Err(e).with_context(|| format!("write payload: {}", path.display()));
        }
        Ok(outcome)
    }
}
