//! HTML pipeline: extract → download → rewrite.

use crate::downloader::DownloadFailure;
use crate::extract::extract_html_urls;
use crate::rewrite::rewrite_html;

use super::ImageExtractor;

/// Result of processing one rendered page.
#[derive(Debug)]
pub struct PageOutcome {
    pub html: String,
    /// Distinct image URLs found.
    pub found: usize,
    /// Images now served locally.
    pub localized: usize,
    /// Quoted occurrences rewritten.
    pub replaced: usize,
    pub failures: Vec<DownloadFailure>,
}

impl PageOutcome {
    pub fn changed(&self) -> bool {
        self.replaced > 0
    }
}

impl ImageExtractor {
    /// Localizes every remote image in `html`. Failed downloads leave their
    /// references untouched; the other images are still rewritten.
    pub async fn process_html(&self, route: &str, html: &str) -> PageOutcome {
        let urls = extract_html_urls(html, &self.patterns);
        let found = urls.len();
        if urls.is_empty() {
            return PageOutcome {
                html: html.to_string(),
                found: 0,
                localized: 0,
                replaced: 0,
                failures: Vec::new(),
            };
        }

        tracing::info!("{}: replacing {} images with local copies", route, found);

        let report = self.downloader.download_all(urls).await;
        let rewritten = rewrite_html(html, &report.assets, self.config.public_prefix());

        PageOutcome {
            html: rewritten.text,
            found,
            localized: report.assets.len(),
            replaced: rewritten.replaced,
            failures: report.failures,
        }
    }
}
