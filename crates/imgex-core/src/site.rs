//! Generated-site walk: every `*.html` page first, then every payload file.
//!
//! Files are visited in sorted path order. A file that cannot be read or
//! written is logged and counted; the walk continues with the next file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::pipeline::ImageExtractor;

/// Totals for one site run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SiteSummary {
    pub pages_scanned: usize,
    pub pages_rewritten: usize,
    pub payloads_scanned: usize,
    pub payloads_rewritten: usize,
    /// Distinct images made local across all pages.
    pub images_localized: usize,
    /// Quoted page references rewritten (an image can be referenced many times).
    pub references_replaced: usize,
    pub links_replaced: usize,
    /// Image URLs that could not be localized (left pointing at the CMS).
    pub failures: usize,
    /// Files skipped because of I/O errors.
    pub file_errors: usize,
}

impl SiteSummary {
    pub fn is_clean(&self) -> bool {
        self.failures == 0 && self.file_errors == 0
    }
}

/// Route of a page relative to the site root, with `/` separators.
pub fn route_for(root: &Path, page: &Path) -> String {
    let rel = page.strip_prefix(root).unwrap_or(page);
    let parts: Vec<String> = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    format!("/{}", parts.join("/"))
}

/// Collects pages and payloads below `root`, each list sorted.
fn collect_files(root: &Path, payload_name: &str) -> Result<(Vec<PathBuf>, Vec<PathBuf>)> {
    let mut pages = Vec::new();
    let mut payloads = Vec::new();
    let mut stack = vec![root.to_path_buf()];

    while let Some(dir) = stack.pop() {
        let entries =
            std::fs::read_dir(&dir).with_context(|| format!("read dir: {}", dir.display()))?;
        for entry in entries {
            let entry = entry.with_context(|| format!("read dir: {}", dir.display()))?;
            let path = entry.path();
            let file_type = entry.file_type()?;
            if file_type.is_dir() {
                stack.push(path);
            } else if file_type.is_file() {
                let name = entry.file_name();
                let name = name.to_string_lossy();
                if name == payload_name {
                    payloads.push(path);
                } else if path
                    .extension()
                    .map(|e| e.eq_ignore_ascii_case("html"))
                    .unwrap_or(false)
                {
                    pages.push(path);
                }
            }
        }
    }

    pages.sort();
    payloads.sort();
    Ok((pages, payloads))
}

/// Localizes every remote image referenced by the site under `root`.
///
/// The asset directory is created up front. Pages are only written back when
/// something was replaced.
pub async fn process_site(extractor: &ImageExtractor, root: &Path) -> Result<SiteSummary> {
    extractor.ensure_asset_dir()?;
    let (pages, payloads) = collect_files(root, &extractor.config().payload_file_name)?;
    tracing::debug!(
        root = %root.display(),
        pages = pages.len(),
        payloads = payloads.len(),
        "scanning site"
    );

    let mut summary = SiteSummary::default();

    for page in &pages {
        summary.pages_scanned += 1;
        let html = match tokio::fs::read_to_string(page).await {
            Ok(h) => h,
            Err(e) => {
                tracing::error!(path = %page.display(), error = %e, "cannot read page");
                summary.file_errors += 1;
                continue;
            }
        };

        let route = route_for(root, page);
        let outcome = extractor.process_html(&route, &html).await;
        summary.failures += outcome.failures.len();
        summary.images_localized += outcome.localized;
        summary.references_replaced += outcome.replaced;
        if !outcome.changed() {
            continue;
        }

        match tokio::fs::write(page, outcome.html.as_bytes()).await {
            Ok(()) => summary.pages_rewritten += 1,
            Err(e) => {
                tracing::error!(path = %page.display(), error = %e, "cannot write page");
                summary.file_errors += 1;
            }
        }
    }

    for payload in &payloads {
        summary.payloads_scanned += 1;
        match extractor.process_payload_file(payload).await {
            Ok(outcome) => {
                summary.failures += outcome.failures.len();
                summary.links_replaced += outcome.replaced;
                if outcome.changed() {
                    summary.payloads_rewritten += 1;
                }
            }
            Err(_) => summary.file_errors += 1,
        }
    }

    tracing::info!(
        pages = summary.pages_rewritten,
        payloads = summary.payloads_rewritten,
        images = summary.images_localized,
        references = summary.references_replaced,
        links = summary.links_replaced,
        failures = summary.failures,
        "site done"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routes_are_slash_separated() {
        let root = Path::new("/srv/dist");
        assert_eq!(route_for(root, Path::new("/srv/dist/index.html")), "/index.html");
        assert_eq!(
            route_for(root, Path::new("/srv/dist/blog/post/index.html")),
            "/blog/post/index.html"
        );
    }

    #[test]
    fn collects_sorted_pages_and_payloads() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        std::fs::create_dir_all(root.join("b/_nuxt")).unwrap();
        std::fs::create_dir_all(root.join("a")).unwrap();
        std::fs::write(root.join("index.html"), "").unwrap();
        std::fs::write(root.join("b/index.HTML"), "").unwrap();
        std::fs::write(root.join("a/index.html"), "").unwrap();
        std::fs::write(root.join("a/payload.js"), "").unwrap();
        std::fs::write(root.join("b/_nuxt/payload.js"), "").unwrap();
        std::fs::write(root.join("b/app.js"), "").unwrap();

        let (pages, payloads) = collect_files(root, "payload.js").unwrap();
        assert_eq!(
            pages,
            vec![
                root.join("a/index.html"),
                root.join("b/index.HTML"),
                root.join("index.html"),
            ]
        );
        assert_eq!(
            payloads,
            vec![root.join("a/payload.js"), root.join("b/_nuxt/payload.js")]
        );
    }

    #[test]
    fn missing_root_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(collect_files(&dir.path().join("nope"), "payload.js").is_err());
    }
}
