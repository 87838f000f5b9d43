//! Shared download-and-name step used by both the HTML and payload pipelines.
//!
//! Every URL of one batch is fetched concurrently: one task per URL on a
//! `JoinSet`, each running the blocking curl fetch in `spawn_blocking`. The
//! batch is awaited as a group and reported in input order. A failure only
//! affects its own URL.

mod cache;

pub use cache::{DownloadCache, SharedOutcome};

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::ExtractorConfig;
use crate::fetch::{fetch_to_file, FetchError, FetchOptions};
use crate::url_model::{derive_local_name_with, NameStyle, RemoteUrl};

/// An image that is present under the asset directory.
#[derive(Debug, Clone)]
pub struct LocalAsset {
    pub remote: RemoteUrl,
    pub local_name: String,
    /// Bytes written by the fetch that produced the file.
    pub bytes: u64,
    /// True when the file came from an earlier fetch in this run.
    pub reused: bool,
}

/// A URL whose image could not be made local.
#[derive(Debug, Clone)]
pub struct DownloadFailure {
    pub href: String,
    pub error: Arc<FetchError>,
}

/// Outcome of one batch, in input order.
#[derive(Debug, Default)]
pub struct DownloadReport {
    pub assets: Vec<LocalAsset>,
    pub failures: Vec<DownloadFailure>,
}

#[derive(Debug)]
struct Inner {
    asset_dir: PathBuf,
    options: FetchOptions,
    style: NameStyle,
    cache: Option<DownloadCache>,
}

/// Downloads images into one asset directory. Cheap to clone; clones share the cache.
#[derive(Debug, Clone)]
pub struct AssetDownloader {
    inner: Arc<Inner>,
}

impl AssetDownloader {
    /// `reuse_downloads` enables the run-scoped href cache; without it every
    /// call fetches again, even for hrefs already fetched this run.
    pub fn new(
        asset_dir: impl Into<PathBuf>,
        options: FetchOptions,
        style: NameStyle,
        reuse_downloads: bool,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                asset_dir: asset_dir.into(),
                options,
                style,
                cache: reuse_downloads.then(DownloadCache::new),
            }),
        }
    }

    pub fn from_config(cfg: &ExtractorConfig) -> Self {
        let style = if cfg.query_hash_suffix {
            NameStyle::QueryHash
        } else {
            NameStyle::Plain
        };
        Self::new(
            cfg.asset_dir(),
            FetchOptions::from(&cfg.fetch_config()),
            style,
            cfg.reuse_downloads,
        )
    }

    pub fn asset_dir(&self) -> &Path {
        &self.inner.asset_dir
    }

    pub fn local_name(&self, url: &RemoteUrl) -> String {
        derive_local_name_with(url.url(), self.inner.style)
    }

    /// Fetches every URL concurrently and waits for all of them.
    pub async fn download_all(&self, urls: Vec<RemoteUrl>) -> DownloadReport {
        let mut report = DownloadReport::default();
        let mut slots: Vec<Option<Result<LocalAsset, DownloadFailure>>> = Vec::new();
        let mut hrefs: Vec<String> = Vec::new();
        let mut claimed: HashMap<String, String> = HashMap::new();
        let mut set = tokio::task::JoinSet::new();

        for remote in urls {
            let index = slots.len();
            let href = remote.href().to_string();
            let local_name = self.local_name(&remote);
            hrefs.push(href.clone());

            if let Some(owner) = claimed.get(&local_name) {
                tracing::warn!(url = %href, other = %owner, name = %local_name, "local name collision; skipping image");
                slots.push(Some(Err(DownloadFailure {
                    href,
                    error: Arc::new(FetchError::NameCollision {
                        name: local_name,
                        href: owner.clone(),
                    }),
                })));
                continue;
            }
            claimed.insert(local_name.clone(), href);
            slots.push(None);

            let this = self.clone();
            set.spawn(async move { (index, this.download_one(remote, local_name).await) });
        }

        while let Some(joined) = set.join_next().await {
            match joined {
                Ok((index, outcome)) => slots[index] = Some(outcome),
                Err(e) => tracing::error!(error = %e, "download task failed"),
            }
        }

        for (slot, href) in slots.into_iter().zip(hrefs) {
            match slot {
                Some(Ok(asset)) => report.assets.push(asset),
                Some(Err(failure)) => report.failures.push(failure),
                None => report.failures.push(DownloadFailure {
                    href,
                    error: Arc::new(FetchError::Aborted("task did not complete".to_string())),
                }),
            }
        }
        report
    }

    async fn download_one(
        &self,
        remote: RemoteUrl,
        local_name: String,
    ) -> Result<LocalAsset, DownloadFailure> {
        let href = remote.href().to_string();
        let dest = self.inner.asset_dir.join(&local_name);

        let (outcome, reused) = match &self.inner.cache {
            Some(cache) => {
                let cell = cache.cell(&href);
                let mut fetched = false;
                let outcome = cell
                    .get_or_init(|| {
                        fetched = true;
                        self.fetch_blocking(href.clone(), dest)
                    })
                    .await
                    .clone();
                (outcome, !fetched)
            }
            None => (self.fetch_blocking(href.clone(), dest).await, false),
        };

        match outcome {
            Ok(bytes) => {
                if reused {
                    tracing::debug!(url = %href, name = %local_name, "reusing image fetched earlier this run");
                } else {
                    tracing::debug!(url = %href, name = %local_name, bytes, "fetched image");
                }
                Ok(LocalAsset {
                    remote,
                    local_name,
                    bytes,
                    reused,
                })
            }
            Err(error) => {
                if reused {
                    tracing::warn!(url = %href, error = %error, "image failed earlier this run; skipping");
                } else {
                    tracing::error!(url = %href, error = %error, "failed to fetch image");
                }
                Err(DownloadFailure { href, error })
            }
        }
    }

    async fn fetch_blocking(&self, href: String, dest: PathBuf) -> SharedOutcome {
        let opts = self.inner.options.clone();
        let joined =
            tokio::task::spawn_blocking(move || fetch_to_file(&href, &dest, &opts)).await;
        match joined {
            Ok(res) => res.map_err(Arc::new),
            Err(e) => Err(Arc::new(FetchError::Aborted(e.to_string()))),
        }
    }
}
