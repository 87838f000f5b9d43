//! Run-scoped download cache keyed by href.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::OnceCell;

use crate::fetch::FetchError;

/// Outcome of one fetch, shared between every caller that asked for the same href.
pub type SharedOutcome = Result<u64, Arc<FetchError>>;

/// Href → single-flight fetch cell. Concurrent callers for the same href await
/// one fetch; later callers get the stored outcome without touching the network.
#[derive(Debug, Default)]
pub struct DownloadCache {
    cells: Mutex<HashMap<String, Arc<OnceCell<SharedOutcome>>>>,
}

impl DownloadCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cell for `href`, created on first use.
    pub fn cell(&self, href: &str) -> Arc<OnceCell<SharedOutcome>> {
        let mut cells = self.cells.lock().unwrap_or_else(|p| p.into_inner());
        Arc::clone(cells.entry(href.to_string()).or_default())
    }

    /// Number of hrefs seen this run.
    pub fn len(&self) -> usize {
        self.cells.lock().map(|c| c.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn same_href_same_cell() {
        let cache = DownloadCache::new();
        let a = cache.cell("http://x.com/a.png");
        let b = cache.cell("http://x.com/a.png");
        let c = cache.cell("http://x.com/c.png");
        assert!(Arc::ptr_eq(&a, &b));
        assert!(!Arc::ptr_eq(&a, &c));
        assert_eq!(cache.len(), 2);

        let first = a.get_or_init(|| async { Ok(7) }).await;
        assert!(matches!(first, Ok(7)));
        let second = b.get_or_init(|| async { Ok(99) }).await;
        assert!(matches!(second, Ok(7)));
    }
}
